//! Async wrapper around [`EcbRatesSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Downloads use a blocking HTTP client and decoding the full history is
//! CPU-bound, so neither should run on the event loop directly.
//!
//! # Example
//!
//! ```no_run
//! use ecb_rates_sdk::{AsyncEcbRatesSdk, Period, TimeSeries};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncEcbRatesSdk::builder().build().await.unwrap();
//!
//!     let history = sdk.time_series(Period::Last90Days).await.unwrap();
//!     println!("{} snapshots", history.len());
//!
//!     // Run any sync SDK method via closure
//!     let latest = sdk.run(|s| s.latest()).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::error::{RatesError, Result};
use crate::models::DatedRecord;
use crate::provider::{Period, Provider};
use crate::timeseries::{HybridRecords, OrderedRecords, UnorderedRecords};
use crate::EcbRatesSdk;

// ---------------------------------------------------------------------------
// AsyncEcbRatesSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncEcbRatesSdk`] instance.
pub struct AsyncEcbRatesSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    max_age: Duration,
    provider: Option<Box<dyn Provider>>,
}

impl Default for AsyncEcbRatesSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            max_age: config::DEFAULT_MAX_AGE,
            provider: None,
        }
    }
}

impl AsyncEcbRatesSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long a cached document is served before it is re-downloaded.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Use a custom data provider instead of the cached ECB download.
    pub fn provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncEcbRatesSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = EcbRatesSdk::builder();
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(provider) = self.provider {
                builder = builder.provider(provider);
            }
            builder = builder
                .offline(self.offline)
                .timeout(self.timeout)
                .max_age(self.max_age);
            let sdk = builder.build()?;
            Ok(AsyncEcbRatesSdk {
                inner: Some(Arc::new(sdk)),
            })
        })
        .await
        .map_err(|e| RatesError::Runtime(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncEcbRatesSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`EcbRatesSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The SDK holds no mutable state, so it is
/// shared between tasks behind an [`Arc`] without locking.
pub struct AsyncEcbRatesSdk {
    inner: Option<Arc<EcbRatesSdk>>,
}

impl AsyncEcbRatesSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncEcbRatesSdkBuilder {
        AsyncEcbRatesSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&EcbRatesSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&EcbRatesSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.blocking()?;
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| RatesError::Runtime(format!("Task join error: {e}")))?
    }

    /// Fetch the latest available rates asynchronously.
    pub async fn latest(&self) -> Result<DatedRecord> {
        self.run(|s| s.latest()).await
    }

    /// Fetch the rates of `period` as an [`UnorderedRecords`] store.
    pub async fn time_series(&self, period: Period) -> Result<UnorderedRecords> {
        self.run(move |s| s.time_series(period)).await
    }

    /// Fetch the rates of `period` as an [`OrderedRecords`] store.
    pub async fn ordered_time_series(&self, period: Period) -> Result<OrderedRecords> {
        self.run(move |s| s.ordered_time_series(period)).await
    }

    /// Fetch the rates of `period` as a [`HybridRecords`] store.
    pub async fn hybrid_time_series(&self, period: Period) -> Result<HybridRecords> {
        self.run(move |s| s.hybrid_time_series(period)).await
    }

    /// Return the shared sync SDK.
    pub fn blocking(&self) -> Result<Arc<EcbRatesSdk>> {
        self.inner
            .clone()
            .ok_or_else(|| RatesError::Runtime("SDK already closed".into()))
    }
}

impl Drop for AsyncEcbRatesSdk {
    fn drop(&mut self) {
        // a blocking reqwest client must not be dropped on a runtime thread
        if let Some(sdk) = self.inner.take() {
            if tokio::runtime::Handle::try_current().is_ok() {
                std::thread::spawn(move || drop(sdk));
            }
        }
    }
}
