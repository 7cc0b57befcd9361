//! ECB exchange rates SDK for Rust.
//!
//! Fetches the euro foreign exchange reference rates published by the
//! European Central Bank, caches the documents locally, and loads them into
//! in-memory time-series stores that support exact lookups, interpolation of
//! missing days, and currency conversion.
//!
//! # Quick start
//!
//! ```no_run
//! use ecb_rates_sdk::{EcbRatesSdk, Period, TimeSeries, DEFAULT_DAY_RANGE_LIMIT};
//!
//! let sdk = EcbRatesSdk::builder().build().unwrap();
//!
//! // Latest snapshot
//! let latest = sdk.latest().unwrap();
//! let usd = latest.convert(100.0, "EUR", "USD").unwrap();
//!
//! // Historical rates, interpolated over weekends and holidays
//! let history = sdk.time_series(Period::Whole).unwrap();
//! let date = "2024-04-06".parse().unwrap();
//! let rate = history.approximate_rate(&date, "USD", DEFAULT_DAY_RANGE_LIMIT);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod decoder;
pub mod error;
pub mod models;
pub mod provider;
pub mod timeseries;

#[cfg(feature = "async")]
pub use async_client::AsyncEcbRatesSdk;
pub use cache::CachedProvider;
pub use config::{BASE_CURRENCY, DEFAULT_DAY_RANGE_LIMIT, MIN_DATE};
pub use decoder::{RawRate, RawRecord};
pub use error::{RatesError, Result, Side};
pub use models::{Date, DatedRecord, RateRecord};
pub use provider::{DataKind, FsProvider, HttpProvider, Period, Provider};
pub use timeseries::{HybridRecords, OrderedRecords, TimeSeries, UnorderedRecords};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// EcbRatesSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`EcbRatesSdk`] instance.
///
/// Use [`EcbRatesSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](EcbRatesSdkBuilder::build) to create the SDK.
pub struct EcbRatesSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    max_age: Duration,
    provider: Option<Box<dyn Provider>>,
}

impl Default for EcbRatesSdkBuilder {
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

impl EcbRatesSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/ecb-rates-sdk` on Linux, `~/Library/Caches/ecb-rates-sdk`
    /// on macOS, `%LOCALAPPDATA%\ecb-rates-sdk` on Windows).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads from the ECB and only uses
    /// previously cached documents. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long a cached document is served before it is re-downloaded.
    ///
    /// Defaults to one hour.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Use a custom data provider instead of the cached ECB download.
    ///
    /// The provider is used as is: cache directory, offline mode, timeout
    /// and max age do not apply to it.
    pub fn provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the SDK.
    ///
    /// Without a custom provider this creates the cache directory and the
    /// HTTP client. Nothing is downloaded until the first fetch.
    pub fn build(self) -> Result<EcbRatesSdk> {
        let (provider, source) = match self.provider {
            Some(provider) => (provider, Source::Custom),
            None => {
                let http = HttpProvider::ecb(self.timeout)?;
                let cached =
                    CachedProvider::new(Box::new(http), self.cache_dir, self.offline, self.max_age)?;
                let source = Source::Cache {
                    cache_dir: cached.cache_dir.clone(),
                    offline: cached.offline,
                };
                (Box::new(cached) as Box<dyn Provider>, source)
            }
        };
        Ok(EcbRatesSdk { provider, source })
    }
}

enum Source {
    Cache { cache_dir: PathBuf, offline: bool },
    Custom,
}

// ---------------------------------------------------------------------------
// EcbRatesSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Owns a [`Provider`] and builds fresh rates stores from every fetch.
/// Created via [`EcbRatesSdk::builder()`].
pub struct EcbRatesSdk {
    provider: Box<dyn Provider>,
    source: Source,
}

impl EcbRatesSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> EcbRatesSdkBuilder {
        EcbRatesSdkBuilder::default()
    }

    /// Fetch the raw document for `kind`.
    pub fn fetch_raw(&self, kind: DataKind) -> Result<Vec<u8>> {
        self.provider.fetch(kind)
    }

    /// Fetch the latest available rates.
    pub fn latest(&self) -> Result<DatedRecord> {
        let bytes = self.fetch_raw(DataKind::Latest)?;
        DatedRecord::from_raw(decoder::decode_latest(&bytes)?)
    }

    /// Fetch the rates of `period` as an [`UnorderedRecords`] store.
    pub fn time_series(&self, period: Period) -> Result<UnorderedRecords> {
        UnorderedRecords::from_raw(self.fetch_records(period)?)
    }

    /// Fetch the rates of `period` as an [`OrderedRecords`] store.
    pub fn ordered_time_series(&self, period: Period) -> Result<OrderedRecords> {
        OrderedRecords::from_raw(self.fetch_records(period)?)
    }

    /// Fetch the rates of `period` as a [`HybridRecords`] store.
    pub fn hybrid_time_series(&self, period: Period) -> Result<HybridRecords> {
        HybridRecords::from_raw(self.fetch_records(period)?)
    }

    fn fetch_records(&self, period: Period) -> Result<Vec<RawRecord>> {
        let bytes = self.fetch_raw(period.data_kind())?;
        decoder::decode(&bytes)
    }

    /// Return a reference to the underlying [`Provider`].
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for EcbRatesSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Cache { cache_dir, offline } => write!(
                f,
                "EcbRatesSdk(cache_dir={}, offline={})",
                cache_dir.display(),
                offline
            ),
            Source::Custom => write!(f, "EcbRatesSdk(provider=custom)"),
        }
    }
}
