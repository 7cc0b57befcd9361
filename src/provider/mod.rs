//! Sources of raw ECB rates documents.
//!
//! A [`Provider`] turns a logical [`DataKind`] into the bytes of the matching
//! XML document. [`HttpProvider`] downloads from the ECB website,
//! [`FsProvider`] reads local files, and
//! [`CachedProvider`](crate::cache::CachedProvider) layers an on-disk cache
//! over either one.

pub mod fs;
pub mod http;

pub use fs::FsProvider;
pub use http::HttpProvider;

use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::{RatesError, Result};

/// Fetches raw rates documents.
pub trait Provider: Send + Sync {
    /// Return the raw bytes of the document for `kind`.
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        (**self).fetch(kind)
    }
}

impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        (**self).fetch(kind)
    }
}

// ---------------------------------------------------------------------------
// DataKind
// ---------------------------------------------------------------------------

/// The documents the ECB publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// The most recent snapshot only.
    Latest,
    /// Every snapshot since 1999-01-04.
    TimeSeries,
    /// Snapshots of the last 90 days.
    TimeSeriesLast90Days,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [
        DataKind::Latest,
        DataKind::TimeSeries,
        DataKind::TimeSeriesLast90Days,
    ];

    /// File name the document is stored under, locally and on the ECB site.
    pub fn file_name(&self) -> &'static str {
        match self {
            DataKind::Latest => config::FILE_LATEST,
            DataKind::TimeSeries => config::FILE_TIME_SERIES,
            DataKind::TimeSeriesLast90Days => config::FILE_TIME_SERIES_LAST_90_DAYS,
        }
    }
}

impl TryFrom<u8> for DataKind {
    type Error = RatesError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DataKind::Latest),
            1 => Ok(DataKind::TimeSeries),
            2 => Ok(DataKind::TimeSeriesLast90Days),
            other => Err(RatesError::UnexpectedDataKind(other.to_string())),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Latest => f.write_str("latest"),
            DataKind::TimeSeries => f.write_str("time series"),
            DataKind::TimeSeriesLast90Days => f.write_str("time series (last 90 days)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Span of history requested by the time-series fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    /// The whole history since 1999.
    #[default]
    Whole,
    /// The last 90 days.
    Last90Days,
}

impl Period {
    pub fn data_kind(&self) -> DataKind {
        match self {
            Period::Whole => DataKind::TimeSeries,
            Period::Last90Days => DataKind::TimeSeriesLast90Days,
        }
    }
}

impl TryFrom<u8> for Period {
    type Error = RatesError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Period::Whole),
            1 => Ok(Period::Last90Days),
            other => Err(RatesError::UnexpectedPeriod(other.to_string())),
        }
    }
}

impl FromStr for Period {
    type Err = RatesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "whole" => Ok(Period::Whole),
            "last-90-days" => Ok(Period::Last90Days),
            other => Err(RatesError::UnexpectedPeriod(other.to_string())),
        }
    }
}
