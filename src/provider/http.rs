use std::time::Duration;

use reqwest::blocking::Client;

use super::{DataKind, Provider};
use crate::config;
use crate::error::Result;

/// Downloads rates documents with HTTP GET requests.
pub struct HttpProvider {
    url_latest: String,
    url_time_series: String,
    url_time_series_last_90_days: String,
    client: Client,
}

impl HttpProvider {
    /// Create a provider for the given document URLs.
    pub fn new(
        url_latest: impl Into<String>,
        url_time_series: impl Into<String>,
        url_time_series_last_90_days: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            url_latest: url_latest.into(),
            url_time_series: url_time_series.into(),
            url_time_series_last_90_days: url_time_series_last_90_days.into(),
            client,
        })
    }

    /// Create a provider pointing at the ECB website.
    pub fn ecb(timeout: Duration) -> Result<Self> {
        Self::new(
            config::URL_LATEST,
            config::URL_TIME_SERIES,
            config::URL_TIME_SERIES_LAST_90_DAYS,
            timeout,
        )
    }

    pub fn url(&self, kind: DataKind) -> &str {
        match kind {
            DataKind::Latest => &self.url_latest,
            DataKind::TimeSeries => &self.url_time_series,
            DataKind::TimeSeriesLast90Days => &self.url_time_series_last_90_days,
        }
    }
}

impl Provider for HttpProvider {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        let url = self.url(kind);
        log::info!("Downloading {}", url);
        let resp = self.client.get(url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;
        Ok(bytes.to_vec())
    }
}
