use std::path::PathBuf;
use std::time::Duration;

use crate::models::Date;

pub const URL_LATEST: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";
pub const URL_TIME_SERIES: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist.xml";
pub const URL_TIME_SERIES_LAST_90_DAYS: &str =
    "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist-90d.xml";

/// Currency every published rate is quoted against. Always present in a
/// constructed record with rate `1.0`.
pub const BASE_CURRENCY: &str = "EUR";

/// Earliest date the ECB publishes reference rates for (1999-01-04).
// Option::unwrap is not const on older toolchains, hence the match.
pub const MIN_DATE: Date = Date::from_naive(match chrono::NaiveDate::from_ymd_opt(1999, 1, 4) {
    Some(date) => date,
    None => panic!("invalid minimum date"),
});

/// Sane default for the `day_range_limit` argument of approximation queries.
///
/// The largest gap between two published snapshots is 5 days (as of
/// 2024-04-09). The limit only bounds the neighbour search.
pub const DEFAULT_DAY_RANGE_LIMIT: u32 = 100;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Cached documents younger than this are served without a download.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

pub const FILE_LATEST: &str = "eurofxref-daily.xml";
pub const FILE_TIME_SERIES: &str = "eurofxref-hist.xml";
pub const FILE_TIME_SERIES_LAST_90_DAYS: &str = "eurofxref-hist-90d.xml";

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("ecb-rates-sdk")
    } else {
        PathBuf::from(".ecb-rates-sdk-cache")
    }
}
