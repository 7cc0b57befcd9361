//! Time-series stores of dated rates records.
//!
//! Three layouts implement one contract, [`TimeSeries`]:
//!
//! - [`OrderedRecords`] keeps records newest first in a `Vec`. Exact lookups
//!   and neighbour searches are binary searches.
//! - [`UnorderedRecords`] indexes records by date in a `HashMap`. Exact
//!   lookups are O(1); neighbour searches probe day by day.
//! - [`HybridRecords`] is an [`UnorderedRecords`] that also remembers the
//!   order records were ingested in.
//!
//! Layouts only supply exact lookup and the bounded nearest-earlier /
//! nearest-later search. Approximation and conversion are provided methods
//! and therefore behave identically on every layout.
//!
//! Stores are built once from decoded records and never mutated afterwards,
//! so a store can be shared between threads for reading.

pub mod hybrid;
pub mod ordered;
pub mod unordered;

pub use hybrid::HybridRecords;
pub use ordered::OrderedRecords;
pub use unordered::UnorderedRecords;

use std::collections::HashMap;

use crate::decoder::RawRecord;
use crate::error::{RatesError, Result};
use crate::models::{Date, DatedRecord, RateRecord};

/// Shared query interface of every rates store.
pub trait TimeSeries {
    /// All records in anti-chronological order.
    fn all_records_newest_first(&self) -> Vec<DatedRecord>;

    /// All records indexed by date.
    fn as_date_map(&self) -> HashMap<Date, RateRecord>;

    /// Rates record published exactly on `date`.
    fn rates_on(&self, date: &Date) -> Option<&RateRecord>;

    /// Closest record strictly before `date`, at most `day_range_limit` days
    /// away.
    fn nearest_earlier(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord>;

    /// Closest record strictly after `date`, at most `day_range_limit` days
    /// away.
    fn nearest_later(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord>;

    /// Number of records in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rate of `currency` published exactly on `date`.
    fn rate_on(&self, date: &Date, currency: &str) -> Option<f32> {
        self.rates_on(date)?.rate(currency)
    }

    /// Approximate the rates of `date` from its nearest neighbours within
    /// `day_range_limit` days.
    ///
    /// With a single neighbour its record is returned as is. With both, the
    /// result holds every currency of either side: currencies present on both
    /// sides get the plain mean of the two rates (not weighted by distance),
    /// one-sided currencies keep their rate.
    fn approximate_rates(&self, date: &Date, day_range_limit: u32) -> Option<RateRecord> {
        let earlier = self.nearest_earlier(date, day_range_limit);
        let later = self.nearest_later(date, day_range_limit);

        match (earlier, later) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (Some(earlier), Some(later)) => Some(interpolate(earlier, later)),
        }
    }

    /// Approximate a single currency's rate on `date`, following the policy
    /// of [`approximate_rates`](TimeSeries::approximate_rates).
    fn approximate_rate(&self, date: &Date, currency: &str, day_range_limit: u32) -> Option<f32> {
        let earlier = self.nearest_earlier(date, day_range_limit);
        let later = self.nearest_later(date, day_range_limit);

        match (earlier, later) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => only.rate(currency),
            (Some(earlier), Some(later)) => {
                match (earlier.rate(currency), later.rate(currency)) {
                    (Some(e), Some(l)) => Some(mean(e, l)),
                    (e, l) => e.or(l),
                }
            }
        }
    }

    /// Convert `amount` using the rates published exactly on `date`.
    fn convert(&self, date: &Date, amount: f32, from: &str, to: &str) -> Result<f32> {
        self.rates_on(date)
            .ok_or_else(|| record_not_found(date))?
            .convert(amount, from, to)
    }

    /// Convert `amount` using rates approximated around `date`.
    fn convert_approximate(
        &self,
        date: &Date,
        amount: f32,
        from: &str,
        to: &str,
        day_range_limit: u32,
    ) -> Result<f32> {
        self.approximate_rates(date, day_range_limit)
            .ok_or_else(|| approximation_failed(date, day_range_limit))?
            .convert(amount, from, to)
    }

    /// Convert an amount in minor units using the rates published exactly on
    /// `date`. Rounds half to even.
    fn convert_minor_units(&self, date: &Date, amount: i64, from: &str, to: &str) -> Result<i64> {
        self.rates_on(date)
            .ok_or_else(|| record_not_found(date))?
            .convert_minor_units(amount, from, to)
    }

    /// Convert an amount in minor units using rates approximated around
    /// `date`. Rounds half to even.
    fn convert_minor_units_approximate(
        &self,
        date: &Date,
        amount: i64,
        from: &str,
        to: &str,
        day_range_limit: u32,
    ) -> Result<i64> {
        self.approximate_rates(date, day_range_limit)
            .ok_or_else(|| approximation_failed(date, day_range_limit))?
            .convert_minor_units(amount, from, to)
    }
}

fn mean(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

fn interpolate(earlier: &RateRecord, later: &RateRecord) -> RateRecord {
    let mut result = RateRecord::new();
    for (currency, earlier_rate) in earlier.iter() {
        let rate = match later.rate(currency) {
            Some(later_rate) => mean(earlier_rate, later_rate),
            None => earlier_rate,
        };
        result.insert(currency, rate);
    }
    for (currency, later_rate) in later.iter() {
        if !result.contains(currency) {
            result.insert(currency, later_rate);
        }
    }
    result
}

fn record_not_found(date: &Date) -> RatesError {
    RatesError::RatesRecordNotFound {
        date: date.to_string(),
    }
}

fn approximation_failed(date: &Date, day_range_limit: u32) -> RatesError {
    RatesError::ApproximationFailed {
        date: date.to_string(),
        day_range_limit,
    }
}

/// Validate every decoded record, failing on the first bad date.
fn validate_all<I>(raw: I) -> Result<Vec<DatedRecord>>
where
    I: IntoIterator<Item = RawRecord>,
{
    raw.into_iter().map(DatedRecord::from_raw).collect()
}
