use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{RatesError, Result, Side};

// ---------------------------------------------------------------------------
// RateRecord: Currency rates of a single snapshot
// ---------------------------------------------------------------------------

/// Exchange rates of one snapshot, keyed by currency code.
///
/// Every rate is quoted against [`config::BASE_CURRENCY`]. Records built by
/// the stores always carry the base currency at rate `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateRecord {
    rates: HashMap<String, f32>,
}

impl RateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from raw `(currency, rate)` pairs and insert the base
    /// currency at `1.0`, overwriting any published value for it.
    pub fn with_base_currency<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut record: RateRecord = pairs.into_iter().map(|(c, r)| (c.into(), r)).collect();
        record
            .rates
            .insert(config::BASE_CURRENCY.to_string(), 1.0);
        record
    }

    /// Rate of `currency`, or `None` if the snapshot does not carry it.
    pub fn rate(&self, currency: &str) -> Option<f32> {
        self.rates.get(currency).copied()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.rates.iter().map(|(c, r)| (c.as_str(), *r))
    }

    /// Currency codes in lexical order.
    pub fn currencies(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn as_map(&self) -> &HashMap<String, f32> {
        &self.rates
    }

    pub(crate) fn insert(&mut self, currency: &str, rate: f32) {
        self.rates.insert(currency.to_string(), rate);
    }

    /// Convert `amount` of `from` into `to`: `amount * (rate(from) / rate(to))`.
    pub fn convert(&self, amount: f32, from: &str, to: &str) -> Result<f32> {
        let (from_rate, to_rate) = self.conversion_rates(from, to)?;
        Ok(amount * (from_rate / to_rate))
    }

    /// Convert an amount expressed in minor units (cents, pence, ...).
    ///
    /// The rate ratio is taken in `f32` like [`convert`](Self::convert), but
    /// the amount is multiplied in `f64` so amounts above 2^24 keep their
    /// integer precision. The product is rounded half-to-even, so an exact
    /// `.5` lands on the even neighbour.
    pub fn convert_minor_units(&self, amount: i64, from: &str, to: &str) -> Result<i64> {
        let (from_rate, to_rate) = self.conversion_rates(from, to)?;
        let result = amount as f64 * f64::from(from_rate / to_rate);
        Ok(result.round_ties_even() as i64)
    }

    fn conversion_rates(&self, from: &str, to: &str) -> Result<(f32, f32)> {
        let from_rate = self.usable_rate(from, Side::From)?;
        let to_rate = self.usable_rate(to, Side::To)?;
        Ok((from_rate, to_rate))
    }

    fn usable_rate(&self, currency: &str, side: Side) -> Result<f32> {
        let rate = self.rate(currency).ok_or_else(|| RatesError::RateNotFound {
            currency: currency.to_string(),
            side,
        })?;
        // only positive, finite rates take part in a conversion
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RatesError::InvalidRate {
                currency: currency.to_string(),
                rate,
            });
        }
        Ok(rate)
    }
}

impl FromIterator<(String, f32)> for RateRecord {
    fn from_iter<T: IntoIterator<Item = (String, f32)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, f32>> for RateRecord {
    fn from(rates: HashMap<String, f32>) -> Self {
        Self { rates }
    }
}

impl<const N: usize> From<[(&str, f32); N]> for RateRecord {
    fn from(pairs: [(&str, f32); N]) -> Self {
        pairs.into_iter().map(|(c, r)| (c.to_string(), r)).collect()
    }
}

impl<'a> IntoIterator for &'a RateRecord {
    type Item = (&'a String, &'a f32);
    type IntoIter = std::collections::hash_map::Iter<'a, String, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter()
    }
}
