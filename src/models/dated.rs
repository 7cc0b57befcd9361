use serde::{Deserialize, Serialize};

use super::date::Date;
use super::record::RateRecord;
use crate::decoder::RawRecord;
use crate::error::Result;

// ---------------------------------------------------------------------------
// DatedRecord: Rates record of a specific date
// ---------------------------------------------------------------------------

/// Exchange rates published for a specific date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRecord {
    pub date: Date,
    pub rates: RateRecord,
}

impl DatedRecord {
    pub fn new(date: Date, rates: RateRecord) -> Self {
        Self { date, rates }
    }

    /// Validate a decoded snapshot: parse its date and build its record with
    /// the base currency inserted.
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let date: Date = raw.date.parse()?;
        let rates = RateRecord::with_base_currency(raw.rates.into_iter().map(|r| (r.currency, r.rate)));
        Ok(Self { date, rates })
    }

    pub fn rate(&self, currency: &str) -> Option<f32> {
        self.rates.rate(currency)
    }

    pub fn convert(&self, amount: f32, from: &str, to: &str) -> Result<f32> {
        self.rates.convert(amount, from, to)
    }

    pub fn convert_minor_units(&self, amount: i64, from: &str, to: &str) -> Result<i64> {
        self.rates.convert_minor_units(amount, from, to)
    }
}
