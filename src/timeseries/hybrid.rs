use std::collections::HashMap;

use super::{validate_all, TimeSeries, UnorderedRecords};
use crate::decoder::{self, RawRecord};
use crate::error::Result;
use crate::models::{Date, DatedRecord, RateRecord};

// ---------------------------------------------------------------------------
// HybridRecords
// ---------------------------------------------------------------------------

/// An [`UnorderedRecords`] that also keeps the dates of its records in the
/// order they were ingested.
///
/// Queries run against the map. Every date of the map appears exactly once
/// in the date list and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HybridRecords {
    dates: Vec<Date>,
    records: UnorderedRecords,
}

impl HybridRecords {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from decoded records. A repeated date keeps its first
    /// position in the date list and the rates of its last occurrence.
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut dates = Vec::new();
        let mut records = UnorderedRecords::new();
        for record in validate_all(raw)? {
            let date = record.date;
            if records.insert(record) {
                dates.push(date);
            }
        }
        log::debug!("built hybrid rates store with {} records", dates.len());
        Ok(Self { dates, records })
    }

    /// Decode an ECB XML document and build the store from it.
    pub fn from_document(bytes: &[u8]) -> Result<Self> {
        Self::from_raw(decoder::decode(bytes)?)
    }

    /// Dates in ingestion order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The underlying date-indexed store.
    pub fn unordered(&self) -> &UnorderedRecords {
        &self.records
    }

    /// All records in ingestion order.
    pub fn records_in_ingestion_order(&self) -> Vec<DatedRecord> {
        self.dates
            .iter()
            .filter_map(|date| {
                self.records
                    .rates_on(date)
                    .map(|rates| DatedRecord::new(*date, rates.clone()))
            })
            .collect()
    }
}

impl TimeSeries for HybridRecords {
    fn all_records_newest_first(&self) -> Vec<DatedRecord> {
        let mut records = self.records_in_ingestion_order();
        // a no-op pass for ECB documents, which are ingested newest first
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    fn as_date_map(&self) -> HashMap<Date, RateRecord> {
        self.records.as_date_map()
    }

    fn rates_on(&self, date: &Date) -> Option<&RateRecord> {
        self.records.rates_on(date)
    }

    fn nearest_earlier(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        self.records.nearest_earlier(date, day_range_limit)
    }

    fn nearest_later(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        self.records.nearest_later(date, day_range_limit)
    }

    fn len(&self) -> usize {
        self.dates.len()
    }
}
