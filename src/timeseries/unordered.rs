use std::collections::HashMap;

use super::{validate_all, TimeSeries};
use crate::decoder::{self, RawRecord};
use crate::error::Result;
use crate::models::{Date, DatedRecord, RateRecord};

// ---------------------------------------------------------------------------
// UnorderedRecords
// ---------------------------------------------------------------------------

/// Rates records indexed by date in a `HashMap`.
///
/// Exact lookups are O(1). Neighbour searches probe one day at a time, so
/// their cost is linear in the day range limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnorderedRecords {
    records: HashMap<Date, RateRecord>,
}

impl UnorderedRecords {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from decoded records. When a date occurs more than
    /// once, its last occurrence wins.
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut store = Self::new();
        for record in validate_all(raw)? {
            store.insert(record);
        }
        log::debug!("built unordered rates store with {} records", store.len());
        Ok(store)
    }

    /// Decode an ECB XML document and build the store from it.
    pub fn from_document(bytes: &[u8]) -> Result<Self> {
        Self::from_raw(decoder::decode(bytes)?)
    }

    pub fn as_map(&self) -> &HashMap<Date, RateRecord> {
        &self.records
    }

    pub fn contains(&self, date: &Date) -> bool {
        self.records.contains_key(date)
    }

    /// Returns `true` when the date was not present before.
    pub(crate) fn insert(&mut self, record: DatedRecord) -> bool {
        self.records.insert(record.date, record.rates).is_none()
    }
}

impl TimeSeries for UnorderedRecords {
    fn all_records_newest_first(&self) -> Vec<DatedRecord> {
        let mut records: Vec<DatedRecord> = self
            .records
            .iter()
            .map(|(date, rates)| DatedRecord::new(*date, rates.clone()))
            .collect();
        records.sort_unstable_by(|a, b| b.date.cmp(&a.date));
        records
    }

    fn as_date_map(&self) -> HashMap<Date, RateRecord> {
        self.records.clone()
    }

    fn rates_on(&self, date: &Date) -> Option<&RateRecord> {
        self.records.get(date)
    }

    fn nearest_earlier(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        (1..=i64::from(day_range_limit)).find_map(|days| self.records.get(&date.add_days(-days)))
    }

    fn nearest_later(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        (1..=i64::from(day_range_limit)).find_map(|days| self.records.get(&date.add_days(days)))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
