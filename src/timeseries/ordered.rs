use std::collections::HashMap;

use super::{validate_all, TimeSeries};
use crate::decoder::{self, RawRecord};
use crate::error::Result;
use crate::models::{Date, DatedRecord, RateRecord};

// ---------------------------------------------------------------------------
// OrderedRecords
// ---------------------------------------------------------------------------

/// Rates records kept in a `Vec`, sorted newest first.
///
/// Use it when the chronological order of records matters to the caller.
/// Exact lookups and neighbour searches are O(log n).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedRecords {
    records: Vec<DatedRecord>,
}

impl OrderedRecords {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from decoded records.
    ///
    /// Records are sorted newest first (ECB documents already are). When a
    /// date occurs more than once, its last occurrence wins.
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut records = validate_all(raw)?;
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let mut deduped: Vec<DatedRecord> = Vec::with_capacity(records.len());
        for record in records {
            match deduped.last_mut() {
                Some(last) if last.date == record.date => *last = record,
                _ => deduped.push(record),
            }
        }

        log::debug!("built ordered rates store with {} records", deduped.len());
        Ok(Self { records: deduped })
    }

    /// Decode an ECB XML document and build the store from it.
    pub fn from_document(bytes: &[u8]) -> Result<Self> {
        Self::from_raw(decoder::decode(bytes)?)
    }

    /// Records, newest first.
    pub fn as_slice(&self) -> &[DatedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatedRecord> {
        self.records.iter()
    }

    pub fn newest(&self) -> Option<&DatedRecord> {
        self.records.first()
    }

    pub fn oldest(&self) -> Option<&DatedRecord> {
        self.records.last()
    }
}

impl TimeSeries for OrderedRecords {
    fn all_records_newest_first(&self) -> Vec<DatedRecord> {
        self.records.clone()
    }

    fn as_date_map(&self) -> HashMap<Date, RateRecord> {
        self.records
            .iter()
            .map(|r| (r.date, r.rates.clone()))
            .collect()
    }

    fn rates_on(&self, date: &Date) -> Option<&RateRecord> {
        // descending order, so the comparison is reversed
        self.records
            .binary_search_by(|r| date.cmp(&r.date))
            .ok()
            .map(|i| &self.records[i].rates)
    }

    fn nearest_earlier(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        let index = self.records.partition_point(|r| r.date >= *date);
        let record = self.records.get(index)?;
        (date.days_since(&record.date) <= i64::from(day_range_limit)).then_some(&record.rates)
    }

    fn nearest_later(&self, date: &Date, day_range_limit: u32) -> Option<&RateRecord> {
        let count = self.records.partition_point(|r| r.date > *date);
        let record = self.records.get(count.checked_sub(1)?)?;
        (record.date.days_since(date) <= i64::from(day_range_limit)).then_some(&record.rates)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl<'a> IntoIterator for &'a OrderedRecords {
    type Item = &'a DatedRecord;
    type IntoIter = std::slice::Iter<'a, DatedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
