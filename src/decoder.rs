//! Decoder for the ECB euro foreign exchange reference rates XML documents.
//!
//! All three published documents (daily, full history, last 90 days) share
//! one layout:
//!
//! ```xml
//! <gesmes:Envelope>
//!   <Cube>
//!     <Cube time="2024-04-05">
//!       <Cube currency="USD" rate="1.0841"/>
//!       ...
//!     </Cube>
//!     ...
//!   </Cube>
//! </gesmes:Envelope>
//! ```
//!
//! Decoding yields [`RawRecord`]s, which is the input every store is built
//! from. Dates stay unparsed here; they are validated at store construction.

use serde::Deserialize;

use crate::error::{RatesError, Result};

// ---------------------------------------------------------------------------
// RawRecord: Decoded but unvalidated snapshot
// ---------------------------------------------------------------------------

/// One decoded snapshot: a `YYYY-MM-DD` date string and its published rates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "time")]
    pub date: String,
    #[serde(rename = "Cube", default)]
    pub rates: Vec<RawRate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRate {
    pub currency: String,
    pub rate: f32,
}

impl RawRecord {
    pub fn new<S: Into<String>>(date: S, rates: Vec<RawRate>) -> Self {
        Self {
            date: date.into(),
            rates,
        }
    }
}

impl RawRate {
    pub fn new<S: Into<String>>(currency: S, rate: f32) -> Self {
        Self {
            currency: currency.into(),
            rate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Cube", default)]
    cube: Option<OuterCube>,
}

#[derive(Debug, Deserialize)]
struct OuterCube {
    #[serde(rename = "Cube", default)]
    records: Vec<RawRecord>,
}

/// Decode an ECB rates document into its snapshots, in document order
/// (newest first for the ECB history files).
pub fn decode(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let envelope: Envelope =
        serde_xml_rs::from_reader(bytes).map_err(|e| RatesError::Xml(e.to_string()))?;
    let records = envelope.cube.map(|c| c.records).unwrap_or_default();
    log::debug!("decoded {} rate records", records.len());
    Ok(records)
}

/// Decode a document and return its first snapshot, which is the only one in
/// the daily document.
pub fn decode_latest(bytes: &[u8]) -> Result<RawRecord> {
    decode(bytes)?
        .into_iter()
        .next()
        .ok_or(RatesError::EmptyDocument)
}
