//! Shared test fixtures for the ECB rates SDK integration tests.
//!
//! Provides sample decoded datasets, an XML document builder, stub providers
//! for failure injection, and a loopback HTTP server serving canned documents.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use ecb_rates_sdk::{DataKind, Date, Provider, RatesError, RawRate, RawRecord, Result};

/// Directory holding the XML fixture documents.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(data_dir().join(name)).unwrap()
}

pub fn date(s: &str) -> Date {
    s.parse().unwrap()
}

/// Build a decoded record from a date string and `(currency, rate)` pairs.
pub fn raw(date: &str, rates: &[(&str, f32)]) -> RawRecord {
    RawRecord::new(
        date,
        rates.iter().map(|(c, r)| RawRate::new(*c, *r)).collect(),
    )
}

/// A newest-first dataset with the Easter 2024 gap (March 29th to April 1st)
/// and a currency that disappears half way through.
pub fn sample_raw() -> Vec<RawRecord> {
    vec![
        raw("2024-04-05", &[("USD", 1.0841), ("JPY", 164.10), ("GBP", 0.85773)]),
        raw("2024-04-04", &[("USD", 1.0852), ("JPY", 164.69), ("GBP", 0.85740)]),
        raw("2024-04-03", &[("USD", 1.0783), ("JPY", 163.66), ("GBP", 0.85620)]),
        raw("2024-04-02", &[("USD", 1.0749), ("JPY", 162.92), ("GBP", 0.85631)]),
        raw("2024-03-28", &[("USD", 1.0811), ("JPY", 163.61), ("GBP", 0.85518), ("RUB", 99.5)]),
        raw("2024-03-27", &[("USD", 1.0826), ("JPY", 164.23), ("GBP", 0.85735), ("RUB", 99.8)]),
    ]
}

/// Two records 29 days apart.
pub fn two_records_raw() -> Vec<RawRecord> {
    vec![
        raw("2000-01-30", &[("USD", 0.1), ("RUB", 0.5)]),
        raw("2000-01-01", &[("USD", 1.0), ("RUB", 0.1)]),
    ]
}

/// Render decoded records as an ECB XML document.
pub fn ecb_document(records: &[RawRecord]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gesmes:Envelope xmlns:gesmes=\"http://www.gesmes.org/xml/2002-08-01\" \
         xmlns=\"http://www.ecb.int/vocabulary/2002-08-01/eurofxref\">\n\
         <gesmes:subject>Reference rates</gesmes:subject>\n\
         <gesmes:Sender><gesmes:name>European Central Bank</gesmes:name></gesmes:Sender>\n\
         <Cube>\n",
    );
    for record in records {
        doc.push_str(&format!("<Cube time=\"{}\">\n", record.date));
        for rate in &record.rates {
            doc.push_str(&format!(
                "<Cube currency=\"{}\" rate=\"{}\"/>\n",
                rate.currency, rate.rate
            ));
        }
        doc.push_str("</Cube>\n");
    }
    doc.push_str("</Cube>\n</gesmes:Envelope>\n");
    doc
}

/// Relative float comparison for `f32` conversion results.
pub fn assert_close(actual: f32, expected: f32) {
    let tolerance = 1e-5 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Stub providers
// ---------------------------------------------------------------------------

/// Serves fixed documents and counts how often it was asked.
#[derive(Clone, Default)]
pub struct StaticProvider {
    documents: HashMap<DataKind, Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: DataKind, document: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(kind, document.into());
        self
    }

    /// Serve the XML fixtures from `tests/data`.
    pub fn fixtures() -> Self {
        Self::new()
            .with(DataKind::Latest, fixture("eurofxref-daily.xml"))
            .with(DataKind::TimeSeries, fixture("eurofxref-hist.xml"))
            .with(DataKind::TimeSeriesLast90Days, fixture("eurofxref-hist-90d.xml"))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Provider for StaticProvider {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(&kind)
            .cloned()
            .ok_or_else(|| RatesError::NotFound(format!("no {kind} document")))
    }
}

/// Always fails.
pub struct BrokenProvider;

impl Provider for BrokenProvider {
    fn fetch(&self, _kind: DataKind) -> Result<Vec<u8>> {
        Err(RatesError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "I failed again",
        )))
    }
}

/// Returns bytes that are not an XML document.
pub struct InvalidProvider;

impl Provider for InvalidProvider {
    fn fetch(&self, _kind: DataKind) -> Result<Vec<u8>> {
        Ok(b"some invalid data".to_vec())
    }
}

// ---------------------------------------------------------------------------
// Loopback HTTP server
// ---------------------------------------------------------------------------

/// A minimal HTTP/1.1 server on `127.0.0.1` serving the fixture documents
/// under `/<file name>`. When `broken`, every request gets a 500.
///
/// The accept loop runs on a detached thread for the rest of the test
/// process.
pub struct TestHttpServer {
    pub base_url: String,
}

impl TestHttpServer {
    pub fn start(broken: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                // drain headers
                let mut line = String::new();
                while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
                    line.clear();
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let file = path.trim_start_matches('/');
                let (status, body) = if broken {
                    ("500 Internal Server Error", b"dude, I am broken!".to_vec())
                } else {
                    match std::fs::read(data_dir().join(file)) {
                        Ok(body) if !file.is_empty() => ("200 OK", body),
                        _ => ("404 Not Found", Vec::new()),
                    }
                };

                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn url(&self, kind: DataKind) -> String {
        format!("{}/{}", self.base_url, kind.file_name())
    }
}
