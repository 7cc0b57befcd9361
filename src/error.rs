use std::fmt;

/// Which leg of a conversion a currency lookup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    #[error("exchange rate of {currency} ({side} currency) was not found")]
    RateNotFound { currency: String, side: Side },

    #[error("exchange rates record was not found on {date}")]
    RatesRecordNotFound { date: String },

    #[error("approximation of exchange rates on {date} within {day_range_limit} days did not succeed")]
    ApproximationFailed { date: String, day_range_limit: u32 },

    #[error("invalid exchange rate {rate} for {currency}")]
    InvalidRate { currency: String, rate: f32 },

    #[error("parse date {input:?}: {reason}")]
    DateParse { input: String, reason: String },

    #[error("unexpected period: {0}")]
    UnexpectedPeriod(String),

    #[error("unexpected data kind: {0}")]
    UnexpectedDataKind(String),

    #[error("document does not contain any rate records")]
    EmptyDocument,

    #[error("XML error: {0}")]
    Xml(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, RatesError>;
