//! Error taxonomy for the engine. "No data" is never an error; it is an
//! absent value (`Option::None`) wherever statistics are returned.

use crate::core::date_key::Granularity;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("malformed date key: {0:?}")]
    MalformedKey(String),

    #[error("cannot convert a {from} key to the finer {to} granularity")]
    UnsupportedConversion { from: Granularity, to: Granularity },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("invalid dataset settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
