//! Calendar-keyed aggregation engine for Tallymark.
//!
//! Numbers are logged against days; this crate summarizes them per day, month
//! and year, finds record periods, classifies values by the dataset's valence
//! and turns a period's numbers into chart points. Everything is a pure
//! function of its input: rebuild from scratch whenever the entries change.
//!
//! Rendering, persistence and number formatting live outside this crate.

pub mod charts;
pub mod core;
pub mod entries;
pub mod error;
pub mod overview;
pub mod stats;

pub use error::{EngineError, Result};
