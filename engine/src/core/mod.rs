//! Calendar keys, valence and dataset settings shared by every computation.

pub mod date_key;
pub mod settings;
pub mod valence;

pub use date_key::{DateKey, DayKey, Granularity, MonthKey, YearKey};
pub use settings::DatasetSettings;
pub use valence::{Valence, ValenceClass, ValencePayload};
