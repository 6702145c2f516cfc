//! Per-dataset configuration: valence and tracking mode.
//!
//! Settings arrive as JSON from whatever owns the dataset record, e.g.
//! `{"valence": "negative", "tracking": "trend"}`. Missing fields fall back to
//! `positive` / `none`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::TrackingMode;
use crate::core::valence::Valence;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub valence: Valence,
    pub tracking: TrackingMode,
}

impl DatasetSettings {
    pub fn new(valence: Valence, tracking: TrackingMode) -> Self {
        Self { valence, tracking }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(raw)?;
        debug!(
            valence = ?settings.valence,
            tracking = ?settings.tracking,
            "loaded dataset settings"
        );
        Ok(settings)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
