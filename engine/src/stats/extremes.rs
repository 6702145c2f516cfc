//! Record highs and lows across sibling periods (months of a year, days of a
//! month). Used to highlight the best and worst period for each statistic.
//!
//! Only the *highest* count is published: the busiest period gets
//! highlighted, the quietest does not.

use serde::{Deserialize, Serialize};

use crate::stats::period::PeriodStats;

/// The six fields of [`PeriodStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    Total,
    Count,
    Mean,
    Median,
    Min,
    Max,
}

impl StatField {
    pub const ALL: [StatField; 6] = [
        StatField::Total,
        StatField::Count,
        StatField::Mean,
        StatField::Median,
        StatField::Min,
        StatField::Max,
    ];

    pub fn value(self, stats: &PeriodStats) -> f64 {
        match self {
            StatField::Total => stats.total,
            StatField::Count => stats.count as f64,
            StatField::Mean => stats.mean,
            StatField::Median => stats.median,
            StatField::Min => stats.min,
            StatField::Max => stats.max,
        }
    }
}

/// All fields are `None` when no sibling had data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodExtremes {
    pub highest_total: Option<f64>,
    pub lowest_total: Option<f64>,
    pub highest_count: Option<usize>,
    pub highest_mean: Option<f64>,
    pub lowest_mean: Option<f64>,
    pub highest_median: Option<f64>,
    pub lowest_median: Option<f64>,
    pub highest_max: Option<f64>,
    pub lowest_max: Option<f64>,
    pub highest_min: Option<f64>,
    pub lowest_min: Option<f64>,
    // Only used to tell a busiest period apart from a tie.
    #[serde(skip)]
    lowest_count: Option<usize>,
}

impl PeriodExtremes {
    pub fn is_empty(&self) -> bool {
        self.highest_count.is_none()
    }

    pub fn highest(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::Total => self.highest_total,
            StatField::Count => self.highest_count.map(|count| count as f64),
            StatField::Mean => self.highest_mean,
            StatField::Median => self.highest_median,
            StatField::Min => self.highest_min,
            StatField::Max => self.highest_max,
        }
    }

    pub fn lowest(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::Total => self.lowest_total,
            StatField::Count => None,
            StatField::Mean => self.lowest_mean,
            StatField::Median => self.lowest_median,
            StatField::Min => self.lowest_min,
            StatField::Max => self.lowest_max,
        }
    }

    /// Whether `value` is a record for `field`: `Some(true)` for the highest,
    /// `Some(false)` for the lowest, `None` otherwise. When every sibling ties
    /// there is no record to highlight.
    ///
    /// The result feeds straight into
    /// [`resolve_from_direction`](crate::core::valence::resolve_from_direction).
    pub fn record_direction(&self, field: StatField, value: f64) -> Option<bool> {
        let highest = self.highest(field)?;
        if field == StatField::Count && self.lowest_count == self.highest_count {
            return None;
        }
        let lowest = self.lowest(field);
        if lowest == Some(highest) {
            return None;
        }
        if value == highest {
            Some(true)
        } else if lowest == Some(value) {
            Some(false)
        } else {
            None
        }
    }
}

/// Per-field minimum and maximum across the present entries of `stats`.
/// Absent entries are skipped, never treated as zero.
pub fn compute_extremes<'a, I>(stats: I) -> PeriodExtremes
where
    I: IntoIterator<Item = Option<&'a PeriodStats>>,
{
    let present: Vec<&PeriodStats> = stats.into_iter().flatten().collect();
    if present.is_empty() {
        return PeriodExtremes::default();
    }

    let (lowest_total, highest_total) = bounds(&present, StatField::Total);
    let (lowest_mean, highest_mean) = bounds(&present, StatField::Mean);
    let (lowest_median, highest_median) = bounds(&present, StatField::Median);
    let (lowest_max, highest_max) = bounds(&present, StatField::Max);
    let (lowest_min, highest_min) = bounds(&present, StatField::Min);

    PeriodExtremes {
        highest_total: Some(highest_total),
        lowest_total: Some(lowest_total),
        highest_count: present.iter().map(|stats| stats.count).max(),
        lowest_count: present.iter().map(|stats| stats.count).min(),
        highest_mean: Some(highest_mean),
        lowest_mean: Some(lowest_mean),
        highest_median: Some(highest_median),
        lowest_median: Some(lowest_median),
        highest_max: Some(highest_max),
        lowest_max: Some(lowest_max),
        highest_min: Some(highest_min),
        lowest_min: Some(lowest_min),
    }
}

// `present` is never empty here.
fn bounds(present: &[&PeriodStats], field: StatField) -> (f64, f64) {
    let first = field.value(present[0]);
    present.iter().skip(1).fold((first, first), |(lo, hi), stats| {
        let value = field.value(stats);
        (lo.min(value), hi.max(value))
    })
}
