//! Everything a year or month page needs, computed in one pass.
//!
//! Each overview is rebuilt from scratch whenever the underlying entries
//! change; nothing is cached between builds.
//!
//! ```
//! use engine::core::{DatasetSettings, MonthKey};
//! use engine::entries::{group_by_day, Entry};
//! use engine::overview::MonthOverview;
//!
//! let data = group_by_day([
//!     Entry::new("2024-02-28".parse().unwrap(), 8.0),
//!     Entry::new("2024-03-01".parse().unwrap(), 10.0),
//!     Entry::new("2024-03-02".parse().unwrap(), 12.0),
//! ]);
//! let settings = DatasetSettings::from_json_str(r#"{"tracking":"trend"}"#).unwrap();
//! let march = MonthKey::new(2024, 3).unwrap();
//!
//! let overview = MonthOverview::build(&data, &march, settings);
//! assert_eq!(overview.stats.unwrap().total, 22.0);
//! assert_eq!(overview.numbers, [8.0, 10.0, 12.0]);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::charts::{chart_numbers, to_chart_points, with_carried_point, ChartPoint};
use crate::core::date_key::{DayKey, MonthKey, YearKey};
use crate::core::settings::DatasetSettings;
use crate::core::valence::ValenceClass;
use crate::entries::DayData;
use crate::stats::extremes::{compute_extremes, PeriodExtremes, StatField};
use crate::stats::period::{
    compute_stats, month_values, roll_up_days, roll_up_months, roll_up_year, PeriodStats,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverview {
    pub year: YearKey,
    pub settings: DatasetSettings,
    /// Stats over every entry of the year.
    pub stats: Option<PeriodStats>,
    /// Month number (1..=12) to that month's stats.
    pub months: BTreeMap<u8, Option<PeriodStats>>,
    /// Records across the months.
    pub extremes: PeriodExtremes,
    /// The year's entries as chart points, carrying December of the prior
    /// year in trend mode.
    pub points: Vec<ChartPoint>,
    /// Plain values for renderers, prefixed for line continuity in trend mode.
    pub numbers: Vec<f64>,
}

impl YearOverview {
    pub fn build(data: &DayData, year: &YearKey, settings: DatasetSettings) -> Self {
        let months = roll_up_months(data, year);
        let extremes = roll_up_year(&months);

        let values: Vec<f64> = year
            .months()
            .iter()
            .flat_map(|month| month_values(data, month))
            .collect();
        let prior_values = year
            .previous()
            .ok()
            .and_then(|prev| prev.months().last().map(|dec| month_values(data, dec)))
            .unwrap_or_default();
        let prior = prior_values.last().copied();
        let points = with_carried_point(
            to_chart_points(&values, prior, settings.tracking),
            prior,
            settings.tracking,
        );
        let numbers = chart_numbers(&values, &prior_values, settings.tracking);

        debug!(
            year = %year,
            entries = values.len(),
            tracking = ?settings.tracking,
            "built year overview"
        );

        Self {
            year: year.clone(),
            settings,
            stats: compute_stats(&values),
            months,
            extremes,
            points,
            numbers,
        }
    }

    /// Highlight class for `month` if it holds a record for `field`.
    pub fn month_highlight(&self, month: u8, field: StatField) -> Option<ValenceClass> {
        let stats = self.months.get(&month).copied().flatten()?;
        highlight(&self.extremes, &self.settings, &stats, field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOverview {
    pub month: MonthKey,
    pub settings: DatasetSettings,
    pub stats: Option<PeriodStats>,
    /// Every calendar day of the month.
    pub days: BTreeMap<DayKey, Option<PeriodStats>>,
    /// Records across the days.
    pub extremes: PeriodExtremes,
    /// The month's entries as chart points, with the carried point first
    /// when the prior month contributes one.
    pub points: Vec<ChartPoint>,
    /// Plain values for renderers, prefixed for line continuity in trend mode.
    pub numbers: Vec<f64>,
}

impl MonthOverview {
    pub fn build(data: &DayData, month: &MonthKey, settings: DatasetSettings) -> Self {
        let days = roll_up_days(data, month);
        let extremes = compute_extremes(days.values().map(Option::as_ref));

        let values = month_values(data, month);
        let prior_values = month
            .previous()
            .map(|prev| month_values(data, &prev))
            .unwrap_or_default();
        let prior = prior_values.last().copied();

        let points = with_carried_point(
            to_chart_points(&values, prior, settings.tracking),
            prior,
            settings.tracking,
        );
        let numbers = chart_numbers(&values, &prior_values, settings.tracking);

        debug!(
            month = %month,
            entries = values.len(),
            carried = prior.is_some(),
            "built month overview"
        );

        Self {
            month: month.clone(),
            settings,
            stats: compute_stats(&values),
            days,
            extremes,
            points,
            numbers,
        }
    }

    /// Highlight class for `day` if it holds a record for `field`.
    pub fn day_highlight(&self, day: &DayKey, field: StatField) -> Option<ValenceClass> {
        let stats = self.days.get(day).copied().flatten()?;
        highlight(&self.extremes, &self.settings, &stats, field)
    }

    /// Valence class of each interactive point's delta.
    pub fn delta_classes(&self) -> Vec<ValenceClass> {
        self.points
            .iter()
            .filter(|point| point.is_interactive())
            .map(|point| self.settings.valence.classify(point.delta))
            .collect()
    }
}

fn highlight(
    extremes: &PeriodExtremes,
    settings: &DatasetSettings,
    stats: &PeriodStats,
    field: StatField,
) -> Option<ValenceClass> {
    let highest = extremes.record_direction(field, field.value(stats))?;
    Some(settings.valence.classify_direction(highest))
}
