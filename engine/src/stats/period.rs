//! Descriptive statistics for one period, and roll-ups from days to months
//! and years.
//!
//! Preconditions
//! -------------
//! Values must be finite. Behaviour on NaN or infinities is undefined; filter
//! them at the entry-store boundary (see [`crate::entries::sanitize`]).
//!
//! Reproducibility
//! ---------------
//! `total` is accumulated left to right in input order, so identical input
//! always yields bit-identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::date_key::{DayKey, MonthKey, YearKey};
use crate::entries::DayData;
use crate::stats::extremes::{compute_extremes, PeriodExtremes};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl PeriodStats {
    /// `None` for an empty slice: no data is not the same as zero.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (&first, _) = values.split_first()?;
        let count = values.len();

        let mut total = 0.0;
        let mut min = first;
        let mut max = first;
        for &value in values {
            total += value;
            min = min.min(value);
            max = max.max(value);
        }

        Some(Self {
            count,
            total,
            mean: total / count as f64,
            median: median(values),
            min,
            max,
        })
    }
}

pub fn compute_stats(values: &[f64]) -> Option<PeriodStats> {
    PeriodStats::from_values(values)
}

/// Stats for each month of `year`, keyed 1..=12. Months without entries map
/// to `None`.
pub fn roll_up_months(data: &DayData, year: &YearKey) -> BTreeMap<u8, Option<PeriodStats>> {
    let months: BTreeMap<u8, Option<PeriodStats>> = year
        .months()
        .iter()
        .map(|month| (month.month(), month_stats(data, month)))
        .collect();

    debug!(
        year = %year,
        months_with_data = months.values().filter(|s| s.is_some()).count(),
        "rolled up months"
    );
    months
}

/// Extremes across the months of a year.
pub fn roll_up_year(month_stats: &BTreeMap<u8, Option<PeriodStats>>) -> PeriodExtremes {
    compute_extremes(month_stats.values().map(Option::as_ref))
}

/// Stats for every calendar day of `month`, in day order.
pub fn roll_up_days(data: &DayData, month: &MonthKey) -> BTreeMap<DayKey, Option<PeriodStats>> {
    month
        .days()
        .into_iter()
        .map(|day| {
            let stats = data.get(&day).and_then(|values| compute_stats(values));
            (day, stats)
        })
        .collect()
}

/// Stats over every entry of `month`, in day-then-entry order.
pub fn month_stats(data: &DayData, month: &MonthKey) -> Option<PeriodStats> {
    compute_stats(&month_values(data, month))
}

/// Stats over every entry of `year`, in day-then-entry order.
pub fn year_stats(data: &DayData, year: &YearKey) -> Option<PeriodStats> {
    let values: Vec<f64> = year
        .months()
        .iter()
        .flat_map(|month| month_values(data, month))
        .collect();
    compute_stats(&values)
}

pub(crate) fn month_values(data: &DayData, month: &MonthKey) -> Vec<f64> {
    month
        .days()
        .iter()
        .filter_map(|day| data.get(day))
        .flat_map(|values| values.iter().copied())
        .collect()
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date_key::{to_day_key, to_month_key};

    fn data(entries: &[((i32, u8, u8), &[f64])]) -> DayData {
        entries
            .iter()
            .map(|((y, m, d), values)| (to_day_key(*y, *m, *d).unwrap(), values.to_vec()))
            .collect()
    }

    #[test]
    fn empty_series_has_no_stats() {
        assert_eq!(compute_stats(&[]), None);
    }

    #[test]
    fn single_value() {
        assert_eq!(
            compute_stats(&[5.0]),
            Some(PeriodStats {
                count: 1,
                total: 5.0,
                mean: 5.0,
                median: 5.0,
                min: 5.0,
                max: 5.0,
            })
        );
    }

    #[test]
    fn even_count_averages_middle_pair() {
        let stats = compute_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.total, 10.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn median_sorts_a_copy() {
        let values = [9.0, -1.0, 4.0];
        let stats = compute_stats(&values).unwrap();
        assert_eq!(stats.median, 4.0);
        assert_eq!(values, [9.0, -1.0, 4.0]);
    }

    #[test]
    fn zero_is_data() {
        let stats = compute_stats(&[0.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.total, 0.0);
    }

    #[test]
    fn mean_and_median_stay_within_bounds() {
        let cases: &[&[f64]] = &[
            &[3.0],
            &[-2.5, 7.0],
            &[1e9, -1e9, 0.1],
            &[4.0, 4.0, 4.0, 4.0],
            &[0.1, 0.2, 0.3, -0.7, 12.25, 3.5],
        ];
        for values in cases {
            let stats = compute_stats(values).unwrap();
            assert!(stats.min <= stats.mean && stats.mean <= stats.max, "{values:?}");
            assert!(
                stats.min <= stats.median && stats.median <= stats.max,
                "{values:?}"
            );
        }
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let values = [0.1, 0.2, 0.3, 1e16, -1e16, 0.7];
        let a = compute_stats(&values).unwrap();
        let b = compute_stats(&values).unwrap();
        assert_eq!(a.total.to_bits(), b.total.to_bits());
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.median.to_bits(), b.median.to_bits());
    }

    #[test]
    fn months_concatenate_days_in_order() {
        let data = data(&[
            ((2024, 1, 20), &[3.0]),
            ((2024, 1, 2), &[1.0, 2.0]),
            ((2024, 3, 31), &[10.0]),
            ((2025, 1, 1), &[99.0]),
        ]);
        let months = roll_up_months(&data, &YearKey::new(2024).unwrap());

        assert_eq!(months.len(), 12);
        let january = months[&1u8].unwrap();
        assert_eq!(january.count, 3);
        assert_eq!(january.total, 6.0);
        assert_eq!(months[&2u8], None);
        assert_eq!(months[&3u8].unwrap().total, 10.0);
        assert!(months.range(4u8..=12).all(|(_, stats)| stats.is_none()));
    }

    #[test]
    fn days_outside_the_calendar_are_ignored() {
        let data = data(&[((2023, 2, 30), &[5.0]), ((2023, 2, 28), &[1.0])]);
        let feb = month_stats(&data, &to_month_key(2023, 2).unwrap()).unwrap();
        assert_eq!(feb.count, 1);
    }

    #[test]
    fn empty_day_lists_contribute_nothing() {
        let data = data(&[((2024, 6, 1), &[]), ((2024, 6, 2), &[])]);
        let june = to_month_key(2024, 6).unwrap();
        assert_eq!(month_stats(&data, &june), None);

        let days = roll_up_days(&data, &june);
        assert_eq!(days.len(), 30);
        assert!(days.values().all(Option::is_none));
    }

    #[test]
    fn year_stats_cover_every_month() {
        let data = data(&[((2024, 1, 1), &[2.0]), ((2024, 12, 31), &[4.0])]);
        let year = year_stats(&data, &YearKey::new(2024).unwrap()).unwrap();
        assert_eq!(year.count, 2);
        assert_eq!(year.mean, 3.0);
        assert_eq!(year_stats(&data, &YearKey::new(2023).unwrap()), None);
    }

    #[test]
    fn roll_up_year_skips_empty_months() {
        let data = data(&[((2024, 2, 1), &[-4.0]), ((2024, 5, 1), &[6.0, 1.0])]);
        let months = roll_up_months(&data, &YearKey::new(2024).unwrap());
        let extremes = roll_up_year(&months);
        assert_eq!(extremes.highest_total, Some(7.0));
        assert_eq!(extremes.lowest_total, Some(-4.0));
        assert_eq!(extremes.highest_count, Some(2));
    }
}
