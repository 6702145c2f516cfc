//! Turn a period's logged numbers into chart points.
//!
//! | mode     | value                       | delta                                   |
//! |----------|-----------------------------|-----------------------------------------|
//! | `series` | running total through `i`   | `numbers[i]` (change in the total)      |
//! | `trend`  | `numbers[i]`                | `numbers[i] - previous`                 |
//! | `none`   | `numbers[i]`                | `0`                                     |
//!
//! In `trend` mode the first entry's `previous` is the last entry of the prior
//! period when there is one, otherwise `0`.
//!
//! Line continuity across a period boundary is a separate concern from delta
//! computation: [`with_carried_point`] prepends a synthetic point that
//! consumers suppress for tooltips, and [`chart_numbers`] produces the
//! prefixed raw numbers for renderers that take plain values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Running cumulative total.
    Series,
    /// Raw values with deltas against the previous value.
    Trend,
    /// Raw values, no derived semantics.
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "position")]
pub enum PointIndex {
    /// Position of the logged entry within its period.
    Entry(usize),
    /// Synthetic leading point holding the prior period's last value.
    Carried,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub index: PointIndex,
    pub value: f64,
    pub delta: f64,
}

impl ChartPoint {
    /// Carried points are drawn but never get tooltips or selection.
    pub fn is_interactive(&self) -> bool {
        matches!(self.index, PointIndex::Entry(_))
    }
}

pub fn to_chart_points(
    numbers: &[f64],
    prior_last: Option<f64>,
    mode: TrackingMode,
) -> Vec<ChartPoint> {
    match mode {
        TrackingMode::Series => series_points(numbers),
        TrackingMode::Trend => trend_points(numbers, prior_last.unwrap_or(0.0)),
        TrackingMode::None => numbers
            .iter()
            .enumerate()
            .map(|(i, &value)| ChartPoint {
                index: PointIndex::Entry(i),
                value,
                delta: 0.0,
            })
            .collect(),
    }
}

fn series_points(numbers: &[f64]) -> Vec<ChartPoint> {
    let mut running = 0.0;
    numbers
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let before = running;
            running += value;
            ChartPoint {
                index: PointIndex::Entry(i),
                value: running,
                delta: if i == 0 { value } else { running - before },
            }
        })
        .collect()
}

fn trend_points(numbers: &[f64], first_previous: f64) -> Vec<ChartPoint> {
    let mut previous = first_previous;
    numbers
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let delta = value - previous;
            previous = value;
            ChartPoint {
                index: PointIndex::Entry(i),
                value,
                delta,
            }
        })
        .collect()
}

/// Prepend the carried point when there is something to connect: a prior
/// value, trend mode, and at least one point in this period.
pub fn with_carried_point(
    mut points: Vec<ChartPoint>,
    prior_last: Option<f64>,
    mode: TrackingMode,
) -> Vec<ChartPoint> {
    if let (TrackingMode::Trend, Some(value), false) = (mode, prior_last, points.is_empty()) {
        points.insert(
            0,
            ChartPoint {
                index: PointIndex::Carried,
                value,
                delta: 0.0,
            },
        );
    }
    points
}

/// The numbers a renderer should draw: in trend mode the prior period's
/// *last* entry leads, so the line connects across the boundary. An empty
/// period draws nothing, matching [`with_carried_point`].
pub fn chart_numbers(numbers: &[f64], prior_period: &[f64], mode: TrackingMode) -> Vec<f64> {
    match (mode, prior_period.last()) {
        (TrackingMode::Trend, Some(&carried)) if !numbers.is_empty() => {
            let mut prefixed = Vec::with_capacity(numbers.len() + 1);
            prefixed.push(carried);
            prefixed.extend_from_slice(numbers);
            prefixed
        }
        _ => numbers.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(points: &[ChartPoint]) -> Vec<f64> {
        points.iter().map(|p| p.value).collect()
    }

    fn deltas(points: &[ChartPoint]) -> Vec<f64> {
        points.iter().map(|p| p.delta).collect()
    }

    #[test]
    fn trend_delta_starts_from_prior_period() {
        let points = to_chart_points(&[10.0, 12.0, 9.0], Some(8.0), TrackingMode::Trend);
        assert_eq!(values(&points), [10.0, 12.0, 9.0]);
        assert_eq!(deltas(&points), [2.0, 2.0, -3.0]);
    }

    #[test]
    fn trend_without_prior_uses_zero() {
        let points = to_chart_points(&[4.0, 1.0], None, TrackingMode::Trend);
        assert_eq!(deltas(&points), [4.0, -3.0]);
    }

    #[test]
    fn series_accumulates() {
        let points = to_chart_points(&[5.0, -2.0, 3.0], None, TrackingMode::Series);
        assert_eq!(values(&points), [5.0, 3.0, 6.0]);
        assert_eq!(deltas(&points), [5.0, -2.0, 3.0]);
    }

    #[test]
    fn series_ignores_prior_value() {
        let points = to_chart_points(&[1.0, 1.0], Some(100.0), TrackingMode::Series);
        assert_eq!(values(&points), [1.0, 2.0]);
    }

    #[test]
    fn none_passes_values_through() {
        let points = to_chart_points(&[3.0, -1.0], Some(2.0), TrackingMode::None);
        assert_eq!(values(&points), [3.0, -1.0]);
        assert_eq!(deltas(&points), [0.0, 0.0]);
        assert_eq!(points[1].index, PointIndex::Entry(1));
    }

    #[test]
    fn empty_numbers_give_no_points() {
        for mode in [TrackingMode::Series, TrackingMode::Trend, TrackingMode::None] {
            assert!(to_chart_points(&[], Some(1.0), mode).is_empty());
            assert!(with_carried_point(Vec::new(), Some(1.0), mode).is_empty());
        }
    }

    #[test]
    fn carried_point_is_flagged() {
        let points = to_chart_points(&[10.0, 12.0], Some(8.0), TrackingMode::Trend);
        let drawn = with_carried_point(points, Some(8.0), TrackingMode::Trend);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].index, PointIndex::Carried);
        assert_eq!(drawn[0].value, 8.0);
        assert!(!drawn[0].is_interactive());
        assert!(drawn[1..].iter().all(ChartPoint::is_interactive));
    }

    #[test]
    fn carried_point_only_in_trend_mode() {
        let points = to_chart_points(&[1.0], Some(8.0), TrackingMode::Series);
        assert_eq!(with_carried_point(points, Some(8.0), TrackingMode::Series).len(), 1);
        let points = to_chart_points(&[1.0], None, TrackingMode::Trend);
        assert_eq!(with_carried_point(points, None, TrackingMode::Trend).len(), 1);
    }

    #[test]
    fn chart_numbers_prefix_last_prior_entry() {
        assert_eq!(
            chart_numbers(&[10.0, 12.0], &[3.0, 8.0], TrackingMode::Trend),
            [8.0, 10.0, 12.0]
        );
        assert_eq!(
            chart_numbers(&[10.0, 12.0], &[], TrackingMode::Trend),
            [10.0, 12.0]
        );
        assert_eq!(
            chart_numbers(&[10.0], &[3.0], TrackingMode::Series),
            [10.0]
        );
    }

    #[test]
    fn empty_period_draws_no_carried_number() {
        assert!(chart_numbers(&[], &[3.0, 7.0], TrackingMode::Trend).is_empty());
        let points = to_chart_points(&[], Some(7.0), TrackingMode::Trend);
        assert!(with_carried_point(points, Some(7.0), TrackingMode::Trend).is_empty());
    }

    #[test]
    fn points_serialize_with_tagged_index() {
        let point = ChartPoint {
            index: PointIndex::Carried,
            value: 1.5,
            delta: 0.0,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["index"]["kind"], "carried");
        assert_eq!(json["value"], 1.5);
    }
}
