use engine::charts::{
    chart_numbers, to_chart_points, with_carried_point, ChartPoint, PointIndex, TrackingMode,
};
use engine::core::valence::{resolve_from_direction, resolve_from_number};
use engine::core::{DatasetSettings, MonthKey, Valence, ValencePayload};
use engine::entries::{group_by_day, last_value_before, last_value_in, Entry};

fn deltas(points: &[ChartPoint]) -> Vec<f64> {
    points.iter().map(|p| p.delta).collect()
}

#[test]
fn trend_across_a_month_boundary() {
    let data = group_by_day(
        [
            ("2024-02-27", 5.0),
            ("2024-02-29", 8.0),
            ("2024-03-04", 10.0),
            ("2024-03-04", 12.0),
            ("2024-03-09", 9.0),
        ]
        .into_iter()
        .map(|(day, value)| Entry::new(day.parse().unwrap(), value)),
    );
    let march = MonthKey::new(2024, 3).unwrap();
    let prior = last_value_in(&data, &march.previous().unwrap());
    assert_eq!(prior, Some(8.0));
    assert_eq!(last_value_before(&data, &march.first_day()), Some(8.0));

    let numbers: Vec<f64> = engine::entries::slice_month(&data, &march)
        .flat_map(|(_, values)| values.iter().copied())
        .collect();
    let points = to_chart_points(&numbers, prior, TrackingMode::Trend);
    assert_eq!(deltas(&points), [2.0, 2.0, -3.0]);

    let drawn = with_carried_point(points, prior, TrackingMode::Trend);
    let tooltips: Vec<usize> = drawn
        .iter()
        .filter_map(|p| match p.index {
            PointIndex::Entry(i) => Some(i),
            PointIndex::Carried => None,
        })
        .collect();
    assert_eq!(tooltips, [0, 1, 2]);
    assert_eq!(drawn.len(), 4);
}

#[test]
fn series_mode_is_a_running_total() {
    let points = to_chart_points(&[5.0, -2.0, 3.0], Some(40.0), TrackingMode::Series);
    let totals: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(totals, [5.0, 3.0, 6.0]);
    assert_eq!(deltas(&points), [5.0, -2.0, 3.0]);
}

#[test]
fn continuity_prefix_is_independent_of_deltas() {
    let current = [10.0, 12.0];
    let prior = [1.0, 4.0, 8.0];
    assert_eq!(
        chart_numbers(&current, &prior, TrackingMode::Trend),
        [8.0, 10.0, 12.0]
    );
    assert_eq!(chart_numbers(&current, &prior, TrackingMode::None), current);
    assert_eq!(
        to_chart_points(&current, Some(8.0), TrackingMode::Trend).len(),
        current.len()
    );
}

#[test]
fn delta_colors_follow_dataset_valence() {
    let colors = ValencePayload::new("green", "red", "gray");
    let settings = DatasetSettings::from_json_str(r#"{"valence":"negative","tracking":"trend"}"#)
        .unwrap();

    let points = to_chart_points(&[10.0, 12.0, 12.0], Some(11.0), settings.tracking);
    let picked: Vec<&str> = points
        .iter()
        .map(|p| resolve_from_number(p.delta, settings.valence, &colors))
        .collect();
    assert_eq!(picked, ["green", "red", "gray"]);

    assert_eq!(resolve_from_number(5.0, Valence::Positive, &colors), "green");
    assert_eq!(resolve_from_direction(true, Valence::Negative, &colors), "red");
}
