//! Chart-ready point sequences.

pub mod tracking;

pub use tracking::{
    chart_numbers, to_chart_points, with_carried_point, ChartPoint, PointIndex, TrackingMode,
};
