//! Per-period statistics and cross-period extremes.

pub mod extremes;
pub mod period;

pub use extremes::{compute_extremes, PeriodExtremes, StatField};
pub use period::{
    compute_stats, month_stats, roll_up_days, roll_up_months, roll_up_year, year_stats,
    PeriodStats,
};
