//! Grouping raw entries into per-day number series, and range lookups over
//! the grouped data.
//!
//! The entry store owns the raw records; everything here borrows or copies.
//! [`sanitize`] is the place to drop non-finite values before they reach the
//! statistics code, which assumes finite input.

use std::collections::btree_map::Range;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::date_key::{DayKey, MonthKey, YearKey};

/// Per-day series keyed by day, entries in logging order within a day.
pub type DayData = BTreeMap<DayKey, Vec<f64>>;

/// One logged number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: DayKey,
    pub value: f64,
}

impl Entry {
    pub fn new(date: DayKey, value: f64) -> Self {
        Self { date, value }
    }
}

/// Group entries by day, keeping their order within each day.
pub fn group_by_day<I>(entries: I) -> DayData
where
    I: IntoIterator<Item = Entry>,
{
    let mut data = DayData::new();
    for entry in entries {
        data.entry(entry.date).or_default().push(entry.value);
    }
    trace!(days = data.len(), "grouped entries by day");
    data
}

/// Drop non-finite values, keeping the order of the rest.
pub fn sanitize<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut dropped = 0usize;
    let kept: Vec<f64> = values
        .into_iter()
        .filter(|value| {
            let keep = value.is_finite();
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    if dropped > 0 {
        warn!(dropped, "dropped non-finite values");
    }
    kept
}

/// [`sanitize`] applied to every day. Days left empty are removed.
pub fn sanitize_data(data: DayData) -> DayData {
    data.into_iter()
        .filter_map(|(day, values)| {
            let values = sanitize(values);
            (!values.is_empty()).then_some((day, values))
        })
        .collect()
}

/// Days of `month` that have an entry list, in day order.
pub fn slice_month<'a>(data: &'a DayData, month: &MonthKey) -> Range<'a, DayKey, Vec<f64>> {
    data.range(month.first_day()..=month.last_day())
}

/// Days of `year` that have an entry list, in day order.
pub fn slice_year<'a>(data: &'a DayData, year: &YearKey) -> Range<'a, DayKey, Vec<f64>> {
    data.range(year.first_day()..=year.last_day())
}

/// Last entry logged in `month`, if any.
pub fn last_value_in(data: &DayData, month: &MonthKey) -> Option<f64> {
    slice_month(data, month)
        .rev()
        .find_map(|(_, values)| values.last().copied())
}

/// Last entry of the nearest earlier day that has one.
pub fn last_value_before(data: &DayData, day: &DayKey) -> Option<f64> {
    data.range::<DayKey, _>(..day)
        .rev()
        .find_map(|(_, values)| values.last().copied())
}
