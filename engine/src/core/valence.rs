//! Valence: whether a rising value is good news or bad news for a dataset.
//!
//! The same resolver picks colors, icons or arrow directions at different
//! call sites, so it is generic over the payload. Callers that only want the
//! semantic class use [`Valence::classify`]; theme lookups keyed by
//! [`ValenceClass`] belong to the presentation layer.
//!
//! Inputs are expected to be finite. NaN is not special-cased: it compares
//! neither above nor below zero and therefore lands on `neutral`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Valence {
    /// Increasing values are favorable.
    #[default]
    Positive,
    /// Increasing values are unfavorable.
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValenceClass {
    Good,
    Bad,
    Neutral,
}

/// One payload per semantic class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValencePayload<T> {
    pub good: T,
    pub bad: T,
    pub neutral: T,
}

impl<T> ValencePayload<T> {
    pub fn new(good: T, bad: T, neutral: T) -> Self {
        Self { good, bad, neutral }
    }

    pub fn get(&self, class: ValenceClass) -> &T {
        match class {
            ValenceClass::Good => &self.good,
            ValenceClass::Bad => &self.bad,
            ValenceClass::Neutral => &self.neutral,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ValencePayload<U> {
        ValencePayload {
            good: f(self.good),
            bad: f(self.bad),
            neutral: f(self.neutral),
        }
    }
}

impl ValencePayload<ValenceClass> {
    /// The identity payload: resolving through it yields the class itself.
    pub const CLASSES: Self = Self {
        good: ValenceClass::Good,
        bad: ValenceClass::Bad,
        neutral: ValenceClass::Neutral,
    };
}

impl Valence {
    pub fn classify(self, value: f64) -> ValenceClass {
        resolve_from_number(value, self, &ValencePayload::<ValenceClass>::CLASSES)
    }

    /// Classify a "was this the favorable extreme?" flag.
    pub fn classify_direction(self, favorable: bool) -> ValenceClass {
        resolve_from_direction(favorable, self, &ValencePayload::<ValenceClass>::CLASSES)
    }

    /// `true` when the highest value in a set is the one worth celebrating.
    pub fn favors_highest(self) -> bool {
        matches!(self, Valence::Positive)
    }
}

impl ValenceClass {
    pub fn pick<T: Clone>(self, payload: &ValencePayload<T>) -> T {
        payload.get(self).clone()
    }
}

pub fn resolve_from_number<T: Clone>(
    value: f64,
    valence: Valence,
    payload: &ValencePayload<T>,
) -> T {
    let class = if value > 0.0 {
        rising(valence)
    } else if value < 0.0 {
        falling(valence)
    } else {
        ValenceClass::Neutral
    };
    class.pick(payload)
}

/// `true` resolves like a positive number, `false` like a negative one.
pub fn resolve_from_direction<T: Clone>(
    increasing: bool,
    valence: Valence,
    payload: &ValencePayload<T>,
) -> T {
    let class = if increasing {
        rising(valence)
    } else {
        falling(valence)
    };
    class.pick(payload)
}

fn rising(valence: Valence) -> ValenceClass {
    match valence {
        Valence::Positive => ValenceClass::Good,
        Valence::Negative => ValenceClass::Bad,
    }
}

fn falling(valence: Valence) -> ValenceClass {
    match valence {
        Valence::Positive => ValenceClass::Bad,
        Valence::Negative => ValenceClass::Good,
    }
}
