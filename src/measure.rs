// src/measure.rs

use serde::Serialize;
use std::fmt;

use crate::utils::geometry::{Arena, Point2D};

/// A separation in miles. Displays with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Distance(pub f64);

impl Distance {
    pub fn miles(&self) -> f64 {
        self.0
    }
}

/// Rounds to two decimals with halves going away from zero.
///
/// `{:.2}` sends exact halves such as 0.125 to the even digit; the drill reports
/// them rounded up (0.13).
fn round_half_up_2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Only a product that is exact and ends in .5 is a true tie.
    if (scaled - scaled.trunc()).abs() == 0.5 && scaled / 100.0 == value {
        scaled.round() / 100.0
    } else {
        value
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", round_half_up_2(self.0))
    }
}

/// Euclidean distance between two arena points, converted to miles.
pub fn distance(p1: &Point2D, p2: &Point2D, arena: &Arena) -> Distance {
    Distance(p1.distance_to(p2) / arena.units_per_mile)
}

/// A line drawn by the user, in arena coordinates. Not checked against the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserMeasurement {
    pub start: Point2D,
    pub end: Point2D,
}

impl UserMeasurement {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn distance(&self, arena: &Arena) -> Distance {
        distance(&self.start, &self.end, arena)
    }
}
