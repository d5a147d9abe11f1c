//! Closest point of approach between two airplanes on straight-line vectors.
//!
//! With `d` the initial displacement from the first airplane to the second and
//! `v` their relative velocity, the separation `|d + v·t|` is smallest at
//! `t* = -(d·v) / |v|²`. The time may be negative (the airplanes are already
//! diverging) and is undefined when `v` is zero.

use serde::Serialize;

use crate::aircraft::MotionModel;
use crate::error::{FlightError, Result};
use crate::utils::geometry::{Arena, Point2D};

/// Squared relative speeds at or below this are treated as parallel, equal motion.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Both airplanes evaluated at the moment of closest approach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestApproach {
    pub time: f64,
    pub first: Point2D,
    pub second: Point2D,
}

impl ClosestApproach {
    /// Separation in arena units.
    pub fn separation(&self) -> f64 {
        self.first.distance_to(&self.second)
    }
}

/// Time at which the separation between `m1` and `m2` is minimal.
///
/// Fails with [`FlightError::DegenerateMotion`] when the relative velocity is
/// zero, since every instant is then equally close.
pub fn closest_approach_time(m1: &MotionModel, m2: &MotionModel) -> Result<f64> {
    let d = m2.position0() - m1.position0();
    let v = m2.velocity() - m1.velocity();

    let v_sq = v.length_squared();
    if v_sq <= DEGENERATE_EPSILON {
        return Err(FlightError::DegenerateMotion);
    }

    Ok(-d.dot(&v) / v_sq)
}

/// Positions of both airplanes at time `t`.
pub fn positions_at(m1: &MotionModel, m2: &MotionModel, t: f64) -> (Point2D, Point2D) {
    (m1.position_at(t), m2.position_at(t))
}

pub fn closest_approach(m1: &MotionModel, m2: &MotionModel) -> Result<ClosestApproach> {
    let time = closest_approach_time(m1, m2)?;
    let (first, second) = positions_at(m1, m2, time);
    Ok(ClosestApproach { time, first, second })
}

/// Solves the pair and checks it is worth showing: the approach lies in the
/// future and both airplanes are still inside the arena at that moment.
pub fn check_admissible(m1: &MotionModel, m2: &MotionModel, arena: &Arena) -> Result<ClosestApproach> {
    let approach = closest_approach(m1, m2)?;

    if approach.time <= 0.0 {
        return Err(FlightError::NonPositiveTime { time: approach.time });
    }

    if !arena.contains(&approach.first) || !arena.contains(&approach.second) {
        return Err(FlightError::OutOfArena {
            time: approach.time,
            first: approach.first,
            second: approach.second,
        });
    }

    Ok(approach)
}
