// src/aircraft/motion.rs

use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::error::{FlightError, Result};
use crate::utils::geometry::{Arena, Point2D, Vector2D};
use crate::utils::util::{to_degrees, to_radians};

/// One airplane: a point moving at constant heading and speed.
///
/// Immutable once built. A rejected scenario replaces its models wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionModel {
    position0: Point2D,
    /// Radians in `[0, 2π)`, clockwise from screen-up.
    heading: f64,
    /// Arena units per unit of time.
    speed: f64,
}

/// When a single coordinate reaches the arena edge it is heading for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum AxisExit {
    /// This component does not move, so it never reaches a bound.
    Never,
    At { time: f64, bound: f64 },
}

impl AxisExit {
    fn for_component(start: f64, velocity: f64, size: f64) -> Self {
        if velocity > 0.0 {
            AxisExit::At { time: (size - start) / velocity, bound: size }
        } else if velocity < 0.0 {
            AxisExit::At { time: (0.0 - start) / velocity, bound: 0.0 }
        } else {
            AxisExit::Never
        }
    }

    fn time(&self) -> Option<f64> {
        match self {
            AxisExit::Never => None,
            AxisExit::At { time, .. } => Some(*time),
        }
    }
}

impl MotionModel {
    /// Builds a model from a heading in radians.
    pub fn new(position0: Point2D, heading: f64, speed: f64, arena: &Arena) -> Result<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(FlightError::InvalidMotion(format!(
                "speed must be positive and finite, got {}",
                speed
            )));
        }
        if !heading.is_finite() {
            return Err(FlightError::InvalidMotion(format!("heading is not finite: {}", heading)));
        }
        if !position0.is_finite() || !arena.contains(&position0) {
            return Err(FlightError::InvalidMotion(format!(
                "start ({}, {}) lies outside the arena",
                position0.x, position0.y
            )));
        }
        Ok(Self {
            position0,
            heading: heading.rem_euclid(TAU),
            speed,
        })
    }

    /// Builds a model from a heading in degrees.
    pub fn from_degrees(position0: Point2D, heading_deg: f64, speed: f64, arena: &Arena) -> Result<Self> {
        Self::new(position0, to_radians(heading_deg), speed, arena)
    }

    pub fn position0(&self) -> Point2D {
        self.position0
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn heading_degrees(&self) -> f64 {
        to_degrees(self.heading)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn velocity(&self) -> Vector2D {
        Vector2D::from_heading(self.heading) * self.speed
    }

    /// Position after `t` units of time. Negative `t` gives past positions.
    pub fn position_at(&self, t: f64) -> Point2D {
        self.position0 + self.velocity() * t
    }

    /// End of the drawn vector for a display `scale`. Kinematics never read the scale.
    pub fn vector_tip(&self, scale: f64) -> Point2D {
        self.position0 + self.velocity() * scale
    }

    /// Time at which the airplane first crosses one of the arena edges.
    pub fn exit_time(&self, arena: &Arena) -> f64 {
        let (x_exit, y_exit) = self.axis_exits(arena);
        match (x_exit.time(), y_exit.time()) {
            (Some(tx), Some(ty)) => tx.min(ty),
            (Some(t), None) | (None, Some(t)) => t,
            // speed > 0 means at least one component moves
            (None, None) => 0.0,
        }
    }

    /// Where the path leaves the arena. One coordinate is exactly on a bound.
    pub fn path_exit(&self, arena: &Arena) -> Point2D {
        let (x_exit, y_exit) = self.axis_exits(arena);
        let t = self.exit_time(arena);
        let raw = self.position_at(t);
        let size = arena.size;

        // Snap the coordinate that triggered the exit so rounding cannot leave
        // the point a hair inside or outside the edge.
        match (x_exit, y_exit) {
            (AxisExit::At { time: tx, bound }, AxisExit::At { time: ty, .. }) if tx <= ty => {
                Point2D::new(bound, raw.y.clamp(0.0, size))
            }
            (AxisExit::At { bound, .. }, AxisExit::Never) => Point2D::new(bound, raw.y.clamp(0.0, size)),
            (_, AxisExit::At { bound, .. }) => Point2D::new(raw.x.clamp(0.0, size), bound),
            (AxisExit::Never, AxisExit::Never) => raw,
        }
    }

    /// Point a fraction `f` of the way from the start to the path exit.
    pub fn point_along_path(&self, arena: &Arena, f: f64) -> Point2D {
        self.position0.lerp(&self.path_exit(arena), f)
    }

    /// Random point along the in-arena path, fraction drawn from `[frac_min, frac_max)`.
    pub fn sample_along_path<R: Rng>(
        &self,
        arena: &Arena,
        rng: &mut R,
        frac_min: f64,
        frac_max: f64,
    ) -> Point2D {
        let f = rng.random_range(frac_min..frac_max);
        self.point_along_path(arena, f)
    }

    fn axis_exits(&self, arena: &Arena) -> (AxisExit, AxisExit) {
        let v = self.velocity();
        (
            AxisExit::for_component(self.position0.x, v.x, arena.size),
            AxisExit::for_component(self.position0.y, v.y, arena.size),
        )
    }
}
