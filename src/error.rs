// src/error.rs

use thiserror::Error;

use crate::utils::geometry::Point2D;

/// Errors raised by the kinematic engine and its configuration.
///
/// `DegenerateMotion`, `NonPositiveTime` and `OutOfArena` describe rejected
/// scenarios; the generator absorbs them by drawing a new pair.
#[derive(Error, Debug)]
pub enum FlightError {
    #[error("relative velocity is zero: the airplanes keep a constant separation")]
    DegenerateMotion,

    #[error("closest approach is not in the future (t = {time})")]
    NonPositiveTime { time: f64 },

    #[error("closest approach at t = {time} lies outside the arena ({first:?}, {second:?})")]
    OutOfArena {
        time: f64,
        first: Point2D,
        second: Point2D,
    },

    #[error("invalid motion model: {0}")]
    InvalidMotion(String),

    #[error("vector scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlightError {
    /// True for the conditions recovered by drawing a new scenario.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            FlightError::DegenerateMotion
                | FlightError::NonPositiveTime { .. }
                | FlightError::OutOfArena { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FlightError>;
