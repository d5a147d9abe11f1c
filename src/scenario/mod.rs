// src/scenario/mod.rs
pub mod generator;

pub use generator::{GenerationStats, GeneratorConfig, ScenarioGenerator};

use serde::Serialize;

use crate::aircraft::MotionModel;
use crate::approach::{check_admissible, ClosestApproach};
use crate::error::Result;
use crate::utils::geometry::Arena;

/// Two airplanes whose closest approach lies in the future and inside the arena.
///
/// The only way to build one is through [`Scenario::new`], which runs the
/// admissibility check, so every `Scenario` in circulation is valid.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scenario {
    first: MotionModel,
    second: MotionModel,
    arena: Arena,
    approach: ClosestApproach,
}

impl Scenario {
    pub fn new(first: MotionModel, second: MotionModel, arena: Arena) -> Result<Self> {
        let approach = check_admissible(&first, &second, &arena)?;
        Ok(Scenario {
            first,
            second,
            arena,
            approach,
        })
    }

    pub fn first(&self) -> &MotionModel {
        &self.first
    }

    pub fn second(&self) -> &MotionModel {
        &self.second
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The closest approach found while validating the pair.
    pub fn approach(&self) -> ClosestApproach {
        self.approach
    }
}
