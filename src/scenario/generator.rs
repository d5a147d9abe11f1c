// src/scenario/generator.rs

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::aircraft::MotionModel;
use crate::error::{FlightError, Result};
use crate::scenario::Scenario;
use crate::utils::geometry::{Arena, Point2D};
use crate::utils::util::{normalize_degrees, to_degrees};

/// Width of the random heading window for the first airplane, in degrees.
pub const HEADING_SPREAD: f64 = 110.0;

/// Offsets added to the random heading of the first airplane, per quadrant of
/// its start: top-left, top-right, bottom-right, bottom-left. They turn the
/// heading window roughly towards the arena center.
pub const QUADRANT_OFFSETS: [f64; 4] = [80.0, 170.0, 260.0, 350.0];

/// Sampling ranges for new airplanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Start positions keep at least this far from every edge.
    pub inset: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// The second airplane aims at a point this far along the first one's path.
    pub min_crossing_fraction: f64,
    pub max_crossing_fraction: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            inset: 50.0,
            min_speed: 30.0,
            max_speed: 70.0,
            min_crossing_fraction: 0.2,
            max_crossing_fraction: 0.9,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self, arena: &Arena) -> Result<()> {
        if !(arena.size.is_finite() && arena.size > 0.0) {
            return Err(FlightError::Config(format!("arena size must be positive, got {}", arena.size)));
        }
        if !(arena.units_per_mile.is_finite() && arena.units_per_mile > 0.0) {
            return Err(FlightError::Config(format!(
                "units per mile must be positive, got {}",
                arena.units_per_mile
            )));
        }
        if !(self.inset >= 0.0 && 2.0 * self.inset < arena.size) {
            return Err(FlightError::Config(format!(
                "inset {} leaves no room in an arena of size {}",
                self.inset, arena.size
            )));
        }
        if !(self.min_speed > 0.0 && self.min_speed < self.max_speed && self.max_speed.is_finite()) {
            return Err(FlightError::Config(format!(
                "speed range [{}, {}) is empty or not positive",
                self.min_speed, self.max_speed
            )));
        }
        if !(0.0 <= self.min_crossing_fraction
            && self.min_crossing_fraction < self.max_crossing_fraction
            && self.max_crossing_fraction <= 1.0)
        {
            return Err(FlightError::Config(format!(
                "crossing fraction range [{}, {}) must be a non-empty part of [0, 1]",
                self.min_crossing_fraction, self.max_crossing_fraction
            )));
        }
        Ok(())
    }
}

/// Counters from the most recent call to [`ScenarioGenerator::generate`].
#[derive(Default, Debug, Clone, Copy)]
pub struct GenerationStats {
    pub attempts: usize,
    pub degenerate: usize,
    pub non_positive_time: usize,
    pub out_of_arena: usize,
    /// Candidates that failed for a reason other than a rejected pair.
    pub other_errors: usize,
}

impl GenerationStats {
    fn record_rejection(&mut self, err: &FlightError) {
        match err {
            FlightError::DegenerateMotion => self.degenerate += 1,
            FlightError::NonPositiveTime { .. } => self.non_positive_time += 1,
            FlightError::OutOfArena { .. } => self.out_of_arena += 1,
            _ => {}
        }
    }

    /// Number of candidates thrown away before the accepted one.
    pub fn discarded(&self) -> usize {
        self.degenerate + self.non_positive_time + self.out_of_arena + self.other_errors
    }
}

/// Draws pairs of airplanes whose paths cross inside the arena.
pub struct ScenarioGenerator {
    config: GeneratorConfig,
    arena: Arena,
    rng: StdRng,
    stats: GenerationStats,
}

impl ScenarioGenerator {
    pub fn new(config: GeneratorConfig, arena: Arena) -> Result<Self> {
        Self::with_rng(config, arena, StdRng::from_os_rng())
    }

    /// A reproducible generator.
    pub fn with_seed(config: GeneratorConfig, arena: Arena, seed: u64) -> Result<Self> {
        Self::with_rng(config, arena, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, arena: Arena, rng: StdRng) -> Result<Self> {
        config.validate(&arena)?;
        Ok(ScenarioGenerator {
            config,
            arena,
            rng,
            stats: GenerationStats::default(),
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Keeps drawing pairs until one is admissible. Never returns an invalid pair.
    pub fn generate(&mut self) -> Scenario {
        self.stats = GenerationStats::default();
        loop {
            self.stats.attempts += 1;
            match self.try_candidate() {
                Ok(scenario) => {
                    info!(
                        "Scenario accepted after {} attempt(s) ({} degenerate, {} in the past, {} out of arena), \
                         closest approach at t = {:.3}",
                        self.stats.attempts,
                        self.stats.degenerate,
                        self.stats.non_positive_time,
                        self.stats.out_of_arena,
                        scenario.approach().time
                    );
                    return scenario;
                }
                Err(err) if err.is_rejection() => {
                    self.stats.record_rejection(&err);
                    debug!("Rejected candidate #{}: {}", self.stats.attempts, err);
                }
                Err(err) => {
                    self.stats.other_errors += 1;
                    warn!("Candidate #{} could not be built: {}", self.stats.attempts, err);
                }
            }
        }
    }

    fn try_candidate(&mut self) -> Result<Scenario> {
        let first = self.generate_first()?;
        let second = self.generate_second(&first)?;
        Scenario::new(first, second, self.arena)
    }

    /// First airplane: random start away from the edges, heading biased by the
    /// quadrant it starts in.
    pub fn generate_first(&mut self) -> Result<MotionModel> {
        let start = self.random_start();
        let speed = self.random_speed();

        let base = self.rng.random_range(0.0..HEADING_SPREAD);
        let heading = normalize_degrees(base + quadrant_offset(&start, &self.arena));

        MotionModel::from_degrees(start, heading, speed, &self.arena)
    }

    /// Second airplane: random start and speed, aimed at a point part way
    /// along the first airplane's path.
    pub fn generate_second(&mut self, first: &MotionModel) -> Result<MotionModel> {
        let start = self.random_start();
        let speed = self.random_speed();

        let target = first.sample_along_path(
            &self.arena,
            &mut self.rng,
            self.config.min_crossing_fraction,
            self.config.max_crossing_fraction,
        );

        MotionModel::from_degrees(start, heading_towards(&start, &target), speed, &self.arena)
    }

    fn random_start(&mut self) -> Point2D {
        let lo = self.config.inset;
        let hi = self.arena.size - self.config.inset;
        let x = self.rng.random_range(lo..hi).round();
        let y = self.rng.random_range(lo..hi).round();
        Point2D::new(x, y)
    }

    fn random_speed(&mut self) -> f64 {
        self.rng.random_range(self.config.min_speed..self.config.max_speed)
    }
}

/// Heading offset for a start position, by quadrant around the arena center.
/// Points on the center lines count towards the top and left.
pub fn quadrant_offset(start: &Point2D, arena: &Arena) -> f64 {
    let c = arena.center();
    match (start.x <= c.x, start.y <= c.y) {
        (true, true) => QUADRANT_OFFSETS[0],
        (false, true) => QUADRANT_OFFSETS[1],
        (false, false) => QUADRANT_OFFSETS[2],
        (true, false) => QUADRANT_OFFSETS[3],
    }
}

/// Compass heading in degrees, `[0, 360)`, that points from `from` to `to`.
pub fn heading_towards(from: &Point2D, to: &Point2D) -> f64 {
    normalize_degrees(to_degrees((to.y - from.y).atan2(to.x - from.x)) + 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approach::closest_approach_time;
    use crate::utils::util::to_radians;
    use assert_approx_eq::assert_approx_eq;
    use crate::utils::geometry::Vector2D;

    fn generator(seed: u64) -> ScenarioGenerator {
        ScenarioGenerator::with_seed(GeneratorConfig::default(), Arena::default(), seed).unwrap()
    }

    #[test]
    fn test_quadrant_offsets() {
        let arena = Arena::default();
        assert_eq!(quadrant_offset(&Point2D::new(100.0, 100.0), &arena), 80.0);
        assert_eq!(quadrant_offset(&Point2D::new(700.0, 100.0), &arena), 170.0);
        assert_eq!(quadrant_offset(&Point2D::new(700.0, 700.0), &arena), 260.0);
        assert_eq!(quadrant_offset(&Point2D::new(100.0, 700.0), &arena), 350.0);
        assert_eq!(quadrant_offset(&Point2D::new(400.0, 400.0), &arena), 80.0);
    }

    #[test]
    fn test_heading_towards() {
        let from = Point2D::new(400.0, 400.0);
        assert_approx_eq!(heading_towards(&from, &Point2D::new(400.0, 100.0)), 0.0);
        assert_approx_eq!(heading_towards(&from, &Point2D::new(700.0, 400.0)), 90.0);
        assert_approx_eq!(heading_towards(&from, &Point2D::new(400.0, 700.0)), 180.0);
        assert_approx_eq!(heading_towards(&from, &Point2D::new(100.0, 400.0)), 270.0);
    }

    #[test]
    fn test_heading_towards_matches_velocity() {
        let from = Point2D::new(120.0, 640.0);
        let to = Point2D::new(530.0, 210.0);
        let dir = Vector2D::from_heading(to_radians(heading_towards(&from, &to)));
        let want = to - from;
        let len = want.length();
        assert_approx_eq!(dir.x, want.x / len, 1e-9);
        assert_approx_eq!(dir.y, want.y / len, 1e-9);
    }

    #[test]
    fn test_first_airplane_sampling() {
        let mut sampler = generator(11);
        for _ in 0..500 {
            let first = sampler.generate_first().unwrap();
            let p = first.position0();
            assert!((50.0..=750.0).contains(&p.x) && (50.0..=750.0).contains(&p.y));
            assert_eq!(p.x, p.x.round());
            assert!((30.0..70.0).contains(&first.speed()));

            // Heading lies in the quadrant's window [offset, offset + 110) mod 360.
            let offset = quadrant_offset(&p, sampler.arena());
            let rel = normalize_degrees(first.heading_degrees() - offset);
            assert!(rel < HEADING_SPREAD + 1e-9 || rel > 360.0 - 1e-9, "rel = {}", rel);
        }
    }

    #[test]
    fn test_second_airplane_aims_at_first_path() {
        let mut sampler = generator(5);
        let arena = Arena::default();
        for _ in 0..200 {
            let first = sampler.generate_first().unwrap();
            let second = sampler.generate_second(&first).unwrap();

            // The second airplane's ray must pass within rounding of the first
            // airplane's segment from start to exit.
            let a = first.position0();
            let b = first.path_exit(&arena);
            let s = second.position0();
            let dir = Vector2D::from_heading(second.heading());
            let cross = |p: Point2D| {
                let w = p - s;
                dir.x * w.y - dir.y * w.x
            };
            assert!(cross(a) * cross(b) <= 1e-6, "second airplane misses the first path");
        }
    }

    #[test]
    fn test_generated_scenarios_are_admissible() {
        let arena = Arena::default();
        for seed in 0..200 {
            let mut sampler = generator(seed);
            let scenario = sampler.generate();
            let t = closest_approach_time(scenario.first(), scenario.second()).unwrap();
            assert!(t > 0.0);
            assert!(arena.contains(&scenario.first().position_at(t)));
            assert!(arena.contains(&scenario.second().position_at(t)));
            assert!(sampler.stats().attempts >= 1);
        }
    }

    #[test]
    fn test_repeated_generation_from_one_generator() {
        let mut sampler = generator(99);
        for _ in 0..500 {
            let scenario = sampler.generate();
            let approach = scenario.approach();
            assert!(approach.time > 0.0);
            assert!(sampler.arena().contains(&approach.first));
            assert!(sampler.arena().contains(&approach.second));
        }
    }

    #[test]
    fn test_stats_account_for_every_attempt() {
        for seed in 0..50 {
            let mut sampler = generator(seed);
            sampler.generate();
            let stats = sampler.stats();
            assert_eq!(stats.discarded() + 1, stats.attempts);
            assert_eq!(stats.other_errors, 0);
        }
    }

    #[test]
    fn test_rejections_are_counted_by_kind() {
        let mut stats = GenerationStats::default();
        stats.record_rejection(&FlightError::DegenerateMotion);
        stats.record_rejection(&FlightError::NonPositiveTime { time: -1.0 });
        stats.record_rejection(&FlightError::OutOfArena {
            time: 2.0,
            first: Point2D::new(-1.0, 0.0),
            second: Point2D::new(0.0, 0.0),
        });
        assert_eq!((stats.degenerate, stats.non_positive_time, stats.out_of_arena), (1, 1, 1));
        assert_eq!(stats.discarded(), 3);

        let err = FlightError::InvalidMotion("speed".to_owned());
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generator(42).generate();
        let b = generator(42).generate();
        assert_eq!(a.first(), b.first());
        assert_eq!(a.second(), b.second());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig {
            min_speed: 70.0,
            max_speed: 30.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            ScenarioGenerator::with_seed(config, Arena::default(), 1),
            Err(FlightError::Config(_))
        ));

        let config = GeneratorConfig {
            inset: 400.0,
            ..GeneratorConfig::default()
        };
        assert!(ScenarioGenerator::with_seed(config, Arena::default(), 1).is_err());
    }
}
