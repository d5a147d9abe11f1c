// src/session/mod.rs

use log::{debug, info};
use serde::Serialize;

use crate::approach::ClosestApproach;
use crate::config::Settings;
use crate::error::{FlightError, Result};
use crate::measure::{distance, Distance, UserMeasurement};
use crate::scenario::{Scenario, ScenarioGenerator};
use crate::utils::geometry::{Arena, Point2D};

/// What the user sees after asking for the answer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Report {
    pub approach: ClosestApproach,
    pub true_distance: Distance,
    /// Absent when no line has been drawn yet.
    pub user_distance: Option<Distance>,
}

/// The drill state: the current scenario, the user's line and the display scale.
///
/// The rendering layer reads from it and forwards input events to it, one at a time.
pub struct Session {
    generator: ScenarioGenerator,
    scenario: Scenario,

    /// Length multiplier for drawn vectors. Never used by the solver.
    vector_scale: f64,

    /// Start of a line that is still being dragged.
    pending_start: Option<Point2D>,
    measurement: Option<UserMeasurement>,
    report: Option<Report>,

    pub status_message: String,
}

impl Session {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let generator = ScenarioGenerator::new(settings.generator.clone(), settings.arena)?;
        Self::with_generator(generator, settings.vector_scale)
    }

    /// A session over a given generator, e.g. a seeded one.
    pub fn with_generator(mut generator: ScenarioGenerator, vector_scale: f64) -> Result<Self> {
        check_scale(vector_scale)?;
        let scenario = generator.generate();
        log_scenario(&scenario);
        Ok(Session {
            generator,
            scenario,
            vector_scale,
            pending_start: None,
            measurement: None,
            report: None,
            status_message: "Drag from one airplane's position to the other at closest approach.".to_owned(),
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn arena(&self) -> &Arena {
        self.scenario.arena()
    }

    pub fn vector_scale(&self) -> f64 {
        self.vector_scale
    }

    pub fn measurement(&self) -> Option<&UserMeasurement> {
        self.measurement.as_ref()
    }

    pub fn pending_start(&self) -> Option<Point2D> {
        self.pending_start
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Replaces the scenario with a freshly generated one and forgets the old line.
    pub fn regenerate(&mut self) {
        self.scenario = self.generator.generate();
        log_scenario(&self.scenario);
        self.pending_start = None;
        self.measurement = None;
        self.report = None;
        self.status_message = format!("New scenario ({} attempt(s)).", self.generator.stats().attempts);
    }

    /// Changes how long the drawn vectors are.
    pub fn set_vector_scale(&mut self, scale: f64) -> Result<()> {
        check_scale(scale)?;
        self.vector_scale = scale;
        Ok(())
    }

    /// Pointer pressed: start a new line. Hides any previous answer.
    pub fn begin_measurement(&mut self, start: Point2D) {
        self.pending_start = Some(start);
        self.report = None;
    }

    /// Pointer released: complete the line started by `begin_measurement`.
    pub fn finish_measurement(&mut self, end: Point2D) -> Option<UserMeasurement> {
        let start = self.pending_start.take()?;
        let measurement = UserMeasurement::new(start, end);
        debug!("User line {:?} -> {:?}", start, end);
        self.measurement = Some(measurement);
        self.status_message = format!("Your estimate: {}", measurement.distance(self.arena()));
        Some(measurement)
    }

    /// Reveals the true closest approach next to the user's estimate.
    pub fn check(&mut self) -> Report {
        let arena = *self.arena();
        let approach = self.scenario.approach();
        let true_distance = distance(&approach.first, &approach.second, &arena);
        let user_distance = self.measurement.map(|m| m.distance(&arena));

        let report = Report {
            approach,
            true_distance,
            user_distance,
        };
        self.status_message = match user_distance {
            Some(user) => format!("Closest approach: {} (you said {})", true_distance, user),
            None => format!("Closest approach: {}", true_distance),
        };
        info!("{}", self.status_message);
        self.report = Some(report);
        report
    }
}

fn check_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(FlightError::InvalidScale(scale))
    }
}

fn log_scenario(scenario: &Scenario) {
    match serde_json::to_string(scenario) {
        Ok(json) => debug!("Scenario: {}", json),
        Err(err) => debug!("Scenario could not be serialized: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approach::closest_approach_time;
    use crate::scenario::GeneratorConfig;
    use assert_approx_eq::assert_approx_eq;

    fn session(seed: u64) -> Session {
        let generator =
            ScenarioGenerator::with_seed(GeneratorConfig::default(), Arena::default(), seed).unwrap();
        Session::with_generator(generator, 1.0).unwrap()
    }

    #[test]
    fn test_new_session_holds_valid_scenario() {
        let s = session(1);
        let approach = s.scenario().approach();
        assert!(approach.time > 0.0);
        assert!(s.arena().contains(&approach.first));
        assert!(s.measurement().is_none());
        assert!(s.report().is_none());
    }

    #[test]
    fn test_session_from_default_settings() {
        let s = Session::new(&Settings::default()).unwrap();
        assert_eq!(s.vector_scale(), 1.0);
        assert!(s.scenario().approach().time > 0.0);
    }

    #[test]
    fn test_drag_gesture_records_measurement() {
        let mut s = session(2);
        assert!(s.finish_measurement(Point2D::new(5.0, 5.0)).is_none());

        s.begin_measurement(Point2D::new(100.0, 100.0));
        assert_eq!(s.pending_start(), Some(Point2D::new(100.0, 100.0)));
        let m = s.finish_measurement(Point2D::new(100.0, 180.0)).unwrap();
        assert_eq!(m.start, Point2D::new(100.0, 100.0));
        assert!(s.pending_start().is_none());
        assert_eq!(s.measurement().unwrap().distance(s.arena()).to_string(), "10.00");
    }

    #[test]
    fn test_check_reports_both_distances() {
        let mut s = session(3);
        let report = s.check();
        assert!(report.user_distance.is_none());

        s.begin_measurement(Point2D::new(0.0, 0.0));
        s.finish_measurement(Point2D::new(0.0, 80.0));
        let report = s.check();
        assert_eq!(report.user_distance.unwrap().to_string(), "10.00");
        let approach = s.scenario().approach();
        assert_approx_eq!(report.true_distance.miles(), approach.separation() / 8.0);
        assert!(s.report().is_some());

        // A new line hides the answer again.
        s.begin_measurement(Point2D::new(1.0, 1.0));
        assert!(s.report().is_none());
    }

    #[test]
    fn test_regenerate_clears_measurement() {
        let mut s = session(4);
        s.begin_measurement(Point2D::new(0.0, 0.0));
        s.finish_measurement(Point2D::new(10.0, 0.0));
        s.check();
        s.regenerate();
        assert!(s.measurement().is_none());
        assert!(s.report().is_none());
        assert!(s.scenario().approach().time > 0.0);
    }

    #[test]
    fn test_vector_scale_does_not_touch_kinematics() {
        let mut s = session(5);
        let first = *s.scenario().first();
        let second = *s.scenario().second();
        s.begin_measurement(Point2D::new(10.0, 10.0));
        s.finish_measurement(Point2D::new(300.0, 420.0));

        let t_before = closest_approach_time(&first, &second).unwrap();
        let report_before = s.check();

        s.set_vector_scale(3.5).unwrap();
        assert_eq!(s.vector_scale(), 3.5);
        let t_after = closest_approach_time(s.scenario().first(), s.scenario().second()).unwrap();
        let report_after = s.check();

        assert_eq!(t_before, t_after);
        assert_eq!(report_before.true_distance, report_after.true_distance);
        assert_eq!(report_before.user_distance, report_after.user_distance);
        assert_ne!(first.vector_tip(1.0), first.vector_tip(3.5));
    }

    #[test]
    fn test_constructor_rejects_bad_scale() {
        for scale in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let generator =
                ScenarioGenerator::with_seed(GeneratorConfig::default(), Arena::default(), 8).unwrap();
            assert!(matches!(
                Session::with_generator(generator, scale),
                Err(FlightError::InvalidScale(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let mut s = session(6);
        assert!(matches!(s.set_vector_scale(0.0), Err(FlightError::InvalidScale(_))));
        assert!(s.set_vector_scale(f64::INFINITY).is_err());
        assert_eq!(s.vector_scale(), 1.0);
    }
}
