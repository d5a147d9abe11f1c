#![warn(non_snake_case)]
//! # Flight Control Main Entry Point
//!
//! An air traffic control drill. Two airplanes fly straight-line vectors across
//! an 800 x 800 arena; the user drags a line where they expect the airplanes to
//! be at their closest approach, then checks it against the true separation.
//!
//! Settings are read from the JSON file named by the first argument or by
//! `FLIGHT_CONTROL_CONFIG`. Logging follows `RUST_LOG`.
//!
//! ## License
//! Licensed under the MIT License.

use log::info;
use std::error::Error;
use std::path::PathBuf;

use flight_control::config::{Settings, CONFIG_ENV};

fn settings_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

#[cfg(all(feature = "gui", not(feature = "headless")))]
fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    flight_control::ui::run_main_window(settings)
}

/// Without a window: generate one scenario and print the answer.
#[cfg(any(not(feature = "gui"), feature = "headless"))]
fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    use flight_control::session::Session;

    let mut session = Session::new(settings)?;
    for (name, plane) in [("A", session.scenario().first()), ("B", session.scenario().second())] {
        let p = plane.position0();
        println!(
            "{}: start ({:.0}, {:.0}), heading {:.1}, speed {:.1}",
            name,
            p.x,
            p.y,
            plane.heading_degrees(),
            plane.speed()
        );
    }
    let report = session.check();
    println!(
        "Closest approach at t = {:.2}: {} miles",
        report.approach.time, report.true_distance
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("Flight Control starting...");

    let settings = Settings::load_or_default(settings_path().as_deref());
    run(&settings)?;

    info!("Flight Control exiting.");
    Ok(())
}
