// src/lib.rs

pub mod aircraft;
pub mod approach;
pub mod config;
pub mod error;
pub mod measure;
pub mod scenario;
pub mod session;
#[cfg(feature = "gui")]
pub mod ui;
pub mod utils;

pub use error::{FlightError, Result};
