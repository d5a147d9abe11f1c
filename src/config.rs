//! # Settings
//!
//! Runtime settings, read from a JSON file. Every field has a default, so a
//! file only needs to name what it changes:
//!
//! ```json
//! { "generator": { "min_speed": 40.0 }, "vector_scale": 2.0 }
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FlightError, Result};
use crate::scenario::GeneratorConfig;
use crate::utils::geometry::Arena;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "FLIGHT_CONTROL_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: Arena,
    pub generator: GeneratorConfig,
    /// Length multiplier for drawn velocity vectors.
    pub vector_scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            arena: Arena::default(),
            generator: GeneratorConfig::default(),
            vector_scale: 1.0,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Settings> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Loads `path` if given, falling back to defaults when it is unusable.
    pub fn load_or_default(path: Option<&Path>) -> Settings {
        let Some(path) = path else {
            return Settings::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                warn!("Ignoring settings file {}: {}", path.display(), err);
                Settings::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate(&self.arena)?;
        if !(self.vector_scale.is_finite() && self.vector_scale > 0.0) {
            return Err(FlightError::InvalidScale(self.vector_scale));
        }
        Ok(())
    }
}
