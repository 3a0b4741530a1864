//! Vector control settings
//!
//! The values of the four input toggles, used as construction defaults and
//! as the target of a reset. Persisted as JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::VectorMode;

/// Input toggles of the vector controls panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityInputs {
    /// Velocity vectors checkbox
    pub velocity_vectors_on: bool,
    /// Acceleration vectors checkbox
    pub acceleration_vectors_on: bool,
    /// Force vectors checkbox
    pub force_vectors_on: bool,
    /// Total / components radio group
    pub mode: VectorMode,
}

impl Default for VisibilityInputs {
    fn default() -> Self {
        Self {
            velocity_vectors_on: false,
            acceleration_vectors_on: false,
            force_vectors_on: false,
            mode: VectorMode::Total,
        }
    }
}

impl VisibilityInputs {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file, failing on any I/O or parse error
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load settings from a JSON file, falling back to defaults.
    /// A missing file is expected; other failures are logged as warnings.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(inputs) => {
                    log::info!("Loaded vector settings from {}", path.display());
                    inputs
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default vector settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Vector settings saved to {}", path.display());
        Ok(())
    }
}
