//! Configuration options for the particle manager.

use serde::{Deserialize, Serialize};

use crate::error::{ParticleError, Result};

/// Display configuration for the particle manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerOptions {
    /// Name of the color map sampled in gradient mode.
    pub gradient_color_map: String,

    /// Which particle attribute drives the gradient.
    pub gradient_attribute: GradientAttribute,

    /// HSV saturation of split-mode colors.
    pub split_saturation: f32,

    /// HSV value of split-mode colors.
    pub split_value: f32,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            gradient_color_map: "viridis".to_string(),
            gradient_attribute: GradientAttribute::Identity,
            split_saturation: 0.7,
            split_value: 0.9,
        }
    }
}

impl ManagerOptions {
    /// Parses options from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the split-mode HSV parameters lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("split_saturation", self.split_saturation),
            ("split_value", self.split_value),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParticleError::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.gradient_color_map.is_empty() {
            return Err(ParticleError::InvalidOptions(
                "gradient_color_map must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Attribute used to position a particle on the gradient color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GradientAttribute {
    /// Particle id over the full collection; colors stay put when filters change.
    #[default]
    Identity,
    /// Volume, normalised over the currently visible particles.
    Volume,
}
