//! Color ramps for gradient particle coloring.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{ViewerError, ViewerResult};

/// A color ramp sampled over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the color map at `t`, clamped to `[0, 1]`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self.colors.len() {
            0 => Vec3::ZERO,
            1 => self.colors[0],
            len => {
                let n = len - 1;
                let idx = ((t * n as f32).floor() as usize).min(n - 1);
                let frac = t * n as f32 - idx as f32;
                self.colors[idx].lerp(self.colors[idx + 1], frac)
            }
        }
    }
}

/// Named color maps available to the display dispatch.
#[derive(Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a registry holding the built-in color maps.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        // Black through blue and purple, then red and orange to white, as in the usual "fire" LUT
        self.register(ColorMap::new(
            "fire",
            vec![
                Vec3::new(0.000, 0.000, 0.000),
                Vec3::new(0.000, 0.000, 0.471),
                Vec3::new(0.549, 0.000, 0.604),
                Vec3::new(0.902, 0.125, 0.196),
                Vec3::new(1.000, 0.502, 0.000),
                Vec3::new(1.000, 0.820, 0.000),
                Vec3::new(1.000, 1.000, 1.000),
            ],
        ));

        self.register(ColorMap::new(
            "blues",
            vec![
                Vec3::new(0.969, 0.984, 1.000),
                Vec3::new(0.776, 0.859, 0.937),
                Vec3::new(0.419, 0.682, 0.839),
                Vec3::new(0.129, 0.443, 0.710),
                Vec3::new(0.031, 0.188, 0.420),
            ],
        ));

        self.register(ColorMap::new(
            "reds",
            vec![
                Vec3::new(1.000, 0.961, 0.941),
                Vec3::new(0.988, 0.733, 0.631),
                Vec3::new(0.984, 0.416, 0.290),
                Vec3::new(0.796, 0.094, 0.114),
                Vec3::new(0.404, 0.000, 0.051),
            ],
        ));

        self.register(ColorMap::new(
            "coolwarm",
            vec![
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        self.register(ColorMap::new(
            "rainbow",
            vec![
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
        ));
    }

    /// Registers a color map, replacing any map with the same name.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Gets a color map by name, failing if it is not registered.
    pub fn require(&self, name: &str) -> ViewerResult<&ColorMap> {
        self.get(name)
            .ok_or_else(|| ViewerError::ColorMapNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        assert_eq!(map.sample(0.0), Vec3::ZERO);
        assert_eq!(map.sample(1.0), Vec3::ONE);
        assert!((map.sample(0.5) - Vec3::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_sample_clamps() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        assert_eq!(map.sample(-2.0), Vec3::ZERO);
        assert_eq!(map.sample(7.0), Vec3::ONE);
        assert_eq!(map.sample(f32::NAN), Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_maps() {
        assert_eq!(ColorMap::new("empty", vec![]).sample(0.3), Vec3::ZERO);
        assert_eq!(ColorMap::new("one", vec![Vec3::X]).sample(0.3), Vec3::X);
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ColorMapRegistry::new();
        for name in ["viridis", "fire", "blues", "reds", "coolwarm", "rainbow"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(matches!(
            registry.require("nope"),
            Err(ViewerError::ColorMapNotFound(_))
        ));
    }
}
