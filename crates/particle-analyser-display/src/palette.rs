//! Discrete colors for split-mode particle coloring.

use glam::Vec3;

/// Fractional part of the golden ratio. Consecutive multiples spread hues
/// evenly around the color wheel without repeating.
const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

/// Simple HSV to RGB conversion helper, all components in `[0, 1]`.
#[allow(
    clippy::many_single_char_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h * 6.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

/// Returns a distinct color for the `index`-th particle.
#[allow(clippy::cast_precision_loss)]
pub fn split_color(index: usize, saturation: f32, value: f32) -> Vec3 {
    let hue = (index as f32 * GOLDEN_RATIO_CONJUGATE).fract();
    hsv_to_rgb(hue, saturation, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hsv_to_rgb() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red - Vec3::X).length() < 1e-5);

        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!((green - Vec3::Y).length() < 1e-5);

        let grey = hsv_to_rgb(0.4, 0.0, 0.5);
        assert!((grey - Vec3::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_neighbours_differ() {
        for i in 0..50 {
            let a = split_color(i, 0.7, 0.9);
            let b = split_color(i + 1, 0.7, 0.9);
            assert!((a - b).length() > 0.05, "colors {i} and {} too close", i + 1);
        }
    }

    #[test]
    fn test_stable_per_index() {
        assert_eq!(split_color(12, 0.7, 0.9), split_color(12, 0.7, 0.9));
    }

    proptest! {
        #[test]
        fn prop_rgb_in_unit_cube(h in -2.0f32..3.0, s in 0.0f32..=1.0, v in 0.0f32..=1.0) {
            let rgb = hsv_to_rgb(h, s, v);
            for c in rgb.to_array() {
                prop_assert!((-1e-5..=1.0 + 1e-5).contains(&c), "component {} out of range", c);
            }
        }
    }
}
