//! Geometry and interpolation helpers

use glam::Vec2;

/// Signed distance from a point to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Strict circle-circle overlap: centers closer than the sum of radii
#[inline]
pub fn circles_intersect(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    sd_circle(a, b, rb) < ra
}

/// Linear interpolation from `a` toward `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-out over `t` in [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Reflect a 1D position/velocity pair off `[min, max]` walls.
/// Returns the clamped position and the (possibly flipped) velocity.
#[inline]
pub fn reflect_between(pos: f32, vel: f32, min: f32, max: f32) -> (f32, f32) {
    if pos < min {
        (min, vel.abs())
    } else if pos > max {
        (max, -vel.abs())
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_intersect_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_intersect(a, 5.0, Vec2::new(9.0, 0.0), 5.0));
        // Touching is not a hit
        assert!(!circles_intersect(a, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_intersect(a, 1.0, Vec2::new(0.0, 30.0), 5.0));
    }

    #[test]
    fn test_lerp_and_ease() {
        assert!((lerp(0.0, 100.0, 0.12) - 12.0).abs() < 1e-5);
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_reflect_between() {
        assert_eq!(reflect_between(-3.0, -1.5, 0.0, 100.0), (0.0, 1.5));
        assert_eq!(reflect_between(105.0, 2.0, 0.0, 100.0), (100.0, -2.0));
        assert_eq!(reflect_between(50.0, 2.0, 0.0, 100.0), (50.0, 2.0));
    }
}
