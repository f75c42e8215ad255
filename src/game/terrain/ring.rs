//! Ring Contours
//!
//! A ring is a closed 2D outline sampled at a fixed angular step. Each sample
//! sits at `base + variance * U(0,1)` from the center, which gives the island
//! its ragged, hand-cut edge.

use glam::Vec2;

use crate::game::error::GenerationError;
use crate::random::RandomField;

/// Default angular step between samples, in degrees.
pub const DEFAULT_STEP_DEG: u32 = 15;

/// Closed outline, one point per angular sample.
///
/// The last point connects back to the first; no closing duplicate is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RingContour {
    points: Vec<Vec2>,
    radii: Vec<f32>,
}

impl RingContour {
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Realized radius per sample, index-aligned with [`RingContour::points`].
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_radius(&self) -> f32 {
        self.radii.iter().copied().fold(0.0, f32::max)
    }

    /// Outline reordered counter-clockwise (the sampling order runs clockwise).
    pub fn counter_clockwise(&self) -> Vec<Vec2> {
        let mut points = self.points.clone();
        points.reverse();
        points
    }
}

/// Check that `step_deg` splits the full turn into whole samples.
pub fn validate_step(step_deg: u32) -> Result<(), GenerationError> {
    if step_deg == 0 || 360 % step_deg != 0 {
        return Err(GenerationError::InvalidAngleStep(step_deg));
    }
    Ok(())
}

/// Sample a ring at every `step_deg` in `[0, 360)`.
///
/// `base_radius` is asked for the base at each sample angle (in degrees), which
/// lets nested rings follow the realized outline of the ring inside them.
/// Point `i` lies at `(r sin a, r cos a)`.
pub fn build_ring(
    mut base_radius: impl FnMut(u32) -> f32,
    variance: f32,
    step_deg: u32,
    rng: &mut RandomField,
) -> Result<RingContour, GenerationError> {
    validate_step(step_deg)?;

    let samples = (360 / step_deg) as usize;
    let mut points = Vec::with_capacity(samples);
    let mut radii = Vec::with_capacity(samples);

    for angle in (0..360).step_by(step_deg as usize) {
        let radius = base_radius(angle) + rng.jitter(variance);
        let theta = (angle as f32).to_radians();
        points.push(Vec2::new(radius * theta.sin(), radius * theta.cos()));
        radii.push(radius);
    }

    Ok(RingContour { points, radii })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_gives_24_samples() {
        let mut rng = RandomField::seeded(1);
        let ring = build_ring(|_| 12.0, 1.5, DEFAULT_STEP_DEG, &mut rng).unwrap();
        assert_eq!(ring.len(), 24);
        assert_eq!(ring.radii().len(), 24);
    }

    #[test]
    fn test_radii_within_variance() {
        let mut rng = RandomField::seeded(2);
        let ring = build_ring(|_| 12.0, 1.5, 15, &mut rng).unwrap();
        for (&r, p) in ring.radii().iter().zip(ring.points()) {
            assert!((12.0..=13.5).contains(&r));
            assert!((p.length() - r).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_variance_is_a_circle() {
        let mut rng = RandomField::seeded(3);
        let ring = build_ring(|_| 5.0, 0.0, 90, &mut rng).unwrap();
        let expected = [
            Vec2::new(0.0, 5.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(-5.0, 0.0),
        ];
        for (p, e) in ring.points().iter().zip(expected) {
            assert!(p.distance(e) < 1e-4);
        }
    }

    #[test]
    fn test_base_radius_sees_each_angle() {
        let mut rng = RandomField::seeded(4);
        let mut angles = Vec::new();
        build_ring(
            |a| {
                angles.push(a);
                1.0
            },
            0.0,
            45,
            &mut rng,
        )
        .unwrap();
        assert_eq!(angles, vec![0, 45, 90, 135, 180, 225, 270, 315]);
    }

    #[test]
    fn test_rejects_bad_steps() {
        let mut rng = RandomField::seeded(5);
        assert_eq!(
            build_ring(|_| 1.0, 0.0, 7, &mut rng),
            Err(GenerationError::InvalidAngleStep(7))
        );
        assert_eq!(
            build_ring(|_| 1.0, 0.0, 0, &mut rng),
            Err(GenerationError::InvalidAngleStep(0))
        );
    }

    #[test]
    fn test_counter_clockwise_has_positive_area() {
        let mut rng = RandomField::seeded(6);
        let ring = build_ring(|_| 3.0, 0.5, 15, &mut rng).unwrap();
        let pts = ring.counter_clockwise();
        let area: f32 = (0..pts.len())
            .map(|i| pts[i].perp_dot(pts[(i + 1) % pts.len()]))
            .sum();
        assert!(area > 0.0);
    }
}
