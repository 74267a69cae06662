//! Ritter's bounding sphere estimator
//!
//! Computes a valid, approximately minimal sphere around a point set in two
//! linear passes:
//!
//! 1. From the first point find the farthest point `A`, then the point `B`
//!    farthest from `A`. The initial sphere spans `A`..`B`.
//! 2. Walk every point once. A point outside the current sphere grows it just
//!    enough to touch the point while still enclosing the old sphere.
//!
//! The result always encloses every input point. It is typically within a
//! few percent of the minimal sphere but makes no optimality promise.

use super::primitives::BoundingSphere;
use crate::foundation::math::Vec3;

/// Compute a Ritter bounding sphere for `points`
///
/// Returns `None` when `points` is empty. A single point yields a sphere of
/// radius zero centered on it.
pub fn ritter_bounding_sphere(points: &[Vec3]) -> Option<BoundingSphere> {
    let first = points.first()?;

    let a = farthest_from(points, first);
    let b = farthest_from(points, &a);

    let mut center = (a + b) * 0.5;
    let mut radius = (b - a).magnitude() * 0.5;

    for point in points {
        let offset = point - center;
        let distance = offset.magnitude();
        if distance > radius {
            let new_radius = (radius + distance) * 0.5;
            center += offset * ((new_radius - radius) / distance);
            radius = new_radius;
        }
    }

    Some(BoundingSphere::new(center, radius))
}

fn farthest_from(points: &[Vec3], origin: &Vec3) -> Vec3 {
    let mut best = *origin;
    let mut best_distance = 0.0_f32;
    for point in points {
        let distance = (point - origin).magnitude_squared();
        if distance > best_distance {
            best_distance = distance;
            best = *point;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    const EPSILON: f32 = 1e-4;

    fn assert_encloses(sphere: &BoundingSphere, points: &[Vec3]) {
        for p in points {
            let distance = (p - sphere.center).magnitude();
            assert!(
                distance <= sphere.radius + EPSILON * sphere.radius.max(1.0),
                "point {p:?} at {distance} outside radius {}",
                sphere.radius
            );
        }
    }

    #[test]
    fn test_empty_set_has_no_sphere() {
        assert!(ritter_bounding_sphere(&[]).is_none());
    }

    #[test]
    fn test_single_point() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let sphere = ritter_bounding_sphere(&[p]).unwrap();
        assert_relative_eq!(sphere.center, p);
        assert_relative_eq!(sphere.radius, 0.0);
    }

    #[test]
    fn test_two_points_span_diameter() {
        let points = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
        let sphere = ritter_bounding_sphere(&points).unwrap();
        assert_relative_eq!(sphere.center, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(sphere.radius, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_cube_corners() {
        let mut points = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    points.push(Vec3::new(x, y, z));
                }
            }
        }
        let sphere = ritter_bounding_sphere(&points).unwrap();
        assert_encloses(&sphere, &points);
        // Opposite corners are found first, so the result is exact here
        assert_relative_eq!(sphere.radius, 3.0_f32.sqrt(), epsilon = EPSILON);
        assert_relative_eq!(sphere.center, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_growth_pass_encloses_outlier() {
        // The off-axis point is not on the initial diameter
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.5, 0.0),
        ];
        let sphere = ritter_bounding_sphere(&points).unwrap();
        assert_encloses(&sphere, &points);
    }

    #[test]
    fn test_random_point_sets_are_enclosed() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let count = rng.gen_range(1..64);
            let scale = rng.gen_range(0.01..100.0_f32);
            let offset = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let points: Vec<Vec3> = (0..count)
                .map(|_| {
                    offset
                        + Vec3::new(
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(-1.0..1.0),
                        ) * scale
                })
                .collect();

            let sphere = ritter_bounding_sphere(&points).unwrap();
            assert!(sphere.radius >= 0.0);
            assert_encloses(&sphere, &points);
        }
    }
}
