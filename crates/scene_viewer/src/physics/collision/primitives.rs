//! Primitive collision shapes and intersection algorithms
//!
//! Provides the ray and bounding sphere used by picking and by the scene
//! graph's proximity grouping.

use crate::foundation::math::Vec3;

/// A ray for ray casting and picking
///
/// The direction is stored as given; intersection tests do not require it
/// to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// A bounding sphere for picking and proximity tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 0.0)
    }
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Replace the sphere's parameters
    ///
    /// No check is made against the geometry the sphere is meant to enclose;
    /// the caller owns that guarantee.
    pub fn update(&mut self, center: Vec3, radius: f32) {
        self.center = center;
        self.radius = radius;
    }

    /// Check if this sphere overlaps or touches another
    pub fn overlaps(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check whether `point` lies inside the sphere, allowing `tolerance`
    pub fn contains_point(&self, point: &Vec3, tolerance: f32) -> bool {
        (point - self.center).magnitude() <= self.radius + tolerance
    }

    /// Test whether the infinite line through `ray` meets this sphere
    ///
    /// Solves `|origin + t*direction - center|^2 = radius^2` for any real `t`
    /// and reports a hit when the discriminant is non-negative. A ray with a
    /// zero direction hits only if its origin is inside the sphere.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let oc = ray.origin - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;

        let a = ray.direction.dot(&ray.direction);
        if a <= f32::EPSILON * f32::EPSILON {
            return c <= 0.0;
        }

        let b = 2.0 * oc.dot(&ray.direction);
        let discriminant = b * b - 4.0 * a * c;
        discriminant >= 0.0
    }
}
