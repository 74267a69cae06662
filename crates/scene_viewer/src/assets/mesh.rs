//! Mesh capability and the triangle mesh used by scene nodes

use crate::foundation::math::Vec3;
use crate::physics::{ritter_bounding_sphere, BoundingSphere};

/// Narrow capability a scene node needs from its mesh
///
/// A node owns its mesh exclusively; the scene core only ever touches it
/// through these operations.
pub trait Mesh {
    /// World-space centroid of the current bounding sphere
    fn center(&self) -> Vec3;

    /// Radius of the current bounding sphere
    fn radius(&self) -> f32;

    /// Move the mesh by `offset` in world space
    fn translate(&mut self, offset: &Vec3);

    /// Scale the mesh uniformly by `factor` about its model origin
    fn scale(&mut self, factor: f32);

    /// Recompute the bounding sphere from the current world-space vertices
    ///
    /// The result becomes the mesh's authoritative center and radius.
    fn refresh_bounds(&mut self);

    /// Number of vertices in the mesh
    fn vertex_count(&self) -> usize;

    /// Current bounding sphere
    fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.radius())
    }
}

/// Indexed triangle mesh with a translation and uniform scale
///
/// Positions are kept in model space. World positions are
/// `position * scale + translation`.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    translation: Vec3,
    scale: f32,
    center: Vec3,
    radius: f32,
}

impl TriangleMesh {
    /// Create a mesh from model-space positions and triangle indices
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let mut mesh = Self {
            positions,
            triangles,
            translation: Vec3::zeros(),
            scale: 1.0,
            center: Vec3::zeros(),
            radius: 0.0,
        };
        mesh.refresh_bounds();
        mesh
    }

    /// Axis-aligned cube centered on the model origin
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let positions = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let triangles = vec![
            [0, 2, 1], [0, 3, 2], // back
            [4, 5, 6], [4, 6, 7], // front
            [0, 1, 5], [0, 5, 4], // bottom
            [3, 6, 2], [3, 7, 6], // top
            [0, 4, 7], [0, 7, 3], // left
            [1, 2, 6], [1, 6, 5], // right
        ];
        Self::new(positions, triangles)
    }

    /// Latitude/longitude sphere centered on the model origin
    ///
    /// `segments` is clamped to at least 3 and `rings` to at least 2.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        use crate::foundation::math::constants::PI;

        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut positions = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for segment in 0..=segments {
                let theta = 2.0 * PI * segment as f32 / segments as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                positions.push(Vec3::new(
                    radius * sin_phi * cos_theta,
                    radius * cos_phi,
                    radius * sin_phi * sin_theta,
                ));
            }
        }

        let stride = segments + 1;
        let mut triangles = Vec::with_capacity((rings * segments * 2) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                triangles.push([a, b, a + 1]);
                triangles.push([a + 1, b, b + 1]);
            }
        }

        Self::new(positions, triangles)
    }

    /// Model-space positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle index list
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Current translation
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Current uniform scale
    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    /// Iterate world-space vertex positions
    pub fn world_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .iter()
            .map(move |p| p * self.scale + self.translation)
    }
}

impl Mesh for TriangleMesh {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn translate(&mut self, offset: &Vec3) {
        self.translation += offset;
        self.center += offset;
    }

    fn scale(&mut self, factor: f32) {
        self.scale *= factor;
        self.refresh_bounds();
    }

    fn refresh_bounds(&mut self) {
        let world: Vec<Vec3> = self.world_positions().collect();
        match ritter_bounding_sphere(&world) {
            Some(sphere) => {
                self.center = sphere.center;
                self.radius = sphere.radius;
            }
            None => {
                self.center = self.translation;
                self.radius = 0.0;
            }
        }
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
