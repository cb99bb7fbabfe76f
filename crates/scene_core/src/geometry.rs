//! Immutable shape data shared between entities
//!
//! Geometry is built once and handed out behind an `Arc`; entities never own
//! or mutate it. The local bounding box is derived from the vertex data when
//! the geometry is built, and since the data cannot change afterwards the
//! stored bounds always describe the current vertices.

use crate::error::GeometryError;
use crate::foundation::math::Vec3;
use crate::physics::Aabb;
use std::f32::consts::{PI, TAU};

/// Parameters the geometry was generated from
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// UV sphere centred on the origin
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Segments around the equator
        width_segments: u32,
        /// Segments from pole to pole
        height_segments: u32,
    },
    /// Flat rectangle in the XY plane
    Plane {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Subdivisions along X
        width_segments: u32,
        /// Subdivisions along Y
        height_segments: u32,
    },
    /// Torus lying in the XY plane
    Torus {
        /// Distance from the centre to the middle of the tube
        radius: f32,
        /// Tube radius
        tube: f32,
        /// Segments around the tube
        radial_segments: u32,
        /// Segments around the ring
        tubular_segments: u32,
    },
    /// Arbitrary vertex cloud
    Points,
}

/// Vertex positions plus the bounds derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    positions: Vec<Vec3>,
    bounds: Result<Aabb, GeometryError>,
}

impl Geometry {
    /// Fewest segments around the equator a sphere can be built with
    pub const MIN_SPHERE_WIDTH_SEGMENTS: u32 = 3;
    /// Fewest pole-to-pole segments a sphere can be built with
    pub const MIN_SPHERE_HEIGHT_SEGMENTS: u32 = 2;

    /// Check sphere parameters without generating vertices
    pub fn check_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<(), GeometryError> {
        check_positive("radius", radius)?;
        if width_segments < Self::MIN_SPHERE_WIDTH_SEGMENTS || height_segments < Self::MIN_SPHERE_HEIGHT_SEGMENTS {
            return Err(GeometryError::InvalidParameters(format!(
                "sphere needs at least {}x{} segments, got {width_segments}x{height_segments}",
                Self::MIN_SPHERE_WIDTH_SEGMENTS,
                Self::MIN_SPHERE_HEIGHT_SEGMENTS
            )));
        }
        Ok(())
    }

    /// Generate a UV sphere
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<Self, GeometryError> {
        Self::check_sphere(radius, width_segments, height_segments)?;

        let mut positions = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let theta = ratio(iy, height_segments) * PI;
            for ix in 0..=width_segments {
                let phi = ratio(ix, width_segments) * TAU;
                positions.push(Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }

        Ok(Self::build(
            Shape::Sphere { radius, width_segments, height_segments },
            positions,
        ))
    }

    /// Generate a subdivided plane facing +Z
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Result<Self, GeometryError> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        if width_segments == 0 || height_segments == 0 {
            return Err(GeometryError::InvalidParameters(
                "plane needs at least one segment per axis".to_string(),
            ));
        }

        let mut positions = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let y = ratio(iy, height_segments).mul_add(height, -height * 0.5);
            for ix in 0..=width_segments {
                let x = ratio(ix, width_segments).mul_add(width, -width * 0.5);
                positions.push(Vec3::new(x, -y, 0.0));
            }
        }

        Ok(Self::build(
            Shape::Plane { width, height, width_segments, height_segments },
            positions,
        ))
    }

    /// Generate a torus around the Z axis
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Result<Self, GeometryError> {
        check_positive("radius", radius)?;
        check_positive("tube", tube)?;
        if radial_segments < 3 || tubular_segments < 3 {
            return Err(GeometryError::InvalidParameters(format!(
                "torus needs at least 3 segments each way, got {radial_segments}x{tubular_segments}"
            )));
        }

        let mut positions = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
        for j in 0..=radial_segments {
            let v = ratio(j, radial_segments) * TAU;
            for i in 0..=tubular_segments {
                let u = ratio(i, tubular_segments) * TAU;
                let ring = tube.mul_add(v.cos(), radius);
                positions.push(Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
            }
        }

        Ok(Self::build(
            Shape::Torus { radius, tube, radial_segments, tubular_segments },
            positions,
        ))
    }

    /// Wrap an arbitrary vertex cloud
    ///
    /// No validation happens here; an empty or non-finite cloud reports its
    /// failure from [`Geometry::bounding_box`].
    pub fn from_points(positions: Vec<Vec3>) -> Self {
        Self::build(Shape::Points, positions)
    }

    fn build(shape: Shape, positions: Vec<Vec3>) -> Self {
        let bounds = compute_bounds(&positions);
        Self { shape, positions, bounds }
    }

    /// Generator parameters
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Vertex positions in model space
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Model-space bounding box of the vertex data
    pub fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        self.bounds.clone()
    }
}

fn compute_bounds(positions: &[Vec3]) -> Result<Aabb, GeometryError> {
    if let Some(index) = positions.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(GeometryError::NonFinite { index });
    }
    Aabb::from_points(positions.iter().copied()).ok_or(GeometryError::Empty)
}

fn check_positive(name: &str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameters(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(step: u32, segments: u32) -> f32 {
    step as f32 / segments as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sphere_bounds_match_radius() {
        let sphere = Geometry::sphere(0.5, 64, 64).unwrap();
        let bounds = sphere.bounding_box().unwrap();

        assert_eq!(sphere.vertex_count(), 65 * 65);
        assert_abs_diff_eq!(bounds.min, Vec3::new(-0.5, -0.5, -0.5), epsilon = 1e-5);
        assert_abs_diff_eq!(bounds.max, Vec3::new(0.5, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_plane_is_flat() {
        let plane = Geometry::plane(1.0, 1.0, 100, 100).unwrap();
        let bounds = plane.bounding_box().unwrap();

        assert!(bounds.is_degenerate());
        assert_abs_diff_eq!(bounds.min, Vec3::new(-0.5, -0.5, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(bounds.max, Vec3::new(0.5, 0.5, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_torus_bounds() {
        let torus = Geometry::torus(0.3, 0.2, 64, 128).unwrap();
        let bounds = torus.bounding_box().unwrap();

        assert_abs_diff_eq!(bounds.max.x, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(bounds.min.x, -0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(bounds.max.z, 0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(matches!(
            Geometry::sphere(-1.0, 16, 16),
            Err(GeometryError::InvalidParameters(_))
        ));
        assert!(matches!(
            Geometry::sphere(1.0, 2, 16),
            Err(GeometryError::InvalidParameters(_))
        ));
        assert!(Geometry::plane(1.0, 1.0, 0, 1).is_err());
        assert!(Geometry::torus(1.0, f32::NAN, 8, 8).is_err());
    }

    #[test]
    fn test_empty_points_fail_bounds() {
        let geometry = Geometry::from_points(Vec::new());
        assert_eq!(geometry.bounding_box(), Err(GeometryError::Empty));
    }

    #[test]
    fn test_non_finite_point_reported() {
        let geometry = Geometry::from_points(vec![
            Vec3::zeros(),
            Vec3::new(f32::NAN, 0.0, 0.0),
        ]);
        assert_eq!(geometry.bounding_box(), Err(GeometryError::NonFinite { index: 1 }));
    }

    #[test]
    fn test_single_point_is_degenerate_but_valid() {
        let geometry = Geometry::from_points(vec![Vec3::new(1.0, 2.0, 3.0)]);
        let bounds = geometry.bounding_box().unwrap();
        assert_eq!(bounds.min, bounds.max);
    }
}
