//! Finite rectangular collision surfaces
//!
//! A [`CollisionSurface`] is a textured quad's collision proxy: a rectangle
//! in space with an outward normal. It resolves penetration of a vertical
//! stack of avatar spheres against its face and reports border contacts as
//! deferred [`EdgeCase`]s for the world to rank.
//!
//! # Contact classification
//!
//! - **Face**: the sphere center projects inside the footprint. The stack
//!   is pushed out along the normal.
//! - **Slope**: a face contact on a surface with `0.5 < normal.y < 1`. The
//!   depth is measured straight down and the push is straight up, so the
//!   avatar does not creep down ramps.
//! - **Edge**: the center projects outside the footprint while the sphere
//!   still reaches the face near a border. Nothing is applied here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{world_down, world_up, Vec3};
use super::primitives::{Aabb, BoundingSphere, Plane, PlaneIntersection, Ray};

/// Normals with a Y component above this support the avatar
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// Shortest accepted normal/up vector before normalization
const MIN_AXIS_LENGTH: f32 = 1e-6;

/// Errors raised while building a surface from provider data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The normal has (nearly) zero length
    #[error("surface normal has zero length")]
    ZeroNormal,

    /// The up vector has (nearly) zero length
    #[error("surface up vector has zero length")]
    ZeroUp,

    /// The up vector is parallel to the normal
    #[error("surface up vector is parallel to its normal")]
    UpParallelToNormal,

    /// Width or height is zero, negative or not finite
    #[error("surface extent must be positive, got {width} x {height}")]
    NonPositiveExtent {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// The origin has a NaN or infinite component
    #[error("surface origin is not finite")]
    NonFiniteOrigin,
}

/// Provider-side description of a surface
///
/// This is the data a level hands to the engine; [`CollisionSurface::new`]
/// turns it into collision geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDefinition {
    /// Center of the rectangle
    pub origin: Vec3,
    /// Outward normal (normalized on construction)
    pub normal: Vec3,
    /// Direction of the rectangle's height (normalized on construction)
    pub up: Vec3,
    /// Extent along `left`
    pub width: f32,
    /// Extent along `up`
    pub height: f32,
    /// Texture name for the renderer
    #[serde(default)]
    pub texture: String,
}

impl SurfaceDefinition {
    /// Describe a surface without a texture
    pub fn new(origin: Vec3, normal: Vec3, up: Vec3, width: f32, height: f32) -> Self {
        Self {
            origin,
            normal,
            up,
            width,
            height,
            texture: String::new(),
        }
    }

    /// Attach a texture name
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }
}

/// The four corners of a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCorners {
    /// Corner at `+up, +left`
    pub upper_left: Vec3,
    /// Corner at `+up, -left`
    pub upper_right: Vec3,
    /// Corner at `-up, +left`
    pub lower_left: Vec3,
    /// Corner at `-up, -left`
    pub lower_right: Vec3,
}

impl SurfaceCorners {
    /// Corners as an array, clockwise from the upper left
    pub fn to_array(&self) -> [Vec3; 4] {
        [self.upper_left, self.upper_right, self.lower_right, self.lower_left]
    }
}

/// A contact with a surface border, resolved later by the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCase {
    /// Depth of the contact, always non-negative
    pub distance: f32,
    /// Correction that would resolve this contact
    pub correction: Vec3,
}

impl EdgeCase {
    /// Create an edge case
    pub fn new(distance: f32, correction: Vec3) -> Self {
        Self { distance, correction }
    }
}

/// Outcome of testing one sphere stack against one surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceContact {
    /// Correction already applied to the spheres and velocity
    pub correction: Option<Vec3>,
    /// Supporting normal when the bottom sphere rests on this surface
    pub ground_normal: Option<Vec3>,
    /// Deferred border contact
    pub edge_case: Option<EdgeCase>,
}

enum ContactKind {
    Face { normal: Vec3, depth: f32 },
    Edge(EdgeCase),
}

/// A finite rectangular plane that collides with avatar sphere stacks
///
/// Immutable after construction. `normal`, `up` and `left = normal × up`
/// are orthonormal.
#[derive(Debug, Clone)]
pub struct CollisionSurface {
    origin: Vec3,
    normal: Vec3,
    up: Vec3,
    left: Vec3,
    width: f32,
    height: f32,
    corners: SurfaceCorners,
    bounds: Aabb,
    plane: Plane,
    edge_planes: [Plane; 4],
}

impl CollisionSurface {
    /// Build a surface centered at `origin`
    ///
    /// `normal` and `up` are normalized; `up` is made orthogonal to the
    /// normal. Degenerate input is rejected instead of producing NaNs.
    pub fn new(origin: Vec3, normal: Vec3, up: Vec3, width: f32, height: f32) -> Result<Self, SurfaceError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SurfaceError::NonPositiveExtent { width, height });
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(SurfaceError::NonFiniteOrigin);
        }

        let normal = normal.try_normalize(MIN_AXIS_LENGTH).ok_or(SurfaceError::ZeroNormal)?;
        let up = up.try_normalize(MIN_AXIS_LENGTH).ok_or(SurfaceError::ZeroUp)?;
        let up = (up - normal * normal.dot(&up))
            .try_normalize(MIN_AXIS_LENGTH)
            .ok_or(SurfaceError::UpParallelToNormal)?;
        let left = normal.cross(&up);

        let upper_center = origin + up * (height / 2.0);
        let upper_left = upper_center + left * (width / 2.0);
        let upper_right = upper_center - left * (width / 2.0);
        let lower_left = upper_left - up * height;
        let lower_right = upper_right - up * height;
        let corners = SurfaceCorners { upper_left, upper_right, lower_left, lower_right };

        let bounds = Aabb::from_points(&corners.to_array());
        let plane = Plane::from_points(lower_right, upper_right, upper_left);

        // Each border plane contains its edge and the normal; reversing the
        // winding of the edge makes the plane normal point away from the quad.
        let edge_planes = [
            Plane::from_points(upper_right, upper_left, upper_left + normal),
            Plane::from_points(lower_right, upper_right, upper_right + normal),
            Plane::from_points(lower_left, lower_right, lower_right + normal),
            Plane::from_points(upper_left, lower_left, lower_left + normal),
        ];

        Ok(Self {
            origin,
            normal,
            up,
            left,
            width,
            height,
            corners,
            bounds,
            plane,
            edge_planes,
        })
    }

    /// Build a surface from provider data
    pub fn from_definition(definition: &SurfaceDefinition) -> Result<Self, SurfaceError> {
        Self::new(
            definition.origin,
            definition.normal,
            definition.up,
            definition.width,
            definition.height,
        )
    }

    /// Center of the rectangle
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit outward normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit left vector, `normal × up`
    pub fn left(&self) -> Vec3 {
        self.left
    }

    /// Extent along `left`
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along `up`
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The four corners
    pub fn corners(&self) -> &SurfaceCorners {
        &self.corners
    }

    /// Axis-aligned box around the corners
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Infinite plane through the corners, normal toward free space
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Border planes, top, right, bottom, left
    pub fn edge_planes(&self) -> &[Plane; 4] {
        &self.edge_planes
    }

    /// Whether this surface can support the avatar
    pub fn is_walkable(&self) -> bool {
        self.normal.y > GROUND_NORMAL_MIN_Y
    }

    /// Whether this surface is a slope handled with vertical resolution
    pub fn is_slope(&self) -> bool {
        self.normal.y > GROUND_NORMAL_MIN_Y && self.normal.y < 1.0
    }

    /// Test a sphere stack, ordered top to bottom, against this surface
    ///
    /// Spheres are scanned from the top; the first one that overlaps the
    /// bounding box and penetrates the face is the only one this surface
    /// reacts to. A face contact moves every sphere and the velocity by the
    /// correction so surfaces tested later see the corrected stack. A border
    /// contact is returned as an [`EdgeCase`] and nothing is mutated.
    pub fn test(&self, spheres: &mut [BoundingSphere], velocity: &mut Vec3) -> SurfaceContact {
        let Some(bottom) = spheres.len().checked_sub(1) else {
            return SurfaceContact::default();
        };

        for index in 0..spheres.len() {
            let sphere = spheres[index];
            if !self.bounds.intersects_sphere(&sphere) {
                continue;
            }

            let true_distance = self.plane.signed_distance(sphere.center);
            let penetration = true_distance - sphere.radius;
            if penetration >= 0.0 {
                continue;
            }

            return match self.classify(&sphere, true_distance, penetration) {
                ContactKind::Edge(edge_case) => {
                    log::trace!(
                        "Edge contact on sphere {} at {:?}: depth {:.4}",
                        index, sphere.center, edge_case.distance
                    );
                    SurfaceContact {
                        edge_case: Some(edge_case),
                        ..SurfaceContact::default()
                    }
                }
                ContactKind::Face { normal, depth } => {
                    let correction = normal * depth;
                    *velocity += correction;
                    for sphere in spheres.iter_mut() {
                        sphere.center += correction;
                    }

                    let ground_normal = (index == bottom && normal.y > GROUND_NORMAL_MIN_Y).then_some(normal);
                    log::trace!(
                        "Face contact on sphere {}: correction {:?}, grounded {}",
                        index, correction, ground_normal.is_some()
                    );
                    SurfaceContact {
                        correction: Some(correction),
                        ground_normal,
                        edge_case: None,
                    }
                }
            };
        }

        SurfaceContact::default()
    }

    fn classify(&self, sphere: &BoundingSphere, true_distance: f32, penetration: f32) -> ContactKind {
        let to_face = Ray::new(sphere.center, -self.normal);

        if self.bounds.intersect_ray(&to_face).is_none() {
            // Outside the footprint: only a sphere reaching across a border counts
            for edge_plane in &self.edge_planes {
                if edge_plane.classify_sphere(sphere) == PlaneIntersection::Intersecting {
                    let edge_distance = edge_plane.signed_distance(sphere.center);
                    let effective_radius = (sphere.radius * sphere.radius - edge_distance * edge_distance)
                        .max(0.0)
                        .sqrt();
                    let depth = (true_distance - effective_radius).abs();
                    return ContactKind::Edge(EdgeCase::new(depth, self.normal * depth));
                }
            }
        } else if self.is_slope() {
            let downward = Ray::new(sphere.center, world_down());
            if let Some(vertical_distance) = downward.intersect_plane(&self.plane) {
                return ContactKind::Face {
                    normal: world_up(),
                    depth: (vertical_distance - sphere.radius).abs(),
                };
            }
        }

        ContactKind::Face {
            normal: self.normal,
            depth: penetration.abs(),
        }
    }
}
