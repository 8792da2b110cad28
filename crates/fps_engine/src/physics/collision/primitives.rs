//! Primitive collision shapes and intersection algorithms
//!
//! Provides the geometric primitives (rays, spheres, planes, boxes) used by
//! the surface collision test, with the intersection queries it needs.

use crate::foundation::math::Vec3;

/// Directions with a smaller component are treated as parallel to a slab
const PARALLEL_EPSILON: f32 = 1e-6;

/// Rays nearly parallel to a plane never hit it
const PLANE_PARALLEL_EPSILON: f32 = 1e-5;

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Distance along the ray to an infinite plane
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane lies
    /// behind the origin. Hits within a tiny tolerance behind the origin are
    /// reported at distance zero.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f32> {
        let denominator = plane.normal.dot(&self.direction);
        if denominator.abs() < PLANE_PARALLEL_EPSILON {
            return None;
        }

        let t = (-plane.d - plane.normal.dot(&self.origin)) / denominator;
        if t < 0.0 {
            if t < -PLANE_PARALLEL_EPSILON {
                return None;
            }
            return Some(0.0);
        }
        Some(t)
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// How a sphere sits relative to a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneIntersection {
    /// Entirely on the side the normal points to
    Front,
    /// Entirely on the opposite side
    Back,
    /// Crossing or touching the plane
    Intersecting,
}

/// An infinite plane `normal · x + d = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Offset along the normal
    pub d: f32,
}

impl Plane {
    /// Create a plane from a normal and an offset
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through three points, normal following `(b - a) × (c - a)`
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        let d = -normal.dot(&a);
        Self { normal, d }
    }

    /// Signed distance from the plane to a point
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.d
    }

    /// Classify a sphere against this plane
    pub fn classify_sphere(&self, sphere: &BoundingSphere) -> PlaneIntersection {
        let distance = self.signed_distance(sphere.center);
        if distance > sphere.radius {
            PlaneIntersection::Front
        } else if distance < -sphere.radius {
            PlaneIntersection::Back
        } else {
            PlaneIntersection::Intersecting
        }
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing the given points
    pub fn from_points(points: &[Vec3]) -> Self {
        let (min, max) = crate::foundation::math::utils::bounds_of(points);
        Self { min, max }
    }

    /// Check if a sphere touches this box (closest point within the radius)
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = sphere.center.sup(&self.min).inf(&self.max);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point (zero when the origin is
    /// inside), or `None` if the ray misses. Only hits in front of the origin
    /// count, and flat boxes (zero thickness on an axis) are supported.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::MAX;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction.abs() < PARALLEL_EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t1 = (lo - origin) * inv;
            let mut t2 = (hi - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_box() -> Aabb {
        Aabb::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 0.0, 10.0))
    }

    #[test]
    fn test_plane_from_points_orientation() {
        // Counter-clockwise seen from above gives an upward normal
        let plane = Plane::from_points(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 1.0),
            Vec3::new(1.0, 2.0, 0.0),
        );
        assert_relative_eq!(plane.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.signed_distance(Vec3::new(5.0, 7.0, 5.0)), 5.0);
    }

    #[test]
    fn test_classify_sphere() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let above = BoundingSphere::new(Vec3::new(0.0, 10.0, 0.0), 8.0);
        let below = BoundingSphere::new(Vec3::new(0.0, -10.0, 0.0), 8.0);
        let touching = BoundingSphere::new(Vec3::new(0.0, 8.0, 0.0), 8.0);

        assert_eq!(plane.classify_sphere(&above), PlaneIntersection::Front);
        assert_eq!(plane.classify_sphere(&below), PlaneIntersection::Back);
        assert_eq!(plane.classify_sphere(&touching), PlaneIntersection::Intersecting);
    }

    #[test]
    fn test_ray_hits_flat_box_from_above() {
        let ray = Ray::new(Vec3::new(2.0, 5.0, -3.0), Vec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(floor_box().intersect_ray(&ray).unwrap(), 5.0);
    }

    #[test]
    fn test_ray_misses_outside_footprint() {
        let ray = Ray::new(Vec3::new(12.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(floor_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(floor_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_sphere_box_overlap() {
        let aabb = floor_box();
        assert!(aabb.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 7.0, 0.0), 8.0)));
        assert!(!aabb.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 9.0, 0.0), 8.0)));
        // Diagonal distance to the corner counts, not the per-axis distance
        assert!(!aabb.intersects_sphere(&BoundingSphere::new(Vec3::new(16.0, 0.0, 16.0), 8.0)));
    }

    #[test]
    fn test_ray_plane_distance() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let down = Ray::new(Vec3::new(0.0, 6.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(down.intersect_plane(&plane).unwrap(), 6.0);

        let sideways = Ray::new(Vec3::new(0.0, 6.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(sideways.intersect_plane(&plane).is_none());

        let up = Ray::new(Vec3::new(0.0, 6.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(up.intersect_plane(&plane).is_none());
    }
}
