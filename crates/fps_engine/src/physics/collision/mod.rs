//! Collision primitives, surfaces and the collision world

pub mod primitives;
pub mod surface;
pub mod world;

pub use primitives::{Aabb, BoundingSphere, Plane, PlaneIntersection, Ray};
pub use surface::{
    CollisionSurface,
    EdgeCase,
    SurfaceContact,
    SurfaceCorners,
    SurfaceDefinition,
    SurfaceError,
    GROUND_NORMAL_MIN_Y,
};
pub use world::CollisionWorld;
