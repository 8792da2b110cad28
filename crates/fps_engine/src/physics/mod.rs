//! Physics module for avatar collision
//!
//! Surfaces are finite quads; the avatar is a vertical stack of bounding
//! spheres pushed out of them once per frame.

pub mod collision;

pub use collision::{
    Aabb,
    BoundingSphere,
    CollisionSurface,
    CollisionWorld,
    EdgeCase,
    Plane,
    PlaneIntersection,
    Ray,
    SurfaceContact,
    SurfaceDefinition,
    SurfaceError,
};
