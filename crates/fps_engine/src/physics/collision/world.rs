//! Collision world
//!
//! Holds the level's surfaces in declaration order and resolves a sphere
//! stack against all of them once per frame.

use crate::foundation::math::Vec3;
use super::primitives::BoundingSphere;
use super::surface::{CollisionSurface, EdgeCase, SurfaceDefinition, SurfaceError};

/// Ordered set of collision surfaces
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    surfaces: Vec<CollisionSurface>,
}

impl CollisionWorld {
    /// Create a world from surfaces, keeping their order
    pub fn new(surfaces: Vec<CollisionSurface>) -> Self {
        Self { surfaces }
    }

    /// Build a world from provider definitions, failing on the first bad one
    pub fn from_definitions<'a>(
        definitions: impl IntoIterator<Item = &'a SurfaceDefinition>,
    ) -> Result<Self, SurfaceError> {
        let surfaces = definitions
            .into_iter()
            .map(CollisionSurface::from_definition)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Collision world built with {} surfaces", surfaces.len());
        Ok(Self { surfaces })
    }

    /// Append a surface; it is tested after every existing one
    pub fn push(&mut self, surface: CollisionSurface) {
        self.surfaces.push(surface);
    }

    /// Surfaces in test order
    pub fn surfaces(&self) -> &[CollisionSurface] {
        &self.surfaces
    }

    /// Number of surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the world has no surfaces
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Resolve a sphere stack, ordered top to bottom, against every surface
    ///
    /// Surfaces are tested in order and each one sees the stack as corrected
    /// by the ones before it. The ground normal reported last wins. Border
    /// contacts are only acted on when more than one surface produced one:
    /// the shallowest is added to the velocity (the spheres are left alone,
    /// they are rebuilt next frame). A lone border contact is dropped.
    pub fn resolve(&self, spheres: &mut [BoundingSphere], velocity: &mut Vec3) -> Option<Vec3> {
        let mut ground_normal = None;
        let mut edge_cases: Vec<EdgeCase> = Vec::new();

        for surface in &self.surfaces {
            let contact = surface.test(spheres, velocity);
            if contact.ground_normal.is_some() {
                ground_normal = contact.ground_normal;
            }
            if let Some(edge_case) = contact.edge_case {
                edge_cases.push(edge_case);
            }
        }

        if edge_cases.len() > 1 {
            if let Some(shallowest) = shallowest_edge_case(&edge_cases) {
                log::debug!(
                    "Resolving {} edge contacts with the shallowest, depth {:.4}",
                    edge_cases.len(), shallowest.distance
                );
                *velocity += shallowest.correction;
            }
        }

        ground_normal
    }
}

/// First edge case with the smallest distance
fn shallowest_edge_case(edge_cases: &[EdgeCase]) -> Option<EdgeCase> {
    edge_cases.iter().copied().fold(None, |best, candidate| match best {
        Some(best) if best.distance <= candidate.distance => Some(best),
        _ => Some(candidate),
    })
}
