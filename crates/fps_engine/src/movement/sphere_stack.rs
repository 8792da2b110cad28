//! The avatar's collision proxy: spheres stacked below the eye

use crate::foundation::math::Vec3;
use crate::physics::collision::BoundingSphere;

/// Spheres in a standing stack
pub const STANDING_SPHERES: usize = 3;

/// Spheres in a crouching stack
pub const CROUCHING_SPHERES: usize = 2;

/// Vertical stack of equal spheres, ordered top to bottom
///
/// The top sphere is centered at the eye; each following sphere sits one
/// diameter lower, so neighbours touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereStack {
    spheres: [BoundingSphere; STANDING_SPHERES],
    len: usize,
}

impl SphereStack {
    /// Build the stack hanging from `eye`
    pub fn new(eye: Vec3, radius: f32, crouching: bool) -> Self {
        let len = if crouching { CROUCHING_SPHERES } else { STANDING_SPHERES };
        let spheres = std::array::from_fn(|i| {
            BoundingSphere::new(eye - Vec3::new(0.0, 2.0 * radius * i as f32, 0.0), radius)
        });
        Self { spheres, len }
    }

    /// Spheres in the stack, top first
    pub fn spheres(&self) -> &[BoundingSphere] {
        &self.spheres[..self.len]
    }

    /// Mutable spheres, top first, for the collision pass
    pub fn spheres_mut(&mut self) -> &mut [BoundingSphere] {
        &mut self.spheres[..self.len]
    }

    /// Head sphere
    pub fn top(&self) -> &BoundingSphere {
        &self.spheres[0]
    }

    /// Feet sphere
    pub fn bottom(&self) -> &BoundingSphere {
        &self.spheres[self.len - 1]
    }

    /// Number of spheres
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack has no spheres; a built stack has at least two
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standing_stack() {
        let stack = SphereStack::new(Vec3::new(0.0, 79.0, 0.0), 8.0, false);
        let heights: Vec<f32> = stack.spheres().iter().map(|s| s.center.y).collect();
        assert_eq!(heights, vec![79.0, 63.0, 47.0]);
        assert_relative_eq!(stack.bottom().center.y - stack.bottom().radius, 39.0);
    }

    #[test]
    fn test_crouching_stack_drops_the_feet() {
        let stack = SphereStack::new(Vec3::new(1.0, 50.0, -2.0), 8.0, true);
        assert_eq!(stack.len(), CROUCHING_SPHERES);
        assert_eq!(stack.top().center, Vec3::new(1.0, 50.0, -2.0));
        assert_eq!(stack.bottom().center, Vec3::new(1.0, 34.0, -2.0));
        assert!(!stack.is_empty());
    }
}
