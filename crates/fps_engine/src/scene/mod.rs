//! Scene management
//!
//! A [`Scene`] is the ordered list of models in a level. It updates the
//! animated ones, hands the renderer a draw list and builds the collision
//! world from the collidable ones, keeping declaration order throughout.

pub mod model;

pub use model::{HeldProp, MeshSource, Model, ModelCapabilities, SpinningProp, SurfaceModel};

use crate::foundation::math::Mat4;
use crate::physics::collision::CollisionWorld;
use crate::render::camera::Camera;

/// One entry of the renderer's draw list
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    /// Model name
    pub name: &'a str,
    /// Geometry to draw
    pub mesh: &'a MeshSource,
    /// Texture name, possibly empty
    pub texture: &'a str,
    /// Object-to-world transform
    pub world: Mat4,
}

/// Ordered collection of scene models
#[derive(Default)]
pub struct Scene {
    models: Vec<Box<dyn Model>>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model
    pub fn add(&mut self, model: impl Model + 'static) {
        self.models.push(Box::new(model));
    }

    /// Append an already boxed model
    pub fn add_boxed(&mut self, model: Box<dyn Model>) {
        self.models.push(model);
    }

    /// Models in declaration order
    pub fn models(&self) -> impl Iterator<Item = &dyn Model> {
        self.models.iter().map(|model| &**model)
    }

    /// Find a model by name
    pub fn find(&self, name: &str) -> Option<&dyn Model> {
        self.models().find(|model| model.name() == name)
    }

    /// Number of models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the scene has no models
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Number of models with all of the given capabilities
    pub fn count_with(&self, capabilities: ModelCapabilities) -> usize {
        self.models().filter(|model| model.capabilities().contains(capabilities)).count()
    }

    /// Update every updatable model
    pub fn update(&mut self, delta_time: f32, camera: &Camera) {
        for model in &mut self.models {
            if model.capabilities().contains(ModelCapabilities::UPDATABLE) {
                model.update(delta_time, camera);
            }
        }
    }

    /// Draw list for the renderer, in declaration order
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        self.models()
            .filter(|model| model.capabilities().contains(ModelCapabilities::DRAWABLE))
            .map(|model| DrawItem {
                name: model.name(),
                mesh: model.mesh(),
                texture: model.texture(),
                world: model.world_transform(),
            })
            .collect()
    }

    /// Collision world made of the collidable models' surfaces
    pub fn build_collision_world(&self) -> CollisionWorld {
        let surfaces = self
            .models()
            .filter(|model| model.capabilities().contains(ModelCapabilities::COLLIDABLE))
            .filter_map(|model| model.collision_surface().cloned())
            .collect::<Vec<_>>();

        log::info!("Collision world: {} surfaces from {} models", surfaces.len(), self.len());
        CollisionWorld::new(surfaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{world_backward, world_up, Vec3};
    use crate::physics::collision::CollisionSurface;
    use approx::assert_relative_eq;

    fn floor(y: f32) -> SurfaceModel {
        let surface = CollisionSurface::new(Vec3::new(0.0, y, 0.0), world_up(), world_backward(), 100.0, 100.0).unwrap();
        SurfaceModel::new(format!("floor{y}"), surface, "stonefloor", (256.0, 256.0))
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(floor(0.0));
        scene.add(SpinningProp::new("box", Vec3::new(0.0, 30.0, -320.0)));
        scene.add(floor(10.0));
        scene.add(HeldProp::new("pistol"));
        scene
    }

    #[test]
    fn test_collision_world_keeps_declaration_order() {
        let world = scene().build_collision_world();
        assert_eq!(world.len(), 2);
        assert_relative_eq!(world.surfaces()[0].origin().y, 0.0);
        assert_relative_eq!(world.surfaces()[1].origin().y, 10.0);
    }

    #[test]
    fn test_draw_list_includes_every_drawable() {
        let scene = scene();
        let names: Vec<&str> = scene.draw_list().iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["floor0", "box", "floor10", "pistol"]);
        assert_eq!(scene.count_with(ModelCapabilities::UPDATABLE), 2);
        assert_eq!(scene.count_with(ModelCapabilities::COLLIDABLE), 2);
    }

    #[test]
    fn test_update_touches_only_updatable_models() {
        let mut scene = scene();
        let camera = Camera::default();
        scene.update(1.0, &camera);

        let box_world = scene.find("box").unwrap().world_transform();
        assert!(box_world != Mat4::new_translation(&Vec3::new(0.0, 30.0, -320.0)));
        assert_eq!(scene.find("floor0").unwrap().world_transform(), Mat4::identity());
    }
}
