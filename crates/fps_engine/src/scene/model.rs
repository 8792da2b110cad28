//! Scene models
//!
//! Models advertise what they can do through [`ModelCapabilities`] instead
//! of a type hierarchy: static surfaces draw and collide, props update and
//! draw.

use bitflags::bitflags;

use crate::foundation::math::{constants, Mat4, Mat4Ext, Vec3};
use crate::physics::collision::CollisionSurface;
use crate::render::camera::Camera;
use crate::render::mesh::Mesh;

bitflags! {
    /// What a model takes part in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModelCapabilities: u8 {
        /// Needs a per-frame update
        const UPDATABLE = 1 << 0;
        /// Produces a draw item
        const DRAWABLE = 1 << 1;
        /// Contributes a collision surface
        const COLLIDABLE = 1 << 2;
    }
}

/// Geometry a draw item refers to
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    /// Vertex data generated by the engine
    Generated(Mesh),
    /// Mesh owned by the renderer's asset store, looked up by name
    Named(String),
}

/// A scene model
pub trait Model {
    /// Name for logs and lookups
    fn name(&self) -> &str;

    /// Capability set
    fn capabilities(&self) -> ModelCapabilities;

    /// Advance animation; called after the avatar moved this frame
    fn update(&mut self, _delta_time: f32, _camera: &Camera) {}

    /// Object-to-world transform
    fn world_transform(&self) -> Mat4 {
        Mat4::identity()
    }

    /// Geometry to draw
    fn mesh(&self) -> &MeshSource;

    /// Texture name, empty when the mesh brings its own
    fn texture(&self) -> &str {
        ""
    }

    /// Collision geometry for collidable models
    fn collision_surface(&self) -> Option<&CollisionSurface> {
        None
    }
}

/// Static textured quad that the avatar collides with
#[derive(Debug, Clone)]
pub struct SurfaceModel {
    name: String,
    surface: CollisionSurface,
    mesh: MeshSource,
    texture: String,
}

impl SurfaceModel {
    /// Wrap a surface with its quad mesh
    pub fn new(name: impl Into<String>, surface: CollisionSurface, texture: impl Into<String>, texture_size: (f32, f32)) -> Self {
        let mesh = MeshSource::Generated(Mesh::surface_quad(&surface, texture_size));
        Self {
            name: name.into(),
            surface,
            mesh,
            texture: texture.into(),
        }
    }

    /// The collision surface
    pub fn surface(&self) -> &CollisionSurface {
        &self.surface
    }
}

impl Model for SurfaceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::DRAWABLE | ModelCapabilities::COLLIDABLE
    }

    fn mesh(&self) -> &MeshSource {
        &self.mesh
    }

    fn texture(&self) -> &str {
        &self.texture
    }

    fn collision_surface(&self) -> Option<&CollisionSurface> {
        Some(&self.surface)
    }
}

/// Decorative mesh tumbling in place
#[derive(Debug, Clone)]
pub struct SpinningProp {
    name: String,
    mesh: MeshSource,
    texture: String,
    location: Vec3,
    angles: Vec3,
    spin: Vec3,
}

impl SpinningProp {
    /// Default spin: half a turn per second about X, a third about Y
    pub fn new(mesh_name: impl Into<String>, location: Vec3) -> Self {
        let name = mesh_name.into();
        Self {
            mesh: MeshSource::Named(name.clone()),
            name,
            texture: String::new(),
            location,
            angles: Vec3::zeros(),
            spin: Vec3::new(constants::HALF_PI, constants::PI / 3.0, 0.0),
        }
    }

    /// Attach a texture name
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    /// Override the spin rates in radians per second about X, Y and Z
    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    /// Accumulated rotation angles about X, Y and Z
    pub fn angles(&self) -> Vec3 {
        self.angles
    }
}

impl Model for SpinningProp {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::UPDATABLE | ModelCapabilities::DRAWABLE
    }

    fn update(&mut self, delta_time: f32, _camera: &Camera) {
        self.angles += self.spin * delta_time;
    }

    /// Rotates about Y, then X, then Z, then moves to the location
    fn world_transform(&self) -> Mat4 {
        Mat4::new_translation(&self.location)
            * Mat4::rotation_z(self.angles.z)
            * Mat4::rotation_x(self.angles.x)
            * Mat4::rotation_y(self.angles.y)
    }

    fn mesh(&self) -> &MeshSource {
        &self.mesh
    }

    fn texture(&self) -> &str {
        &self.texture
    }
}

/// Mesh carried in front of the camera, such as a weapon
#[derive(Debug, Clone)]
pub struct HeldProp {
    name: String,
    mesh: MeshSource,
    offset: Vec3,
    scale: f32,
    world: Mat4,
}

impl HeldProp {
    /// Default hold: 10 ahead, 4 right, 4 down, scaled to 8%
    pub fn new(mesh_name: impl Into<String>) -> Self {
        let name = mesh_name.into();
        Self {
            mesh: MeshSource::Named(name.clone()),
            name,
            offset: Vec3::new(10.0, 4.0, -4.0),
            scale: 0.08,
            world: Mat4::identity(),
        }
    }

    /// Override the hold offset as (ahead, right, up) distances
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Override the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// World position computed by the last update
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.world[(0, 3)], self.world[(1, 3)], self.world[(2, 3)])
    }
}

impl Model for HeldProp {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::UPDATABLE | ModelCapabilities::DRAWABLE
    }

    /// Places the prop relative to the eye, its forward axis along camera right
    fn update(&mut self, _delta_time: f32, camera: &Camera) {
        let right = camera.right();
        let position = camera.position()
            + camera.direction() * self.offset.x
            + right * self.offset.y
            + camera.up() * self.offset.z;

        self.world = Mat4::world(position, right, camera.up()) * Mat4::new_scaling(self.scale);
    }

    fn world_transform(&self) -> Mat4 {
        self.world
    }

    fn mesh(&self) -> &MeshSource {
        &self.mesh
    }
}
