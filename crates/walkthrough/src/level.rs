//! The reference level
//!
//! A walled room with a second floor under a roof, reached by a ramp on the
//! left and a staircase on the right. A box tumbles in the middle of the
//! room and the avatar carries a pistol.

use fps_engine::foundation::math::{
    utils, world_backward, world_down, world_forward, world_left, world_right, world_up, Vec3,
};
use fps_engine::physics::collision::{CollisionSurface, SurfaceDefinition, SurfaceError};
use fps_engine::scene::{HeldProp, Scene, SpinningProp, SurfaceModel};

/// Texture of the outer walls
pub const STONEWALL: &str = "stonewall";
/// Texture of the inner walls
pub const BRICKWALL: &str = "brickwall";
/// Texture of the ground floor
pub const WOODFINE: &str = "woodfine";
/// Texture of walkable stone
pub const STONEFLOOR: &str = "stonefloor";
/// Texture of the spinning box
pub const DIRECTX10: &str = "directx10";

/// Pixel size every level texture is authored at
pub const TEXTURE_SIZE: (f32, f32) = (256.0, 256.0);

/// Number of steps in the staircase
pub const STAIR_STEPS: u32 = 12;

/// Axis-aligned quad; floors and ceilings use +Z as up, everything else +Y
fn quad(normal: Vec3, x: f32, y: f32, z: f32, width: f32, height: f32, texture: &str) -> SurfaceDefinition {
    let up = if normal == world_up() || normal == world_down() {
        world_backward()
    } else {
        world_up()
    };

    SurfaceDefinition::new(Vec3::new(x, y, z), normal, up, width, height).with_texture(texture)
}

/// Every surface of the level, in declaration order
pub fn surfaces() -> Vec<SurfaceDefinition> {
    let mut surfaces = vec![
        // Back wall
        quad(world_forward(), 0.0, 50.0, 100.0, 600.0, 120.0, STONEWALL),
        quad(world_backward(), 0.0, 50.0, 110.0, 620.0, 120.0, STONEWALL),
        quad(world_up(), 0.0, 110.0, 105.0, 620.0, 10.0, STONEFLOOR),
        // Left wall
        quad(world_right(), -300.0, 50.0, -200.0, 600.0, 120.0, STONEWALL),
        quad(world_left(), -310.0, 50.0, -200.0, 620.0, 120.0, STONEWALL),
        quad(world_up(), -305.0, 110.0, -200.0, 10.0, 600.0, STONEFLOOR),
        // Right wall
        quad(world_left(), 300.0, 50.0, -200.0, 600.0, 120.0, STONEWALL),
        quad(world_right(), 310.0, 50.0, -200.0, 620.0, 120.0, STONEWALL),
        quad(world_up(), 305.0, 110.0, -200.0, 10.0, 600.0, STONEFLOOR),
        // Front wall
        quad(world_backward(), 0.0, 40.0, -499.0, 400.0, 100.0, BRICKWALL),
        quad(world_backward(), 0.0, 95.0, -500.0, 600.0, 30.0, STONEWALL),
        quad(world_forward(), 0.0, 50.0, -510.0, 620.0, 120.0, STONEWALL),
        quad(world_up(), 0.0, 110.0, -505.0, 620.0, 10.0, STONEFLOOR),
        // Ground floor and its underside
        quad(world_up(), 0.0, 0.0, -200.0, 600.0, 600.0, WOODFINE),
        quad(world_down(), 0.0, -10.0, -200.0, 620.0, 620.0, WOODFINE),
        // Roof, the strip below the second floor's edge, second floor
        quad(world_down(), 0.0, 90.0, -380.0, 360.0, 240.0, STONEFLOOR),
        quad(world_backward(), 0.0, 95.0, -260.0, 400.0, 10.0, STONEWALL),
        quad(world_up(), 0.0, 100.0, -380.0, 400.0, 240.0, STONEFLOOR),
        // Walls around the ramp
        quad(world_left(), -200.0, 50.0, -380.0, 240.0, 100.0, STONEWALL),
        quad(world_right(), -180.0, 45.0, -380.0, 240.0, 90.0, BRICKWALL),
        quad(world_backward(), -190.0, 45.0, -260.0, 20.0, 90.0, STONEWALL),
        // Walls around the stairs
        quad(world_right(), 200.0, 50.0, -380.0, 240.0, 100.0, STONEWALL),
        quad(world_left(), 180.0, 45.0, -380.0, 240.0, 90.0, BRICKWALL),
        quad(world_backward(), 190.0, 45.0, -260.0, 20.0, 90.0, STONEWALL),
    ];

    surfaces.push(ramp());

    for step in 1..=STAIR_STEPS {
        let rise = step as f32 * 8.0;
        let run = step as f32 * 20.0;
        surfaces.push(quad(world_backward(), 250.0, rise - 4.0, -240.0 - run, 100.0, 8.0, STONEFLOOR));
        surfaces.push(quad(world_up(), 250.0, rise, -250.0 - run, 100.0, 20.0, STONEFLOOR));
    }

    surfaces
}

/// 70 degree ramp up to the second floor, tilted toward the back of the room
pub fn ramp() -> SurfaceDefinition {
    let normal = Vec3::new(0.0, 1.0, utils::cot_deg(70.0)).normalize();
    SurfaceDefinition::new(Vec3::new(-250.0, 45.0, -382.0), normal, world_right(), 260.0, 100.0)
        .with_texture(STONEFLOOR)
}

/// Build the level's scene: every surface, then the box and the pistol
pub fn build_scene() -> Result<Scene, SurfaceError> {
    let mut scene = Scene::new();

    for (index, definition) in surfaces().iter().enumerate() {
        let surface = CollisionSurface::from_definition(definition)?;
        let name = format!("{}_{index}", definition.texture);
        scene.add(SurfaceModel::new(name, surface, definition.texture.as_str(), TEXTURE_SIZE));
    }

    scene.add(SpinningProp::new("box", Vec3::new(0.0, 30.0, -320.0)).with_texture(DIRECTX10));
    scene.add(HeldProp::new("pistol"));

    log::info!("Built reference level with {} models", scene.len());
    Ok(scene)
}
