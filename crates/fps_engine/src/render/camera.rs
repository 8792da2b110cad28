//! # First-Person Camera
//!
//! The camera is split into an [`Orientation`] (where the avatar's eye is and
//! where it looks) and a [`Projection`] (lens parameters). The avatar's
//! position lives in the orientation: moving the avatar means moving its eye.
//!
//! ## Design Principles
//! - **Absolute angles**: yaw and pitch are always applied to fixed reference
//!   vectors, so repeated updates with the same angles give identical results
//! - **Library-agnostic**: only produces matrices, never talks to a backend

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{constants, world_forward, world_up, utils, Mat4, Mat4Ext, Vec3};

/// Lens configuration for the first-person camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in radians
    pub field_of_view: f32,
    /// Field of view while zoomed
    pub zoomed_field_of_view: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
    /// Viewport width / height
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            field_of_view: constants::QUARTER_PI,
            zoomed_field_of_view: constants::PI / 16.0,
            near: 1.0,
            far: 3000.0,
            aspect_ratio: 1280.0 / 800.0,
        }
    }
}

impl Config for CameraConfig {}

/// Eye position and look direction derived from absolute yaw and pitch
///
/// # Coordinate System
/// Zero yaw and pitch look down -Z with +Y up. Positive yaw turns left
/// (counter-clockwise seen from above); positive pitch looks down.
#[derive(Debug, Clone)]
pub struct Orientation {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    direction: Vec3,
    up: Vec3,
    reference_forward: Vec3,
    reference_up: Vec3,
}

impl Orientation {
    /// Create an orientation at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            direction: world_forward(),
            up: world_up(),
            reference_forward: world_forward(),
            reference_up: world_up(),
        }
    }

    /// Move by `displacement` and look along `yaw`/`pitch`
    ///
    /// # Arguments
    /// * `displacement` - World-space offset added to the position
    /// * `yaw` - Absolute rotation about the reference up vector
    /// * `pitch` - Absolute rotation about the yawed right axis
    ///
    /// # Mathematical Notes
    /// The reference forward is first rotated about the reference up by
    /// `yaw`. The pitch axis is `reference_up × direction`, and the same
    /// pitch rotation is applied to both the direction and the reference up.
    pub fn update(&mut self, displacement: Vec3, yaw: f32, pitch: f32) {
        self.position += displacement;
        self.yaw = yaw;
        self.pitch = pitch;

        let yawed = utils::rotate_about(self.reference_forward, self.reference_up, yaw);
        let pitch_axis = self.reference_up.cross(&yawed);
        self.direction = utils::rotate_about(yawed, pitch_axis, pitch);
        self.up = utils::rotate_about(self.reference_up, pitch_axis, pitch);
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport without changing the look direction
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position set to: {:?}", position);
    }

    /// Absolute yaw of the last update
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Absolute pitch of the last update
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit look direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Unit camera up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit vector to the right of the look direction
    pub fn right(&self) -> Vec3 {
        self.direction.cross(&self.up)
    }

    /// Generate the view matrix for world-to-camera transformation
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.direction, self.up)
    }
}

/// Perspective lens with a zoom toggle
#[derive(Debug, Clone)]
pub struct Projection {
    field_of_view: f32,
    zoomed_field_of_view: f32,
    near: f32,
    far: f32,
    aspect: f32,
    zoomed: bool,
}

impl Projection {
    /// Create a projection from lens configuration
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            field_of_view: config.field_of_view,
            zoomed_field_of_view: config.zoomed_field_of_view,
            near: config.near,
            far: config.far,
            aspect: config.aspect_ratio,
            zoomed: false,
        }
    }

    /// Switch between the normal and the zoomed field of view
    pub fn set_zoomed(&mut self, zoomed: bool) {
        if self.zoomed != zoomed {
            log::debug!("Camera zoom {}", if zoomed { "on" } else { "off" });
        }
        self.zoomed = zoomed;
    }

    /// Whether the zoomed field of view is active
    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Field of view currently in effect
    pub fn field_of_view(&self) -> f32 {
        if self.zoomed {
            self.zoomed_field_of_view
        } else {
            self.field_of_view
        }
    }

    /// Update the aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep resize storms quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Viewport width / height
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Generate the perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.field_of_view(), self.aspect, self.near, self.far)
    }
}

/// First-person camera: orientation plus lens
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye placement and look direction
    pub orientation: Orientation,
    /// Lens parameters
    pub projection: Projection,
}

impl Camera {
    /// Create a camera at `position` looking down -Z
    pub fn new(position: Vec3, config: &CameraConfig) -> Self {
        Self {
            orientation: Orientation::new(position),
            projection: Projection::new(config),
        }
    }

    /// Move the eye and set the absolute look angles
    pub fn update(&mut self, displacement: Vec3, yaw: f32, pitch: f32) {
        self.orientation.update(displacement, yaw, pitch);
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.orientation.position()
    }

    /// Unit look direction
    pub fn direction(&self) -> Vec3 {
        self.orientation.direction()
    }

    /// Unit camera up vector
    pub fn up(&self) -> Vec3 {
        self.orientation.up()
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.orientation.right()
    }

    /// View matrix for the current orientation
    pub fn get_view_matrix(&self) -> Mat4 {
        self.orientation.get_view_matrix()
    }

    /// Projection matrix for the current lens
    pub fn get_projection_matrix(&self) -> Mat4 {
        self.projection.get_projection_matrix()
    }

    /// Combined view-projection matrix
    ///
    /// Applied to column vectors, the view transform runs first.
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros(), &CameraConfig::default())
    }
}
