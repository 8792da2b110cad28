//! Math utilities and types
//!
//! Provides fundamental math types for 3D collision and camera work.
//!
//! # Coordinate System
//! Right-handed, Y-up world space:
//! - X+ = Right
//! - Y+ = Up
//! - Z- = Forward (the camera looks down -Z with zero yaw)

pub use nalgebra::{
    Vector3,
    Matrix4,
    Rotation3,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// World up (+Y)
pub fn world_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// World down (-Y)
pub fn world_down() -> Vec3 {
    Vec3::new(0.0, -1.0, 0.0)
}

/// World forward (-Z)
pub fn world_forward() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// World backward (+Z)
pub fn world_backward() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

/// World right (+X)
pub fn world_right() -> Vec3 {
    Vec3::new(1.0, 0.0, 0.0)
}

/// World left (-X)
pub fn world_left() -> Vec3 {
    Vec3::new(-1.0, 0.0, 0.0)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Cotangent of an angle given in degrees
    pub fn cot_deg(degrees: f32) -> f32 {
        1.0 / deg_to_rad(degrees).tan()
    }

    /// Rotate `vector` about `axis` by `angle` radians (right-hand rule)
    ///
    /// A degenerate axis leaves the vector unchanged.
    pub fn rotate_about(vector: Vec3, axis: Vec3, angle: f32) -> Vec3 {
        match Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, angle) * vector,
            None => vector,
        }
    }

    /// Component-wise minimum and maximum over a set of points
    pub fn bounds_of(points: &[Vec3]) -> (Vec3, Vec3) {
        let mut min = Vec3::repeat(f32::INFINITY);
        let mut max = Vec3::repeat(f32::NEG_INFINITY);
        for point in points {
            min = min.inf(point);
            max = max.sup(point);
        }
        (min, max)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a right-handed perspective projection with depth mapped to [0, 1]
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Create a world matrix placing an object at `position`, facing `forward`
    fn world(position: Vec3, forward: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (near - far);
        result[(2, 3)] = (near * far) / (near - far);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn world(position: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
        let backward = -forward.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        Mat4::new(
            right.x, up.x, backward.x, position.x,
            right.y, up.y, backward.y, position.y,
            right.z, up.z, backward.z, position.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
