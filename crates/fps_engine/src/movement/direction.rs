//! Eight-way movement angle from held keys
//!
//! Angles rotate world backward (+Z) about +Y before yaw is added: 0 moves
//! backward, pi moves forward, pi/2 right and 3pi/2 left.

use crate::foundation::math::constants::PI;
use crate::input::{InputManager, KeyCode};

/// Movement angle for the held directional keys, if any
///
/// Rules are applied in order and later ones win, so opposing keys resolve
/// to the later key (W+S moves back, A+D moves right).
pub fn move_angle(input: &InputManager) -> Option<f32> {
    let forward = input.is_down(KeyCode::W);
    let left = input.is_down(KeyCode::A);
    let back = input.is_down(KeyCode::S);
    let right = input.is_down(KeyCode::D);

    let rules = [
        (forward, PI),
        (left, 1.5 * PI),
        (back, 0.0),
        (right, 0.5 * PI),
        (forward && left, 1.25 * PI),
        (forward && right, 0.75 * PI),
        (left && back, 1.75 * PI),
        (back && right, 0.25 * PI),
    ];

    rules
        .iter()
        .filter(|(held, _)| *held)
        .map(|&(_, angle)| angle)
        .last()
}
