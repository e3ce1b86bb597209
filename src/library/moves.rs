//! Built-in primitive moves.
//!
//! Every move starts at the origin facing +x; left is +y. Only one side of
//! each mirrored pair is stored, the other is derived by reflection.

use super::MoveLibrary;
use crate::motion::{Hands, Movement};

/// Heading stays along +x for the whole movement.
const FACE_AHEAD: [f64; 5] = [1.0 / 3.0, 2.0 / 3.0, 0.0, 1.0, 0.0];
/// Heading turns a half circle to the right.
const HALF_RIGHT: [f64; 5] = [1.33, 1.33, -2.0, 0.0, -2.0];
/// Heading turns a half circle to the left.
const HALF_LEFT: [f64; 5] = [1.33, 1.33, 2.0, 0.0, 2.0];
/// Heading turns a quarter circle to the right.
const QUARTER_RIGHT: [f64; 5] = [0.55, 1.0, -0.45, 1.0, -1.0];

const STILL: [f64; 6] = [0.0; 6];

fn right_handed(name: &str) -> Option<Movement> {
    let m = match name {
        "Run Right" => Movement::new(3.0, Hands::RIGHT, [1.33, 0.0, 1.33, -2.0, 0.0, -2.0]),
        "Dodge Right" => Movement::with_rotation(
            3.0,
            Hands::NONE,
            [0.0, -0.67, 0.0, -1.33, 0.0, -2.0],
            FACE_AHEAD,
        ),
        "Flip Right" => Movement::with_rotation(
            3.0,
            Hands::RIGHT,
            [0.5, 0.0, 0.5, -2.0, 0.0, -2.0],
            HALF_RIGHT,
        ),
        "Hinge Right" => Movement::new(3.0, Hands::GRIP_RIGHT, [0.55, 0.0, 1.0, -0.45, 1.0, -1.0]),
        "Quarter Right" => Movement::with_rotation(2.0, Hands::NONE, STILL, QUARTER_RIGHT),
        "Extend Right" => Movement::with_rotation(
            1.0,
            Hands::NONE,
            [0.5, 0.0, 0.5, -1.0, 1.0, -1.0],
            FACE_AHEAD,
        ),
        "Swing Right" => Movement::new(3.0, Hands::GRIP_RIGHT, [1.33, 0.0, 1.33, -2.0, 0.0, -2.0]),
        "Lead Right" => Movement::new(2.0, Hands::NONE, [0.55, 0.0, 1.0, -0.45, 1.0, -1.0]),
        "U-Turn Right" => Movement::with_rotation(2.0, Hands::NONE, STILL, HALF_RIGHT),
        "Sashay Right" => Movement::with_rotation(
            4.0,
            Hands::NONE,
            [0.67, -0.67, 0.67, -1.33, 0.0, -2.0],
            FACE_AHEAD,
        ),
        "BackSashay Right" => Movement::with_rotation(
            4.0,
            Hands::NONE,
            [-0.67, -0.67, -0.67, -1.33, 0.0, -2.0],
            FACE_AHEAD,
        ),
        _ => return None,
    };
    Some(m)
}

fn one_handed(name: &str) -> Option<Movement> {
    let m = match name {
        "Stand" => Movement::with_rotation(2.0, Hands::BOTH, STILL, [0.0; 5]),
        "Forward" => Movement::new(1.0, Hands::NONE, [1.0 / 3.0, 0.0, 2.0 / 3.0, 0.0, 1.0, 0.0]),
        // The couple turns left as a unit: the beau backs up, the belle
        // walks forward
        "Beau Wheel" => Movement::with_rotation(
            4.0,
            Hands::RIGHT,
            [-1.33, 0.0, -1.33, -2.0, 0.0, -2.0],
            HALF_LEFT,
        ),
        "Belle Wheel" => Movement::new(4.0, Hands::LEFT, [1.33, 0.0, 1.33, 2.0, 0.0, 2.0]),
        _ => return None,
    };
    Some(m)
}

/// The move library compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMoves;

impl MoveLibrary for StandardMoves {
    fn movements(&self, name: &str) -> Option<Vec<Movement>> {
        if let Some(m) = one_handed(name).or_else(|| right_handed(name)) {
            return Some(vec![m]);
        }
        let base = name.strip_suffix(" Left")?;
        right_handed(&format!("{base} Right")).map(|m| vec![m.reflect()])
    }
}
