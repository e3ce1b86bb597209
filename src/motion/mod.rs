//! Timed motion: hand usage, single Movements and whole Paths.

pub mod hands;
pub mod movement;
pub mod path;

pub use hands::Hands;
pub use movement::Movement;
pub use path::Path;
