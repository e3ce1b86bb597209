//! Hand usage of a movement as a small bit set.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// Which hands a movement holds out, and whether they grip.
///
/// Bit 0 is the left hand, bit 1 the right hand, bit 2 marks a grip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hands(pub u8);

impl Hands {
    pub const NONE: Hands = Hands(0);
    pub const LEFT: Hands = Hands(1);
    pub const RIGHT: Hands = Hands(2);
    pub const BOTH: Hands = Hands(3);
    pub const ANY_GRIP: Hands = Hands(4);
    pub const GRIP_LEFT: Hands = Hands(5);
    pub const GRIP_RIGHT: Hands = Hands(6);
    pub const GRIP_BOTH: Hands = Hands(7);

    /// All bits of `other` are set.
    pub fn contains(self, other: Hands) -> bool {
        self.0 & other.0 == other.0
    }

    /// Any bit of `other` is set.
    pub fn intersects(self, other: Hands) -> bool {
        self.0 & other.0 != 0
    }

    pub fn uses_left(self) -> bool {
        self.intersects(Hands::LEFT)
    }

    pub fn uses_right(self) -> bool {
        self.intersects(Hands::RIGHT)
    }

    pub fn grips(self) -> bool {
        self.intersects(Hands::ANY_GRIP)
    }

    /// Swap left and right, keeping the grip bit.
    pub fn mirrored(self) -> Hands {
        let left = self.0 & 1;
        let right = (self.0 >> 1) & 1;
        Hands((self.0 & 4) | (left << 1) | right)
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "none",
            1 => "left",
            2 => "right",
            3 => "both",
            4 => "anygrip",
            5 => "gripleft",
            6 => "gripright",
            _ => "gripboth",
        }
    }
}

impl fmt::Display for Hands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hands {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Hands::NONE),
            "left" => Ok(Hands::LEFT),
            "right" => Ok(Hands::RIGHT),
            "both" => Ok(Hands::BOTH),
            "anygrip" => Ok(Hands::ANY_GRIP),
            "gripleft" => Ok(Hands::GRIP_LEFT),
            "gripright" => Ok(Hands::GRIP_RIGHT),
            "gripboth" => Ok(Hands::GRIP_BOTH),
            _ => Err(ParseError::UnknownHands { name: s.to_string() }),
        }
    }
}
