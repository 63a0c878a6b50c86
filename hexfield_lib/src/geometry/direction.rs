//! The six edge directions of a hex cell, and sets of them.

use core::fmt::Display;
use core::ops::{BitAnd, BitOr, BitOrAssign, Not};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enum_iter::IterableEnum;
use hexfield_macros::IterableEnum;

use super::HexPos;

/// One of the six edges of a hex cell.
///
/// Variants are declared in clockwise order, starting from [`HexDirection::NorthWest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IterableEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexDirection {
    /// Axial offset `(-1, 0)`
    NorthWest,
    /// Axial offset `(0, -1)`
    North,
    /// Axial offset `(1, -1)`
    NorthEast,
    /// Axial offset `(1, 0)`
    SouthEast,
    /// Axial offset `(0, 1)`
    South,
    /// Axial offset `(-1, 1)`
    SouthWest,
}

/// A raw bit pattern did not correspond to any [`HexDirection`].
///
/// Only the low six bits name directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{bits:#010b} is not a valid hex direction")]
pub struct InvalidDirection {
    /// The rejected bit pattern
    pub bits: u8,
}

impl HexDirection {
    /// All six directions, in clockwise order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NorthWest,
        HexDirection::North,
        HexDirection::NorthEast,
        HexDirection::SouthEast,
        HexDirection::South,
        HexDirection::SouthWest,
    ];

    /// The axial offset of the neighboring cell in this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> HexPos {
        match self {
            HexDirection::NorthWest => HexPos::new(-1, 0),
            HexDirection::North => HexPos::new(0, -1),
            HexDirection::NorthEast => HexPos::new(1, -1),
            HexDirection::SouthEast => HexPos::new(1, 0),
            HexDirection::South => HexPos::new(0, 1),
            HexDirection::SouthWest => HexPos::new(-1, 1),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated_clockwise(3)
    }

    /// Rotates one 60 degree step clockwise.
    #[inline]
    #[must_use]
    pub fn clockwise(self) -> Self {
        self.rotated_clockwise(1)
    }

    /// Rotates one 60 degree step counterclockwise.
    #[inline]
    #[must_use]
    pub fn counter_clockwise(self) -> Self {
        self.rotated_clockwise(5)
    }

    /// Rotates `steps` 60 degree steps clockwise.
    #[inline]
    #[must_use]
    pub fn rotated_clockwise(self, steps: usize) -> Self {
        HexDirection::ALL[(self.index() + steps) % 6]
    }

    /// The single-bit flag corresponding to this direction.
    #[inline]
    #[must_use]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl TryFrom<u8> for HexDirection {
    type Error = InvalidDirection;

    /// Decodes a single-bit flag back into a direction.
    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits.count_ones() != 1 {
            return Err(InvalidDirection { bits });
        }

        HexDirection::get_at(bits.trailing_zeros() as usize).ok_or(InvalidDirection { bits })
    }
}

impl Display for HexDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            HexDirection::NorthWest => "North-west",
            HexDirection::North => "North",
            HexDirection::NorthEast => "North-east",
            HexDirection::SouthEast => "South-east",
            HexDirection::South => "South",
            HexDirection::SouthWest => "South-west",
        };

        write!(f, "{str}")
    }
}

/// A set of [`HexDirection`]s, stored as a 6-bit mask.
///
/// Used to record which edges of a tile can be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HexDirections(u8);

impl HexDirections {
    /// No edges.
    pub const NONE: HexDirections = HexDirections(0);

    /// Every edge.
    pub const ALL: HexDirections = HexDirections(0b0011_1111);

    /// Creates a set from raw bits, failing if any bit outside the six directions is set.
    #[inline]
    pub const fn from_bits(bits: u8) -> Result<Self, InvalidDirection> {
        if bits & !Self::ALL.0 == 0 {
            Ok(HexDirections(bits))
        } else {
            Err(InvalidDirection { bits })
        }
    }

    /// The raw bits of this set.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Does this set include `direction`?
    #[inline]
    #[must_use]
    pub fn contains(self, direction: HexDirection) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Adds `direction` to this set.
    #[inline]
    pub fn insert(&mut self, direction: HexDirection) {
        self.0 |= direction.bit();
    }

    /// Removes `direction` from this set.
    #[inline]
    pub fn remove(&mut self, direction: HexDirection) {
        self.0 &= !direction.bit();
    }

    /// The number of directions in this set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Is this set empty?
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the directions in this set, in clockwise order.
    pub fn iter(self) -> impl Iterator<Item = HexDirection> {
        HexDirection::variants().filter(move |direction| self.contains(*direction))
    }
}

impl TryFrom<u8> for HexDirections {
    type Error = InvalidDirection;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        HexDirections::from_bits(bits)
    }
}

impl From<HexDirections> for u8 {
    fn from(directions: HexDirections) -> Self {
        directions.0
    }
}

impl From<HexDirection> for HexDirections {
    fn from(direction: HexDirection) -> Self {
        HexDirections(direction.bit())
    }
}

impl FromIterator<HexDirection> for HexDirections {
    fn from_iter<I: IntoIterator<Item = HexDirection>>(iter: I) -> Self {
        let mut directions = HexDirections::NONE;
        for direction in iter {
            directions.insert(direction);
        }
        directions
    }
}

impl BitOr for HexDirections {
    type Output = HexDirections;

    fn bitor(self, rhs: Self) -> Self::Output {
        HexDirections(self.0 | rhs.0)
    }
}

impl BitOr<HexDirection> for HexDirections {
    type Output = HexDirections;

    fn bitor(self, rhs: HexDirection) -> Self::Output {
        HexDirections(self.0 | rhs.bit())
    }
}

impl BitOrAssign<HexDirection> for HexDirections {
    fn bitor_assign(&mut self, rhs: HexDirection) {
        self.insert(rhs);
    }
}

impl BitAnd for HexDirections {
    type Output = HexDirections;

    fn bitand(self, rhs: Self) -> Self::Output {
        HexDirections(self.0 & rhs.0)
    }
}

impl Not for HexDirections {
    type Output = HexDirections;

    fn not(self) -> Self::Output {
        HexDirections(!self.0 & Self::ALL.0)
    }
}
