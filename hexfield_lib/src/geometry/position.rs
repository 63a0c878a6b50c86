//! Types for positioning and measuring coordinates.

use core::fmt::Display;
use derive_more::{Add, AddAssign, Deref, Sub, SubAssign};
use hexx::Hex;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::{CubePos, HexDirection};

/// An axial hex coordinate `(q, r)`, that represents exactly one cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deref,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
pub struct HexPos {
    /// The underlying hex coordinate
    pub(crate) hex: Hex,
}

impl Display for HexPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q(), self.r())
    }
}

impl HexPos {
    /// The position of the central cell
    pub const ZERO: HexPos = HexPos {
        hex: Hex { x: 0, y: 0 },
    };

    /// Generates a new [`HexPos`] from axial coordinates.
    #[inline]
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        HexPos {
            hex: Hex { x: q, y: r },
        }
    }

    /// The `q` (column) axial component.
    #[inline]
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.hex.x
    }

    /// The `r` (row) axial component.
    #[inline]
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.hex.y
    }

    /// Converts to cube coordinates.
    #[inline]
    #[must_use]
    pub const fn to_cube(self) -> CubePos {
        CubePos::from_axial(self)
    }

    /// Returns the [`HexPos`] in the provided `direction` from `self`.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        *self + direction.offset()
    }

    /// All neighbors of `self`, in the order of [`HexDirection::ALL`].
    ///
    /// # Warning
    ///
    /// This includes neighbors that are not on the map.
    #[inline]
    #[must_use]
    pub fn all_neighbors(&self) -> [HexPos; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Returns the direction from `self` to `other`, if they are adjacent.
    #[must_use]
    pub fn direction_to(&self, other: HexPos) -> Option<HexDirection> {
        let offset = other - *self;
        HexDirection::ALL
            .into_iter()
            .find(|direction| direction.offset() == offset)
    }

    /// Computes the length of the shortest path between `self` and `other`, counted in cells.
    ///
    /// Note that this ignores terrain entirely!
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: HexPos) -> u32 {
        (other - *self).to_cube().length()
    }
}

impl From<Hex> for HexPos {
    fn from(hex: Hex) -> Self {
        HexPos { hex }
    }
}

impl From<HexPos> for Hex {
    fn from(hex_pos: HexPos) -> Self {
        hex_pos.hex
    }
}

impl Mul<i32> for HexPos {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        HexPos::new(self.q() * rhs, self.r() * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_adjacent() {
        let center = HexPos::new(3, -2);
        for (direction, neighbor) in HexDirection::ALL.into_iter().zip(center.all_neighbors()) {
            assert_eq!(center.distance_to(neighbor), 1);
            assert_eq!(center.direction_to(neighbor), Some(direction));
            assert_eq!(neighbor.direction_to(center), Some(direction.opposite()));
        }
    }

    #[test]
    fn non_adjacent_cells_have_no_direction() {
        assert_eq!(HexPos::ZERO.direction_to(HexPos::ZERO), None);
        assert_eq!(HexPos::ZERO.direction_to(HexPos::new(2, 0)), None);
    }

    #[test]
    fn vector_math() {
        let a = HexPos::new(1, 2);
        let b = HexPos::new(-3, 5);
        assert_eq!(a + b, HexPos::new(-2, 7));
        assert_eq!(a - b, HexPos::new(4, -3));
        assert_eq!(a * 3, HexPos::new(3, 6));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn distance() {
        assert_eq!(HexPos::ZERO.distance_to(HexPos::new(3, -3)), 3);
        assert_eq!(HexPos::new(-1, -1).distance_to(HexPos::new(1, 1)), 4);
    }

    #[test]
    fn display() {
        assert_eq!(HexPos::new(4, -7).to_string(), "(4, -7)");
    }
}
