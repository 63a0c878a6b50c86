//! Conversion between hex cells and continuous ("unit") positions.

use hexx::Vec2;

use super::{FractionalCube, HexPos};

/// `sqrt(3)`, which is not yet available as a stable constant
const SQRT_3: f32 = 1.732_050_8;

/// The size of each hex cell in continuous space.
///
/// Cells are flat-topped: moving one step in `q` moves `1.5 * side_length` along `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// The length of each of the six sides of a cell.
    side_length: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        HexLayout::UNIT
    }
}

impl HexLayout {
    /// A layout where each cell side is exactly one unit long.
    pub const UNIT: HexLayout = HexLayout { side_length: 1.0 };

    /// Creates a layout with the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `side_length` is not strictly positive and finite.
    #[must_use]
    pub fn new(side_length: f32) -> Self {
        assert!(
            side_length.is_finite() && side_length > 0.,
            "Hex side length must be positive and finite, got {side_length}"
        );

        HexLayout { side_length }
    }

    /// The length of each side of a cell.
    #[inline]
    #[must_use]
    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    /// The distance from the center of a cell to the middle of one of its sides.
    #[inline]
    #[must_use]
    pub fn side_distance(&self) -> f32 {
        self.side_length * SQRT_3 / 2.
    }

    /// The distance between the top and bottom sides of a cell.
    #[inline]
    #[must_use]
    pub fn unit_height(&self) -> f32 {
        2. * self.side_distance()
    }

    /// Returns the continuous position of the center of `hex_pos`.
    #[must_use]
    pub fn hex_to_unit(&self, hex_pos: HexPos) -> Vec2 {
        let q = hex_pos.q() as f32;
        let r = hex_pos.r() as f32;

        Vec2 {
            x: q * 1.5 * self.side_length,
            y: q * self.side_distance() + r * self.unit_height(),
        }
    }

    /// Returns the fractional cube coordinate of `unit_pos`, before rounding.
    #[must_use]
    pub fn unit_to_fractional(&self, unit_pos: Vec2) -> FractionalCube {
        let q = unit_pos.x / (1.5 * self.side_length);
        let r = (unit_pos.y - q * self.side_distance()) / self.unit_height();

        FractionalCube::from_axial(q, r)
    }

    /// Returns the cell that contains `unit_pos`.
    #[must_use]
    pub fn unit_to_hex(&self, unit_pos: Vec2) -> HexPos {
        self.unit_to_fractional(unit_pos).round().to_axial()
    }
}
