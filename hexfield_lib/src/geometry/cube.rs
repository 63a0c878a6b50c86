//! Cube coordinates, and rounding fractional positions to the nearest hex.

use core::fmt::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HexPos;

/// A redundant three-axis hex coordinate.
///
/// The components always satisfy `x + y + z == 0`.
/// Fields are private so that this invariant cannot be broken after construction:
/// use [`CubePos::new`] or convert from a [`HexPos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubePos {
    x: i32,
    y: i32,
    z: i32,
}

/// The components passed to [`CubePos::new`] did not sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cube coordinate ({x}, {y}, {z}) does not satisfy x + y + z == 0")]
pub struct CubeInvariantError {
    /// The rejected x component
    pub x: i32,
    /// The rejected y component
    pub y: i32,
    /// The rejected z component
    pub z: i32,
}

impl CubePos {
    /// The cube coordinate of the origin.
    pub const ZERO: CubePos = CubePos { x: 0, y: 0, z: 0 };

    /// Creates a new [`CubePos`], checking that `x + y + z == 0`.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Result<Self, CubeInvariantError> {
        if x + y + z == 0 {
            Ok(CubePos { x, y, z })
        } else {
            Err(CubeInvariantError { x, y, z })
        }
    }

    /// Converts from axial coordinates: `x = q`, `z = r`, `y = -(x + z)`.
    #[inline]
    #[must_use]
    pub const fn from_axial(hex_pos: HexPos) -> Self {
        let x = hex_pos.q();
        let z = hex_pos.r();

        CubePos { x, y: -(x + z), z }
    }

    /// Converts back to axial coordinates, dropping the redundant `y` axis.
    #[inline]
    #[must_use]
    pub const fn to_axial(self) -> HexPos {
        HexPos::new(self.x, self.z)
    }

    /// The `x` component, equal to the axial `q`.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// The redundant `y` component.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// The `z` component, equal to the axial `r`.
    #[inline]
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// The number of steps needed to walk from the origin to this coordinate.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> u32 {
        let x = self.x.unsigned_abs();
        let y = self.y.unsigned_abs();
        let z = self.z.unsigned_abs();

        if x >= y && x >= z {
            x
        } else if y >= z {
            y
        } else {
            z
        }
    }
}

impl From<HexPos> for CubePos {
    fn from(hex_pos: HexPos) -> Self {
        CubePos::from_axial(hex_pos)
    }
}

impl From<CubePos> for HexPos {
    fn from(cube_pos: CubePos) -> Self {
        cube_pos.to_axial()
    }
}

impl Display for CubePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A cube coordinate with fractional components.
///
/// Continuous positions map to these, and [`FractionalCube::round`] snaps them to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FractionalCube {
    /// The fractional `x` component
    pub x: f32,
    /// The fractional `y` component
    pub y: f32,
    /// The fractional `z` component
    pub z: f32,
}

impl FractionalCube {
    /// Creates a new [`FractionalCube`] from its three components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        FractionalCube { x, y, z }
    }

    /// Creates a [`FractionalCube`] from fractional axial coordinates.
    #[inline]
    #[must_use]
    pub fn from_axial(q: f32, r: f32) -> Self {
        FractionalCube {
            x: q,
            y: -q - r,
            z: r,
        }
    }

    /// Rounds to the nearest hex.
    ///
    /// Each component is rounded independently, which can leave the sum off by one.
    /// The axis whose rounding moved it the furthest is then recomputed from the other two.
    ///
    /// Ties are broken in a fixed order:
    /// `x` is only recomputed if its delta is strictly larger than both others,
    /// otherwise `y` is recomputed if its delta is strictly larger than that of `z`,
    /// and `z` is recomputed in every remaining case.
    #[must_use]
    pub fn round(self) -> CubePos {
        let mut x = self.x.round();
        let mut y = self.y.round();
        let mut z = self.z.round();

        let x_delta = (x - self.x).abs();
        let y_delta = (y - self.y).abs();
        let z_delta = (z - self.z).abs();

        if x_delta > y_delta && x_delta > z_delta {
            x = -y - z;
        } else if y_delta > z_delta {
            y = -x - z;
        } else {
            z = -x - y;
        }

        CubePos {
            x: x as i32,
            y: y as i32,
            z: z as i32,
        }
    }
}

impl From<CubePos> for FractionalCube {
    fn from(cube_pos: CubePos) -> Self {
        FractionalCube {
            x: cube_pos.x as f32,
            y: cube_pos.y as f32,
            z: cube_pos.z as f32,
        }
    }
}
