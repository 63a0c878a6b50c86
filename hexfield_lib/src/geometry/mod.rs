//! Hexagonal coordinates, directions and the mapping between hexes and continuous positions.
//!
//! Cells are addressed with axial coordinates ([`HexPos`]).
//! Cube coordinates ([`CubePos`], [`FractionalCube`]) are only ever used as an intermediate,
//! for rounding and distance math.

mod cube;
pub use cube::{CubeInvariantError, CubePos, FractionalCube};

mod direction;
pub use direction::{HexDirection, HexDirections, InvalidDirection};

mod layout;
pub use layout::HexLayout;

mod position;
pub use position::HexPos;

mod shapes;
pub use shapes::{hexagon, parallelogram};
