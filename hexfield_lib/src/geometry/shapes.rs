//! Iterators over common arrangements of cells, used to lay out terrain.

use hexx::Hex;

use super::HexPos;

/// All cells within `radius` steps of `center`, including `center` itself.
pub fn hexagon(center: HexPos, radius: u32) -> impl Iterator<Item = HexPos> {
    hexx::shapes::hexagon(Hex::from(center), radius).map(HexPos::from)
}

/// All cells whose axial coordinates lie between `min` and `max`, inclusive on both ends.
///
/// Cells are yielded row by row (`r` outer, `q` inner).
pub fn parallelogram(min: HexPos, max: HexPos) -> impl Iterator<Item = HexPos> {
    (min.r()..=max.r()).flat_map(move |r| (min.q()..=max.q()).map(move |q| HexPos::new(q, r)))
}
