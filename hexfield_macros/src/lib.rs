//! Procedural macros for `hexfield_lib`.
//!
//! The only one so far is the derive for `IterableEnum`, used for grid directions,
//! layer events and the CI checks. Its shape follows the `EnumIter` derive of the
//! [`strum`](https://github.com/Peternator7/strum) crate (MIT, Peter Glotfelty).

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod iterable_enum;

/// Implements `hexfield_lib::enum_iter::IterableEnum` for an enum whose variants carry no data.
///
/// Variants are yielded in the order they are declared,
/// and `index` returns that same position.
#[proc_macro_derive(IterableEnum)]
pub fn derive_iterable_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    iterable_enum::iterable_enum_inner(&input).into()
}
