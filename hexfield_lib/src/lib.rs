//! Hexagonal grid bookkeeping: coordinates, coordinate-keyed layers,
//! and cost-bounded movement over terrain.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]

pub mod entities;
pub mod enum_iter;
pub mod geometry;
pub mod layers;
pub mod level;
pub mod manifest;
pub mod reachability;
