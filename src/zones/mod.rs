//! Card piles.
//!
//! ## Key Types
//!
//! - `PileKind`: Hand, draw, discard or exhaust
//! - `Piles`: The four piles with draw/reshuffle/discard movement
//! - `Drawn`: Outcome of a single draw

pub mod piles;

pub use piles::{Drawn, PileKind, Piles};
