//! Chess rules over a [`Position`](crate::board::Position)
//!
//! Leaves first: movement patterns, then check detection, then the scoped
//! probe used for every hypothetical move, then castling.

pub mod attack;
pub mod castling;
pub mod movement;
pub mod probe;

pub use attack::in_check;
pub use castling::CastleSide;
pub use movement::{classify, is_pseudo_legal, MoveClass};
pub use probe::{leaves_in_check, Probe};
