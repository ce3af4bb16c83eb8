//! Position model: squares, pieces and the grid holding them

mod piece;
mod position;
pub(crate) mod square;

pub use piece::{Color, Piece, PieceKind, Promotion};
pub use position::{MoveEffect, Position, Undo};
pub use square::{ParseSquareError, Square};
