//! Check detection

use crate::board::{Color, Position};

use super::movement;

/// True when `color`'s king could be taken by any opposing piece.
///
/// A position without that king is never in check.
pub fn in_check(position: &Position, color: Color) -> bool {
    let Some(king) = position.find_king(color) else {
        return false;
    };
    position
        .pieces(color.flip())
        .any(|piece| movement::is_pseudo_legal(position, piece.square, king, None))
}
