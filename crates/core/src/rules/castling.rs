//! Castling legality
//!
//! Kingside and queenside are mirror images around the d/e line: the king walks two
//! files towards the rook and the rook jumps to the square the king crossed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Color, MoveEffect, PieceKind, Position, Square};
use crate::error::MoveError;

use super::{attack, probe};

const KING_FILE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Files the king steps through, ending on its destination.
    pub fn king_walk(self) -> [u8; 2] {
        match self {
            CastleSide::Kingside => [5, 6],
            CastleSide::Queenside => [3, 2],
        }
    }

    pub fn king_target(self, color: Color) -> Square {
        Square::at(self.king_walk()[1], color.home_rank())
    }

    pub fn rook_target(self, color: Color) -> Square {
        Square::at(self.king_walk()[0], color.home_rank())
    }

    pub fn notation(self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

/// Checks every castling condition for `color` and returns the king-and-rook effect.
///
/// The king's path is probed square by square on the live position; each probe is
/// reverted before the next one and before returning.
pub fn validate(
    position: &mut Position,
    color: Color,
    side: CastleSide,
) -> Result<MoveEffect, MoveError> {
    let rank = color.home_rank();
    let king_square = Square::at(KING_FILE, rank);
    let rook_square = Square::at(side.rook_file(), rank);

    let king = position
        .occupant(king_square)
        .filter(|p| p.is(PieceKind::King, color));
    let rook = position
        .occupant(rook_square)
        .filter(|p| p.is(PieceKind::Rook, color));
    let (Some(king), Some(rook)) = (king, rook) else {
        return Err(MoveError::PiecesNotInStartPosition);
    };

    if king.has_moved || rook.has_moved {
        return Err(MoveError::PieceAlreadyMoved);
    }

    let (low, high) = if side.rook_file() < KING_FILE {
        (side.rook_file(), KING_FILE)
    } else {
        (KING_FILE, side.rook_file())
    };
    if (low + 1..high).any(|file| !position.is_empty(Square::at(file, rank))) {
        return Err(MoveError::PathNotEmpty);
    }

    if attack::in_check(position, color) {
        return Err(MoveError::KingCurrentlyInCheck);
    }

    for file in side.king_walk() {
        let step = Square::at(file, rank);
        if probe::leaves_in_check(position, &MoveEffect::new(king_square, step), color) {
            debug!(%color, ?side, square = %step, "castling path attacked");
            return Err(MoveError::KingPassesThroughAttackedSquare(step));
        }
    }

    Ok(MoveEffect::new(king_square, side.king_target(color))
        .with_rook(rook_square, side.rook_target(color)))
}
