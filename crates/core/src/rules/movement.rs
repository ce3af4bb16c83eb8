//! Per-piece movement patterns
//!
//! Pure functions over a borrowed [`Position`]: whether a piece may travel from one
//! square to another according to its pattern and blockers. Whether the mover's own
//! king is left in check is decided elsewhere.

use tracing::trace;

use crate::board::{Color, Piece, PieceKind, Position, Square};

/// How a pseudo-legal move interacts with the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    /// Move onto an empty square.
    Quiet,
    /// Pawn advancing two squares from its starting rank.
    DoublePush,
    /// Move onto an opposing piece.
    Capture,
    /// Pawn capture of the pawn standing on `victim`.
    EnPassant { victim: Square },
}

impl MoveClass {
    pub fn is_capture(self) -> bool {
        matches!(self, MoveClass::Capture | MoveClass::EnPassant { .. })
    }
}

/// Classifies the move of whatever stands on `from` to `to`, `None` if the pattern forbids it.
///
/// `en_passant` is the square a pawn may currently capture onto en passant.
pub fn classify(
    position: &Position,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Option<MoveClass> {
    if from == to {
        return None;
    }
    let piece = position.occupant(from)?;

    match piece.kind {
        PieceKind::Pawn => pawn_move(position, &piece, to, en_passant),
        PieceKind::Rook => slide(position, &piece, to, true, false),
        PieceKind::Bishop => slide(position, &piece, to, false, true),
        PieceKind::Queen => slide(position, &piece, to, true, true),
        PieceKind::Knight => knight_move(position, &piece, to),
        PieceKind::King => king_move(position, &piece, to),
    }
}

pub fn is_pseudo_legal(
    position: &Position,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    classify(position, from, to, en_passant).is_some()
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

/// Destination rule shared by every piece but the pawn.
fn landing(position: &Position, color: Color, to: Square) -> Option<MoveClass> {
    match position.occupant(to) {
        None => Some(MoveClass::Quiet),
        Some(target) if target.color != color => Some(MoveClass::Capture),
        Some(_) => None,
    }
}

fn pawn_move(
    position: &Position,
    pawn: &Piece,
    to: Square,
    en_passant: Option<Square>,
) -> Option<MoveClass> {
    let from = pawn.square;
    let direction = pawn.color.pawn_direction();
    let (df, dr) = deltas(from, to);
    let target = position.occupant(to);

    if df == 0 {
        if target.is_some() {
            return None;
        }
        if dr == direction {
            return Some(MoveClass::Quiet);
        }
        if dr == 2 * direction && from.rank() == pawn.color.pawn_start_rank() {
            let skipped = from.offset(0, direction)?;
            if position.is_empty(skipped) {
                return Some(MoveClass::DoublePush);
            }
        }
        return None;
    }

    if df.abs() != 1 || dr != direction {
        return None;
    }

    match target {
        Some(victim) if victim.color != pawn.color => Some(MoveClass::Capture),
        Some(_) => None,
        None if en_passant == Some(to) => {
            let victim = Square::at(to.file(), from.rank());
            match position.occupant(victim) {
                Some(p) if p.is(PieceKind::Pawn, pawn.color.flip()) => {
                    Some(MoveClass::EnPassant { victim })
                }
                _ => None,
            }
        }
        None => None,
    }
}

fn slide(
    position: &Position,
    piece: &Piece,
    to: Square,
    straight: bool,
    diagonal: bool,
) -> Option<MoveClass> {
    let from = piece.square;
    let (df, dr) = deltas(from, to);
    let on_line = (straight && (df == 0 || dr == 0)) || (diagonal && df.abs() == dr.abs());
    if !on_line {
        return None;
    }

    let (step_file, step_rank) = (df.signum(), dr.signum());
    let mut current = from.offset(step_file, step_rank)?;
    while current != to {
        if !position.is_empty(current) {
            return None;
        }
        current = current.offset(step_file, step_rank)?;
    }

    landing(position, piece.color, to)
}

fn knight_move(position: &Position, knight: &Piece, to: Square) -> Option<MoveClass> {
    let (df, dr) = deltas(knight.square, to);
    match (df.abs(), dr.abs()) {
        (1, 2) | (2, 1) => landing(position, knight.color, to),
        _ => None,
    }
}

fn king_move(position: &Position, king: &Piece, to: Square) -> Option<MoveClass> {
    let (df, dr) = deltas(king.square, to);
    if df.abs() <= 1 && dr.abs() <= 1 {
        return landing(position, king.color, to);
    }
    if df.abs() == 2 && dr == 0 {
        trace!(from = %king.square, %to, "castling goes through O-O / O-O-O");
    }
    None
}
