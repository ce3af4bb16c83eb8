//! End-of-game detection
//!
//! Checkmate and stalemate both come down to one exhaustive question: can the side
//! have any move that leaves its king safe? Every candidate is played through a probe
//! and reverted, so the position is unchanged once the search returns.

use crate::board::{Color, MoveEffect, PieceKind, Position, Square};
use crate::config::DrawRules;
use crate::rules::{attack, movement, probe, MoveClass};

use super::state::{GameState, Termination};

const NEIGHBOURS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Whether `color` has at least one move that leaves its king out of check.
///
/// King steps are tried first, then every other piece against all 64 squares with
/// the movement pattern as a pre-filter.
pub fn has_escape(position: &mut Position, color: Color, en_passant: Option<Square>) -> bool {
    if let Some(king) = position.find_king(color) {
        for (df, dr) in NEIGHBOURS {
            let Some(target) = king.offset(df, dr) else {
                continue;
            };
            if position
                .occupant(target)
                .is_some_and(|occupant| occupant.color == color)
            {
                continue;
            }
            if !probe::leaves_in_check(position, &MoveEffect::new(king, target), color) {
                return true;
            }
        }
    }

    let others: Vec<Square> = position
        .pieces(color)
        .filter(|piece| piece.kind != PieceKind::King)
        .map(|piece| piece.square)
        .collect();

    for from in others {
        for to in Square::all() {
            let Some(class) = movement::classify(position, from, to, en_passant) else {
                continue;
            };
            let mut effect = MoveEffect::new(from, to);
            if let MoveClass::EnPassant { victim } = class {
                effect = effect.with_en_passant(victim);
            }
            if !probe::leaves_in_check(position, &effect, color) {
                return true;
            }
        }
    }

    false
}

pub fn is_checkmate(position: &mut Position, color: Color, en_passant: Option<Square>) -> bool {
    attack::in_check(position, color) && !has_escape(position, color, en_passant)
}

pub fn is_stalemate(position: &mut Position, color: Color, en_passant: Option<Square>) -> bool {
    !attack::in_check(position, color) && !has_escape(position, color, en_passant)
}

/// Status of `defender` right after the opponent moved, `None` while play continues.
pub fn evaluate(state: &mut GameState, defender: Color, rules: &DrawRules) -> Option<Termination> {
    let en_passant = state.en_passant;
    let in_check = attack::in_check(&state.position, defender);
    let can_move = has_escape(&mut state.position, defender, en_passant);

    if in_check && !can_move {
        return Some(Termination::Checkmate {
            winner: defender.flip(),
        });
    }
    if !can_move {
        return Some(Termination::Stalemate);
    }
    if rules.repetition && state.is_repeating() {
        return Some(Termination::Repetition);
    }
    if rules
        .fifty_move_limit
        .is_some_and(|limit| state.halfmove_clock >= limit)
    {
        return Some(Termination::FiftyMoves);
    }
    None
}
