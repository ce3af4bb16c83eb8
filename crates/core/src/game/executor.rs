//! Move validation and execution

use tracing::debug;

use crate::board::{Color, MoveEffect, Piece, PieceKind, Promotion, Square};
use crate::error::MoveError;
use crate::notation::MoveCommand;
use crate::rules::{castling, movement, probe, CastleSide, MoveClass};

use super::state::GameState;

/// Source of the piece a pawn turns into on the farthest rank.
pub trait PromotionChooser {
    fn choose_promotion(&mut self, color: Color, square: Square) -> Promotion;
}

/// A fixed answer, for callers that decide up front.
impl PromotionChooser for Promotion {
    fn choose_promotion(&mut self, _color: Color, _square: Square) -> Promotion {
        *self
    }
}

/// A move that passed validation, described after it was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub mover: Color,
    pub kind: PieceKind,
    pub effect: MoveEffect,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
}

impl AppliedMove {
    pub fn promotion(&self) -> Option<PieceKind> {
        self.effect.promotion
    }
}

/// A fully legal coordinate move, not yet played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedMove {
    pub effect: MoveEffect,
    pub class: MoveClass,
}

impl GameState {
    /// Runs every validation step for `from` → `to` without playing the move.
    ///
    /// The self-check test plays the move on the live position through a probe and
    /// reverts it before returning.
    pub fn check_move(&mut self, from: Square, to: Square) -> Result<CheckedMove, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let mover = self.side_to_move;
        let piece = self
            .position
            .occupant(from)
            .ok_or(MoveError::NoPieceAtStart(from))?;
        if piece.color != mover {
            return Err(MoveError::WrongColorPiece(from));
        }
        if from == to {
            return Err(MoveError::NullMove);
        }

        let class = movement::classify(&self.position, from, to, self.en_passant)
            .ok_or(MoveError::IllegalPattern { from, to })?;
        let mut effect = MoveEffect::new(from, to);
        if let MoveClass::EnPassant { victim } = class {
            effect = effect.with_en_passant(victim);
        }

        if probe::leaves_in_check(&mut self.position, &effect, mover) {
            return Err(MoveError::SelfCheck);
        }

        Ok(CheckedMove { effect, class })
    }

    /// Validates and plays a coordinate move.
    ///
    /// `chooser` is consulted only when a pawn reaches the farthest rank.
    pub fn play_move(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, MoveError> {
        let checked = self.check_move(from, to).inspect_err(|reason| {
            debug!(%from, %to, %reason, "move rejected");
        })?;
        let mover = self.side_to_move;
        let mut effect = checked.effect;

        let kind = self
            .position
            .occupant(from)
            .map(|piece| piece.kind)
            .ok_or(MoveError::NoPieceAtStart(from))?;
        if kind == PieceKind::Pawn && to.rank() == mover.promotion_rank() {
            let choice = chooser.choose_promotion(mover, to);
            effect = effect.with_promotion(choice.kind());
        }

        let captured = match checked.class {
            MoveClass::EnPassant { victim } => self.position.occupant(victim),
            _ => self.position.occupant(to),
        };

        self.position.play(&effect);
        self.halfmove_clock = if checked.class.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.en_passant = match checked.class {
            MoveClass::DoublePush => from.offset(0, mover.pawn_direction()),
            _ => None,
        };

        debug!(%mover, %from, %to, ?captured, "move played");
        Ok(AppliedMove {
            mover,
            kind,
            effect,
            captured,
            castle: None,
        })
    }

    /// Validates castling on `side` for the side to move without playing it.
    pub fn check_castle(&mut self, side: CastleSide) -> Result<MoveEffect, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        castling::validate(&mut self.position, self.side_to_move, side)
    }

    /// Validates and plays castling: king and rook move together.
    pub fn castle(&mut self, side: CastleSide) -> Result<AppliedMove, MoveError> {
        let effect = self.check_castle(side).inspect_err(|reason| {
            debug!(?side, %reason, "castling rejected");
        })?;
        let mover = self.side_to_move;

        self.position.play(&effect);
        self.halfmove_clock += 1;
        self.en_passant = None;

        debug!(%mover, ?side, "castled");
        Ok(AppliedMove {
            mover,
            kind: PieceKind::King,
            effect,
            captured: None,
            castle: Some(side),
        })
    }

    /// Every fully legal move for the side to move, castling included.
    pub fn legal_moves(&mut self) -> Vec<MoveCommand> {
        if self.is_over() {
            return Vec::new();
        }
        let origins: Vec<Square> = self
            .position
            .pieces(self.side_to_move)
            .map(|piece| piece.square)
            .collect();

        let mut moves = Vec::new();
        for from in origins {
            for to in Square::all() {
                if self.check_move(from, to).is_ok() {
                    moves.push(MoveCommand::Coordinate { from, to });
                }
            }
        }
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if self.check_castle(side).is_ok() {
                moves.push(MoveCommand::Castle(side));
            }
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::sq;
    use crate::board::Position;

    fn state_with(pieces: &[(PieceKind, Color, &str)], side: Color) -> GameState {
        let mut position = Position::empty();
        for &(kind, color, name) in pieces {
            position.place(sq(name), Piece::new(kind, color, sq(name)));
        }
        GameState::from_position(position, side)
    }

    #[test]
    fn test_rejection_order() {
        let mut state = GameState::new();
        assert_eq!(
            state.check_move(sq("e4"), sq("e5")),
            Err(MoveError::NoPieceAtStart(sq("e4")))
        );
        assert_eq!(
            state.check_move(sq("e7"), sq("e5")),
            Err(MoveError::WrongColorPiece(sq("e7")))
        );
        assert_eq!(state.check_move(sq("e2"), sq("e2")), Err(MoveError::NullMove));
        assert_eq!(
            state.check_move(sq("e2"), sq("e5")),
            Err(MoveError::IllegalPattern {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_self_check_is_rejected_and_reverted() {
        let mut state = state_with(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::Knight, Color::White, "e2"),
                (PieceKind::Rook, Color::Black, "e8"),
                (PieceKind::King, Color::Black, "a8"),
            ],
            Color::White,
        );
        let before = state.clone();
        assert_eq!(
            state.play_move(sq("e2"), sq("c3"), &mut Promotion::Queen),
            Err(MoveError::SelfCheck)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_capture_resets_clock() {
        let mut state = state_with(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::Rook, Color::White, "a1"),
                (PieceKind::Knight, Color::Black, "a5"),
                (PieceKind::King, Color::Black, "h8"),
            ],
            Color::White,
        )
        .with_halfmove_clock(7);

        let applied = state
            .play_move(sq("a1"), sq("a5"), &mut Promotion::Queen)
            .unwrap();
        assert_eq!(applied.captured.map(|p| p.kind), Some(PieceKind::Knight));
        assert_eq!(state.halfmove_clock(), 0);

        state.pass_turn();
        state.play_move(sq("h8"), sq("g8"), &mut Promotion::Queen).unwrap();
        assert_eq!(state.halfmove_clock(), 1);
    }

    #[test]
    fn test_double_push_sets_en_passant_for_one_ply() {
        let mut state = GameState::new();
        state.play_move(sq("e2"), sq("e4"), &mut Promotion::Queen).unwrap();
        assert_eq!(state.en_passant(), Some(sq("e3")));

        state.pass_turn();
        state.play_move(sq("g8"), sq("f6"), &mut Promotion::Queen).unwrap();
        assert_eq!(state.en_passant(), None);
    }

    #[test]
    fn test_en_passant_capture_removes_pawn() {
        let mut state = state_with(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::Pawn, Color::White, "e5"),
                (PieceKind::Pawn, Color::Black, "d5"),
                (PieceKind::King, Color::Black, "e8"),
            ],
            Color::White,
        )
        .with_en_passant(sq("d6"))
        .with_halfmove_clock(3);

        let applied = state
            .play_move(sq("e5"), sq("d6"), &mut Promotion::Queen)
            .unwrap();
        assert_eq!(applied.effect.en_passant, Some(sq("d5")));
        assert_eq!(applied.captured.map(|p| p.square), Some(sq("d5")));
        assert!(state.position().is_empty(sq("d5")));
        assert_eq!(state.halfmove_clock(), 0);
    }

    #[test]
    fn test_promotion_asks_the_chooser() {
        struct Recorder(Vec<(Color, Square)>);
        impl PromotionChooser for Recorder {
            fn choose_promotion(&mut self, color: Color, square: Square) -> Promotion {
                self.0.push((color, square));
                Promotion::Knight
            }
        }

        let mut state = state_with(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::King, Color::Black, "e8"),
                (PieceKind::Pawn, Color::Black, "b2"),
            ],
            Color::Black,
        );
        let mut recorder = Recorder(Vec::new());
        let applied = state.play_move(sq("b2"), sq("b1"), &mut recorder).unwrap();

        assert_eq!(recorder.0, vec![(Color::Black, sq("b1"))]);
        assert_eq!(applied.promotion(), Some(PieceKind::Knight));
        let knight = state.position().occupant(sq("b1")).unwrap();
        assert!(knight.is(PieceKind::Knight, Color::Black));
        assert_eq!(state.position().iter().filter(|p| p.kind == PieceKind::Pawn).count(), 0);
    }

    #[test]
    fn test_castle_moves_both_pieces() {
        let mut state = state_with(
            &[
                (PieceKind::King, Color::White, "e1"),
                (PieceKind::Rook, Color::White, "a1"),
                (PieceKind::King, Color::Black, "e8"),
            ],
            Color::White,
        );
        let applied = state.castle(CastleSide::Queenside).unwrap();
        assert_eq!(applied.castle, Some(CastleSide::Queenside));

        let king = state.position().occupant(sq("c1")).unwrap();
        let rook = state.position().occupant(sq("d1")).unwrap();
        assert!(king.is(PieceKind::King, Color::White) && king.has_moved);
        assert!(rook.is(PieceKind::Rook, Color::White) && rook.has_moved);
        assert_eq!(state.halfmove_clock(), 1);
    }

    #[test]
    fn test_twenty_moves_from_start() {
        let mut state = GameState::new();
        assert_eq!(state.legal_moves().len(), 20);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_finished_game_refuses_moves() {
        let mut state = GameState::new().with_outcome(crate::game::Outcome::Draw);
        assert_eq!(state.check_move(sq("e2"), sq("e4")), Err(MoveError::GameOver));
        assert_eq!(state.castle(CastleSide::Kingside), Err(MoveError::GameOver));
        assert!(state.legal_moves().is_empty());
    }
}
