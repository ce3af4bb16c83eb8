//! Echecs Core Library
//!
//! Rules engine for two players sharing one board: position model, movement
//! legality, check detection, move validation and game-over detection, plus the
//! command grammar and the canonical position text.

pub mod board;
pub mod canonical;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod rules;

pub use board::{Color, Piece, PieceKind, Position, Promotion, Square};
pub use canonical::{canonical_position, parse_canonical};
pub use config::{DrawRules, GameConfig};
pub use error::{Error, MoveError, Result};
pub use game::{
    Event, Frontend, Game, GameState, Outcome, PromotionChooser, SessionEnd, Termination,
    TurnReport,
};
pub use notation::MoveCommand;
pub use rules::CastleSide;

/// Basic position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInfo {
    pub piece_count: u32,
    pub legal_move_count: u32,
    pub side_to_move: Color,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Analyzes the position of a game in progress
pub fn analyze_position(state: &mut GameState) -> PositionInfo {
    let side_to_move = state.side_to_move();
    let en_passant = state.en_passant();
    let piece_count = state.position().piece_count() as u32;
    let legal_move_count = state.legal_moves().len() as u32;
    let is_check = rules::in_check(state.position(), side_to_move);

    let mut position = state.position().clone();
    let is_checkmate = game::detector::is_checkmate(&mut position, side_to_move, en_passant);
    let is_stalemate = game::detector::is_stalemate(&mut position, side_to_move, en_passant);

    PositionInfo {
        piece_count,
        legal_move_count,
        side_to_move,
        is_check,
        is_checkmate,
        is_stalemate,
    }
}

/// Creates the standard starting position
pub fn starting_position() -> GameState {
    GameState::new()
}
