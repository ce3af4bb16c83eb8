//! Game state: position plus everything the rules need to remember between plies

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::board::{Color, Position, Square};

/// How many past moves are kept per side for the repetition heuristic.
pub const RECENT_MOVES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Result code of the canonical position.
    pub fn code(self) -> &'static str {
        match self {
            Outcome::WhiteWins => "1-0",
            Outcome::BlackWins => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Ongoing => "?-?",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1-0" => Some(Outcome::WhiteWins),
            "0-1" => Some(Outcome::BlackWins),
            "1/2-1/2" => Some(Outcome::Draw),
            "?-?" => Some(Outcome::Ongoing),
            _ => None,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate { winner: Color },
    Stalemate,
    Repetition,
    FiftyMoves,
    Resignation { winner: Color },
    Agreement,
}

impl Termination {
    pub fn outcome(self) -> Outcome {
        match self {
            Termination::Checkmate { winner } | Termination::Resignation { winner } => {
                Outcome::win_for(winner)
            }
            Termination::Stalemate
            | Termination::Repetition
            | Termination::FiftyMoves
            | Termination::Agreement => Outcome::Draw,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Termination::Resignation { winner } => {
                write!(f, "{} resigns, {winner} wins", winner.flip())
            }
            Termination::Stalemate => f.write_str("stalemate"),
            Termination::Repetition => f.write_str("draw by repetition"),
            Termination::FiftyMoves => f.write_str("draw, no capture in fifty moves"),
            Termination::Agreement => f.write_str("draw by agreement"),
        }
    }
}

/// Last moves of one side, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentMoves {
    slots: [Option<String>; RECENT_MOVES],
}

impl RecentMoves {
    /// Shifts older entries down (the oldest falls off) and stores `notation` in front.
    pub fn push(&mut self, notation: &str) {
        self.slots.rotate_right(1);
        self.slots[0] = Some(notation.to_string());
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot)?.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().flatten().map(String::as_str)
    }

    /// The side went back and forth: slot 0 = 2 = 4 and slot 1 = 3.
    pub fn is_oscillating(&self) -> bool {
        let s = &self.slots;
        s[0].is_some() && s[0] == s[2] && s[2] == s[4] && s[1] == s[3]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) position: Position,
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    recent: [RecentMoves; 2],
    outcome: Outcome,
    termination: Option<Termination>,
}

impl GameState {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self::from_position(Position::standard(), Color::White)
    }

    pub fn from_position(position: Position, side_to_move: Color) -> Self {
        Self {
            position,
            side_to_move,
            en_passant: None,
            halfmove_clock: 0,
            recent: Default::default(),
            outcome: Outcome::Ongoing,
            termination: None,
        }
    }

    /// Makes `square` capturable en passant on the next ply.
    pub fn with_en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    pub fn with_halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves played since the last capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn recent_moves(&self, color: Color) -> &RecentMoves {
        &self.recent[color as usize]
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub(crate) fn record_move(&mut self, color: Color, notation: &str) {
        self.recent[color as usize].push(notation);
    }

    /// Both sides oscillate between the same two moves.
    pub fn is_repeating(&self) -> bool {
        self.recent.iter().all(RecentMoves::is_oscillating)
    }

    pub(crate) fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.flip();
    }

    /// Sets the terminal outcome. The first termination wins.
    pub(crate) fn finish(&mut self, termination: Termination) {
        if self.outcome.is_over() {
            return;
        }
        info!(%termination, "game over");
        self.outcome = termination.outcome();
        self.termination = Some(termination);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
