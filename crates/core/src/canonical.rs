//! Canonical position text
//!
//! Ranks 1 to 8, files a to h: every square contributes its token (`wP`, `bK`, ...)
//! or nothing, followed by a comma. A space and the result code close the line:
//!
//! ```text
//! wR,wN,wB,wQ,wK,wB,wN,wR,wP,...,bR, ?-?
//! ```

use crate::board::{Color, Piece, PieceKind, Position, Square};
use crate::error::{Error, Result};
use crate::game::{GameState, Outcome};

impl Position {
    /// The 64 comma-terminated square tokens.
    pub fn canonical_board(&self) -> String {
        let mut out = String::with_capacity(64 * 3);
        for square in Square::all() {
            if let Some(piece) = self.occupant(square) {
                out.push_str(&piece.token());
            }
            out.push(',');
        }
        out
    }
}

pub fn canonical_position(position: &Position, outcome: Outcome) -> String {
    format!("{} {}", position.canonical_board(), outcome.code())
}

/// Reads a canonical line back into a position and result.
///
/// Pieces standing where the starting array puts them are taken as unmoved, all
/// others as moved.
pub fn parse_canonical(text: &str) -> Result<(Position, Outcome)> {
    let text = text.trim();
    let (board, code) = text
        .rsplit_once(' ')
        .ok_or_else(|| Error::Parse(format!("missing result code in '{text}'")))?;
    let outcome = Outcome::from_code(code)
        .ok_or_else(|| Error::Parse(format!("unknown result code '{code}'")))?;

    let tokens: Vec<&str> = board
        .strip_suffix(',')
        .ok_or_else(|| Error::Parse("board must end with ','".into()))?
        .split(',')
        .collect();
    if tokens.len() != 64 {
        return Err(Error::Parse(format!(
            "expected 64 squares, found {}",
            tokens.len()
        )));
    }

    let start = Position::standard();
    let mut position = Position::empty();
    for (square, token) in Square::all().zip(tokens) {
        if token.is_empty() {
            continue;
        }
        let mut chars = token.chars();
        let (Some(c), Some(k), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::Parse(format!("bad token '{token}' on {square}")));
        };
        let (Some(color), Some(kind)) = (Color::from_letter(c), PieceKind::from_letter(k)) else {
            return Err(Error::Parse(format!("bad token '{token}' on {square}")));
        };

        let mut piece = Piece::new(kind, color, square);
        piece.has_moved = !start
            .occupant(square)
            .is_some_and(|home| home.is(kind, color));
        position.place(square, piece);
    }

    Ok((position, outcome))
}

impl GameState {
    /// Builds a state from a canonical line with `side_to_move` on move.
    ///
    /// En passant rights and move history are not part of the format and start empty.
    pub fn from_canonical(text: &str, side_to_move: Color) -> Result<Self> {
        let (position, outcome) = parse_canonical(text)?;
        Ok(GameState::from_position(position, side_to_move).with_outcome(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::sq;

    const START: &str = "wR,wN,wB,wQ,wK,wB,wN,wR,wP,wP,wP,wP,wP,wP,wP,wP,\
        ,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,\
        bP,bP,bP,bP,bP,bP,bP,bP,bR,bN,bB,bQ,bK,bB,bN,bR, ?-?";

    #[test]
    fn test_start_position_text() {
        assert_eq!(canonical_position(&Position::standard(), Outcome::Ongoing), START);
    }

    #[test]
    fn test_parse_start_position() {
        let (position, outcome) = parse_canonical(START).unwrap();
        assert_eq!(position, Position::standard());
        assert_eq!(outcome, Outcome::Ongoing);
    }

    #[test]
    fn test_displaced_pieces_count_as_moved() {
        let mut board = Position::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Color::White, sq("e1")));
        board.place(sq("h1"), Piece::new(PieceKind::Rook, Color::Black, sq("h1")));
        board.place(sq("e4"), Piece::new(PieceKind::Pawn, Color::White, sq("e4")));
        let text = canonical_position(&board, Outcome::Draw);
        assert!(text.ends_with(" 1/2-1/2"));

        let state = GameState::from_canonical(&text, Color::Black).unwrap();
        let position = state.position();
        assert!(!position.occupant(sq("e1")).unwrap().has_moved);
        assert!(position.occupant(sq("h1")).unwrap().has_moved);
        assert!(position.occupant(sq("e4")).unwrap().has_moved);
        assert_eq!(state.outcome(), Outcome::Draw);
        assert_eq!(state.side_to_move(), Color::Black);
    }

    #[test]
    fn test_malformed_text() {
        let cases = [
            String::new(),
            "wK, ?-?".to_string(),
            START.replace("?-?", "2-0"),
            START.replacen("wR", "xR", 1),
            START.replacen("wR", "wRR", 1),
            START.replacen(", ?-?", " ?-?", 1),
        ];
        for text in &cases {
            assert!(matches!(parse_canonical(text), Err(Error::Parse(_))), "{text:?}");
        }
    }
}
