//! Move command grammar
//!
//! A command is either four characters naming two squares (`e2e4`) or a castling
//! token: `O-O` / `O-O-O`, where each O may also be written `o` or `0`.

use std::fmt;

use crate::board::Square;
use crate::error::MoveError;
use crate::rules::CastleSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCommand {
    Coordinate { from: Square, to: Square },
    Castle(CastleSide),
}

impl MoveCommand {
    /// Parses a command, surrounding whitespace ignored.
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let trimmed = text.trim();
        let invalid = || MoveError::InvalidCommand(trimmed.to_string());

        if let Some(side) = parse_castle(trimmed) {
            return Ok(MoveCommand::Castle(side));
        }

        if trimmed.len() != 4 || !trimmed.is_ascii() {
            return Err(invalid());
        }
        let from: Square = trimmed[..2].parse().map_err(|_| invalid())?;
        let to: Square = trimmed[2..].parse().map_err(|_| invalid())?;
        Ok(MoveCommand::Coordinate { from, to })
    }
}

fn parse_castle(text: &str) -> Option<CastleSide> {
    let mut groups = 0;
    for group in text.split('-') {
        if !matches!(group, "O" | "o" | "0") {
            return None;
        }
        groups += 1;
    }
    match groups {
        2 => Some(CastleSide::Kingside),
        3 => Some(CastleSide::Queenside),
        _ => None,
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCommand::Coordinate { from, to } => write!(f, "{from}{to}"),
            MoveCommand::Castle(side) => f.write_str(side.notation()),
        }
    }
}

impl std::str::FromStr for MoveCommand {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveCommand::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::sq;

    #[test]
    fn test_coordinate_move() {
        assert_eq!(
            MoveCommand::parse("  e2e4\n"),
            Ok(MoveCommand::Coordinate {
                from: sq("e2"),
                to: sq("e4")
            })
        );
        assert_eq!(MoveCommand::parse("g8f6").unwrap().to_string(), "g8f6");
    }

    #[test]
    fn test_castling_spellings() {
        for text in ["O-O", "o-o", "0-0", "O-o", "0-O"] {
            assert_eq!(
                MoveCommand::parse(text),
                Ok(MoveCommand::Castle(CastleSide::Kingside)),
                "{text}"
            );
        }
        for text in ["O-O-O", "o-o-o", "0-0-0"] {
            assert_eq!(
                MoveCommand::parse(text),
                Ok(MoveCommand::Castle(CastleSide::Queenside)),
                "{text}"
            );
        }
        assert_eq!(
            MoveCommand::Castle(CastleSide::Queenside).to_string(),
            "O-O-O"
        );
    }

    #[test]
    fn test_malformed_commands() {
        for text in [
            "", "e2", "e2e", "e2e4e5", "i2e4", "e9e4", "E2E4", "O-O-O-O", "O", "OO", "O--O",
            "é2e4", "e2é4", "xyzw",
        ] {
            assert!(
                matches!(MoveCommand::parse(text), Err(MoveError::InvalidCommand(_))),
                "{text:?}"
            );
        }
    }
}
