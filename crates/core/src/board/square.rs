//! Board coordinates

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A square of the 8×8 board, `a1` is file 0 / rank 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a square")]
pub struct ParseSquareError(pub String);

impl Square {
    /// Creates a square, `None` when a coordinate is off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Square for coordinates known to be on the board; they are masked to 0..8.
    pub(crate) const fn at(file: u8, rank: u8) -> Self {
        Square {
            file: file & 7,
            rank: rank & 7,
        }
    }

    /// Square from its a1..h8 row-major index.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Square {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Shifts the square, returning `None` when it leaves the board.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Square> {
        let file = self.file as i8 + files;
        let rank = self.rank as i8 + ranks;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// All squares in a1, b1, .., h8 order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square {
                file: file - b'a',
                rank: rank - b'1',
            }),
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

/// Shorthand used by tests and fixtures: `sq("e4")`.
///
/// # Panics
/// On malformed input.
#[cfg(test)]
pub(crate) fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}
