//! Error types for echecs-core

use thiserror::Error;

use crate::board::Square;

/// Why a move request was refused.
///
/// Every variant is a recoverable rejection: the position is left untouched
/// and the same side is asked to move again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("there is no piece on {0}")]
    NoPieceAtStart(Square),

    #[error("the piece on {0} belongs to the opponent")]
    WrongColorPiece(Square),

    #[error("the piece has to move")]
    NullMove,

    #[error("{from}{to} is not a valid move for that piece")]
    IllegalPattern { from: Square, to: Square },

    #[error("that move leaves your king in check")]
    SelfCheck,

    // Castling
    #[error("the king or the rook is not in its starting position")]
    PiecesNotInStartPosition,

    #[error("the king or the rook has already moved")]
    PieceAlreadyMoved,

    #[error("the squares between the king and the rook are not empty")]
    PathNotEmpty,

    #[error("cannot castle out of check")]
    KingCurrentlyInCheck,

    #[error("the king would pass through or land on attacked square {0}")]
    KingPassesThroughAttackedSquare(Square),

    #[error("invalid command '{0}'")]
    InvalidCommand(String),

    #[error("the game is over")]
    GameOver,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rejected move: {0}")]
    Move(#[from] MoveError),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
