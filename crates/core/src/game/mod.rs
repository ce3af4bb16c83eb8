//! Game flow: state, validation, game-over detection and turn coordination

pub mod detector;
mod executor;
mod session;
mod state;
mod turn;

pub use executor::{AppliedMove, CheckedMove, PromotionChooser};
pub use session::{Command, Event, Frontend, SessionEnd};
pub use state::{GameState, Outcome, RecentMoves, Termination, RECENT_MOVES};
pub use turn::{Game, TurnReport};
