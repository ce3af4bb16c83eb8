//! Turn coordination: one submitted command in, one report out

use tracing::debug;

use crate::board::Color;
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::notation::MoveCommand;
use crate::rules::attack;

use super::detector;
use super::executor::{AppliedMove, PromotionChooser};
use super::state::{GameState, Outcome, Termination};

/// What a successful ply did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Normalized command text, as stored in the mover's recent moves.
    pub notation: String,
    pub mover: Color,
    pub applied: AppliedMove,
    /// The opponent is now in check.
    pub check: bool,
    pub termination: Option<Termination>,
}

/// A game between two local players.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
    config: GameConfig,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_state(GameState::new(), config)
    }

    pub fn from_state(state: GameState, config: GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Parses and plays `input` for the side to move.
    ///
    /// On error nothing changed and the same side is still to move.
    pub fn submit(
        &mut self,
        input: &str,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<TurnReport, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        let command = MoveCommand::parse(input)?;
        self.play(command, chooser)
    }

    pub fn play(
        &mut self,
        command: MoveCommand,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<TurnReport, MoveError> {
        let mover = self.state.side_to_move();
        let applied = match command {
            MoveCommand::Coordinate { from, to } => self.state.play_move(from, to, chooser)?,
            MoveCommand::Castle(side) => self.state.castle(side)?,
        };

        let defender = mover.flip();
        let check = attack::in_check(self.state.position(), defender);
        let termination = detector::evaluate(&mut self.state, defender, &self.config.draw);
        match termination {
            Some(termination) => self.state.finish(termination),
            None => self.state.pass_turn(),
        }

        let notation = command.to_string();
        self.state.record_move(mover, &notation);
        debug!(%mover, %notation, check, "turn complete");

        Ok(TurnReport {
            notation,
            mover,
            applied,
            check,
            termination,
        })
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<Termination, MoveError> {
        let winner = self.state.side_to_move().flip();
        self.end(Termination::Resignation { winner })
    }

    /// Both players agree to a draw.
    pub fn agree_draw(&mut self) -> Result<Termination, MoveError> {
        self.end(Termination::Agreement)
    }

    fn end(&mut self, termination: Termination) -> Result<Termination, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        self.state.finish(termination);
        Ok(termination)
    }

    /// Board and result in the canonical text format.
    pub fn canonical_position(&self) -> String {
        crate::canonical::canonical_position(self.state.position(), self.state.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::sq;
    use crate::board::{PieceKind, Promotion};
    use crate::config::DrawRules;

    fn play_all(game: &mut Game, moves: &[&str]) -> Vec<TurnReport> {
        moves
            .iter()
            .map(|mv| game.submit(mv, &mut Promotion::Queen).unwrap())
            .collect()
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::default();
        let report = game.submit("e2e4", &mut Promotion::Queen).unwrap();
        assert_eq!(report.mover, Color::White);
        assert_eq!(report.notation, "e2e4");
        assert!(!report.check);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.state().recent_moves(Color::White).get(0), Some("e2e4"));
    }

    #[test]
    fn test_rejection_keeps_turn() {
        let mut game = Game::default();
        assert_eq!(
            game.submit("e7e5", &mut Promotion::Queen),
            Err(MoveError::WrongColorPiece(sq("e7")))
        );
        assert_eq!(
            game.submit("hello", &mut Promotion::Queen),
            Err(MoveError::InvalidCommand("hello".into()))
        );
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.state().recent_moves(Color::White).iter().count(), 0);
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::default();
        let reports = play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let last = reports.last().unwrap();
        assert!(last.check);
        assert_eq!(
            last.termination,
            Some(Termination::Checkmate {
                winner: Color::Black
            })
        );
        assert_eq!(game.outcome(), Outcome::BlackWins);
        // No turn is passed once the game is over.
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(
            game.submit("e2e4", &mut Promotion::Queen),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_check_is_reported() {
        let mut game = Game::default();
        let reports = play_all(&mut game, &["e2e4", "f7f6", "d1h5"]);
        assert!(reports[2].check);
        assert_eq!(reports[2].termination, None);
    }

    #[test]
    fn test_shuffling_knights_draws() {
        let mut game = Game::default();
        let shuffle = [
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6",
        ];
        let reports = play_all(&mut game, &shuffle[..9]);
        assert!(reports.iter().all(|r| r.termination.is_none()));

        let report = game.submit(shuffle[9], &mut Promotion::Queen).unwrap();
        assert_eq!(report.termination, None);
        let report = game.submit("f3g1", &mut Promotion::Queen).unwrap();
        assert_eq!(report.termination, Some(Termination::Repetition));
        assert_eq!(game.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_repetition_can_be_disabled() {
        let config = GameConfig {
            draw: DrawRules {
                repetition: false,
                ..DrawRules::default()
            },
        };
        let mut game = Game::new(config);
        for _ in 0..4 {
            play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        }
        assert!(!game.is_over());
    }

    #[test]
    fn test_resign_and_draw() {
        let mut game = Game::default();
        play_all(&mut game, &["e2e4"]);
        assert_eq!(
            game.resign(),
            Ok(Termination::Resignation {
                winner: Color::White
            })
        );
        assert_eq!(game.outcome(), Outcome::WhiteWins);
        assert_eq!(game.agree_draw(), Err(MoveError::GameOver));

        let mut game = Game::default();
        assert_eq!(game.agree_draw(), Ok(Termination::Agreement));
        assert!(game.canonical_position().ends_with(" 1/2-1/2"));
    }

    #[test]
    fn test_castling_command() {
        let mut game = Game::default();
        play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
        let report = game.submit("0-0", &mut Promotion::Queen).unwrap();
        assert_eq!(report.notation, "O-O");
        let king = game.state().position().occupant(sq("g1")).unwrap();
        assert!(king.is(PieceKind::King, Color::White));
    }

    #[test]
    fn test_long_quiet_stretch_continues_by_default() {
        let state = GameState::new().with_halfmove_clock(99);
        let mut game = Game::from_state(state, GameConfig::default());
        let report = game.submit("e2e4", &mut Promotion::Queen).unwrap();
        assert_eq!(report.termination, None);
        assert_eq!(game.state().halfmove_clock(), 100);
        assert_eq!(game.outcome(), Outcome::Ongoing);
    }
}
