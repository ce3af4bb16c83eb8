//! Interactive session loop
//!
//! The loop owns no I/O: a [`Frontend`] draws the board, supplies command lines,
//! answers promotion prompts and is told about everything that happens.

use tracing::{debug, info};

use crate::board::Color;
use crate::error::MoveError;
use crate::notation::MoveCommand;

use super::executor::PromotionChooser;
use super::state::{Outcome, Termination};
use super::turn::{Game, TurnReport};

/// Something the frontend should tell the players about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    Played(&'a TurnReport),
    Rejected(&'a MoveError),
    Over(Termination),
}

pub trait Frontend: PromotionChooser {
    fn render(&mut self, game: &Game);

    /// Next command line for `side`, `None` at end of input.
    fn read_command(&mut self, side: Color) -> Option<String>;

    fn show_help(&mut self);

    fn report(&mut self, event: Event<'_>);
}

/// How a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(Termination),
    /// The game was loaded with a result but no recorded reason.
    Decided(Outcome),
    /// `/quit` or end of input with the game still running.
    Quit,
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveCommand),
    Help,
    Quit,
    Resign,
    Draw,
}

impl Command {
    /// Session commands start with `/` or `\`; anything else is a move.
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let trimmed = text.trim();
        let Some(name) = trimmed
            .strip_prefix('/')
            .or_else(|| trimmed.strip_prefix('\\'))
        else {
            return MoveCommand::parse(trimmed).map(Command::Move);
        };
        match name {
            "help" => Ok(Command::Help),
            "quit" => Ok(Command::Quit),
            "resign" => Ok(Command::Resign),
            "draw" => Ok(Command::Draw),
            _ => Err(MoveError::InvalidCommand(trimmed.to_string())),
        }
    }
}

impl Game {
    /// Plays until the game ends, the players quit or input runs out.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> SessionEnd {
        info!("session started");
        loop {
            frontend.render(self);
            if let Some(termination) = self.state().termination() {
                return SessionEnd::Finished(termination);
            }
            if self.is_over() {
                info!(outcome = self.outcome().code(), "game already decided");
                return SessionEnd::Decided(self.outcome());
            }

            let side = self.side_to_move();
            let Some(line) = frontend.read_command(side) else {
                debug!("end of input");
                return SessionEnd::Quit;
            };
            if line.trim().is_empty() {
                continue;
            }

            let ended = match Command::parse(&line) {
                Ok(Command::Move(command)) => match self.play(command, frontend) {
                    Ok(report) => {
                        frontend.report(Event::Played(&report));
                        report.termination
                    }
                    Err(reason) => {
                        frontend.report(Event::Rejected(&reason));
                        None
                    }
                },
                Ok(Command::Help) => {
                    frontend.show_help();
                    None
                }
                Ok(Command::Quit) => {
                    info!(%side, "session quit");
                    return SessionEnd::Quit;
                }
                Ok(Command::Resign) => self.resign().ok(),
                Ok(Command::Draw) => self.agree_draw().ok(),
                Err(reason) => {
                    frontend.report(Event::Rejected(&reason));
                    None
                }
            };

            if let Some(termination) = ended {
                frontend.report(Event::Over(termination));
            }
        }
    }
}
