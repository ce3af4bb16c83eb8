//! Terminal frontend over any line reader and writer

use std::fmt;
use std::io::{BufRead, Write};

use tracing::warn;

use echecs_core::{Color, Event, Frontend, Game, Promotion, PromotionChooser, Square};

const LIGHT: &str = "\x1b[48;5;180m";
const DARK: &str = "\x1b[48;5;137m";
const INK: &str = "\x1b[38;5;16m";
const RESET: &str = "\x1b[0m";

const HELP: &str = "\
Moves:
  e2e4        move the piece on e2 to e4
  O-O         castle kingside (o-o and 0-0 work too)
  O-O-O       castle queenside
Commands:
  /help       show this text
  /resign     give up the game
  /draw       end the game as a draw by agreement
  /quit       leave without a result
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// ANSI colors for the board.
    pub colored: bool,
    /// Draw nothing, only read moves.
    pub quiet: bool,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    style: Style,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, style: Style) -> Self {
        Self {
            input,
            output,
            style,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.output.write_fmt(args).and_then(|()| self.output.flush()) {
            warn!(%err, "terminal write failed");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                warn!(%err, "terminal read failed");
                None
            }
        }
    }

    fn draw_board(&self, game: &Game) -> String {
        let position = game.state().position();
        let mut out = String::new();
        for rank in (0..8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8 {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                let glyph = position.occupant(square).map_or(' ', |piece| piece.glyph());
                if self.style.colored {
                    let shade = if (file + rank) % 2 == 0 { DARK } else { LIGHT };
                    out.push_str(&format!("{shade}{INK} {glyph} {RESET}"));
                } else {
                    let glyph = if glyph == ' ' { '.' } else { glyph };
                    out.push_str(&format!(" {glyph} "));
                }
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        out
    }
}

impl<R: BufRead, W: Write> PromotionChooser for Terminal<R, W> {
    fn choose_promotion(&mut self, color: Color, square: Square) -> Promotion {
        loop {
            self.emit(format_args!(
                "Promote the {color} pawn on {square} to (Q/R/B/N): "
            ));
            let Some(answer) = self.read_line() else {
                return Promotion::Queen;
            };
            let mut chars = answer.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if let Some(choice) = Promotion::from_char(c.to_ascii_uppercase()) {
                    return choice;
                }
            }
            self.emit(format_args!("Please answer Q, R, B or N.\n"));
        }
    }
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
    fn render(&mut self, game: &Game) {
        if self.style.quiet {
            return;
        }
        let board = self.draw_board(game);
        self.emit(format_args!("\n{board}"));
    }

    fn read_command(&mut self, side: Color) -> Option<String> {
        if !self.style.quiet {
            self.emit(format_args!("{side}> "));
        }
        self.read_line()
    }

    fn show_help(&mut self) {
        self.emit(format_args!("{HELP}"));
    }

    fn report(&mut self, event: Event<'_>) {
        match event {
            Event::Played(report) => {
                if report.check && report.termination.is_none() && !self.style.quiet {
                    self.emit(format_args!("Check!\n"));
                }
            }
            Event::Rejected(reason) => self.emit(format_args!("Illegal: {reason}\n")),
            Event::Over(termination) => {
                if !self.style.quiet {
                    self.emit(format_args!("Game over: {termination}\n"));
                }
            }
        }
    }
}
