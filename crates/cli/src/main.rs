use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use echecs_core::{Game, GameConfig, SessionEnd};

mod terminal;

use terminal::{Style, Terminal};

/// Two-player chess on one terminal.
#[derive(Debug, Parser)]
#[command(name = "echecs", version, about)]
struct Args {
    /// JSON file with draw rules
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Draw the board without ANSI colors
    #[arg(long)]
    plain: bool,

    /// Only read moves; print nothing but errors and the final position
    #[arg(long)]
    quiet: bool,

    /// Log filter, e.g. `debug` or `echecs_core=trace`
    #[arg(long, value_name = "FILTER", env = "RUST_LOG", default_value = "warn")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).context("invalid --log filter")?)
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    info!(?config, "starting game");

    let stdin = io::stdin();
    let style = Style {
        colored: !args.plain && io::stdout().is_terminal(),
        quiet: args.quiet,
    };
    let mut terminal = Terminal::new(stdin.lock(), io::stdout(), style);

    let mut game = Game::new(config);
    match game.run(&mut terminal) {
        SessionEnd::Finished(termination) => info!(%termination, "session finished"),
        SessionEnd::Decided(outcome) => info!(outcome = outcome.code(), "game already decided"),
        SessionEnd::Quit => info!("session quit"),
    }

    println!("{}", game.canonical_position());
    Ok(())
}
