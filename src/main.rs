use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tui_tic_tac_toe::app;
use tui_tic_tac_toe::config::Cli;
use tui_tic_tac_toe::game::TicTacToe;
use tui_tic_tac_toe::input::{ConsoleInput, MoveSource, ScriptedMoves};
use tui_tic_tac_toe::render::Renderer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // stdout belongs to the game screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut source: Box<dyn MoveSource> = match cli.moves.clone() {
        Some(slots) => Box::new(ScriptedMoves::new(slots)),
        None => Box::new(ConsoleInput::new(io::stdin().lock(), io::stdout())),
    };
    let mut renderer = Renderer::new(io::stdout(), cli.color());
    let mut game = TicTacToe::new();

    app::run(&mut game, source.as_mut(), &mut renderer)?;
    Ok(())
}
