use std::io::Write;

use generic_array::ArrayLength;
use tracing::{debug, info};

use crate::game::{Game, GameError, GameState, TicTacToe};
use crate::input::{InputError, MoveSource};
use crate::render::Renderer;

pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to read a move: {0}")]
    Input(#[from] InputError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to draw the game: {0}")]
    Io(#[from] std::io::Error),
}

/// Plays `game` until it is finished, asking `source` for moves and drawing the field after
/// every accepted one. Returns the final state.
pub fn run<N, S, W>(
    game: &mut TicTacToe<N>,
    source: &mut S,
    renderer: &mut Renderer<W>,
) -> AppResult<GameState>
where
    N: ArrayLength,
    S: MoveSource + ?Sized,
    W: Write,
{
    renderer.render(game)?;

    while let Some(mark) = game.current_mark() {
        let index = source.next_move(mark, game.board().size())?;
        match game.apply_move(index) {
            Ok(_) => renderer.render(game)?,
            Err(err) if err.is_recoverable() => {
                debug!(%mark, %index, %err, "move rejected");
                renderer.rejection(&err, game.state())?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let state = game.state();
    info!(?state, "game over");
    Ok(state)
}
