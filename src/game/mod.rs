pub mod tic_tac_toe;

mod error;
mod grid;

pub use error::{GameError, PlacementFailure};
pub use grid::{BoardCell, Grid, GridIndex, Line};
pub use tic_tac_toe::{Mark, TicTacToe};

pub type GameResult<T> = Result<T, GameError>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FinishedState {
    Win(Mark),
    Draw,
}

/// Phase of a game. `Turn` is the only non-terminal variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    Turn(Mark),
    Finished(FinishedState),
}

pub trait Game: Sized {
    type TurnData;
    type Board;

    /// Applies a move of the player whose turn it is and returns the new state.
    /// A rejected move leaves the game untouched.
    fn apply_move(&mut self, data: Self::TurnData) -> GameResult<GameState>;

    fn board(&self) -> &Self::Board;

    fn state(&self) -> GameState;

    fn is_finished(&self) -> bool {
        matches!(self.state(), GameState::Finished(_))
    }
}
