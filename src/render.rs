use std::io::{self, Write};

use crossterm::style::Stylize;
use generic_array::ArrayLength;

use crate::game::{
    BoardCell, FinishedState, Game, GameError, GameState, Grid, GridIndex, Mark, PlacementFailure,
    TicTacToe,
};

/// Draws the field and the game status as plain text, optionally with colored marks.
pub struct Renderer<W> {
    output: W,
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(output: W, color: bool) -> Self {
        Self { output, color }
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    pub fn render<N: ArrayLength>(&mut self, game: &TicTacToe<N>) -> io::Result<()> {
        self.render_board(game.board())?;
        self.render_state(game.state())?;
        self.output.flush()
    }

    /// Explains to the player why the move was not accepted and repeats whose turn it is.
    pub fn rejection(&mut self, err: &GameError, state: GameState) -> io::Result<()> {
        match err {
            GameError::InvalidPlacement {
                reason: PlacementFailure::Occupied,
                ..
            } => writeln!(self.output, "Slot must be empty")?,
            _ => writeln!(self.output, "{}", err)?,
        }
        self.render_state(state)?;
        self.output.flush()
    }

    fn render_board<N>(&mut self, board: &Grid<BoardCell<Mark>, N>) -> io::Result<()>
    where
        N: ArrayLength,
    {
        let size = board.size();
        writeln!(self.output)?;

        for (row, cells) in board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell.0 {
                    Some(mark) => self.render_mark(mark)?,
                    None => write!(self.output, " {} ", GridIndex::new(row, col).slot(size))?,
                }
                if col + 1 < size {
                    self.output.write_all(b"|")?;
                }
            }
            writeln!(self.output)?;

            if row + 1 < size {
                writeln!(self.output, "{}", "-".repeat(size * 4 - 1))?;
            }
        }

        writeln!(self.output)
    }

    fn render_mark(&mut self, mark: Mark) -> io::Result<()> {
        let text = match mark {
            Mark::X => " x ",
            Mark::O => " o ",
        };
        if !self.color {
            return self.output.write_all(text.as_bytes());
        }
        match mark {
            Mark::X => write!(self.output, "{}", text.red()),
            Mark::O => write!(self.output, "{}", text.green()),
        }
    }

    fn render_state(&mut self, state: GameState) -> io::Result<()> {
        match state {
            GameState::Turn(mark) => writeln!(self.output, "{}'s turn", mark),
            GameState::Finished(FinishedState::Win(mark)) => {
                writeln!(self.output, "{} wins!\n", mark)
            }
            GameState::Finished(FinishedState::Draw) => writeln!(self.output, "Nobody wins!\n"),
        }
    }
}
