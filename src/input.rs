//! Sources of moves for the game loop.
//!
//! A [`MoveSource`] only guarantees that the returned index lies on the grid. Whether the cell is
//! free is decided by the game itself, the loop asks the source again when a move is rejected.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::game::{GridIndex, Mark};

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("no more moves to read")]
    Exhausted,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg_attr(test, mockall::automock)]
pub trait MoveSource {
    /// Returns the next move of `mark` on a grid with `size` rows.
    fn next_move(&mut self, mark: Mark, size: usize) -> InputResult<GridIndex>;
}

/// Reads 1-based slot numbers from a text stream, prompting on `output` until a valid one is
/// entered.
pub struct ConsoleInput<R, W> {
    input: R,
    output: W,
    tokens: VecDeque<String>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            tokens: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> InputResult<String> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(token);
            }
            // bytes that aren't UTF-8 end up in a token that fails to parse as a slot
            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Err(InputError::Exhausted);
            }
            let line = String::from_utf8_lossy(&line);
            self.tokens.extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsoleInput<R, W> {
    fn next_move(&mut self, mark: Mark, size: usize) -> InputResult<GridIndex> {
        let cells = size * size;
        let mut retry = false;
        loop {
            if retry {
                writeln!(self.output, "{}'s turn", mark)?;
            }
            retry = true;
            write!(self.output, "Enter slot to place: ")?;
            self.output.flush()?;

            let token = self.next_token()?;
            let Ok(slot) = token.parse::<i64>() else {
                // the token is already consumed, so the next attempt reads fresh input
                debug!(%mark, %token, "discarded non-numeric input");
                writeln!(self.output, "Slot must be a number")?;
                continue;
            };
            let index = usize::try_from(slot)
                .ok()
                .and_then(|slot| GridIndex::from_slot(slot, size));
            match index {
                Some(index) => return Ok(index),
                None if slot <= 0 => writeln!(self.output, "Slot must be greater than 0")?,
                None => writeln!(self.output, "Slot must be smaller than {}", cells + 1)?,
            }
        }
    }
}

/// Plays a predefined list of slot numbers. Slots that don't exist on the grid are skipped.
#[derive(Debug, Default)]
pub struct ScriptedMoves {
    slots: VecDeque<usize>,
}

impl ScriptedMoves {
    pub fn new(slots: impl IntoIterator<Item = usize>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.slots.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, mark: Mark, size: usize) -> InputResult<GridIndex> {
        while let Some(slot) = self.slots.pop_front() {
            match GridIndex::from_slot(slot, size) {
                Some(index) => return Ok(index),
                None => warn!(%mark, slot, "skipping scripted slot outside of the grid"),
            }
        }
        Err(InputError::Exhausted)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &ConsoleInput<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output.clone()).unwrap()
    }

    #[test]
    fn test_reads_slot() {
        let mut console = console("5\n");
        assert_eq!(console.next_move(Mark::X, 3).unwrap(), GridIndex::new(1, 1));
        assert_eq!(output(&console), "Enter slot to place: ");
    }

    #[test]
    fn test_reads_several_slots_from_one_line() {
        let mut console = console("1 9\n");
        assert_eq!(console.next_move(Mark::X, 3).unwrap(), GridIndex::new(0, 0));
        assert_eq!(console.next_move(Mark::O, 3).unwrap(), GridIndex::new(2, 2));
        assert_eq!(output(&console), "Enter slot to place: Enter slot to place: ");
    }

    #[test]
    fn test_discards_non_numeric_token() {
        let mut console = console("abc\n3\n");
        assert_eq!(console.next_move(Mark::X, 3).unwrap(), GridIndex::new(0, 2));
        assert_eq!(
            output(&console),
            "Enter slot to place: Slot must be a number\nX's turn\nEnter slot to place: "
        );
    }

    #[test]
    fn test_discards_invalid_utf8() {
        let mut console = ConsoleInput::new(Cursor::new(b"\xff\n5\n".to_vec()), Vec::new());
        assert_eq!(console.next_move(Mark::X, 3).unwrap(), GridIndex::new(1, 1));
        assert_eq!(
            output(&console),
            "Enter slot to place: Slot must be a number\nX's turn\nEnter slot to place: "
        );
    }

    #[test]
    fn test_rejects_slots_out_of_range() {
        let mut console = console("0\n-4\n10\n7\n");
        assert_eq!(console.next_move(Mark::O, 3).unwrap(), GridIndex::new(2, 0));
        assert_eq!(
            output(&console),
            "Enter slot to place: Slot must be greater than 0\n\
             O's turn\n\
             Enter slot to place: Slot must be greater than 0\n\
             O's turn\n\
             Enter slot to place: Slot must be smaller than 10\n\
             O's turn\n\
             Enter slot to place: "
        );
    }

    #[test]
    fn test_end_of_input() {
        let mut console = console("x\n");
        assert!(matches!(
            console.next_move(Mark::X, 3),
            Err(InputError::Exhausted)
        ));
    }

    #[test]
    fn test_scripted_moves() {
        let mut moves = ScriptedMoves::new([2, 0, 12, 9]);
        assert_eq!(moves.next_move(Mark::X, 3).unwrap(), GridIndex::new(0, 1));
        assert_eq!(moves.next_move(Mark::O, 3).unwrap(), GridIndex::new(2, 2));
        assert_eq!(moves.remaining(), 0);
        assert!(matches!(
            moves.next_move(Mark::X, 3),
            Err(InputError::Exhausted)
        ));
    }
}
