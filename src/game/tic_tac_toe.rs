use std::fmt::{Display, Formatter};

use generic_array::typenum::U3;
use generic_array::ArrayLength;
use tracing::{debug, info, instrument};

use crate::game::{
    BoardCell, FinishedState, Game, GameError, GameResult, GameState, Grid, GridIndex, Line,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Mark of the player who moves after `self`.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

type Cell = BoardCell<Mark>;

/// Game of `N` in a row on an `N` x `N` field. `X` always moves first.
#[derive(Clone, Debug)]
pub struct TicTacToe<N: ArrayLength = U3> {
    state: GameState,
    field: Grid<Cell, N>,
}

impl TicTacToe<U3> {
    /// Classic 3 x 3 game.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: ArrayLength> Default for TicTacToe<N> {
    fn default() -> Self {
        Self {
            state: GameState::Turn(Mark::X),
            field: Grid::default(),
        }
    }
}

impl<N: ArrayLength> Game for TicTacToe<N> {
    type TurnData = GridIndex;
    type Board = Grid<Cell, N>;

    #[instrument(level = "debug", skip(self))]
    fn apply_move(&mut self, data: Self::TurnData) -> GameResult<GameState> {
        let GameState::Turn(mark) = self.state else {
            return Err(GameError::GameAlreadyOver);
        };
        self.field.place(data, mark)?;
        debug!(%mark, slot = data.slot(self.field.size()), "mark placed");

        Ok(self.update_state(mark))
    }

    fn board(&self) -> &Self::Board {
        &self.field
    }

    fn state(&self) -> GameState {
        self.state
    }
}

impl<N: ArrayLength> TicTacToe<N> {
    /// Mark of the player to move, `None` once the game is finished.
    pub fn current_mark(&self) -> Option<Mark> {
        match self.state {
            GameState::Turn(mark) => Some(mark),
            GameState::Finished(_) => None,
        }
    }

    /// The line that decided the game, if it was won.
    pub fn winner_line(&self) -> Option<Line> {
        match self.state {
            GameState::Finished(FinishedState::Win(mark)) => self.field.winning_line(mark),
            _ => None,
        }
    }

    // win is checked before draw: a move filling the last cell may also complete a line
    fn update_state(&mut self, mark: Mark) -> GameState {
        if let Some(line) = self.field.winning_line(mark) {
            info!(%mark, %line, "game won");
            return self.set_winner(mark);
        }

        if self.field.is_full() {
            info!("game ended in a draw");
            return self.set_draw();
        }

        self.switch_turn(mark)
    }

    fn switch_turn(&mut self, mark: Mark) -> GameState {
        self.state = GameState::Turn(mark.opponent());
        self.state
    }

    fn set_draw(&mut self) -> GameState {
        self.state = GameState::Finished(FinishedState::Draw);
        self.state
    }

    fn set_winner(&mut self, mark: Mark) -> GameState {
        self.state = GameState::Finished(FinishedState::Win(mark));
        self.state
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::PlacementFailure;
    use generic_array::typenum::U4;

    fn play<N: ArrayLength>(game: &mut TicTacToe<N>, moves: &[(usize, usize)]) -> GameState {
        for &m in moves {
            game.apply_move(m.into()).unwrap();
        }
        game.state()
    }

    fn play_slots(game: &mut TicTacToe, slots: &[usize]) -> GameState {
        for &slot in slots {
            game.apply_move(GridIndex::from_slot(slot, 3).unwrap()).unwrap();
        }
        game.state()
    }

    #[test]
    fn test_new_game() {
        let game = TicTacToe::new();
        assert_eq!(game.state(), GameState::Turn(Mark::X));
        assert!(game.board().iter().flatten().all(|cell| cell.is_none()));
        assert!(!game.is_finished());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = TicTacToe::new();
        let expected = [Mark::O, Mark::X, Mark::O, Mark::X];
        for (slot, mark) in [1, 2, 3, 5].into_iter().zip(expected) {
            let state = game.apply_move(GridIndex::from_slot(slot, 3).unwrap()).unwrap();
            assert_eq!(state, GameState::Turn(mark));
            assert_eq!(game.current_mark(), Some(mark));
        }
    }

    #[test]
    fn test_top_row_win() {
        let mut game = TicTacToe::new();
        let state = play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(state, GameState::Finished(FinishedState::Win(Mark::X)));
        assert_eq!(game.winner_line(), Some(Line::Row(0)));
        assert_eq!(game.current_mark(), None);
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut game = TicTacToe::new();
        let state = play(&mut game, &[(0, 2), (0, 0), (1, 1), (0, 1), (2, 0)]);
        assert_eq!(state, GameState::Finished(FinishedState::Win(Mark::X)));
        assert_eq!(game.winner_line(), Some(Line::AntiDiagonal));
    }

    #[test]
    fn test_second_player_wins_column() {
        let mut game = TicTacToe::new();
        let state = play_slots(&mut game, &[1, 2, 4, 5, 9, 8]);
        assert_eq!(state, GameState::Finished(FinishedState::Win(Mark::O)));
        assert_eq!(game.winner_line(), Some(Line::Column(1)));
    }

    #[test]
    fn test_draw() {
        // X O X
        // X O O
        // O X X
        let mut game = TicTacToe::new();
        let state = play_slots(&mut game, &[1, 2, 3, 5, 4, 6, 8, 7, 9]);
        assert_eq!(state, GameState::Finished(FinishedState::Draw));
        assert!(game.board().is_full());
        assert_eq!(game.winner_line(), None);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        // X O O
        // O X X
        // X O X
        let mut game = TicTacToe::new();
        let state = play_slots(&mut game, &[1, 2, 5, 3, 6, 4, 7, 8, 9]);
        assert!(game.board().is_full());
        assert_eq!(state, GameState::Finished(FinishedState::Win(Mark::X)));
        assert_eq!(game.winner_line(), Some(Line::MainDiagonal));
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut game = TicTacToe::new();
        game.apply_move((1, 1).into()).unwrap();
        let board = game.board().clone();

        assert_eq!(
            game.apply_move((1, 1).into()),
            Err(GameError::InvalidPlacement {
                row: 1,
                col: 1,
                reason: PlacementFailure::Occupied,
            })
        );
        assert_eq!(game.state(), GameState::Turn(Mark::O));
        assert_eq!(game.board(), &board);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut game = TicTacToe::new();
        assert_eq!(
            game.apply_move((3, 0).into()),
            Err(GameError::InvalidPlacement {
                row: 3,
                col: 0,
                reason: PlacementFailure::OutOfRange,
            })
        );
        assert_eq!(
            GridIndex::try_from((-1_isize, 0_isize)),
            Err(GameError::OutOfRange { row: -1, col: 0 })
        );
        assert_eq!(game.state(), GameState::Turn(Mark::X));
        assert!(!game.board().iter().flatten().any(|cell| cell.is_some()));
    }

    #[test]
    fn test_no_moves_after_finish() {
        let mut game = TicTacToe::new();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let board = game.board().clone();

        let err = game.apply_move((2, 2).into()).unwrap_err();
        assert_eq!(err, GameError::GameAlreadyOver);
        assert!(!err.is_recoverable());
        assert_eq!(game.board(), &board);
        assert_eq!(
            game.state(),
            GameState::Finished(FinishedState::Win(Mark::X))
        );
    }

    #[test]
    fn test_finished_state_is_final() {
        let mut game = TicTacToe::new();
        play_slots(&mut game, &[1, 2, 3, 5, 4, 6, 8, 7, 9]);
        let finished = game.clone();

        for slot in 1..=9 {
            let index = GridIndex::from_slot(slot, 3).unwrap();
            assert_eq!(game.apply_move(index), Err(GameError::GameAlreadyOver));
        }
        assert_eq!(game.apply_move((5, 5).into()), Err(GameError::GameAlreadyOver));
        assert_eq!(game.state(), finished.state());
        assert_eq!(game.board(), finished.board());
        assert!(game.is_finished());
        assert_eq!(game.current_mark(), None);
    }

    #[test]
    fn test_larger_field() {
        let mut game = TicTacToe::<U4>::default();
        let state = play(&mut game, &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(state, GameState::Turn(Mark::X));
        let state = game.apply_move((3, 0).into()).unwrap();
        assert_eq!(state, GameState::Finished(FinishedState::Win(Mark::X)));
        assert_eq!(game.winner_line(), Some(Line::Column(0)));
    }
}
