use crate::game::grid::GridIndex;

/// Reason a mark could not be placed on the grid.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
pub enum PlacementFailure {
    #[error("cell is out of range")]
    OutOfRange,
    #[error("cell is occupied")]
    Occupied,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("cell ({row}, {col}) is out of range")]
    OutOfRange { row: isize, col: isize },
    #[error("can't place a mark on cell ({row}, {col}): {reason}")]
    InvalidPlacement {
        row: usize,
        col: usize,
        reason: PlacementFailure,
    },
    #[error("can't make a move on a finished game")]
    GameAlreadyOver,
}

impl GameError {
    /// Coordinates that don't fit into `isize` are reported as `isize::MAX`.
    pub fn out_of_range<R, C>(row: R, col: C) -> Self
    where
        R: TryInto<isize>,
        C: TryInto<isize>,
    {
        Self::OutOfRange {
            row: row.try_into().unwrap_or(isize::MAX),
            col: col.try_into().unwrap_or(isize::MAX),
        }
    }

    pub fn invalid_placement(index: GridIndex, reason: PlacementFailure) -> Self {
        Self::InvalidPlacement {
            row: index.row(),
            col: index.col(),
            reason,
        }
    }

    /// Returns `true` for errors the player can recover from by choosing another move.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::GameAlreadyOver)
    }
}
