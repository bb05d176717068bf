use generic_array::{ArrayLength, GenericArray};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, Index, IndexMut};

use crate::game::error::{GameError, PlacementFailure};
use crate::game::GameResult;

/// Index struct to access elements in the [`Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridIndex {
    row: usize,
    col: usize,
}

impl From<(usize, usize)> for GridIndex {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl TryFrom<(isize, isize)> for GridIndex {
    type Error = GameError;

    fn try_from(value: (isize, isize)) -> Result<Self, Self::Error> {
        match (usize::try_from(value.0), usize::try_from(value.1)) {
            (Ok(row), Ok(col)) => Ok(Self::new(row, col)),
            _ => Err(GameError::out_of_range(value.0, value.1)),
        }
    }
}

impl Display for GridIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl GridIndex {
    /// Constructs a new [`GridIndex`].
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a 1-based slot number into an index, counting cells row by row.
    /// Returns `None` if the slot doesn't exist on a grid of `size` x `size` cells.
    pub fn from_slot(slot: usize, size: usize) -> Option<Self> {
        let cells = size.checked_mul(size)?;
        if slot == 0 || slot > cells {
            return None;
        }
        Some(Self::new((slot - 1) / size, (slot - 1) % size))
    }

    /// Returns the 1-based slot number of this index on a grid of `size` x `size` cells.
    pub fn slot(&self, size: usize) -> usize {
        self.row * size + self.col + 1
    }

    /// Returns value of `self.col`
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns value of `self.row`
    pub fn row(&self) -> usize {
        self.row
    }
}

/// One of the `2N + 2` lines that win the game when filled with a single mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Cells `(k, k)`.
    MainDiagonal,
    /// Cells `(k, N - 1 - k)`.
    AntiDiagonal,
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row),
            Line::Column(col) => write!(f, "column {}", col),
            Line::MainDiagonal => f.write_str("main diagonal"),
            Line::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

impl Line {
    /// Returns every candidate line of a grid with `size` rows: rows first, then columns, then
    /// both diagonals.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::MainDiagonal, Line::AntiDiagonal])
    }

    /// Returns `true` if the line lies within a grid with `size` rows.
    pub fn fits(&self, size: usize) -> bool {
        match *self {
            Line::Row(i) | Line::Column(i) => i < size,
            Line::MainDiagonal | Line::AntiDiagonal => size > 0,
        }
    }

    // must only be called for lines that fit
    fn start(&self, size: usize) -> GridIndex {
        match *self {
            Line::Row(row) => GridIndex::new(row, 0),
            Line::Column(col) => GridIndex::new(0, col),
            Line::MainDiagonal => GridIndex::new(0, 0),
            Line::AntiDiagonal => GridIndex::new(0, size - 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardCell<T>(pub Option<T>);

impl<T> Default for BoardCell<T> {
    fn default() -> Self {
        Self(Option::default())
    }
}

impl<T> From<T> for BoardCell<T> {
    fn from(value: T) -> Self {
        Self(Option::from(value))
    }
}

impl<T> Deref for BoardCell<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Square two-dimensional fixed-length array that stores values and allows to mutate them.
/// Both dimensions are defined by generic parameter `N`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T, N: ArrayLength> {
    contents: GenericArray<GenericArray<T, N>, N>,
}

impl<T: Default, N: ArrayLength> Default for Grid<T, N> {
    fn default() -> Self {
        Self {
            contents: Default::default(),
        }
    }
}

impl<T, N: ArrayLength> Deref for Grid<T, N> {
    type Target = [GenericArray<T, N>];

    fn deref(&self) -> &Self::Target {
        self.contents.as_slice()
    }
}

impl<T, N: ArrayLength> Index<GridIndex> for Grid<T, N> {
    type Output = T;

    fn index(&self, index: GridIndex) -> &Self::Output {
        &self.contents[index.row()][index.col()]
    }
}

impl<T, N: ArrayLength> IndexMut<GridIndex> for Grid<T, N> {
    fn index_mut(&mut self, index: GridIndex) -> &mut Self::Output {
        &mut self.contents[index.row()][index.col()]
    }
}

impl<T, N: ArrayLength> Grid<T, N> {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        N::to_usize()
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        index.row < N::to_usize() && index.col < N::to_usize()
    }

    pub fn get_ref(&self, index: GridIndex) -> GameResult<&T> {
        if !self.contains(index) {
            return Err(GameError::out_of_range(index.row, index.col));
        }
        Ok(&self[index])
    }

    /// Returns an iterator over the cells of `line`.
    /// A line that doesn't fit into the grid has no cells.
    pub fn line(&self, line: Line) -> Box<dyn Iterator<Item = &T> + '_> {
        let size = self.size();
        if !line.fits(size) {
            return Box::new(std::iter::empty());
        }
        let start = line.start(size);
        match line {
            Line::Row(_) => Box::new(self.right_iter(start)),
            Line::Column(_) => Box::new(self.bottom_iter(start)),
            Line::MainDiagonal => Box::new(self.bottom_right_iter(start)),
            Line::AntiDiagonal => Box::new(self.bottom_left_iter(start)),
        }
    }

    /// Returns an iterator with rightwards direction that starts with a `pos`.
    pub fn right_iter(&self, pos: GridIndex) -> RightGridIterator<T, N> {
        RightGridIterator {
            current: pos,
            grid: self,
        }
    }

    /// Returns an iterator with downwards direction that starts with a `pos`.
    pub fn bottom_iter(&self, pos: GridIndex) -> BottomGridIterator<T, N> {
        BottomGridIterator {
            current: pos,
            grid: self,
        }
    }

    /// Returns a diagonal iterator with bottom-right direction that starts with a `pos`.
    pub fn bottom_right_iter(&self, pos: GridIndex) -> BottomRightGridIterator<T, N> {
        BottomRightGridIterator {
            current: pos,
            grid: self,
        }
    }

    /// Returns a diagonal iterator with bottom-left direction that starts with a `pos`.
    pub fn bottom_left_iter(&self, pos: GridIndex) -> BottomLeftGridIterator<T, N> {
        BottomLeftGridIterator {
            current: Some(pos),
            grid: self,
        }
    }
}

impl<M: Copy + PartialEq, N: ArrayLength> Grid<BoardCell<M>, N> {
    /// Puts `mark` into an empty cell.
    pub fn place(&mut self, index: GridIndex, mark: M) -> GameResult<()> {
        if !self.contains(index) {
            return Err(GameError::invalid_placement(
                index,
                PlacementFailure::OutOfRange,
            ));
        }
        let cell = &mut self[index];
        if cell.is_some() {
            return Err(GameError::invalid_placement(
                index,
                PlacementFailure::Occupied,
            ));
        }
        *cell = mark.into();
        Ok(())
    }

    pub fn get(&self, index: GridIndex) -> GameResult<BoardCell<M>> {
        self.get_ref(index).copied()
    }

    pub fn is_full(&self) -> bool {
        self.iter().flatten().all(|cell| cell.is_some())
    }

    /// Returns `true` if every cell of `line` holds `mark`.
    pub fn line_of(&self, mark: M, line: Line) -> bool {
        line.fits(self.size()) && self.line(line).all(|cell| cell.0 == Some(mark))
    }

    /// Returns the first line completely filled with `mark`, testing every line on its own.
    pub fn winning_line(&self, mark: M) -> Option<Line> {
        Line::all(self.size()).find(|line| self.line_of(mark, *line))
    }
}

/// An iterator with rightwards direction.
/// On each step it's incrementing `col` by 1 in the underlying [`GridIndex`].
/// Stops when underlying [`GridIndex`] goes out of [`Grid`] scope.
pub struct RightGridIterator<'a, T, N: ArrayLength> {
    current: GridIndex, // no need for an Option as we're only incrementing
    grid: &'a Grid<T, N>,
}

impl<'a, T, N: ArrayLength> Iterator for RightGridIterator<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.grid.contains(self.current) {
            let old_current = self.current;
            self.current = GridIndex::new(self.current.row, self.current.col + 1);
            return Some(&self.grid[old_current]);
        }
        None
    }
}

/// An iterator with downwards direction.
/// On each step it's incrementing `row` by 1 in the underlying [`GridIndex`].
/// Stops when underlying [`GridIndex`] goes out of [`Grid`] scope.
pub struct BottomGridIterator<'a, T, N: ArrayLength> {
    current: GridIndex, // no need for an Option as we're only incrementing
    grid: &'a Grid<T, N>,
}

impl<'a, T, N: ArrayLength> Iterator for BottomGridIterator<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.grid.contains(self.current) {
            let old_current = self.current;
            self.current = GridIndex::new(self.current.row + 1, self.current.col);
            return Some(&self.grid[old_current]);
        }
        None
    }
}

/// A diagonal iterator with bottom-right direction.
/// On each step it's incrementing `col` and `row` by 1 in the underlying [`GridIndex`].
/// Stops when underlying [`GridIndex`] goes out of [`Grid`] scope.
pub struct BottomRightGridIterator<'a, T, N: ArrayLength> {
    current: GridIndex, // no need for an Option as we're only incrementing
    grid: &'a Grid<T, N>,
}

impl<'a, T, N: ArrayLength> Iterator for BottomRightGridIterator<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.grid.contains(self.current) {
            let old_current = self.current;
            self.current = GridIndex::new(self.current.row + 1, self.current.col + 1);
            return Some(&self.grid[old_current]);
        }
        None
    }
}

/// A diagonal iterator with bottom-left direction.
/// On each step it's incrementing `row` and decrementing `col` by 1 in the underlying index.
/// Stops when underlying [`GridIndex`] goes out of [`Grid`] scope.
pub struct BottomLeftGridIterator<'a, T, N: ArrayLength> {
    current: Option<GridIndex>,
    grid: &'a Grid<T, N>,
}

impl<'a, T, N: ArrayLength> Iterator for BottomLeftGridIterator<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.current {
            if self.grid.contains(current) {
                let old_current = current;
                if current.col == 0 {
                    self.current = None;
                } else {
                    self.current = Some(GridIndex::new(current.row + 1, current.col - 1));
                }
                return Some(&self.grid[old_current]);
            }
        }
        None
    }
}
