/// One of the four axes along which a line of marks can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top left to bottom right.
    Diagonal,
    /// Top right to bottom left.
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// The `(row, col)` offset of one step forward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A straight, contiguous run of cells.
///
/// `start` is the first cell in the forward order of `direction`, and the
/// line covers `len` cells from there. Lines are only created by
/// [`Board::run_through()`](crate::Board::run_through), which guarantees
/// that every cell is on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub direction: Direction,
    pub start: (usize, usize),
    pub len: usize,
}

impl Line {
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (d_row, d_col) = self.direction.delta();
        let (row, col) = self.start;
        (0..self.len as isize).map(move |step| {
            (
                (row as isize + d_row * step) as usize,
                (col as isize + d_col * step) as usize,
            )
        })
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }
}
