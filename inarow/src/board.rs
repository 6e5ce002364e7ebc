mod line;

pub use line::*;

use serde::{Deserialize, Serialize};

/// One of the two players. [`Player::PlayerA`] always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    PlayerA,
    PlayerB,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::PlayerA => Player::PlayerB,
            Player::PlayerB => Player::PlayerA,
        }
    }

    /// The name shown to humans, after the color of the player's marks.
    pub fn name(self) -> &'static str {
        match self {
            Player::PlayerA => "Red",
            Player::PlayerB => "Blue",
        }
    }

    /// The mark this player leaves on the board.
    pub fn symbol(self) -> char {
        match self {
            Player::PlayerA => 'X',
            Player::PlayerB => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Who occupies a cell, if anyone.
pub type Owner = Option<Player>;

/// A fixed-size grid of cells, addressed by `(row, col)`.
///
/// The dimensions never change after construction. Cells only ever go from
/// empty to owned; the only way back is a fresh board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // Row-major, i.e. indexed by [row * width + col].
    cells: Vec<Owner>,
    width: usize,
    height: usize,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            cells: vec![None; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Returns the owner of a cell, or `None` if the coordinates are outside the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Owner> {
        self.idx(row, col).map(|idx| self.cells[idx])
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|owner| owner.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Owner]> + '_ {
        self.cells.chunks(self.width)
    }

    /// The run of `player`'s cells that passes through `(row, col)` along `direction`.
    ///
    /// The cell itself is always counted, whoever owns it. From there the
    /// run is followed for at most `reach` steps forward and `reach` steps
    /// backward, stopping early at the edge of the board or at a cell that
    /// `player` doesn't own.
    pub fn run_through(
        &self,
        row: usize,
        col: usize,
        player: Player,
        direction: Direction,
        reach: usize,
    ) -> Line {
        let forward = self.count_owned(row, col, player, direction, 1, reach);
        let backward = self.count_owned(row, col, player, direction, -1, reach);
        let (d_row, d_col) = direction.delta();
        let back = backward as isize;
        // Both offsets were just visited, so they are on the board.
        let start = (
            (row as isize - d_row * back) as usize,
            (col as isize - d_col * back) as usize,
        );
        Line {
            direction,
            start,
            len: backward + forward + 1,
        }
    }

    pub(crate) fn place(&mut self, row: usize, col: usize, player: Player) {
        if let Some(idx) = self.idx(row, col) {
            debug_assert!(self.cells[idx].is_none());
            self.cells[idx] = Some(player);
        }
    }

    // Counts how many consecutive cells beyond (row, col) belong to `player`,
    // walking along `direction` scaled by `sign`.
    fn count_owned(
        &self,
        row: usize,
        col: usize,
        player: Player,
        direction: Direction,
        sign: isize,
        reach: usize,
    ) -> usize {
        let (d_row, d_col) = direction.delta();
        let mut count = 0;
        for step in 1..=reach as isize {
            let next = row
                .checked_add_signed(d_row * sign * step)
                .zip(col.checked_add_signed(d_col * sign * step));
            match next.and_then(|(r, c)| self.get(r, c)) {
                Some(Some(owner)) if owner == player => count += 1,
                _ => break,
            }
        }
        count
    }

    fn idx(&self, row: usize, col: usize) -> Option<usize> {
        self.in_bounds(row, col).then(|| row * self.width + col)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: usize, height: usize, cells: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new(width, height);
        for &(row, col, player) in cells {
            board.place(row, col, player);
        }
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4, 3);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.rows().count(), 3);
        assert!(board.rows().all(|row| row.len() == 4 && row.iter().all(Option::is_none)));
    }

    #[test]
    fn get_distinguishes_empty_and_out_of_bounds() {
        let board = board_with(4, 3, &[(2, 3, Player::PlayerB)]);
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(2, 3), Some(Some(Player::PlayerB)));
        assert_eq!(board.get(3, 0), None);
        assert_eq!(board.get(0, 4), None);
    }

    #[test]
    fn full_board() {
        let mut board = Board::new(2, 1);
        assert!(!board.is_full());
        board.place(0, 0, Player::PlayerA);
        board.place(0, 1, Player::PlayerB);
        assert!(board.is_full());
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn run_stops_at_opponent_and_edge() {
        let board = board_with(
            6,
            1,
            &[
                (0, 0, Player::PlayerA),
                (0, 1, Player::PlayerA),
                (0, 2, Player::PlayerA),
                (0, 3, Player::PlayerB),
                (0, 4, Player::PlayerA),
            ],
        );
        let line = board.run_through(0, 1, Player::PlayerA, Direction::Horizontal, 5);
        assert_eq!(line.start, (0, 0));
        assert_eq!(line.len, 3);
    }

    #[test]
    fn run_respects_reach() {
        let cells: Vec<_> = (0..7).map(|col| (0, col, Player::PlayerA)).collect();
        let board = board_with(7, 1, &cells);
        let line = board.run_through(0, 3, Player::PlayerA, Direction::Horizontal, 2);
        assert_eq!(line.start, (0, 1));
        assert_eq!(line.len, 5);
    }

    #[test]
    fn anti_diagonal_run_near_the_edge() {
        let board = board_with(
            3,
            3,
            &[
                (0, 2, Player::PlayerB),
                (1, 1, Player::PlayerB),
                (2, 0, Player::PlayerB),
            ],
        );
        let line = board.run_through(1, 1, Player::PlayerB, Direction::AntiDiagonal, 4);
        assert_eq!(line.start, (0, 2));
        assert_eq!(line.len, 3);
        assert_eq!(line.cells().collect::<Vec<_>>(), vec![(0, 2), (1, 1), (2, 0)]);
    }
}
