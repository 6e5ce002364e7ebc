use tracing::{debug, info, trace};

use crate::{visualize_board, Board, Direction, GameConfig, IllegalMove, Line, Player};

/// What happened when a move was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The mark was placed and it's now the contained player's turn.
    Continued(Player),
    /// The mark was placed and completed a line. The game is finished.
    Won(Player),
    /// Nothing changed.
    Rejected(IllegalMove),
}

/// Whose turn it is and whether the game is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: Player,
    pub finished: bool,
    pub winner: Option<Player>,
    /// The line that won the game, cut off at `win_length - 1` cells on either side of the last move.
    pub winning_line: Option<Line>,
    pub last_move: Option<(usize, usize)>,
    pub moves_played: usize,
}

impl TurnState {
    fn new() -> Self {
        Self {
            current_player: Player::PlayerA,
            finished: false,
            winner: None,
            winning_line: None,
            last_move: None,
            moves_played: 0,
        }
    }
}

/// Owns the board and the turn state, and decides which moves are legal
/// and when somebody has won.
///
/// The engine has two states: active, where moves are accepted and turns
/// alternate, and finished, where every move is rejected. A winning move is
/// the only way to finish a game, and [`Self::reset()`] the only way back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardEngine {
    board: Board,
    turn: TurnState,
    win_length: usize,
}

impl BoardEngine {
    /// Creates an engine with an empty board of the configured size.
    ///
    /// Panics if the board would have a zero dimension; a config that
    /// passed [`GameConfig::validate()`] never does.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            turn: TurnState::new(),
            win_length: config.win_length,
        }
    }

    /// Starts a new game on an empty `width` x `height` board.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.board = Board::new(width, height);
        self.turn = TurnState::new();
        debug!(width, height, "Board reset");
    }

    /// Starts a new game on a board of the same size.
    pub fn restart(&mut self) {
        self.reset(self.board.width(), self.board.height());
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// The move is rejected without any change if the game is finished, the
    /// cell is off the board, or the cell is taken. A winning move finishes
    /// the game and leaves the winner as the current player; any other
    /// accepted move passes the turn.
    pub fn attempt_move(&mut self, row: usize, col: usize) -> MoveResult {
        if self.turn.finished {
            return MoveResult::Rejected(IllegalMove::GameFinished);
        }
        match self.board.get(row, col) {
            None => return MoveResult::Rejected(IllegalMove::OutOfBounds { row, col }),
            Some(Some(owner)) => {
                return MoveResult::Rejected(IllegalMove::Occupied { row, col, owner })
            }
            Some(None) => {}
        }

        let player = self.turn.current_player;
        self.board.place(row, col, player);
        self.turn.last_move = Some((row, col));
        self.turn.moves_played += 1;
        trace!(%player, row, col, "Move played");

        if let Some(line) = self.detect_win(row, col, player) {
            self.turn.finished = true;
            self.turn.winner = Some(player);
            self.turn.winning_line = Some(line);
            info!(winner = %player, moves = self.turn.moves_played, "Game won");
            debug!("\n{}", visualize_board(&self.board, Some(&line)));
            MoveResult::Won(player)
        } else {
            self.turn.current_player = player.other();
            MoveResult::Continued(self.turn.current_player)
        }
    }

    // Only lines through the newest mark need to be checked: any line of
    // win_length marks that doesn't contain it already existed one move ago,
    // and would have ended the game back then.
    fn detect_win(&self, row: usize, col: usize, player: Player) -> Option<Line> {
        let reach = self.win_length.saturating_sub(1);
        Direction::ALL
            .into_iter()
            .map(|direction| self.board.run_through(row, col, player, direction, reach))
            .find(|line| line.len >= self.win_length)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn current_player(&self) -> Player {
        self.turn.current_player
    }

    pub fn is_finished(&self) -> bool {
        self.turn.finished
    }

    pub fn winner(&self) -> Option<Player> {
        self.turn.winner
    }

    pub fn winning_line(&self) -> Option<&Line> {
        self.turn.winning_line.as_ref()
    }

    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.turn.last_move
    }

    pub fn moves_played(&self) -> usize {
        self.turn.moves_played
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }
}
