//! Game logic and game board.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;

use crate::error::{GameError, GameboardError, ParseBoardError};

/// Number of coins in a row to win the game.
pub const SERIES_LEN: usize = 4;

/// Result of a move played in a [`Game`].
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq)]
pub enum GameStatus {
    /// Game continues.
    Ongoing,
    /// Player won with that insertion.
    PlayerWon(Player),
    /// The game field is full without a winner.
    Draw,
}

/// Game with all its state: the board, whose turn it is and how many moves
/// were played so far.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq)]
pub struct Game<const W: usize = 7, const H: usize = 6> {
    board: Gameboard<W, H>,
    round: usize,
    current_player: Player,
    status: GameStatus,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub const fn new(first_player: Player) -> Self {
        Self {
            board: Gameboard::new(),
            round: 0,
            current_player: first_player,
            status: GameStatus::Ongoing,
        }
    }

    /// Drops a chip of the player to move into `column_index`, then hands the
    /// turn to the opponent.
    pub fn play(&mut self, column_index: usize) -> Result<GameStatus, GameError> {
        if self.status != GameStatus::Ongoing {
            return Err(GameError::GameOver);
        }

        let player = self.current_player;
        self.board.insert_player_chip(column_index, player)?;
        self.round += 1;
        self.current_player = player.opponent();

        self.status = if self.board.has_four_in_a_row(player) {
            GameStatus::PlayerWon(player)
        } else if self.board.is_game_over() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        };
        Ok(self.status)
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new(Player::Player1)
    }
}

/// Line family a [`SERIES_LEN`]-cell window runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (`/`).
    DiagonalUp,
    /// Top-left to bottom-right (`\`).
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DiagonalUp,
        Self::DiagonalDown,
    ];

    /// Start rows, start columns and the (row, column) step of every window
    /// in this direction that fits on a `W`x`H` board.
    const fn layout(
        self,
        width: usize,
        height: usize,
    ) -> (Range<usize>, Range<usize>, isize, usize) {
        let last_row = height - SERIES_LEN + 1;
        let last_col = width - SERIES_LEN + 1;
        match self {
            Self::Horizontal => (0..height, 0..last_col, 0, 1),
            Self::Vertical => (0..last_row, 0..width, 1, 0),
            Self::DiagonalUp => (0..last_row, 0..last_col, 1, 1),
            Self::DiagonalDown => (SERIES_LEN - 1..height, 0..last_col, -1, 1),
        }
    }
}

/// A window of [`SERIES_LEN`] adjacent cells.
pub type Window = [Option<Player>; SERIES_LEN];

/// Gameboard.
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Gameboard<const W: usize = 7, const H: usize = 6>(
    /*
     * Board: rows --> col --> field
     * Technical indices correspond to the logical indices:
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Option<Player>; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        Self([[None; W]; H])
    }

    #[must_use]
    pub const fn board(&self) -> &[[Option<Player>; W]; H] {
        &self.0
    }

    /// Returns the cell at `(row, col)`, `None` when it is empty or off the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.0.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns whether a chip can still be dropped into `column_index`.
    pub fn is_column_playable(&self, column_index: usize) -> Result<bool, GameboardError> {
        if column_index >= W {
            return Err(GameboardError::InvalidColumn {
                column: column_index,
                width: W,
            });
        }
        Ok(self.0[H - 1][column_index].is_none())
    }

    /// Returns the index to the next free slot in the selected column.
    ///
    /// Returns `None` if there are no more free slots or the column does not
    /// exist.
    #[must_use]
    pub fn lowest_open_row(&self, column_index: usize) -> Option<usize> {
        if column_index >= W {
            return None;
        }
        (0..H).find(|&row_index| self.0[row_index][column_index].is_none())
    }

    /// Emits the column indices where moves are legal, in ascending order.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..W).filter(move |&col| self.0[H - 1][col].is_none())
    }

    /// Returns the number of free slots in the given column.
    #[must_use]
    pub fn free_slots_in_column(&self, column: usize) -> usize {
        self.lowest_open_row(column).map_or(0, |row| H - row)
    }

    /// Returns the number of free slots in total.
    #[must_use]
    pub fn free_slots_in_total(&self) -> usize {
        (0..W).map(|col| self.free_slots_in_column(col)).sum()
    }

    /// Returns the number of chips on the board.
    #[must_use]
    pub fn pieces(&self) -> usize {
        W * H - self.free_slots_in_total()
    }

    /// Writes `player`'s chip into `(row, column_index)`.
    ///
    /// The caller picks the row, normally from [`Self::lowest_open_row`]. A row
    /// that is not the lowest open one is refused, so a misbehaving caller
    /// cannot leave a floating chip or overwrite an existing one.
    pub fn apply_move(
        &mut self,
        row: usize,
        column_index: usize,
        player: Player,
    ) -> Result<(), GameboardError> {
        if column_index >= W {
            return Err(GameboardError::InvalidColumn {
                column: column_index,
                width: W,
            });
        }
        if row >= H {
            return Err(GameboardError::InvalidRow { row, height: H });
        }

        match self.lowest_open_row(column_index) {
            None => Err(GameboardError::ColumnFull {
                column: column_index,
            }),
            Some(open) if open != row => Err(GameboardError::NotLowestOpenRow {
                row,
                column: column_index,
            }),
            Some(_) => {
                self.0[row][column_index] = Some(player);
                Ok(())
            }
        }
    }

    /// Drops `player`'s chip into `column_index` and returns the row it
    /// landed in.
    pub fn insert_player_chip(
        &mut self,
        column_index: usize,
        player: Player,
    ) -> Result<usize, GameboardError> {
        if column_index >= W {
            return Err(GameboardError::InvalidColumn {
                column: column_index,
                width: W,
            });
        }

        let row_index = self
            .lowest_open_row(column_index)
            .ok_or(GameboardError::ColumnFull {
                column: column_index,
            })?;
        self.0[row_index][column_index] = Some(player);
        Ok(row_index)
    }

    /// Copy of the board with `player`'s chip dropped into `column_index`.
    /// A full column leaves the copy unchanged; callers only pass legal columns.
    pub(crate) fn with_move(&self, column_index: usize, player: Player) -> Self {
        let mut next = *self;
        if let Some(row) = next.lowest_open_row(column_index) {
            next.0[row][column_index] = Some(player);
        }
        next
    }

    /// All windows of [`SERIES_LEN`] cells along `direction`.
    pub fn windows(&self, direction: Direction) -> impl Iterator<Item = Window> + '_ {
        let (rows, cols, row_step, col_step) = direction.layout(W, H);
        rows.flat_map(move |row| cols.clone().map(move |col| (row, col)))
            .map(move |(row, col)| {
                core::array::from_fn::<_, SERIES_LEN, _>(|i| {
                    let r = row.wrapping_add_signed(row_step * i as isize);
                    self.0[r][col + col_step * i]
                })
            })
    }

    fn check_for_winner_in(&self, direction: Direction, player: Player) -> bool {
        self.windows(direction)
            .any(|window| window.iter().all(|&cell| cell == Some(player)))
    }

    /// Check if `player` has four chips in a row in any direction.
    #[must_use]
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| self.check_for_winner_in(direction, player))
    }

    /// Returns the player with four in a row, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        [Player::Player1, Player::Player2]
            .into_iter()
            .find(|&player| self.has_four_in_a_row(player))
    }

    /// Returns whether the game is over: someone won or no legal move is left.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some() || self.legal_columns().next().is_none()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

/// Renders the top row first: `X` for [`Player::Player1`], `O` for
/// [`Player::Player2`] and `.` for an empty cell.
impl<const W: usize, const H: usize> fmt::Display for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.iter().rev() {
            for cell in row {
                let symbol = cell.map_or('.', Player::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the format written by the [`fmt::Display`] impl. Blank lines and
/// surrounding whitespace are ignored.
impl<const W: usize, const H: usize> FromStr for Gameboard<W, H> {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != H {
            return Err(ParseBoardError::RowCount {
                expected: H,
                found: lines.len(),
            });
        }

        let mut board = Self::new();
        for (top_index, line) in lines.iter().enumerate() {
            let row = H - 1 - top_index;
            let found = line.chars().count();
            if found != W {
                return Err(ParseBoardError::RowWidth {
                    row,
                    expected: W,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                board.0[row][col] = match symbol {
                    '.' => None,
                    other => Some(
                        Player::from_symbol(other).ok_or(ParseBoardError::UnknownCell(other))?,
                    ),
                };
            }
        }

        for col in 0..W {
            for row in 1..H {
                if board.0[row][col].is_some() && board.0[row - 1][col].is_none() {
                    return Err(ParseBoardError::FloatingPiece { row, column: col });
                }
            }
        }
        Ok(board)
    }
}

/// Side in the game. [`Player::Player1`] is the human, [`Player::Player2`]
/// the computer.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Player1 => 'X',
            Self::Player2 => 'O',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' => Some(Self::Player1),
            'O' => Some(Self::Player2),
            _ => None,
        }
    }
}
