use std::path::PathBuf;

/// Errors raised by the game board when a caller breaks a move precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameboardError {
    #[error("column {column} is outside of the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("row {row} is outside of the board (height {height})")]
    InvalidRow { row: usize, height: usize },

    /// Column is full.
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    /// The piece would float above an empty cell or overwrite an occupied one.
    #[error("row {row} is not the lowest open row of column {column}")]
    NotLowestOpenRow { row: usize, column: usize },
}

/// Errors raised when a board cannot be parsed from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell symbol {0:?} (expected 'X', 'O' or '.')")]
    UnknownCell(char),

    #[error("piece at row {row}, column {column} floats above an empty cell")]
    FloatingPiece { row: usize, column: usize },
}

/// Errors raised by a [`crate::Game`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    Board(#[from] GameboardError),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised by the move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The board is already won or full, so there is no move to choose.
    #[error("no legal moves: the game is already over")]
    EmptyLegalMoves,

    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Errors that can occur when loading the engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gameboard_error_display() {
        let err = GameboardError::InvalidColumn {
            column: 9,
            width: 7,
        };
        assert_eq!(err.to_string(), "column 9 is outside of the board (width 7)");
        assert_eq!(
            GameboardError::ColumnFull { column: 2 }.to_string(),
            "column 2 is full"
        );
    }

    #[test]
    fn test_game_error_wraps_board_error() {
        let err: GameError = GameboardError::ColumnFull { column: 4 }.into();
        assert_eq!(err.to_string(), "illegal move: column 4 is full");
    }

    #[test]
    fn test_search_error_display() {
        assert_eq!(
            SearchError::EmptyLegalMoves.to_string(),
            "no legal moves: the game is already over"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("depth must be in 1..=12".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: depth must be in 1..=12"
        );
    }
}
