use crate::config::{EngineConfig, Strategy, TieBreakMode};
use crate::error::SearchError;
use crate::eval::best_scoring_move;
use crate::game::Game;
use crate::minmax::{FirstLegal, RandomLegal, SearchResult, SearchStats, Searcher, TieBreak};

/// The computer side of a game, driven by an [`EngineConfig`].
#[derive(Debug)]
pub struct ComputerPlayer {
    strategy: Strategy,
    searcher: Searcher,
}

impl ComputerPlayer {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let tie_break: Box<dyn TieBreak> = match (config.tie_break, config.seed) {
            (TieBreakMode::FirstLegal, _) => Box::new(FirstLegal),
            (TieBreakMode::Random, Some(seed)) => Box::new(RandomLegal::seeded(seed)),
            (TieBreakMode::Random, None) => Box::new(RandomLegal::new()),
        };
        let searcher = Searcher::new(config.depth)
            .with_terminal_scores(config.terminal_scores)
            .with_tie_break(tie_break)
            .with_parallel(config.parallel)
            .with_time_budget(config.time_budget());

        Self {
            strategy: config.strategy,
            searcher,
        }
    }

    /// Picks the column for the player to move in `game`.
    pub fn select_column<const W: usize, const H: usize>(
        &mut self,
        game: &Game<W, H>,
    ) -> Result<SearchResult, SearchError> {
        let board = game.board();
        let side = game.current_player();

        match self.strategy {
            Strategy::Minimax => self.searcher.search(board, side),
            Strategy::Greedy => {
                if board.is_game_over() {
                    return Err(SearchError::EmptyLegalMoves);
                }
                let (column, score) =
                    best_scoring_move(board, side).ok_or(SearchError::EmptyLegalMoves)?;
                Ok(SearchResult {
                    column,
                    score,
                    depth: 1,
                    stats: SearchStats {
                        nodes: board.legal_columns().count() as u64 + 1,
                        ..SearchStats::default()
                    },
                })
            }
        }
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStatus, Player};

    #[test]
    fn test_opens_in_the_center() {
        let mut computer = ComputerPlayer::default();
        let game = Game::<7, 6>::new(Player::Player2);
        assert_eq!(computer.select_column(&game).unwrap().column, 3);
    }

    #[test]
    fn test_searches_for_the_player_to_move() {
        let mut game = Game::<7, 6>::new(Player::Player1);
        // Player1 gets three on the bottom row, Player2 stacks on column 6
        for col in [0, 6, 1, 6, 2] {
            game.play(col).unwrap();
        }
        assert_eq!(game.current_player(), Player::Player2);

        let mut computer = ComputerPlayer::new(&EngineConfig {
            depth: 3,
            ..EngineConfig::default()
        });
        let result = computer.select_column(&game).unwrap();
        assert_eq!(result.column, 3);
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_greedy_strategy() {
        let mut game = Game::<7, 6>::new(Player::Player2);
        for col in [0, 6, 1, 6, 2, 5] {
            game.play(col).unwrap();
        }
        let mut computer = ComputerPlayer::new(&EngineConfig {
            strategy: Strategy::Greedy,
            ..EngineConfig::default()
        });
        let result = computer.select_column(&game).unwrap();
        assert_eq!(result.column, 3);
        assert_eq!(game.play(result.column), Ok(GameStatus::PlayerWon(Player::Player2)));
        assert_eq!(computer.select_column(&game), Err(SearchError::EmptyLegalMoves));
    }

    #[test]
    fn test_seeded_random_tie_break_plays_legal_games() {
        let config = EngineConfig {
            depth: 2,
            tie_break: TieBreakMode::Random,
            seed: Some(5),
            ..EngineConfig::default()
        };
        let mut first = ComputerPlayer::new(&config);
        let mut second = ComputerPlayer::new(&EngineConfig {
            depth: 3,
            ..config.clone()
        });

        let mut game = Game::<7, 6>::new(Player::Player1);
        while game.status() == GameStatus::Ongoing {
            let computer = match game.current_player() {
                Player::Player1 => &mut first,
                Player::Player2 => &mut second,
            };
            let result = computer.select_column(&game).unwrap();
            game.play(result.column).unwrap();
        }
        assert!(game.round() <= 42);
    }
}
