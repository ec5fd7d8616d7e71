//! Positional heuristic used at the search horizon.
//!
//! The score is only meaningful relative to sibling positions: it adds a small
//! bonus for chips in the centre column and, for every window of four cells,
//! rewards own open lines and penalizes an opponent line that is one chip away
//! from completion.

use crate::game::{Direction, Gameboard, Player, Window};

/// Points per own chip in the centre column.
pub const CENTER_WEIGHT: i64 = 3;
/// Four own chips in a window.
pub const FOUR_SCORE: i64 = 100;
/// Three own chips and one empty cell.
pub const THREE_SCORE: i64 = 5;
/// Two own chips and two empty cells.
pub const TWO_SCORE: i64 = 2;
/// Three opponent chips and one empty cell.
pub const OPPONENT_THREE_PENALTY: i64 = -4;

/// Scores a single window from `player`'s perspective.
#[must_use]
pub fn eval_window(window: &Window, player: Player) -> i64 {
    let count = |cell: Option<Player>| window.iter().filter(|&&c| c == cell).count();
    let own = count(Some(player));
    let opponent = count(Some(player.opponent()));
    let empty = count(None);

    let mut score = match (own, empty) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };
    if opponent == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Heuristic value of `board` for `player`. Higher is better for `player`.
#[must_use]
pub fn score_position<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    player: Player,
) -> i64 {
    let center = W / 2;
    let center_count = (0..H)
        .filter(|&row| board.cell(row, center) == Some(player))
        .count() as i64;

    let windows: i64 = Direction::ALL
        .iter()
        .flat_map(|&direction| board.windows(direction))
        .map(|window| eval_window(&window, player))
        .sum();

    center_count * CENTER_WEIGHT + windows
}

/// Greedy one-ply choice: the legal column whose resulting position scores
/// best for `player`. The lowest column wins ties; `None` on a full board.
#[must_use]
pub fn best_scoring_move<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    player: Player,
) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for col in board.legal_columns() {
        let score = score_position(&board.with_move(col, player), player);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((col, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_pieces(board: &Gameboard) -> Gameboard {
        let mut text = board.to_string();
        text = text
            .chars()
            .map(|c| match c {
                'X' => 'O',
                'O' => 'X',
                other => other,
            })
            .collect();
        text.parse().unwrap()
    }

    #[test]
    fn test_eval_window() {
        let x = Some(Player::Player1);
        let o = Some(Player::Player2);
        let p = Player::Player1;

        assert_eq!(eval_window(&[x, x, x, x], p), 100);
        assert_eq!(eval_window(&[x, x, None, x], p), 5);
        assert_eq!(eval_window(&[None, x, x, None], p), 2);
        assert_eq!(eval_window(&[x, None, None, None], p), 0);
        assert_eq!(eval_window(&[x, x, x, o], p), 0);
        assert_eq!(eval_window(&[o, o, None, o], p), -4);
        assert_eq!(eval_window(&[o, o, x, o], p), 0);
        assert_eq!(eval_window(&[o, o, o, o], p), 0);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Gameboard::<7, 6>::new();
        assert_eq!(score_position(&board, Player::Player1), 0);
        assert_eq!(score_position(&board, Player::Player2), 0);
    }

    #[test]
    fn test_center_bonus() {
        let mut board = Gameboard::<7, 6>::new();
        board.insert_player_chip(3, Player::Player2).unwrap();
        assert_eq!(score_position(&board, Player::Player2), 3);
        assert_eq!(score_position(&board, Player::Player1), 0);

        let mut side = Gameboard::<7, 6>::new();
        side.insert_player_chip(0, Player::Player2).unwrap();
        assert_eq!(score_position(&side, Player::Player2), 0);
    }

    #[test]
    fn test_open_three_scores_and_penalizes() {
        let board: Gameboard = "
            .......
            .......
            .......
            .......
            .......
            OOO....
        "
        .parse()
        .unwrap();
        // windows 0..4 (3 own + empty) and 1..5 (2 own + 2 empty)
        assert_eq!(score_position(&board, Player::Player2), 5 + 2);
        assert_eq!(score_position(&board, Player::Player1), -4);
    }

    #[test]
    fn test_score_is_piece_symmetric() {
        let boards = [
            "
            .......
            .......
            ...O...
            ..XX...
            .OXO...
            XOXOX..
            ",
            "
            .......
            ...X...
            ..OO...
            ..XXO..
            .XOXO.O
            XOXOXOX
            ",
            "
            O......
            X......
            O.....X
            X.....O
            XO...XO
            OXXOXOX
            ",
        ];
        for text in boards {
            let board: Gameboard = text.parse().unwrap();
            let swapped = swap_pieces(&board);
            assert_eq!(
                score_position(&board, Player::Player1),
                score_position(&swapped, Player::Player2)
            );
            assert_eq!(
                score_position(&board, Player::Player2),
                score_position(&swapped, Player::Player1)
            );
        }
    }

    #[test]
    fn test_best_scoring_move() {
        let board = Gameboard::<7, 6>::new();
        assert_eq!(best_scoring_move(&board, Player::Player2), Some((3, 3)));

        let board: Gameboard = "
            .......
            .......
            .......
            .......
            .......
            OOO....
        "
        .parse()
        .unwrap();
        assert_eq!(best_scoring_move(&board, Player::Player2).map(|(col, _)| col), Some(3));

        let full: Gameboard = "
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
        "
        .parse()
        .unwrap();
        assert_eq!(best_scoring_move(&full, Player::Player1), None);
    }
}
