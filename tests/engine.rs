use connect4_minimax::minmax::{WIN_SCORE, minimax};
use connect4_minimax::{
    ComputerPlayer, EngineConfig, Game, GameStatus, Gameboard, Player, SearchError, Searcher,
    TerminalScores, choose_move,
};

fn board(text: &str) -> Gameboard {
    text.parse().expect("valid board")
}

#[test]
fn drop_then_search_round_trip() {
    let mut board = Gameboard::<7, 6>::new();
    let row = board.lowest_open_row(3).unwrap();
    board.apply_move(row, 3, Player::Player1).unwrap();
    assert!(!board.has_four_in_a_row(Player::Player1));
    assert!(!board.is_game_over());

    let (column, _) = choose_move(&board, 5, Player::Player2).unwrap();
    assert!(board.is_column_playable(column).unwrap());
    let row = board.lowest_open_row(column).unwrap();
    board.apply_move(row, column, Player::Player2).unwrap();
    assert_eq!(board.pieces(), 2);
}

#[test]
fn wins_when_a_column_completes_four() {
    let board = board(
        "
        .......
        .......
        .......
        ...O...
        ...O..X
        X..O.XX
        ",
    );
    for depth in 1..=3 {
        assert_eq!(
            choose_move(&board, depth, Player::Player2),
            Ok((3, WIN_SCORE)),
            "depth {depth}"
        );
    }
}

#[test]
fn blocks_a_diagonal_threat() {
    // Player1 threatens (3, 3) on the `/` diagonal; column 3 is filled to row 2
    let board = board(
        "
        .......
        .......
        .......
        ..XO...
        .XOO...
        XOOX..X
        ",
    );
    assert!(!board.is_game_over());
    for depth in 2..=4 {
        let (column, score) = choose_move(&board, depth, Player::Player2).unwrap();
        assert_eq!(column, 3, "depth {depth}");
        assert!(score > -WIN_SCORE);
    }
}

#[test]
fn draw_board_cannot_be_searched() {
    let board = board(
        "
        XXOOXXO
        OOXXOOX
        XXOOXXO
        OOXXOOX
        XXOOXXO
        OOXXOOX
        ",
    );
    assert!(board.is_game_over());
    assert_eq!(
        choose_move(&board, 1, Player::Player2),
        Err(SearchError::EmptyLegalMoves)
    );
    assert_eq!(board.winner(), None);
}

#[test]
fn legacy_scores_match_plain_minimax() {
    let board = board(
        "
        .......
        .......
        .......
        ..O....
        ..XO...
        .XXOX..
        ",
    );
    for depth in 1..=4 {
        let result = Searcher::new(depth)
            .with_terminal_scores(TerminalScores::Legacy)
            .search(&board, Player::Player2)
            .unwrap();
        assert_eq!(
            (Some(result.column), result.score),
            minimax(&board, depth, Player::Player2, TerminalScores::Legacy)
        );
    }
}

#[test]
fn computer_never_loses_to_a_first_column_player() {
    // Player1 always drops into the lowest playable column
    let mut game = Game::<7, 6>::new(Player::Player1);
    let mut computer = ComputerPlayer::new(&EngineConfig {
        depth: 4,
        ..EngineConfig::default()
    });

    while game.status() == GameStatus::Ongoing {
        let column = match game.current_player() {
            Player::Player1 => game.board().legal_columns().next().unwrap(),
            Player::Player2 => computer.select_column(&game).unwrap().column,
        };
        game.play(column).unwrap();
    }
    assert_ne!(game.status(), GameStatus::PlayerWon(Player::Player1));
}
