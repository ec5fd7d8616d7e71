#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from,
    clippy::multiple_crate_versions
)]
#![deny(missing_debug_implementations)]

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use connect4_minimax::config::Strategy;
use connect4_minimax::{ComputerPlayer, EngineConfig, Game, GameStatus, Gameboard, Player};

/// Play Connect Four against the computer in the terminal.
#[derive(Debug, Parser)]
#[command(name = "connect4-cli", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML engine configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Seed for the random tie-break
    #[arg(long)]
    seed: Option<u64>,

    /// Use the one-ply greedy strategy instead of minimax
    #[arg(long)]
    greedy: bool,

    /// Search root columns in parallel
    #[arg(long)]
    parallel: bool,

    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,
}

fn print_board(board: &Gameboard) {
    print!("{board}");

    for _ in 0..board.width() {
        print!("-");
    }
    println!();

    for col_id in (0..board.width()).map(|i| i + 1) {
        print!("{col_id}");
    }
    println!();
}

/// Reads 1-based column numbers until a legal one is entered. `None` on EOF.
fn read_column(board: &Gameboard, input: &mut impl BufRead) -> Result<Option<usize>> {
    loop {
        print!("Choose your move (column):");
        for col in board.legal_columns().map(|x| x + 1) {
            print!(" {col}");
        }
        println!();
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("reading stdin")? == 0 {
            return Ok(None);
        }

        // adapt to index
        match line.trim().parse::<usize>() {
            Ok(col) if col >= 1 && board.is_column_playable(col - 1).unwrap_or(false) => {
                return Ok(Some(col - 1));
            }
            _ => println!("'{}' is not a playable column", line.trim()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("connect4_minimax=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.greedy {
        config.strategy = Strategy::Greedy;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if let Err(err) = config.validate() {
        bail!("invalid engine configuration: {err}");
    }

    let human = Player::Player1;
    let first = if cli.computer_first {
        human.opponent()
    } else {
        human
    };
    let mut game = Game::<7, 6>::new(first);
    let mut computer = ComputerPlayer::new(&config);
    let mut stdin = std::io::stdin().lock();

    println!("Let's play Connect Four against the computer.");
    let status = loop {
        println!("----------------");
        print_board(game.board());
        println!();

        let column = if game.current_player() == human {
            match read_column(game.board(), &mut stdin)? {
                Some(column) => column,
                None => {
                    println!("Bye.");
                    return Ok(());
                }
            }
        } else {
            let result = computer
                .select_column(&game)
                .context("computer failed to pick a move")?;
            println!("Computer chose column {}", result.column + 1);
            result.column
        };

        let status = game.play(column)?;
        if status != GameStatus::Ongoing {
            break status;
        }
    };

    println!("----------------");
    print_board(game.board());
    match status {
        GameStatus::PlayerWon(player) if player == human => println!("You won!"),
        GameStatus::PlayerWon(_) => println!("Computer won!"),
        GameStatus::Draw | GameStatus::Ongoing => println!("Gameover: draw"),
    }
    Ok(())
}
