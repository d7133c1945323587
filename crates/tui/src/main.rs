//! Terminal front-end for the rule engine: renders the board, resolves
//! input to squares, and drives the turn loop.

mod screen;
mod session;

use clap::Parser;
use engine::game::Game;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess_tui", about = "Two-player chess board on the terminal")]
struct Args {
    /// Starting position in FEN; defaults to the standard setup.
    #[arg(long)]
    fen: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let game = match args.fen {
        Some(fen) => match Game::from_fen(&fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("bad position: {err}");
                std::process::exit(2);
            }
        },
        None => Game::new(),
    };

    if let Err(err) = session::run(game) {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
