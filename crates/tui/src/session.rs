//! The interactive loop: select a square, preview its moves, play one.

use std::io::{self, BufRead, Write};

use engine::constants::PieceKind;
use engine::coord::Coord;
use engine::game::{Game, Move, MoveOutcome};

use crate::screen;

pub fn run(mut game: Game) -> io::Result<()> {
    let stdin = io::stdin();
    let mut highlights: Vec<Coord> = Vec::new();

    println!("Moves as e2e4. A square alone (e2) previews its piece. 'q' quits.");
    loop {
        screen::draw(&game, &highlights)?;
        highlights.clear();

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // stdin closed
        }
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }

        if let Some(mv) = Move::parse(input) {
            match game.apply(mv) {
                Ok(MoveOutcome::Captured(PieceKind::King)) => {
                    screen::draw(&game, &[])?;
                    // the mover has already been flipped out of the turn
                    println!("{:?} wins.", game.side_to_move().opponent());
                    break;
                }
                Ok(MoveOutcome::Captured(kind)) => println!("captured a {kind:?}"),
                Ok(MoveOutcome::Moved) => {}
                Err(err) => println!("rejected: {err}"),
            }
        } else if let Some(square) = Coord::parse_notation(input) {
            highlights = game.legal_moves_from(square);
            if highlights.is_empty() {
                println!("nothing to play from {square}");
            }
        } else {
            println!("could not read {input:?}");
        }
    }
    Ok(())
}
