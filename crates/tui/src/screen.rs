//! Text rendering of the live board.

use std::io::{self, Write};

use crossterm::style::Stylize;
use engine::constants::Side;
use engine::coord::Coord;
use engine::game::Game;

/// Draws the board with rank/file legends, tinting `highlights` (the
/// previewed piece's legal destinations).
pub fn draw(game: &Game, highlights: &[Coord]) -> io::Result<()> {
    let board = game.board();
    let mut out = io::stdout();

    writeln!(out)?;
    for y in (0..board.height()).rev() {
        write!(out, "{} ", format!("{:>2}", y + 1).dark_grey())?;
        for x in 0..board.width() {
            let at = Coord::new(x, y);
            let mut glyph = match board.occupant_at(at) {
                Some(piece) => {
                    let c = piece.kind.to_fen_char(piece.side).to_string();
                    match piece.side {
                        Side::White => c.white().bold(),
                        Side::Black => c.dark_yellow(),
                    }
                }
                None => ".".to_string().dark_grey(),
            };
            if highlights.contains(&at) {
                glyph = glyph.on_dark_green();
            }
            write!(out, "{} ", glyph)?;
        }
        writeln!(out)?;
    }

    write!(out, "   ")?;
    for x in 0..board.width() {
        write!(out, "{} ", ((b'a' + (x % 26) as u8) as char).to_string().dark_grey())?;
    }
    writeln!(out)?;
    writeln!(out, "turn {}, {:?} to move", game.turn(), game.side_to_move())?;
    out.flush()
}
