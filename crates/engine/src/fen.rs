//! FEN-style position setup.
//!
//! Setup is the one boundary where bad input is an error instead of an
//! empty result: a garbled position should be reported, not played.
//! Castling and the halfmove clock are accepted and ignored; neither is
//! modeled. The en-passant field maps onto the capture-window buff.

use crate::board::Board;
use crate::buff::{Buff, BuffKind};
use crate::config::Config;
use crate::constants::{PieceKind, Side};
use crate::coord::Coord;
use crate::error::FenError;
use crate::game::Game;
use crate::piece::Piece;

pub fn parse(fen: &str, config: &Config) -> Result<Game, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::Truncated("placement"))?;

    let mut board = Board::new(config.board_width, config.board_height);
    for (i, rank) in placement.split('/').enumerate() {
        let y = config.board_height - 1 - i as i32;
        if y < 0 {
            return Err(FenError::BadRank { rank: i });
        }
        let mut x = 0;
        for ch in rank.chars() {
            if let Some(run) = ch.to_digit(10) {
                x += run as i32;
            } else {
                let (kind, side) =
                    PieceKind::from_fen_char(ch).ok_or(FenError::BadPiece(ch))?;
                let pos = Coord::new(x, y);
                let mut piece = Piece::new(kind, side, pos, config);
                if kind == PieceKind::Pawn && y != home_rank(side, config) {
                    piece.mark_moved(config);
                }
                board.place(piece).ok_or(FenError::OutOfBounds(pos))?;
                x += 1;
            }
        }
        if x != config.board_width {
            return Err(FenError::BadRank { rank: i });
        }
    }

    let side_field = fields.next().ok_or(FenError::Truncated("side to move"))?;
    let side_to_move = match side_field {
        "w" => Side::White,
        "b" => Side::Black,
        other => return Err(FenError::BadSide(other.to_string())),
    };

    let _castling = fields.next(); // not modeled

    if let Some(square) = fields.next().filter(|s| *s != "-") {
        let capture_square = Coord::parse_notation(square)
            .ok_or_else(|| FenError::BadSquare(square.to_string()))?;
        if config.en_passant {
            attach_window(&mut board, capture_square, side_to_move)
                .ok_or_else(|| FenError::BadSquare(square.to_string()))?;
        }
    }

    let _halfmove = fields.next(); // not modeled
    let turn = fields
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    Ok(Game::from_parts(board, side_to_move, turn, config.clone()))
}

/// Reattaches the capture-window buff described by an en-passant square:
/// the vulnerable pawn stands one step past it from the mover's side.
fn attach_window(board: &mut Board, capture_square: Coord, side_to_move: Side) -> Option<()> {
    let mover = side_to_move.opponent();
    let pawn_pos = capture_square + mover.forward();
    let id = board.occupant_id(pawn_pos)?;
    let piece = board.piece(id)?;
    if piece.kind != PieceKind::Pawn || piece.side != mover {
        return None;
    }
    board
        .piece_mut(id)?
        .buffs
        .push(Buff::en_passant(capture_square));
    Some(())
}

pub fn write(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();

    for y in (0..board.height()).rev() {
        let mut empty_run = 0;
        for x in 0..board.width() {
            match board.occupant_at(Coord::new(x, y)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    out.push(piece.kind.to_fen_char(piece.side));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push_str(&empty_run.to_string());
        }
        if y > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match game.side_to_move() {
        Side::White => 'w',
        Side::Black => 'b',
    });
    out.push_str(" - ");

    match open_window(board) {
        Some(square) => out.push_str(&square.notation()),
        None => out.push('-'),
    }

    out.push_str(&format!(" 0 {}", game.turn()));
    out
}

fn open_window(board: &Board) -> Option<Coord> {
    board.pieces().find_map(|(_, piece)| {
        piece.buffs().iter().find_map(|buff| {
            let BuffKind::EnPassant { capture_square } = buff.kind();
            buff.is_active().then_some(capture_square)
        })
    })
}

fn home_rank(side: Side, config: &Config) -> i32 {
    match side {
        Side::White => 1,
        Side::Black => config.board_height - 2,
    }
}
