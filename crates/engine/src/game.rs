//! Turn sequencing: the collaborator that mutates board state between
//! move queries.
//!
//! Everything the validator deliberately refuses to do happens here:
//! moving the piece, removing captures, opening and expiring capture
//! windows, driving buff hooks. A query is a pure read; `apply` is the
//! only write path.

use once_cell::sync::Lazy;
use std::fmt;
use tracing::{debug, trace};

use crate::board::{Board, PieceId};
use crate::buff::{Buff, BuffKind};
use crate::config::Config;
use crate::constants::{PieceKind, Side, START_FEN};
use crate::coord::Coord;
use crate::error::{FenError, MoveError};
use crate::fen;
use crate::validator;

/// A from/to pair in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    /// Parses concatenated square notation, `e2e4` style.
    pub fn parse(s: &str) -> Option<Move> {
        let s = s.trim();
        let (split, _) = s
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c.is_ascii_lowercase())?;
        Some(Move {
            from: Coord::parse_notation(&s[..split])?,
            to: Coord::parse_notation(&s[split..])?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// What a successfully applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Captured(PieceKind),
}

// Parsed once; every standard game starts as a clone of this.
static OPENING: Lazy<Game> = Lazy::new(|| {
    fen::parse(START_FEN, &Config::default()).expect("the standard start position parses")
});

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    turn: u32,
    config: Config,
}

impl Game {
    /// The standard start position.
    pub fn new() -> Self {
        OPENING.clone()
    }

    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        fen::parse(fen, &Config::default())
    }

    pub fn from_fen_with(fen: &str, config: &Config) -> Result<Game, FenError> {
        fen::parse(fen, config)
    }

    pub(crate) fn from_parts(board: Board, side_to_move: Side, turn: u32, config: Config) -> Self {
        Game {
            board,
            side_to_move,
            turn,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn to_fen(&self) -> String {
        fen::write(self)
    }

    /// Legal destinations for the piece on `from`; empty when the square
    /// is empty or the piece belongs to the waiting side.
    pub fn legal_moves_from(&self, from: Coord) -> Vec<Coord> {
        match self.board.occupant_id(from) {
            Some(id)
                if self.board.piece(id).map(|p| p.side) == Some(self.side_to_move) =>
            {
                validator::legal_destinations(&self.board, id)
            }
            _ => Vec::new(),
        }
    }

    /// Validates and applies one move, then advances the turn state.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        let id = self
            .board
            .occupant_id(mv.from)
            .ok_or(MoveError::NoPiece(mv.from))?;
        let (mover_side, mover_kind, mover_buffs) = {
            let piece = self.board.piece(id).ok_or(MoveError::NoPiece(mv.from))?;
            (piece.side, piece.kind, piece.buffs.clone())
        };
        if mover_side != self.side_to_move {
            return Err(MoveError::NotYourTurn(mv.from));
        }
        if !validator::legal_destinations(&self.board, id).contains(&mv.to) {
            return Err(MoveError::IllegalDestination {
                from: mv.from,
                to: mv.to,
            });
        }

        for buff in mover_buffs.iter().filter(|b| b.is_active()) {
            buff.on_move(mv.from, mv.to);
        }

        // a capture is either the occupant of the destination, or (for a
        // pawn landing on an open window) the pawn that left it open
        let mut victim_id = self.board.occupant_id(mv.to);
        if victim_id.is_none() && mover_kind == PieceKind::Pawn {
            victim_id = self.window_victim(mv.to, mover_side);
        }

        let mut outcome = MoveOutcome::Moved;
        if let Some(victim_id) = victim_id {
            for buff in mover_buffs.iter().filter(|b| b.is_active()) {
                buff.on_attack(mv.to);
            }
            if let Some(victim) = self.board.remove(victim_id) {
                for buff in mover_buffs.iter().filter(|b| b.is_active()) {
                    buff.on_capture(victim.pos);
                }
                debug!(
                    "{:?} {:?} captured on {}",
                    victim.side, victim.kind, victim.pos
                );
                outcome = MoveOutcome::Captured(victim.kind);
            }
        }

        let relocated = self.board.relocate(id, mv.to);
        debug_assert!(relocated, "destination was validated and cleared");

        let config = self.config.clone();
        if let Some(piece) = self.board.piece_mut(id) {
            piece.record_move(&config);
        }

        // a double step opens the one-turn window on the skipped square
        if mover_kind == PieceKind::Pawn
            && self.config.en_passant
            && mv.to.x == mv.from.x
            && (mv.to.y - mv.from.y).abs() == 2
        {
            let skipped = Coord::new(mv.from.x, (mv.from.y + mv.to.y) / 2);
            if let Some(piece) = self.board.piece_mut(id) {
                piece.buffs.push(Buff::en_passant(skipped));
                trace!("capture window opened on {}", skipped);
            }
        }

        // windows attached by the previous turn have now been answered
        self.tick_buffs(mover_side.opponent());

        debug!("{} applied for {:?}", mv, mover_side);
        if mover_side == Side::Black {
            self.turn += 1;
        }
        self.side_to_move = mover_side.opponent();
        Ok(outcome)
    }

    /// The enemy pawn whose open capture window names `landing`.
    fn window_victim(&self, landing: Coord, mover_side: Side) -> Option<PieceId> {
        self.board.pieces().find_map(|(vid, piece)| {
            if piece.side == mover_side || piece.kind != PieceKind::Pawn {
                return None;
            }
            let open = piece.buffs().iter().any(|b| {
                b.is_active()
                    && matches!(b.kind(), BuffKind::EnPassant { capture_square } if capture_square == landing)
            });
            open.then_some(vid)
        })
    }

    /// Counts one elapsed game turn against every buff on `side`'s pieces
    /// and detaches the ones that expire.
    fn tick_buffs(&mut self, side: Side) {
        for (_, piece) in self.board.pieces_mut() {
            if piece.side != side || piece.buffs.is_empty() {
                continue;
            }
            let mut expired = false;
            for buff in piece.buffs.iter_mut() {
                expired |= buff.decrement();
            }
            if expired {
                piece.buffs.retain(|b| b.is_active());
                trace!("capture window closed at {}", piece.pos);
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        Move::parse(s).expect("test move notation")
    }

    #[test]
    fn move_notation_round_trip() {
        let m = mv("e2e4");
        assert_eq!(m.from, Coord::new(4, 1));
        assert_eq!(m.to, Coord::new(4, 3));
        assert_eq!(m.to_string(), "e2e4");
        assert!(Move::parse("e2").is_none());
        assert!(Move::parse("nonsense").is_none());
    }

    #[test]
    fn apply_rejects_the_obvious() {
        let mut game = Game::new();
        assert_eq!(
            game.apply(mv("e4e5")),
            Err(MoveError::NoPiece(Coord::new(4, 3)))
        );
        assert_eq!(
            game.apply(mv("e7e5")),
            Err(MoveError::NotYourTurn(Coord::new(4, 6)))
        );
        assert_eq!(
            game.apply(mv("e2e5")),
            Err(MoveError::IllegalDestination {
                from: Coord::new(4, 1),
                to: Coord::new(4, 4),
            })
        );
    }

    #[test]
    fn captures_remove_the_victim() {
        let mut game = Game::from_fen("8/8/8/8/3r4/8/3R4/8 w - - 0 1").unwrap();
        assert_eq!(game.apply(mv("d2d4")), Ok(MoveOutcome::Captured(PieceKind::Rook)));
        assert_eq!(game.board().pieces().count(), 1);
        assert_eq!(game.side_to_move(), Side::Black);
    }

    #[test]
    fn fullmove_counter_bumps_after_black() {
        let mut game = Game::new();
        assert_eq!(game.turn(), 1);
        game.apply(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), 1);
        game.apply(mv("e7e5")).unwrap();
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn en_passant_capture_removes_the_bypassed_pawn() {
        // white pawn on e5; black answers d7d5; exd6 takes the d-pawn
        let mut game = Game::from_fen("8/3p4/8/4P3/8/8/8/8 b - - 0 1").unwrap();
        game.apply(mv("d7d5")).unwrap();
        assert!(game.legal_moves_from(Coord::new(4, 4)).contains(&Coord::new(3, 5)));

        assert_eq!(game.apply(mv("e5d6")), Ok(MoveOutcome::Captured(PieceKind::Pawn)));
        assert_eq!(game.board().pieces().count(), 1);
        let (_, survivor) = game.board().pieces().next().unwrap();
        assert_eq!(survivor.pos, Coord::new(3, 5));
        assert_eq!(survivor.side, Side::White);
    }

    #[test]
    fn unused_window_closes_after_one_turn() {
        let mut game = Game::from_fen("7k/3p4/8/4P3/8/8/8/7K b - - 0 1").unwrap();
        game.apply(mv("d7d5")).unwrap();
        assert!(game.legal_moves_from(Coord::new(4, 4)).contains(&Coord::new(3, 5)));

        // white declines; the window is gone on white's next turn
        game.apply(mv("h1h2")).unwrap();
        game.apply(mv("h8h7")).unwrap();
        assert!(!game.legal_moves_from(Coord::new(4, 4)).contains(&Coord::new(3, 5)));
    }

    #[test]
    fn queries_do_not_mutate() {
        let game = Game::new();
        let before = game.to_fen();
        let _ = game.legal_moves_from(Coord::new(1, 0));
        let _ = game.legal_moves_from(Coord::new(1, 0));
        assert_eq!(game.to_fen(), before);
    }
}
