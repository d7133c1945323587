//! The board: a cell grid plus the piece arena it indexes into.
//!
//! Cells never hold piece references, only arena ids. A captured piece
//! frees its slot to `None` and the id stops resolving; nothing dangles.

use std::fmt;

use crate::coord::Coord;
use crate::piece::Piece;

/// Identifies a piece in the board's arena for the piece's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u32);

#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<PieceId>>,
    pieces: Vec<Option<Piece>>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Board {
            width,
            height,
            cells: vec![None; (width * height) as usize],
            pieces: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        (0..self.width).contains(&at.x) && (0..self.height).contains(&at.y)
    }

    fn cell_index(&self, at: Coord) -> Option<usize> {
        if self.in_bounds(at) {
            Some((at.y * self.width + at.x) as usize)
        } else {
            None
        }
    }

    /// The id occupying `at`, if any. Out-of-range coordinates read as
    /// empty rather than failing.
    pub fn occupant_id(&self, at: Coord) -> Option<PieceId> {
        self.cells[self.cell_index(at)?]
    }

    pub fn occupant_at(&self, at: Coord) -> Option<&Piece> {
        self.piece(self.occupant_id(at)?)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize)?.as_ref()
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.0 as usize)?.as_mut()
    }

    /// All live pieces with their ids.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PieceId(i as u32), p)))
    }

    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = (PieceId, &mut Piece)> {
        self.pieces
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|p| (PieceId(i as u32), p)))
    }

    /// Places `piece` on the cell its position names. `None` if the square
    /// is off the board or already taken.
    pub fn place(&mut self, piece: Piece) -> Option<PieceId> {
        let index = self.cell_index(piece.pos)?;
        if self.cells[index].is_some() {
            return None;
        }
        let id = PieceId(self.pieces.len() as u32);
        self.cells[index] = Some(id);
        self.pieces.push(Some(piece));
        Some(id)
    }

    /// Takes a piece off the board, clearing its cell. Idempotent: a dead
    /// id just returns `None`.
    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.pieces.get_mut(id.0 as usize)?.take()?;
        if let Some(index) = self.cell_index(piece.pos) {
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
        Some(piece)
    }

    /// Moves a piece to `to`, updating both cells. `false` when the piece
    /// is gone or the destination is unusable; capture resolution happens
    /// before this, in the turn sequencer.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Coord) -> bool {
        let Some(to_index) = self.cell_index(to) else {
            return false;
        };
        if self.cells[to_index].is_some() {
            return false;
        }
        let Some(piece) = self.pieces.get_mut(id.0 as usize).and_then(Option::as_mut) else {
            return false;
        };
        let from = piece.pos;
        piece.pos = to;
        if let Some(from_index) = self.cell_index(from) {
            if self.cells[from_index] == Some(id) {
                self.cells[from_index] = None;
            }
        }
        self.cells[to_index] = Some(id);
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  +{}+", "-".repeat((self.width as usize) * 2 + 1))?;
        for y in (0..self.height).rev() {
            write!(f, "{} | ", y + 1)?;
            for x in 0..self.width {
                match self.occupant_at(Coord::new(x, y)) {
                    Some(piece) => write!(f, "{} ", piece.kind.to_fen_char(piece.side))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +{}+", "-".repeat((self.width as usize) * 2 + 1))?;
        write!(f, "    ")?;
        for x in 0..self.width {
            write!(f, "{} ", (b'a' + (x % 26) as u8) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::{PieceKind, Side};

    fn rook_at(x: i32, y: i32) -> Piece {
        Piece::new(
            PieceKind::Rook,
            Side::White,
            Coord::new(x, y),
            &Config::default(),
        )
    }

    #[test]
    fn bounds_cover_the_whole_grid_and_nothing_else() {
        let board = Board::new(8, 8);
        assert!(board.in_bounds(Coord::new(0, 0)));
        assert!(board.in_bounds(Coord::new(7, 7)));
        assert!(!board.in_bounds(Coord::new(8, 0)));
        assert!(!board.in_bounds(Coord::new(0, -1)));
        assert_eq!(board.occupant_id(Coord::new(-3, 99)), None);
    }

    #[test]
    fn place_occupy_remove() {
        let mut board = Board::new(8, 8);
        let id = board.place(rook_at(2, 3)).unwrap();
        assert_eq!(board.occupant_id(Coord::new(2, 3)), Some(id));
        assert_eq!(board.occupant_at(Coord::new(2, 3)).unwrap().kind, PieceKind::Rook);

        // one piece per cell
        assert!(board.place(rook_at(2, 3)).is_none());

        let removed = board.remove(id).unwrap();
        assert_eq!(removed.pos, Coord::new(2, 3));
        assert_eq!(board.occupant_id(Coord::new(2, 3)), None);
        assert!(board.piece(id).is_none());
        assert!(board.remove(id).is_none());
    }

    #[test]
    fn relocate_updates_both_cells() {
        let mut board = Board::new(8, 8);
        let id = board.place(rook_at(0, 0)).unwrap();
        assert!(board.relocate(id, Coord::new(0, 5)));
        assert_eq!(board.occupant_id(Coord::new(0, 0)), None);
        assert_eq!(board.occupant_id(Coord::new(0, 5)), Some(id));
        assert_eq!(board.piece(id).unwrap().pos, Coord::new(0, 5));

        // refuses an occupied or off-board destination
        let other = board.place(rook_at(1, 1)).unwrap();
        assert!(!board.relocate(other, Coord::new(0, 5)));
        assert!(!board.relocate(other, Coord::new(9, 9)));
    }

    #[test]
    fn placing_off_board_is_refused() {
        let mut board = Board::new(4, 4);
        assert!(board.place(rook_at(4, 0)).is_none());
        assert!(board.place(rook_at(-1, 2)).is_none());
    }
}
