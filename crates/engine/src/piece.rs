//! Pieces: kind, side, position, and the movement tree each one owns.

use crate::buff::Buff;
use crate::config::Config;
use crate::constants::{PieceKind, Side};
use crate::coord::Coord;
use crate::profile;
use crate::tree::MovementTree;

#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Coord,
    tree: MovementTree,
    pub(crate) buffs: Vec<Buff>,
    moves_made: u32,
}

impl Piece {
    /// A piece with the standard movement profile for its kind.
    pub fn new(kind: PieceKind, side: Side, pos: Coord, config: &Config) -> Self {
        Self::with_tree(kind, side, pos, profile::build_tree(kind, side, false, config))
    }

    /// A piece with a caller-supplied movement tree, the hook for
    /// non-standard pieces and rule experiments.
    pub fn with_tree(kind: PieceKind, side: Side, pos: Coord, tree: MovementTree) -> Self {
        Piece {
            kind,
            side,
            pos,
            tree,
            buffs: Vec::new(),
            moves_made: 0,
        }
    }

    pub fn tree(&self) -> &MovementTree {
        &self.tree
    }

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Marks a piece as placed mid-game rather than freshly set up, which
    /// costs a pawn its double step.
    pub(crate) fn mark_moved(&mut self, config: &Config) {
        if self.moves_made == 0 {
            self.moves_made = 1;
            self.refresh_tree(config);
        }
    }

    /// Bumps the move counter; a pawn's first move rebuilds its tree with
    /// the moved profile (no more double step).
    pub(crate) fn record_move(&mut self, config: &Config) {
        self.moves_made += 1;
        if self.moves_made == 1 {
            self.refresh_tree(config);
        }
    }

    fn refresh_tree(&mut self, config: &Config) {
        if self.kind == PieceKind::Pawn {
            self.tree = profile::build_tree(self.kind, self.side, true, config);
        }
    }
}
