//! Board-aware traversal of a piece's movement tree.
//!
//! The tree says which offsets exist and in what order they are earned;
//! this walk says which of them survive the live board: bounds first,
//! then occupancy. Blocking is purely an occupancy question. A path
//! ends at the first piece it meets, friendly or not, with no per-kind
//! carve-outs; leapers are unaffected simply because their trees are
//! flat, a depth-1 leaf having nothing below it to prune.

use std::collections::HashSet;

use crate::board::{Board, PieceId};
use crate::buff::BuffKind;
use crate::component::Component;
use crate::constants::PieceKind;
use crate::coord::Coord;
use crate::piece::Piece;
use crate::tree::{ExtraMove, MoveNode};

/// Every square `piece` may legally move to or capture on this board.
///
/// A pure read: nothing is mutated, and repeated calls between board
/// changes return identical sets. Misconfigured queries (dead id,
/// off-board piece) yield an empty set rather than an error.
pub fn legal_destinations(board: &Board, id: PieceId) -> Vec<Coord> {
    let Some(piece) = board.piece(id) else {
        return Vec::new();
    };
    if !board.in_bounds(piece.pos) {
        return Vec::new();
    }

    let mut destinations = Vec::new();
    let mut reached_leaves = Vec::new();
    // the root is never a candidate, but its children always get explored
    for child in &piece.tree().root().children {
        visit(board, piece, child, &mut destinations, &mut reached_leaves);
    }

    let mut extras: Vec<ExtraMove> = piece.tree().extras().to_vec();
    extras.extend(capture_windows(board, piece));
    for &(leaf_offset, leaf_depth) in &reached_leaves {
        for extra in extras.iter().filter(|e| e.target_depth == leaf_depth) {
            // the reached leaf becomes the local origin; extras are
            // terminal, so plain occupancy is the whole check
            for candidate in extra.component.generate(leaf_offset) {
                let absolute = piece.pos + candidate;
                if landable(board, piece, absolute) {
                    destinations.push(absolute);
                }
            }
        }
    }

    let mut seen = HashSet::new();
    destinations.retain(|c| seen.insert(*c));
    destinations
}

/// Depth-first walk. Out-of-bounds prunes a whole subtree; an enemy is a
/// capture that ends the path; a friendly piece ends it with nothing.
fn visit(
    board: &Board,
    piece: &Piece,
    node: &MoveNode,
    destinations: &mut Vec<Coord>,
    reached_leaves: &mut Vec<(Coord, u32)>,
) {
    let absolute = piece.pos + node.offset;
    if !board.in_bounds(absolute) {
        return;
    }

    let descend = match board.occupant_at(absolute) {
        None => {
            destinations.push(absolute);
            true
        }
        Some(other) if other.side != piece.side => {
            destinations.push(absolute);
            false
        }
        Some(_) => return,
    };

    if node.is_leaf() {
        // a leaf counts as reached even when it ends in a capture; an
        // occupied square ahead does not close a capture window beside it
        reached_leaves.push((node.offset, node.depth));
        return;
    }
    if descend {
        for child in &node.children {
            visit(board, piece, child, destinations, reached_leaves);
        }
    }
}

/// The shared landing rule: on the board and not held by a friendly piece.
fn landable(board: &Board, piece: &Piece, at: Coord) -> bool {
    board.in_bounds(at)
        && board
            .occupant_at(at)
            .map_or(true, |other| other.side != piece.side)
}

/// Extra-move entries granted to `piece` by capture windows on enemy
/// pawns. The buff rides the pawn that double-stepped; any enemy pawn
/// directly beside it earns a one-square shift onto the skipped square,
/// anchored at its forward leaf.
fn capture_windows(board: &Board, piece: &Piece) -> Vec<ExtraMove> {
    if piece.kind != PieceKind::Pawn {
        return Vec::new();
    }
    let mut extras = Vec::new();
    for (_, other) in board.pieces() {
        if other.side == piece.side || other.kind != PieceKind::Pawn {
            continue;
        }
        if other.pos.y != piece.pos.y || (other.pos.x - piece.pos.x).abs() != 1 {
            continue;
        }
        for buff in other.buffs().iter().filter(|b| b.is_active()) {
            let BuffKind::EnPassant { capture_square } = buff.kind();
            let forward_leaf = piece.pos + piece.side.forward();
            extras.push(ExtraMove {
                component: Component::Shift {
                    offset: capture_square - forward_leaf,
                },
                target_depth: 1,
            });
        }
    }
    extras
}
