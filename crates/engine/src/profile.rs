//! Per-kind movement profiles: the component lists each piece's tree is
//! built from.

use crate::component::Component;
use crate::config::Config;
use crate::constants::{PieceKind, Side, ALL_DIRECTIONS, DIAGONALS, KNIGHT_LEAPS, ORTHOGONALS};
use crate::coord::Coord;
use crate::tree::{MovementTree, TreeBuilder};

/// Assembles the movement tree for a piece of `kind` on `side`.
///
/// `moved` matters only to pawns: the double-step ray is part of the
/// unmoved profile, so a pawn's tree is rebuilt through here after its
/// first move.
pub fn build_tree(kind: PieceKind, side: Side, moved: bool, config: &Config) -> MovementTree {
    let long_reach = (config.board_width.max(config.board_height) - 1).max(0) as u32;
    let builder = match kind {
        PieceKind::Pawn => {
            let max_steps = if moved || !config.pawn_double_step { 1 } else { 2 };
            TreeBuilder::new().attach(
                Component::Ray {
                    direction: side.forward(),
                    max_steps,
                },
                0,
            )
        }
        PieceKind::Rook => attach_rays(TreeBuilder::new(), &ORTHOGONALS, long_reach),
        PieceKind::Bishop => attach_rays(TreeBuilder::new(), &DIAGONALS, long_reach),
        PieceKind::Queen => attach_rays(TreeBuilder::new(), &ALL_DIRECTIONS, long_reach),
        PieceKind::King => attach_rays(TreeBuilder::new(), &ALL_DIRECTIONS, 1),
        PieceKind::Knight => TreeBuilder::new().attach(
            Component::Leaps {
                offsets: &KNIGHT_LEAPS,
            },
            0,
        ),
    };
    builder
        .build()
        .expect("piece profiles only attach at the root, which always exists")
}

fn attach_rays(builder: TreeBuilder, directions: &[Coord], max_steps: u32) -> TreeBuilder {
    directions.iter().fold(builder, |b, &direction| {
        b.attach(
            Component::Ray {
                direction,
                max_steps,
            },
            0,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmoved_pawn_chains_to_depth_two() {
        let tree = build_tree(PieceKind::Pawn, Side::White, false, &Config::default());
        let offsets: Vec<_> = tree.reachable_offsets().collect();
        assert_eq!(offsets, vec![Coord::new(0, 1), Coord::new(0, 2)]);
        // the double step hangs off the single step
        assert_eq!(tree.root().children.len(), 1);
        assert_eq!(tree.root().children[0].children[0].depth, 2);
    }

    #[test]
    fn moved_pawn_loses_the_double_step() {
        let tree = build_tree(PieceKind::Pawn, Side::Black, true, &Config::default());
        let offsets: Vec<_> = tree.reachable_offsets().collect();
        assert_eq!(offsets, vec![Coord::new(0, -1)]);
    }

    #[test]
    fn double_step_can_be_configured_off() {
        let config = Config {
            pawn_double_step: false,
            ..Config::default()
        };
        let tree = build_tree(PieceKind::Pawn, Side::White, false, &config);
        assert_eq!(tree.reachable_offsets().count(), 1);
    }

    #[test]
    fn sliders_reach_across_the_board() {
        let rook = build_tree(PieceKind::Rook, Side::White, false, &Config::default());
        // 4 rays of 7 steps each on an 8x8 board
        assert_eq!(rook.reachable_offsets().count(), 28);
        assert_eq!(rook.root().children.len(), 4);

        let queen = build_tree(PieceKind::Queen, Side::Black, false, &Config::default());
        assert_eq!(queen.root().children.len(), 8);
        assert_eq!(queen.reachable_offsets().count(), 56);
    }

    #[test]
    fn king_and_knight_are_flat() {
        let king = build_tree(PieceKind::King, Side::White, false, &Config::default());
        assert!(king.root().children.iter().all(|n| n.is_leaf()));
        assert_eq!(king.root().children.len(), 8);

        let knight = build_tree(PieceKind::Knight, Side::White, false, &Config::default());
        assert!(knight.root().children.iter().all(|n| n.is_leaf()));
        assert_eq!(knight.reachable_offsets().count(), 8);
    }
}
