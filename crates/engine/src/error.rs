//! Typed errors for the engine's construction and setup boundaries.
//!
//! Move *queries* never fail; a misconfigured piece simply has no legal
//! destinations. Errors exist where a caller hands us data: building a
//! movement tree, parsing a position, applying a move.

use crate::coord::Coord;

/// Errors from [`TreeBuilder::build`](crate::tree::TreeBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeBuildError {
    /// An attach named a depth no node occupies yet. Attach order decides
    /// the tree shape, so this is a construction bug, not a no-op.
    #[error("no node at depth {depth} to attach to")]
    UnpopulatedDepth { depth: u32 },
}

/// Errors from parsing a FEN-style position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("unknown piece character {0:?}")]
    BadPiece(char),

    #[error("rank {rank} does not fit the board")]
    BadRank { rank: usize },

    #[error("unknown side to move {0:?}")]
    BadSide(String),

    #[error("bad square {0:?}")]
    BadSquare(String),

    #[error("piece at {0} falls outside the board")]
    OutOfBounds(Coord),

    #[error("missing field: {0}")]
    Truncated(&'static str),
}

/// Errors from [`Game::apply`](crate::game::Game::apply).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPiece(Coord),

    #[error("the piece at {0} does not belong to the side to move")]
    NotYourTurn(Coord),

    #[error("{from} cannot reach {to}")]
    IllegalDestination { from: Coord, to: Coord },
}
