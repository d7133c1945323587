//! Movement building blocks.
//!
//! A component turns a local start offset into the candidate offsets
//! reachable from it in one generation step. Components are pure data
//! transforms: no board access, no failure mode. Degenerate parameters
//! (zero steps, an empty leap table) generate nothing.

use crate::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Steps along `direction`, up to `max_steps` squares.
    Ray { direction: Coord, max_steps: u32 },

    /// A fixed set of jumps, each independent of the others.
    Leaps { offsets: &'static [Coord] },

    /// One rule-gated offset. Meaningful only as an extra move; a primary
    /// attach of a shift behaves like a one-step ray without the chain.
    Shift { offset: Coord },
}

impl Component {
    /// Candidate offsets reachable from `start` in one generation step.
    pub fn generate(&self, start: Coord) -> Vec<Coord> {
        match *self {
            Component::Ray {
                direction,
                max_steps,
            } => (1..=max_steps as i32).map(|k| start + direction * k).collect(),
            Component::Leaps { offsets } => offsets.iter().map(|&o| start + o).collect(),
            Component::Shift { offset } => vec![start + offset],
        }
    }

    /// Whether generated offsets chain into a blocking path when attached
    /// to a tree. Rays chain; leaps and shifts stay flat.
    pub(crate) fn is_chained(&self) -> bool {
        matches!(self, Component::Ray { .. })
    }
}
