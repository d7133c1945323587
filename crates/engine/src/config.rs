//! Configuration for the rule engine.

/// Rule-set knobs. The default is the standard 8x8 game.
#[derive(Debug, Clone)]
pub struct Config {
    pub board_width: i32,
    pub board_height: i32,

    /// Unmoved pawns may advance two squares.
    pub pawn_double_step: bool,
    /// A double step opens a one-turn capture window behind the pawn.
    pub en_passant: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: 8,
            board_height: 8,
            pawn_double_step: true,
            en_passant: true,
        }
    }
}
