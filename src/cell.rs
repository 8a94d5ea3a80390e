use serde::{Deserialize, Serialize};

/// State of one grid position. `adjacent_mines` is fixed at board
/// construction; the remaining fields change only through `Board` commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub flagged: bool,
    pub revealed: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_zero(self) -> bool {
        !self.mine && self.adjacent_mines == 0
    }

    /// Whether a reveal command may act on this cell at all.
    pub const fn is_openable(self) -> bool {
        !self.revealed && !self.flagged
    }
}
