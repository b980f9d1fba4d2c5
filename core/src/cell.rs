use serde::{Deserialize, Serialize};

use crate::Color;

/// Classification of a single position `(pile_a, pile_b)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Undetermined,
    /// Previous player wins: every move leads to a [`CellState::Reachable`] position.
    Solved,
    /// Next player wins: some move reaches a [`CellState::Solved`] position.
    Reachable,
}

impl CellState {
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Undetermined)
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Undetermined => Color::GRAY,
            Self::Solved => Color::BLACK,
            Self::Reachable => Color::WHITE,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Undetermined
    }
}
