use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowDirection {
    Left,
    Down,
    DownLeft,
}

impl ArrowDirection {
    /// Offset of one cell step from the arrowhead toward the tail.
    const fn unit(self) -> Coord2 {
        match self {
            Self::Left => (1, 0),
            Self::Down => (0, 1),
            Self::DownLeft => (1, 1),
        }
    }
}

/// Overlay segment in grid-cell coordinates. The arrowhead sits on `start`, the tail on `end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub direction: ArrowDirection,
    pub start: Coord2,
    pub end: Coord2,
    pub color: Color,
}

impl Arrow {
    /// Number of cell steps between head and tail.
    pub const fn cells(&self) -> Coord {
        match self.direction {
            ArrowDirection::Left | ArrowDirection::DownLeft => self.end.0.saturating_sub(self.start.0),
            ArrowDirection::Down => self.end.1.saturating_sub(self.start.1),
        }
    }

    /// Every cell the arrow passes over, head first, tail included.
    pub fn covered_cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (a, b) = self.start;
        let (da, db) = self.direction.unit();
        (0..=self.cells()).map(move |k| (a + k * da, b + k * db))
    }

    /// Rasterized arrow plus the canvas position of its bottom-left corner, or `None` for a zero-length arrow.
    pub fn to_drawable(&self, config: &GridConfig) -> Option<(Drawable, Px, Px)> {
        let cells = Px::from(self.cells());
        if cells == 0 {
            return None;
        }

        let pitch = config.cell_pitch();
        let head = config.arrowhead;
        let length = pitch * cells;
        let (x0, y0) = config.cell_origin(self.start);
        let (shape, x, y) = match self.direction {
            ArrowDirection::Left => (
                Shape::LeftArrow { length, head },
                x0 + pitch / 2,
                y0 + 1,
            ),
            ArrowDirection::Down => (
                Shape::DownArrow { length, head },
                x0 + 1,
                y0 + pitch / 2,
            ),
            ArrowDirection::DownLeft => (
                Shape::DownLeftArrow { side: length, head },
                x0 + pitch / 2,
                y0 + pitch / 2,
            ),
        };
        Some((Drawable::new(shape, self.color), x, y))
    }
}

/// Pending arrows, kept in one list per direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlays {
    pub left: Vec<Arrow>,
    pub down: Vec<Arrow>,
    pub down_left: Vec<Arrow>,
}

impl Overlays {
    pub fn push(&mut self, arrow: Arrow) {
        match arrow.direction {
            ArrowDirection::Left => self.left.push(arrow),
            ArrowDirection::Down => self.down.push(arrow),
            ArrowDirection::DownLeft => self.down_left.push(arrow),
        }
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.down.clear();
        self.down_left.clear();
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.down.len() + self.down_left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrow> {
        self.left
            .iter()
            .chain(self.down.iter())
            .chain(self.down_left.iter())
    }
}
