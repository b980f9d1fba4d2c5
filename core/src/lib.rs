use serde::{Deserialize, Serialize};

pub use cache::*;
pub use canvas::*;
pub use cell::*;
pub use color::*;
pub use error::*;
pub use frame::*;
pub use grid::*;
pub use overlay::*;
pub use shape::*;
pub use types::*;

mod cache;
mod canvas;
mod cell;
mod color;
mod error;
mod frame;
mod grid;
mod overlay;
mod shape;
mod types;

/// Grid dimensions and render geometry, all in pixels except `size`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of cells per side; pile sizes run from `0` to `size - 1`.
    pub size: Coord,
    /// Margin between the canvas edge and the first cell.
    pub tick_size: Px,
    /// Arrowhead size. Cells are sized so an arrow with this head fits inside one.
    pub arrowhead: Px,
    pub line_thickness: Px,
}

impl GridConfig {
    /// Builds a config without validation.
    ///
    /// # Panics
    ///
    /// A [`GameGrid`] built from a config with `size == 0` or `tick_size < line_thickness` panics while drawing or
    /// stepping. Use [`GridConfig::new`] for untrusted input.
    pub const fn new_unchecked(size: Coord, tick_size: Px, arrowhead: Px, line_thickness: Px) -> Self {
        Self {
            size,
            tick_size,
            arrowhead,
            line_thickness,
        }
    }

    pub fn new(size: Coord, tick_size: Px, arrowhead: Px, line_thickness: Px) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("grid needs at least one cell"));
        }
        if line_thickness == 0 {
            return Err(Error::InvalidConfig("grid lines must be at least one pixel thick"));
        }
        if tick_size < line_thickness {
            return Err(Error::InvalidConfig("tick margin must fit the first grid line"));
        }
        Ok(Self::new_unchecked(size, tick_size, arrowhead, line_thickness))
    }

    pub const fn total_cells(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Side of the colored area inside one cell.
    pub const fn cell_inner(&self) -> Px {
        2 * self.arrowhead + 3
    }

    /// Distance between the origins of neighboring cells.
    pub const fn cell_pitch(&self) -> Px {
        self.cell_inner() + self.line_thickness
    }

    pub const fn canvas_size(&self) -> Px {
        self.tick_size + self.cell_pitch() * self.size as usize + self.line_thickness
    }

    /// Canvas position of the bottom-left pixel of a cell's inner area.
    pub const fn cell_origin(&self, (a, b): Coord2) -> (Px, Px) {
        let pitch = self.cell_pitch();
        (
            self.tick_size + pitch * a as usize,
            self.tick_size + pitch * b as usize,
        )
    }

    /// Offset of the `index`-th grid line, counted from the bottom or left edge.
    pub const fn grid_line_offset(&self, index: usize) -> Px {
        self.tick_size - self.line_thickness + self.cell_pitch() * index
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new_unchecked(31, 3, 4, 1)
    }
}

/// A losing position for the player to move, found on the line `pile_a + pile_b = coins`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningSplit {
    pub coins: usize,
    pub pile_a: Coord,
    pub pile_b: Coord,
}
