use hashbrown::HashMap;

use crate::*;

/// Filled cell squares keyed by their resolved color.
///
/// Every redraw paints all N² cells with only a handful of distinct colors, so masks are built once per color.
#[derive(Clone, Debug)]
pub struct ShapeCache {
    side: Px,
    squares: HashMap<Color, Drawable>,
}

impl ShapeCache {
    pub fn new(side: Px) -> Self {
        Self {
            side,
            squares: HashMap::new(),
        }
    }

    /// Number of distinct colors built so far.
    pub(crate) fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn square(&mut self, color: Color) -> &Drawable {
        let side = self.side;
        self.squares
            .entry(color)
            .or_insert_with(|| Drawable::new(Shape::square(side), color))
    }
}
