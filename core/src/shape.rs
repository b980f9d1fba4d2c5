use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Closed set of shapes the renderer knows how to rasterize.
///
/// Arrow shafts span the full length; the arrowhead chevrons have `head` pixels per side and sit at the left or
/// bottom end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Rectangle { width: Px, height: Px },
    Line { axis: Axis, length: Px, thickness: Px },
    LeftArrow { length: Px, head: Px },
    DownArrow { length: Px, head: Px },
    DownLeftArrow { side: Px, head: Px },
}

impl Shape {
    pub const fn square(side: Px) -> Self {
        Self::Rectangle {
            width: side,
            height: side,
        }
    }

    /// `(width, height)` of the generated mask.
    pub const fn size(self) -> (Px, Px) {
        use Shape::*;

        match self {
            Rectangle { width, height } => (width, height),
            Line {
                axis: Axis::Horizontal,
                length,
                thickness,
            } => (length, thickness),
            Line {
                axis: Axis::Vertical,
                length,
                thickness,
            } => (thickness, length),
            LeftArrow { length, head } => (length, 2 * head + 1),
            DownArrow { length, head } => (2 * head + 1, length),
            DownLeftArrow { side, .. } => (side, side),
        }
    }

    /// Opaque pixels of the shape, indexed `[y, x]` with `y = 0` at the bottom.
    ///
    /// Panics if an arrow is too short to hold its head (`length < head + 2`).
    pub fn coverage(self) -> Array2<bool> {
        use Shape::*;

        let (width, height) = self.size();
        let mut mask = Array2::from_elem([height, width], false);
        match self {
            Rectangle { .. } | Line { .. } => mask.fill(true),
            LeftArrow { head, .. } => {
                mask.row_mut(head).fill(true);
                for k in 1..=head {
                    for y in [head + k, head - k] {
                        mask[[y, k]] = true;
                        mask[[y, k + 1]] = true;
                    }
                }
            }
            DownArrow { head, .. } => {
                mask.column_mut(head).fill(true);
                for k in 1..=head {
                    for x in [head + k, head - k] {
                        mask[[k, x]] = true;
                        mask[[k + 1, x]] = true;
                    }
                }
            }
            DownLeftArrow { side, head } => {
                mask.diag_mut().fill(true);
                for k in 1..=head.min(side.saturating_sub(1)) {
                    mask[[0, k]] = true;
                    mask[[k, 0]] = true;
                }
            }
        }
        mask
    }
}

/// A shape rasterized in a single color, ready to be composited.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    shape: Shape,
    mask: Array2<Option<Color>>,
}

impl Drawable {
    pub fn new(shape: Shape, color: Color) -> Self {
        let mask = shape
            .coverage()
            .mapv(|opaque| if opaque { Some(color) } else { None });
        Self { shape, mask }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> Px {
        self.mask.ncols()
    }

    pub fn height(&self) -> Px {
        self.mask.nrows()
    }

    pub fn pixel(&self, x: Px, y: Px) -> Option<Color> {
        self.mask[[y, x]]
    }

    /// Copies every opaque pixel into `canvas` with the mask's bottom-left corner at `(x, y)`.
    ///
    /// The shape must fit inside the canvas; anything else is a layout bug and panics.
    pub fn draw(&self, canvas: &mut PixelBuffer, x: Px, y: Px) {
        assert!(
            x + self.width() <= canvas.width() && y + self.height() <= canvas.height(),
            "{:?} at ({}, {}) does not fit a {}x{} canvas",
            self.shape,
            x,
            y,
            canvas.width(),
            canvas.height()
        );

        for ((my, mx), pixel) in self.mask.indexed_iter() {
            if let Some(color) = *pixel {
                canvas[(x + mx, y + my)] = color;
            }
        }
    }
}
