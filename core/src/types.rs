/// Single pile size, also used as a grid axis coordinate.
pub type Coord = u16;

/// Grid position `(pile_a, pile_b)`. Pile A runs along the horizontal axis.
pub type Coord2 = (Coord, Coord);

/// Pixel coordinate or extent on the canvas.
pub type Px = usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Iterator over the three prefixes a cell is checked against: every position one legal move away.
///
/// Yields the row prefix `(x, b), x < a`, then the column prefix `(a, y), y < b`, then the diagonal
/// prefix `(a - k, b - k), 1 <= k <= min(a, b)`.
#[derive(Debug)]
pub struct MoveIter {
    origin: Coord2,
    phase: MovePhase,
    step: Coord,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum MovePhase {
    Row,
    Column,
    Diagonal,
    Done,
}

impl MoveIter {
    pub fn new(origin: Coord2) -> Self {
        Self {
            origin,
            phase: MovePhase::Row,
            step: 1,
        }
    }
}

impl Iterator for MoveIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        use MovePhase::*;

        let (a, b) = self.origin;
        loop {
            let limit = match self.phase {
                Row => a,
                Column => b,
                Diagonal => a.min(b),
                Done => return None,
            };

            if self.step > limit {
                self.phase = match self.phase {
                    Row => Column,
                    Column => Diagonal,
                    Diagonal | Done => Done,
                };
                self.step = 1;
                continue;
            }

            let k = self.step;
            self.step += 1;
            return Some(match self.phase {
                Row => (a - k, b),
                Column => (a, b - k),
                Diagonal => (a - k, b - k),
                Done => unreachable!(),
            });
        }
    }
}
