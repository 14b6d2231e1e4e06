/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

/// Maps `(x, y)` coordinates and `(width, height)` sizes onto the row-major `[y, x]` layout of the
/// cell grid.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a row-major linear index back into `(x, y)` for a board `width` columns wide.
pub const fn from_linear(index: CellCount, width: Coord) -> Coord2 {
    let width = width as CellCount;
    ((index % width) as Coord, (index / width) as Coord)
}

pub const fn to_linear((x, y): Coord2, width: Coord) -> CellCount {
    (y as CellCount) * (width as CellCount) + (x as CellCount)
}

/// Iterates the up-to-8 in-bounds neighbours of a cell, row by row.
///
/// Walks the 3x3 window around the center, clipped to the board, and skips the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    first: Coord2,
    last: Coord2,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (x, y) = center;
        let (width, height) = bounds;
        let inside = x < width && y < height;
        let first = (x.saturating_sub(1), y.saturating_sub(1));
        let last = (
            x.saturating_add(1).min(width.saturating_sub(1)),
            y.saturating_add(1).min(height.saturating_sub(1)),
        );
        Self {
            center,
            first,
            last,
            cursor: inside.then_some(first),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.cursor?;
            self.cursor = if pos.0 < self.last.0 {
                Some((pos.0 + 1, pos.1))
            } else if pos.1 < self.last.1 {
                Some((self.first.0, pos.1 + 1))
            } else {
                None
            };

            if pos != self.center {
                return Some(pos);
            }
        }
    }
}
