use ndarray::Array2;

/// Single coordinate axis, used for the board edge length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

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

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Maps a flat cell index onto `(x, y)` for a square board with edge `size`.
pub(crate) const fn index_to_coords(index: CellCount, size: Coord) -> Coord2 {
    let size = size as CellCount;
    ((index % size) as Coord, (index / size) as Coord)
}

/// Square array with `size` cells on each side, indexed by `(x, y)`.
pub(crate) fn square_array<T: Clone + Default>(size: Coord) -> Array2<T> {
    Array2::default((size, size).to_nd_index())
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays inside a square of edge `bound`.
fn apply_delta(coords: Coord2, delta: (i8, i8), bound: Coord) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= bound {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= bound {
        return None;
    }

    Some((next_x, next_y))
}

/// In-bounds neighbors of a cell. Edges clip, they never wrap.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bound: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bound: Coord) -> Self {
        Self {
            center,
            bound,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bound);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
