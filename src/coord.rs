use std::fmt;
use std::ops;

use itertools::Itertools;


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i64) -> Option<Self> {
        u8::try_from(idx).ok().filter(|&idx| idx < NUM_ROWS).map(|idx| Self { idx })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_ROWS).map(Self::from_zero_based) }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i64) -> Option<Self> {
        u8::try_from(idx).ok().filter(|&idx| idx < NUM_COLS).map(|idx| Self { idx })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_COLS).map(Self::from_zero_based) }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    // Panics if the coordinates are off the board. Use `try_new` for untrusted input.
    pub const fn from_zero_based(row: u8, col: u8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }

    pub fn try_new(row: i64, col: i64) -> Option<Self> {
        Some(Self {
            row: Row::try_from_zero_based(row)?,
            col: Col::try_from_zero_based(col)?,
        })
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    // Dark squares are the only ones used by the starting layout.
    pub fn is_dark(self) -> bool { (self.row.to_zero_based() + self.col.to_zero_based()) % 2 == 1 }

    // Arithmetic midpoint. Only meaningful when both deltas are even.
    pub fn midpoint(self, other: Coord) -> Coord {
        Coord::from_zero_based(
            (self.row.to_zero_based() + other.row.to_zero_based()) / 2,
            (self.col.to_zero_based() + other.col.to_zero_based()) / 2,
        )
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output { (self.row - other.row, self.col - other.col) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.row.to_zero_based(), self.col.to_zero_based())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_off_board() {
        assert_eq!(Coord::try_new(0, 7), Some(Coord::from_zero_based(0, 7)));
        assert_eq!(Coord::try_new(8, 0), None);
        assert_eq!(Coord::try_new(0, -1), None);
        assert_eq!(Coord::try_new(i64::MAX, 3), None);
    }

    #[test]
    fn delta_and_midpoint() {
        let from = Coord::from_zero_based(4, 4);
        let to = Coord::from_zero_based(2, 2);
        assert_eq!(to - from, (-2, -2));
        assert_eq!(from.midpoint(to), Coord::from_zero_based(3, 3));
    }

    #[test]
    fn all_coords() {
        assert_eq!(Coord::all().count(), 64);
        assert_eq!(Coord::all().filter(|c| c.is_dark()).count(), 32);
    }
}
