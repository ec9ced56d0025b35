use std::fmt;

use enum_map::Enum;
use strum::EnumIter;

use crate::coord::{NUM_ROWS, Row};


// One of the two sides. White starts on rows 0..=2 and moves towards higher rows.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    pub fn direction_forward(self) -> i8 {
        match self {
            Force::White => 1,
            Force::Black => -1,
        }
    }

    // The row where pawns of this force are promoted.
    pub fn last_row(self) -> Row {
        match self {
            Force::White => Row::from_zero_based(NUM_ROWS - 1),
            Force::Black => Row::from_zero_based(0),
        }
    }

    pub fn to_protocol_name(self) -> &'static str {
        match self {
            Force::White => "WHITE",
            Force::Black => "BLACK",
        }
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Force::White => write!(f, "white"),
            Force::Black => write!(f, "black"),
        }
    }
}
