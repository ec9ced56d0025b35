// Rules engine. Supports single steps and single jumps only: no multi-jump chains and no
// forced captures.

use std::fmt;

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::coord::{Col, Coord, NUM_ROWS, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{PieceKind, PieceOnBoard, piece_to_ascii};


// Number of rows filled with pawns on each side in the starting layout.
const STARTING_ROWS_PER_FORCE: u8 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TurnMove {
    pub from: Coord,
    pub to: Coord,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnError {
    PieceMissing,
    NotYourPiece,
    DestinationOccupied,
    ImpossibleTrajectory,
    NothingToCapture,
    WrongTurnOrder,
    GameOver,
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnError::PieceMissing => "no piece on the origin square",
            TurnError::NotYourPiece => "the piece belongs to the opponent",
            TurnError::DestinationOccupied => "the destination square is occupied",
            TurnError::ImpossibleTrajectory => "the piece cannot move like that",
            TurnError::NothingToCapture => "a jump must go over an opponent's piece",
            TurnError::WrongTurnOrder => "not your turn",
            TurnError::GameOver => "the game is over",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveKind {
    Step,
    Capture(Coord),
}

// Always framed from white's perspective.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl BoardStatus {
    pub fn is_terminal(self) -> bool { self != BoardStatus::Ongoing }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Grid,
}

impl Board {
    pub fn new() -> Self { Self::new_from_grid(starting_grid()) }
    pub fn new_from_grid(grid: Grid) -> Self { Board { grid } }

    pub fn grid(&self) -> &Grid { &self.grid }

    // Checks origin ownership, destination emptiness and move geometry. Does not look at whose
    // turn it is: that's the caller's business.
    pub fn check_move(&self, force: Force, mv: TurnMove) -> Result<MoveKind, TurnError> {
        let piece = self.grid[mv.from].ok_or(TurnError::PieceMissing)?;
        if piece.force != force {
            return Err(TurnError::NotYourPiece);
        }
        if self.grid[mv.to].is_some() {
            return Err(TurnError::DestinationOccupied);
        }
        let (d_row, d_col) = mv.to - mv.from;
        let forward = force.direction_forward();
        let is_step;
        let is_jump;
        match piece.kind {
            PieceKind::Pawn => {
                is_step = d_row == forward && d_col.abs() == 1;
                is_jump = d_row == 2 * forward && d_col.abs() == 2;
            }
            PieceKind::King => {
                is_step = d_row.abs() == 1 && d_col.abs() == 1;
                is_jump = d_row.abs() == 2 && d_col.abs() == 2;
            }
        }
        if is_step {
            Ok(MoveKind::Step)
        } else if is_jump {
            let mid = mv.from.midpoint(mv.to);
            match self.grid[mid] {
                Some(captured) if captured.force != force => Ok(MoveKind::Capture(mid)),
                _ => Err(TurnError::NothingToCapture),
            }
        } else {
            Err(TurnError::ImpossibleTrajectory)
        }
    }

    pub fn validate_move(&self, force: Force, mv: TurnMove) -> bool {
        self.check_move(force, mv).is_ok()
    }

    // Applies a move that has already been validated. Returns whether a piece was captured.
    pub fn apply_move(&mut self, mv: TurnMove) -> bool {
        let piece = self.grid[mv.from].take();
        self.grid[mv.to] = piece;
        let (d_row, _) = mv.to - mv.from;
        if d_row.abs() == 2 {
            self.grid[mv.from.midpoint(mv.to)] = None;
            true
        } else {
            false
        }
    }

    // Turns every pawn standing on its last row into a king. Idempotent.
    pub fn promote(&mut self) {
        for force in Force::iter() {
            let row = force.last_row();
            for col in Col::all() {
                let pos = Coord::new(row, col);
                if let Some(piece) = &mut self.grid[pos] {
                    if piece.force == force && piece.kind == PieceKind::Pawn {
                        piece.kind = PieceKind::King;
                    }
                }
            }
        }
    }

    pub fn piece_counts(&self) -> EnumMap<Force, usize> {
        let mut counts = enum_map! { _ => 0 };
        for (_, piece) in self.grid.pieces() {
            counts[piece.force] += 1;
        }
        counts
    }

    pub fn evaluate_status(&self) -> BoardStatus {
        let counts = self.piece_counts();
        match (counts[Force::White], counts[Force::Black]) {
            (0, 0) => BoardStatus::Draw,
            (0, _) => BoardStatus::BlackWins,
            (_, 0) => BoardStatus::WhiteWins,
            _ => BoardStatus::Ongoing,
        }
    }

    // Row 0 is printed first.
    pub fn render_as_ascii(&self) -> String {
        Row::all()
            .map(|row| {
                Col::all()
                    .map(|col| match self.grid[Coord::new(row, col)] {
                        Some(piece) => piece_to_ascii(piece.kind, piece.force),
                        None => '.',
                    })
                    .join(" ")
            })
            .join("\n")
    }
}

fn starting_grid() -> Grid {
    let mut grid = Grid::new();
    for pos in Coord::all().filter(|pos| pos.is_dark()) {
        let row = pos.row.to_zero_based();
        if row < STARTING_ROWS_PER_FORCE {
            grid[pos] = Some(PieceOnBoard::new(PieceKind::Pawn, Force::White));
        } else if row >= NUM_ROWS - STARTING_ROWS_PER_FORCE {
            grid[pos] = Some(PieceOnBoard::new(PieceKind::Pawn, Force::Black));
        }
    }
    grid
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mv(from: (u8, u8), to: (u8, u8)) -> TurnMove {
        TurnMove {
            from: Coord::from_zero_based(from.0, from.1),
            to: Coord::from_zero_based(to.0, to.1),
        }
    }

    fn board_with(pieces: &[((u8, u8), PieceKind, Force)]) -> Board {
        let mut grid = Grid::new();
        for &((row, col), kind, force) in pieces {
            grid[Coord::from_zero_based(row, col)] = Some(PieceOnBoard::new(kind, force));
        }
        Board::new_from_grid(grid)
    }

    #[test]
    fn starting_layout() {
        let board = Board::new();
        assert_eq!(board.piece_counts()[Force::White], 12);
        assert_eq!(board.piece_counts()[Force::Black], 12);
        assert!(board.grid().pieces().all(|(pos, _)| pos.is_dark()));
        assert_eq!(
            board.render_as_ascii(),
            [
                ". w . w . w . w",
                "w . w . w . w .",
                ". w . w . w . w",
                ". . . . . . . .",
                ". . . . . . . .",
                "b . b . b . b .",
                ". b . b . b . b",
                "b . b . b . b .",
            ]
            .join("\n")
        );
        assert_eq!(board.evaluate_status(), BoardStatus::Ongoing);
    }

    #[test]
    fn pawn_steps_forward_only() {
        use Force::*;
        use PieceKind::*;
        let board = board_with(&[((2, 3), Pawn, White), ((5, 4), Pawn, Black)]);
        assert!(board.validate_move(White, mv((2, 3), (3, 4))));
        assert!(board.validate_move(White, mv((2, 3), (3, 2))));
        assert_eq!(board.check_move(White, mv((2, 3), (1, 2))), Err(TurnError::ImpossibleTrajectory));
        assert_eq!(board.check_move(White, mv((2, 3), (3, 3))), Err(TurnError::ImpossibleTrajectory));
        assert!(board.validate_move(Black, mv((5, 4), (4, 3))));
        assert_eq!(board.check_move(Black, mv((5, 4), (6, 5))), Err(TurnError::ImpossibleTrajectory));
    }

    #[test]
    fn ownership_and_occupancy() {
        use Force::*;
        use PieceKind::*;
        let board = board_with(&[((2, 3), Pawn, White), ((3, 4), Pawn, White)]);
        assert_eq!(board.check_move(Black, mv((2, 3), (3, 2))), Err(TurnError::NotYourPiece));
        assert_eq!(board.check_move(White, mv((4, 3), (5, 2))), Err(TurnError::PieceMissing));
        assert_eq!(board.check_move(White, mv((2, 3), (3, 4))), Err(TurnError::DestinationOccupied));
    }

    #[test]
    fn pawn_capture_requires_opponent_in_the_middle() {
        use Force::*;
        use PieceKind::*;
        let board = board_with(&[
            ((4, 4), Pawn, Black),
            ((3, 3), Pawn, White),
            ((3, 5), Pawn, Black),
        ]);
        assert_eq!(
            board.check_move(Black, mv((4, 4), (2, 2))),
            Ok(MoveKind::Capture(Coord::from_zero_based(3, 3)))
        );
        assert_eq!(board.check_move(Black, mv((4, 4), (2, 6))), Err(TurnError::NothingToCapture));
        let empty_middle = board_with(&[((4, 4), Pawn, Black)]);
        assert_eq!(
            empty_middle.check_move(Black, mv((4, 4), (2, 2))),
            Err(TurnError::NothingToCapture)
        );
        // Backward jumps are for kings only.
        let backward = board_with(&[((4, 4), Pawn, Black), ((5, 5), Pawn, White)]);
        assert_eq!(backward.check_move(Black, mv((4, 4), (6, 6))), Err(TurnError::ImpossibleTrajectory));
    }

    #[test]
    fn king_moves_in_all_directions() {
        use Force::*;
        use PieceKind::*;
        let board = board_with(&[((4, 4), King, White), ((5, 3), King, Black), ((3, 3), Pawn, White)]);
        assert!(board.validate_move(White, mv((4, 4), (3, 5))));
        assert!(board.validate_move(White, mv((4, 4), (5, 5))));
        assert!(board.validate_move(White, mv((4, 4), (6, 2))));
        assert_eq!(board.check_move(White, mv((4, 4), (2, 2))), Err(TurnError::NothingToCapture));
        assert_eq!(board.check_move(White, mv((4, 4), (4, 6))), Err(TurnError::ImpossibleTrajectory));
        assert_eq!(board.check_move(White, mv((4, 4), (7, 7))), Err(TurnError::ImpossibleTrajectory));
    }

    #[test]
    fn apply_capture_clears_origin_and_middle() {
        use Force::*;
        use PieceKind::*;
        let mut board = board_with(&[((4, 4), Pawn, Black), ((3, 3), Pawn, White)]);
        assert!(board.apply_move(mv((4, 4), (2, 2))));
        assert_eq!(board, board_with(&[((2, 2), Pawn, Black)]));
    }

    #[test]
    fn apply_step_clears_origin_only() {
        use Force::*;
        use PieceKind::*;
        let mut board = board_with(&[((2, 3), Pawn, White), ((5, 4), Pawn, Black)]);
        assert!(!board.apply_move(mv((2, 3), (3, 4))));
        assert_eq!(board, board_with(&[((3, 4), Pawn, White), ((5, 4), Pawn, Black)]));
    }

    #[test]
    fn promotion_is_idempotent() {
        use Force::*;
        use PieceKind::*;
        let mut board = board_with(&[
            ((7, 0), Pawn, White),
            ((0, 5), Pawn, Black),
            ((0, 1), Pawn, White),
            ((7, 2), Pawn, Black),
        ]);
        board.promote();
        let expected = board_with(&[
            ((7, 0), King, White),
            ((0, 5), King, Black),
            ((0, 1), Pawn, White),
            ((7, 2), Pawn, Black),
        ]);
        assert_eq!(board, expected);
        board.promote();
        assert_eq!(board, expected);
    }

    #[test]
    fn status_from_piece_counts() {
        use Force::*;
        use PieceKind::*;
        assert_eq!(board_with(&[]).evaluate_status(), BoardStatus::Draw);
        assert_eq!(board_with(&[((0, 1), King, White)]).evaluate_status(), BoardStatus::WhiteWins);
        assert_eq!(board_with(&[((0, 1), Pawn, Black)]).evaluate_status(), BoardStatus::BlackWins);
        assert_eq!(
            board_with(&[((0, 1), Pawn, Black), ((2, 1), Pawn, White)]).evaluate_status(),
            BoardStatus::Ongoing
        );
    }
}
