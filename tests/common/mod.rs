// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use checkers::board::Board;
use checkers::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use checkers::force::Force;
use checkers::game::CheckersGame;
use checkers::grid::Grid;
use checkers::piece::{PieceOnBoard, piece_from_ascii};
use itertools::Itertools;


// Parses the format produced by `Board::render_as_ascii`: row 0 first, one char per cell,
// whitespace between cells is ignored.
#[allow(dead_code)]
pub fn parse_board(ascii: &str) -> Board {
    let rows = ascii.lines().map(str::trim).filter(|line| !line.is_empty()).collect_vec();
    assert_eq!(rows.len(), NUM_ROWS as usize, "{ascii}");
    let mut grid = Grid::new();
    for (row_idx, line) in rows.into_iter().enumerate() {
        let cells = line.chars().filter(|ch| !ch.is_whitespace()).collect_vec();
        assert_eq!(cells.len(), NUM_COLS as usize, "{line}");
        for (col_idx, ch) in cells.into_iter().enumerate() {
            let pos = Coord::new(
                Row::from_zero_based(row_idx as u8),
                Col::from_zero_based(col_idx as u8),
            );
            grid[pos] = match ch {
                '.' => None,
                _ => {
                    let (kind, force) = piece_from_ascii(ch)
                        .unwrap_or_else(|| panic!("unexpected cell {ch:?} in {line}"));
                    Some(PieceOnBoard::new(kind, force))
                }
            };
        }
    }
    Board::new_from_grid(grid)
}

#[allow(dead_code)]
pub fn game_from_ascii(ascii: &str, active_force: Force) -> CheckersGame {
    CheckersGame::new_with_board(parse_board(ascii), active_force)
}
