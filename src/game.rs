use crate::board::{Board, BoardStatus, MoveKind, TurnError, TurnMove};
use crate::coord::Coord;
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TurnOutcome {
    pub capture: Option<Coord>,
    pub status: BoardStatus,
}

// A single game: the board plus whose turn it is. One move per turn: the turn passes to the
// opponent after every applied move, captures included.
#[derive(Clone, Debug)]
pub struct CheckersGame {
    board: Board,
    active_force: Force,
    status: BoardStatus,
}

impl CheckersGame {
    pub fn new() -> Self { Self::new_with_board(Board::new(), Force::White) }

    pub fn new_with_board(board: Board, active_force: Force) -> Self {
        let status = board.evaluate_status();
        CheckersGame { board, active_force, status }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn status(&self) -> BoardStatus { self.status }
    pub fn is_active(&self) -> bool { !self.status.is_terminal() }

    // Either applies the move completely (move, promotion, status, turn) or leaves the game
    // unchanged.
    pub fn try_turn(&mut self, force: Force, mv: TurnMove) -> Result<TurnOutcome, TurnError> {
        if !self.is_active() {
            return Err(TurnError::GameOver);
        }
        if force != self.active_force {
            return Err(TurnError::WrongTurnOrder);
        }
        let move_kind = self.board.check_move(force, mv)?;
        let captured = self.board.apply_move(mv);
        let capture = match move_kind {
            MoveKind::Step => None,
            MoveKind::Capture(pos) => Some(pos),
        };
        assert_eq!(captured, capture.is_some());
        self.board.promote();
        self.status = self.board.evaluate_status();
        if self.is_active() {
            self.active_force = force.opponent();
        }
        Ok(TurnOutcome { capture, status: self.status })
    }
}
