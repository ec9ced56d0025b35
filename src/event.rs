// Text protocol. One command or message per line, space-separated tokens.

use std::fmt;

use itertools::Itertools;

use crate::board::TurnMove;
use crate::coord::Coord;
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClientCommand {
    // MOVE <from_row> <from_col> <to_row> <to_col>
    Move(TurnMove),
    // QUIT
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CommandError {
    Malformed,
    OffBoard,
    Unknown(String),
}

impl ClientCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("MOVE") => {
                let Some((from_row, from_col, to_row, to_col)) = tokens.collect_tuple() else {
                    return Err(CommandError::Malformed);
                };
                let [from_row, from_col, to_row, to_col] = [from_row, from_col, to_row, to_col]
                    .map(|token| token.parse::<i64>().map_err(|_| CommandError::Malformed));
                let from = Coord::try_new(from_row?, from_col?);
                let to = Coord::try_new(to_row?, to_col?);
                match (from, to) {
                    (Some(from), Some(to)) => Ok(ClientCommand::Move(TurnMove { from, to })),
                    _ => Err(CommandError::OffBoard),
                }
            }
            Some("QUIT") => Ok(ClientCommand::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_owned())),
        }
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Move(TurnMove { from, to }) => write!(
                f,
                "MOVE {} {} {} {}",
                from.row.to_zero_based(),
                from.col.to_zero_based(),
                to.row.to_zero_based(),
                to.col.to_zero_based()
            ),
            ClientCommand::Quit => write!(f, "QUIT"),
        }
    }
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ServerMessage {
    Start(Force),
    Wait,
    YourTurn,
    Ok,
    Error(String),
    Win(Option<String>),
    Lose,
    Draw,
}

impl ServerMessage {
    pub fn error(reason: impl Into<String>) -> Self { ServerMessage::Error(reason.into()) }
}

// Produces the exact wire line, without the line terminator.
impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::Start(force) => write!(f, "START {}", force.to_protocol_name()),
            ServerMessage::Wait => write!(f, "WAIT"),
            ServerMessage::YourTurn => write!(f, "YOUR_TURN"),
            ServerMessage::Ok => write!(f, "OK"),
            ServerMessage::Error(reason) => write!(f, "ERR {reason}"),
            ServerMessage::Win(None) => write!(f, "WIN"),
            ServerMessage::Win(Some(reason)) => write!(f, "WIN {reason}"),
            ServerMessage::Lose => write!(f, "LOSE"),
            ServerMessage::Draw => write!(f, "DRAW"),
        }
    }
}

pub const REASON_INVALID_MOVE: &str = "Invalid move";
pub const REASON_MALFORMED_MOVE: &str = "Malformed MOVE.";
pub const REASON_OFF_BOARD: &str = "Coordinates out of board.";
pub const REASON_UNKNOWN_COMMAND: &str = "Unknown command.";
pub const REASON_LINE_TOO_LONG: &str = "Line too long.";
pub const REASON_INVALID_UTF8: &str = "Line is not valid UTF-8.";
pub const REASON_SERVER_FULL: &str = "Server full.";
pub const REASON_OPPONENT_DISCONNECTED: &str = "Opponent disconnected.";
pub const REASON_OPPONENT_RESIGNED: &str = "Opponent resigned.";


#[cfg(test)]
mod tests {
    use super::*;

    fn coord(row: u8, col: u8) -> Coord { Coord::from_zero_based(row, col) }

    #[test]
    fn parse_move() {
        assert_eq!(
            ClientCommand::parse("MOVE 2 3 3 4"),
            Ok(ClientCommand::Move(TurnMove { from: coord(2, 3), to: coord(3, 4) }))
        );
        assert_eq!(
            ClientCommand::parse("  MOVE   5 0\t4 1\r"),
            Ok(ClientCommand::Move(TurnMove { from: coord(5, 0), to: coord(4, 1) }))
        );
    }

    #[test]
    fn parse_malformed_move() {
        assert_eq!(ClientCommand::parse("MOVE"), Err(CommandError::Malformed));
        assert_eq!(ClientCommand::parse("MOVE 1 2 3"), Err(CommandError::Malformed));
        assert_eq!(ClientCommand::parse("MOVE 1 2 3 4 5"), Err(CommandError::Malformed));
        assert_eq!(ClientCommand::parse("MOVE a 2 3 4"), Err(CommandError::Malformed));
        assert_eq!(ClientCommand::parse("MOVE 1 2 3 8"), Err(CommandError::OffBoard));
        assert_eq!(ClientCommand::parse("MOVE -1 2 3 4"), Err(CommandError::OffBoard));
    }

    #[test]
    fn parse_other_commands() {
        assert_eq!(ClientCommand::parse("QUIT"), Ok(ClientCommand::Quit));
        assert_eq!(ClientCommand::parse("QUIT now"), Ok(ClientCommand::Quit));
        assert_eq!(ClientCommand::parse("quit"), Err(CommandError::Unknown("quit".to_owned())));
        assert_eq!(ClientCommand::parse("MOVES 1 2 3 4"), Err(CommandError::Unknown("MOVES 1 2 3 4".to_owned())));
        assert_eq!(ClientCommand::parse(""), Err(CommandError::Unknown(String::new())));
    }

    #[test]
    fn command_display_is_parseable() {
        let cmd = ClientCommand::Move(TurnMove { from: coord(4, 4), to: coord(2, 2) });
        assert_eq!(cmd.to_string(), "MOVE 4 4 2 2");
        assert_eq!(ClientCommand::parse(&cmd.to_string()), Ok(cmd));
    }

    #[test]
    fn server_message_wire_format() {
        assert_eq!(ServerMessage::Start(Force::White).to_string(), "START WHITE");
        assert_eq!(ServerMessage::Start(Force::Black).to_string(), "START BLACK");
        assert_eq!(ServerMessage::YourTurn.to_string(), "YOUR_TURN");
        assert_eq!(ServerMessage::error(REASON_UNKNOWN_COMMAND).to_string(), "ERR Unknown command.");
        assert_eq!(ServerMessage::Win(None).to_string(), "WIN");
        assert_eq!(
            ServerMessage::Win(Some(REASON_OPPONENT_RESIGNED.to_owned())).to_string(),
            "WIN Opponent resigned."
        );
    }
}
