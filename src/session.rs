use std::sync::Arc;

use enum_map::{EnumMap, enum_map};
use log::{debug, info, warn};
use scopeguard::defer;
use strum::IntoEnumIterator;

use crate::board::BoardStatus;
use crate::event::*;
use crate::force::Force;
use crate::network::{CommunicationError, Connection};
use crate::registry::{SessionId, SessionRegistry};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionOutcome {
    // The game reached a terminal position. Never `Ongoing`.
    Finished(BoardStatus),
    // The given force sent QUIT.
    Resigned(Force),
    // Reading from or writing to the given force failed.
    Disconnected(Force),
}

// One game between two paired connections. Runs on its own thread from START to the final
// message, then closes both connections and frees the registry slot.
//
// There is no timeout on reads unless the connections impose one: a silent player stalls the
// session until they disconnect.
pub struct GameSession<C: Connection> {
    id: SessionId,
    registry: Arc<SessionRegistry>,
    peers: EnumMap<Force, C>,
}

impl<C: Connection> GameSession<C> {
    pub fn new(id: SessionId, registry: Arc<SessionRegistry>, white: C, black: C) -> Self {
        let peers = EnumMap::from_array([white, black]);
        GameSession { id, registry, peers }
    }

    pub fn run(mut self) -> SessionOutcome {
        let id = self.id;
        let registry = Arc::clone(&self.registry);
        defer! { registry.release(id); }
        info!(
            "Session {} started: {} (white) vs {} (black)",
            id,
            self.peers[Force::White].describe(),
            self.peers[Force::Black].describe()
        );
        let outcome = self.play();
        info!("Session {} is over: {:?}", id, outcome);
        // Dropping the session closes both connections before the slot is released.
        drop(self);
        outcome
    }

    fn play(&mut self) -> SessionOutcome {
        for force in Force::iter() {
            if self.send(force, ServerMessage::Start(force)).is_err() {
                return self.forfeit_by_disconnect(force);
            }
        }
        loop {
            let mover = self.registry.slot(self.id).game.active_force();
            let waiter = mover.opponent();
            if self.send(waiter, ServerMessage::Wait).is_err() {
                return self.forfeit_by_disconnect(waiter);
            }
            if self.send(mover, ServerMessage::YourTurn).is_err() {
                return self.forfeit_by_disconnect(mover);
            }
            let line = match self.peers[mover].read_line() {
                Ok(line) => line,
                Err(err) if err.is_recoverable() => {
                    let reason = match err {
                        CommunicationError::LineTooLong => REASON_LINE_TOO_LONG,
                        _ => REASON_INVALID_UTF8,
                    };
                    if self.send(mover, ServerMessage::error(reason)).is_err() {
                        return self.forfeit_by_disconnect(mover);
                    }
                    continue;
                }
                Err(err) => {
                    info!("Session {}: {} player is gone: {:?}", self.id, mover, err);
                    return self.forfeit_by_disconnect(mover);
                }
            };
            debug!("Session {}: {} says {:?}", self.id, mover, line);
            let reply = match ClientCommand::parse(&line) {
                Ok(ClientCommand::Quit) => return self.forfeit_by_resignation(mover),
                Ok(ClientCommand::Move(mv)) => {
                    let mut slot = self.registry.slot(self.id);
                    match slot.game.try_turn(mover, mv) {
                        Ok(outcome) => {
                            debug!("Session {}:\n{}", self.id, slot.game.board().render_as_ascii());
                            if outcome.status.is_terminal() {
                                drop(slot);
                                self.announce_result(outcome.status);
                                return SessionOutcome::Finished(outcome.status);
                            }
                            ServerMessage::Ok
                        }
                        Err(err) => ServerMessage::error(format!("{REASON_INVALID_MOVE}: {err}.")),
                    }
                }
                Err(CommandError::Malformed) => ServerMessage::error(REASON_MALFORMED_MOVE),
                Err(CommandError::OffBoard) => ServerMessage::error(REASON_OFF_BOARD),
                Err(CommandError::Unknown(_)) => ServerMessage::error(REASON_UNKNOWN_COMMAND),
            };
            if self.send(mover, reply).is_err() {
                return self.forfeit_by_disconnect(mover);
            }
        }
    }

    fn send(&mut self, force: Force, message: ServerMessage) -> Result<(), CommunicationError> {
        let result = self.peers[force].send(&message);
        if let Err(ref err) = result {
            warn!("Session {}: cannot send {:?} to {}: {:?}", self.id, message, force, err);
        }
        result
    }

    // Status is framed from white's perspective; map it to each side.
    fn announce_result(&mut self, status: BoardStatus) {
        let messages = match status {
            BoardStatus::WhiteWins => enum_map! {
                Force::White => ServerMessage::Win(None),
                Force::Black => ServerMessage::Lose,
            },
            BoardStatus::BlackWins => enum_map! {
                Force::White => ServerMessage::Lose,
                Force::Black => ServerMessage::Win(None),
            },
            BoardStatus::Draw => enum_map! { _ => ServerMessage::Draw },
            BoardStatus::Ongoing => unreachable!("Session {}: announcing an ongoing game", self.id),
        };
        for (force, message) in messages {
            // The game is over either way.
            let _ = self.send(force, message);
        }
    }

    fn forfeit_by_disconnect(&mut self, lost: Force) -> SessionOutcome {
        let reason = REASON_OPPONENT_DISCONNECTED.to_owned();
        let _ = self.send(lost.opponent(), ServerMessage::Win(Some(reason)));
        SessionOutcome::Disconnected(lost)
    }

    fn forfeit_by_resignation(&mut self, lost: Force) -> SessionOutcome {
        let reason = REASON_OPPONENT_RESIGNED.to_owned();
        let _ = self.send(lost.opponent(), ServerMessage::Win(Some(reason)));
        SessionOutcome::Resigned(lost)
    }
}
