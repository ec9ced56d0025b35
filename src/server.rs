// Glue between freshly accepted connections and game sessions.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::event::{REASON_SERVER_FULL, ServerMessage};
use crate::matchmaker::{Matchmaker, MatchmakingResult};
use crate::network::{Connection, LineLimits};
use crate::registry::{DEFAULT_MAX_SESSIONS, SessionId, SessionRegistry};
use crate::session::{GameSession, SessionOutcome};


#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub max_sessions: usize,
    pub line_limits: LineLimits,
    // If set, a player who stays silent for this long is treated as disconnected.
    pub read_timeout: Option<Duration>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        ServerOptions {
            max_sessions: DEFAULT_MAX_SESSIONS,
            line_limits: LineLimits::default(),
            read_timeout: None,
        }
    }
}

#[derive(Debug)]
pub enum ConnectionOutcome {
    Waiting,
    SessionStarted(SessionId, thread::JoinHandle<SessionOutcome>),
    // Both players were told that the server is full and disconnected.
    Rejected,
}

pub struct Server<C: Connection> {
    options: ServerOptions,
    registry: Arc<SessionRegistry>,
    matchmaker: Matchmaker<C>,
}

impl<C: Connection> Server<C> {
    pub fn new(options: ServerOptions) -> Self {
        Server {
            options,
            registry: Arc::new(SessionRegistry::new(options.max_sessions)),
            matchmaker: Matchmaker::new(),
        }
    }

    pub fn options(&self) -> &ServerOptions { &self.options }
    pub fn registry(&self) -> &Arc<SessionRegistry> { &self.registry }
    pub fn has_waiting(&self) -> bool { self.matchmaker.has_waiting() }

    pub fn handle_connection(&self, conn: C) -> io::Result<ConnectionOutcome> {
        let (white, black) = match self.matchmaker.offer(conn) {
            MatchmakingResult::Waiting => return Ok(ConnectionOutcome::Waiting),
            MatchmakingResult::Paired(white, black) => (white, black),
        };
        let id = match self.registry.allocate() {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "Rejecting {} and {}: {}",
                    white.describe(),
                    black.describe(),
                    err
                );
                reject(white);
                reject(black);
                return Ok(ConnectionOutcome::Rejected);
            }
        };
        info!("Pairing {} (white) with {} (black) in game {}", white.describe(), black.describe(), id);
        let session = GameSession::new(id, Arc::clone(&self.registry), white, black);
        let spawned = thread::Builder::new()
            .name(format!("game-{}", id.index()))
            .spawn(move || session.run());
        match spawned {
            Ok(handle) => Ok(ConnectionOutcome::SessionStarted(id, handle)),
            Err(err) => {
                // The session (and both connections with it) was dropped inside `spawn`.
                self.registry.release(id);
                Err(err)
            }
        }
    }
}

fn reject<C: Connection>(mut conn: C) {
    // The connection is closed right after, so a failure here changes nothing.
    let _ = conn.send(&ServerMessage::error(REASON_SERVER_FULL));
}
