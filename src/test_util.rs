// Test utilities shared by unit tests and the "tests" folder.

use std::sync::mpsc;
use std::time::Duration;

use crate::network::{CommunicationError, Connection};


// Generous: only reached when a test is about to fail anyway.
const RECV_TIMEOUT: Duration = Duration::from_secs(10);

// Server side of an in-memory connection.
pub struct ChannelConnection {
    name: String,
    incoming: mpsc::Receiver<String>,
    outgoing: mpsc::Sender<String>,
}

// Client side of an in-memory connection, driven by the test.
pub struct RemotePeer {
    name: String,
    incoming: Option<mpsc::Receiver<String>>,
    outgoing: Option<mpsc::Sender<String>>,
}

pub fn channel_connection(name: &str) -> (ChannelConnection, RemotePeer) {
    let (client_tx, server_rx) = mpsc::channel();
    let (server_tx, client_rx) = mpsc::channel();
    let conn = ChannelConnection {
        name: name.to_owned(),
        incoming: server_rx,
        outgoing: server_tx,
    };
    let peer = RemotePeer {
        name: name.to_owned(),
        incoming: Some(client_rx),
        outgoing: Some(client_tx),
    };
    (conn, peer)
}

impl Connection for ChannelConnection {
    fn read_line(&mut self) -> Result<String, CommunicationError> {
        self.incoming.recv().map_err(|_| CommunicationError::ConnectionClosed)
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommunicationError> {
        self.outgoing
            .send(line.to_owned())
            .map_err(|_| CommunicationError::ConnectionClosed)
    }

    fn describe(&self) -> String { self.name.clone() }
}

impl RemotePeer {
    pub fn send(&mut self, line: &str) {
        let outgoing = self.outgoing.as_ref().expect("peer is disconnected");
        // The server may have hung up already. Tests observe that through `recv`.
        let _ = outgoing.send(line.to_owned());
    }

    // Returns `None` if the server closed the connection.
    pub fn recv(&mut self) -> Option<String> {
        let incoming = self.incoming.as_ref().expect("peer is disconnected");
        match incoming.recv_timeout(RECV_TIMEOUT) {
            Ok(line) => Some(line),
            Err(mpsc::RecvTimeoutError::Disconnected) => None,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                panic!("{}: timed out waiting for a server message", self.name)
            }
        }
    }

    #[track_caller]
    pub fn expect(&mut self, lines: &[&str]) {
        for &expected in lines {
            let actual = self.recv();
            assert_eq!(actual.as_deref(), Some(expected), "{}: unexpected server message", self.name);
        }
    }

    pub fn recv_until_closed(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.recv() {
            lines.push(line);
        }
        lines
    }

    pub fn is_closed(&mut self) -> bool { self.recv().is_none() }

    // Drops both directions, like a client that closes its socket.
    pub fn disconnect(&mut self) {
        self.incoming = None;
        self.outgoing = None;
    }
}
