// Accept loop. Connections are handed to the matchmaker on this thread, in accept order; only
// games get threads of their own, spawned by `Server::handle_connection`.

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

use log::{info, warn};

use crate::network::{Connection, TcpConnection};
use crate::server::{ConnectionOutcome, Server};


pub fn run(listener: TcpListener, server: Arc<Server<TcpConnection>>) {
    match listener.local_addr() {
        Ok(addr) => info!("Listening to connections on {}...", addr),
        Err(err) => warn!("Listening to connections on unknown address: {}", err),
    }
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle_stream(&server, stream),
            Err(err) => {
                warn!("Cannot establish connection: {}", err);
            }
        }
    }
}

// Must not block: pairing order is the order in which this is called.
fn handle_stream(server: &Server<TcpConnection>, stream: TcpStream) {
    let options = server.options();
    let conn = match TcpConnection::new(stream, options.line_limits, options.read_timeout) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("Cannot set up connection: {}", err);
            return;
        }
    };
    let peer = conn.describe();
    info!("Client connected from {}", peer);
    match server.handle_connection(conn) {
        Ok(ConnectionOutcome::Waiting) => info!("{} is waiting for an opponent", peer),
        Ok(ConnectionOutcome::SessionStarted(id, _)) => info!("{} joined game {}", peer, id),
        Ok(ConnectionOutcome::Rejected) => info!("{} was rejected: server is full", peer),
        Err(err) => warn!("Cannot start a game for {}: {}", peer, err),
    }
}
