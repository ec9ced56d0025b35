use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;
use log::info;

use checkers::server::Server;

use crate::server_config::ServerConfig;


pub fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting server with {:?}", config);
    let server = Arc::new(Server::new(config.server_options()));
    let server_view = Arc::clone(&server);
    ctrlc::set_handler(move || {
        info!("Shutting down with {} active game(s)", server_view.registry().num_active());
        std::process::exit(0);
    })
    .context("Failed to set Ctrl-C handler")?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .with_context(|| format!("Failed to bind to port {}", config.port))?;
    checkers::server_main::run(listener, server);
    anyhow::bail!("Unexpected end of TcpListener::incoming")
}
