#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod server_config;
mod server_main;

use std::path::PathBuf;

use clap::{Command, arg};

use crate::server_config::ServerConfig;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Checkers")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Networked checkers client/server console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("server")
                .about("Run as server")
                .arg(
                    arg!(--"config" <config_file> "Path to the configuration file: yaml-serialized ServerConfig.")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"port" <port> "TCP port to listen on. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(
            Command::new("client")
                .about("Run as client")
                .arg(arg!(<server_address> "Server address, e.g. 127.0.0.1:12345")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("server", sub_matches)) => {
            let mut config = match sub_matches.get_one::<PathBuf>("config") {
                Some(path) => ServerConfig::read_file(path)?,
                None => ServerConfig::default(),
            };
            if let Some(&port) = sub_matches.get_one::<u16>("port") {
                config.port = port;
            }
            server_main::run(config)
        }
        Some(("client", sub_matches)) => client_main::run(client_main::ClientConfig {
            server_address: sub_matches.get_one::<String>("server_address").unwrap().clone(),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
