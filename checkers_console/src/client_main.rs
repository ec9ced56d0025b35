// Minimal line client: prints what the server says and forwards what the user types.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::thread;

use anyhow::Context;
use crossterm::style::{Color, Stylize};


pub struct ClientConfig {
    pub server_address: String,
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let stream = TcpStream::connect(&config.server_address)
        .with_context(|| format!("Cannot connect to {}", config.server_address))?;
    let reader = BufReader::new(stream.try_clone()?);
    // The server closes the connection when the game is over, so that's when the client exits.
    let printer = thread::spawn(move || {
        let exit_code = match print_server_lines(reader) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}", format!("Connection error: {err}").with(Color::Red));
                1
            }
        };
        println!("{}", "Connection closed by server.".with(Color::DarkGrey));
        std::process::exit(exit_code);
    });

    let mut writer = stream;
    for line in io::stdin().lock().lines() {
        // A write failure means the server is gone; the printer reports it.
        if writeln!(writer, "{}", line?.trim_end()).is_err() {
            break;
        }
    }
    let _ = writer.shutdown(Shutdown::Write);
    printer.join().map_err(|_| anyhow::anyhow!("Printer thread panicked"))?;
    Ok(())
}

fn print_server_lines(reader: impl BufRead) -> io::Result<()> {
    for line in reader.lines() {
        println!("{}", styled(&line?));
    }
    Ok(())
}

fn styled(line: &str) -> crossterm::style::StyledContent<&str> {
    let keyword = line.split_whitespace().next().unwrap_or("");
    match keyword {
        "START" => line.with(Color::Cyan),
        "YOUR_TURN" => line.with(Color::Yellow).bold(),
        "WAIT" => line.with(Color::DarkGrey),
        "OK" => line.with(Color::Green),
        "ERR" => line.with(Color::Red),
        "WIN" => line.with(Color::Green).bold(),
        "LOSE" => line.with(Color::Red).bold(),
        "DRAW" => line.with(Color::Magenta).bold(),
        _ => line.stylize(),
    }
}
