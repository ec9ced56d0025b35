// Line-oriented transport: newline-terminated text lines, no other framing.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::ServerMessage;


pub const DEFAULT_PORT: u16 = 12345;
pub const DEFAULT_MAX_LINE_LEN: usize = 256;

#[derive(Debug)]
pub enum CommunicationError {
    Socket(io::Error),
    ConnectionClosed,
    LineTooLong,
    InvalidUtf8,
}

impl CommunicationError {
    // Recoverable errors are reported back to the peer; the rest end the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CommunicationError::LineTooLong | CommunicationError::InvalidUtf8 => true,
            CommunicationError::Socket(_) | CommunicationError::ConnectionClosed => false,
        }
    }
}

impl From<io::Error> for CommunicationError {
    fn from(err: io::Error) -> Self { CommunicationError::Socket(err) }
}

// What to do with a line that doesn't fit into `max_line_len - 1` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LineOverflow {
    // Keep the prefix that fits and silently drop the rest.
    #[default]
    Truncate,
    // Drop the whole line and report `LineTooLong`.
    Reject,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LineLimits {
    pub max_line_len: usize,
    pub overflow: LineOverflow,
}

impl Default for LineLimits {
    fn default() -> Self {
        LineLimits {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            overflow: LineOverflow::default(),
        }
    }
}

// A player's connection as seen by the game logic. Dropping it closes the connection.
pub trait Connection: Send + 'static {
    // Blocks until a full line arrives. The line terminator is stripped.
    fn read_line(&mut self) -> Result<String, CommunicationError>;
    fn write_line(&mut self, line: &str) -> Result<(), CommunicationError>;
    // Human-readable peer identity for logs.
    fn describe(&self) -> String;

    fn send(&mut self, message: &ServerMessage) -> Result<(), CommunicationError> {
        self.write_line(&message.to_string())
    }
}

pub struct TcpConnection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer_addr: String,
    limits: LineLimits,
}

impl TcpConnection {
    pub fn new(
        stream: TcpStream, limits: LineLimits, read_timeout: Option<Duration>,
    ) -> io::Result<Self> {
        let peer_addr = stream.peer_addr().map_or_else(|_| "unknown".to_owned(), |a| a.to_string());
        stream.set_read_timeout(read_timeout)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(TcpConnection { reader, writer: stream, peer_addr, limits })
    }
}

impl Connection for TcpConnection {
    fn read_line(&mut self) -> Result<String, CommunicationError> {
        read_line_bounded(&mut self.reader, self.limits)
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommunicationError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn describe(&self) -> String { self.peer_addr.clone() }
}

impl Drop for TcpConnection {
    fn drop(&mut self) {
        // Wake up anybody blocked on the other clone of the stream. Errors are irrelevant here:
        // the peer may be gone already.
        let _ = self.writer.shutdown(std::net::Shutdown::Both);
    }
}

// Reads one line keeping at most `max_line_len - 1` bytes of it. The remainder of an oversized
// line is always consumed so that the next read starts at a line boundary.
pub fn read_line_bounded(
    reader: &mut impl BufRead, limits: LineLimits,
) -> Result<String, CommunicationError> {
    let keep = limits.max_line_len.saturating_sub(1);
    let mut buf = Vec::new();
    let n = reader.by_ref().take(keep as u64).read_until(b'\n', &mut buf)?;
    if n == 0 && keep > 0 {
        return Err(CommunicationError::ConnectionClosed);
    }
    let mut overflow = false;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else {
        // Either the line did not fit or the stream ended without a terminator.
        let skipped = skip_rest_of_line(reader)?;
        overflow = skipped > 0;
        if keep == 0 && skipped == 0 {
            return Err(CommunicationError::ConnectionClosed);
        }
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if overflow {
        if limits.overflow == LineOverflow::Reject {
            return Err(CommunicationError::LineTooLong);
        }
        drop_split_char(&mut buf);
    }
    String::from_utf8(buf).map_err(|_| CommunicationError::InvalidUtf8)
}

// The cut may land inside a multi-byte character. Drops its leading bytes, but leaves any
// other invalid UTF-8 in place.
fn drop_split_char(buf: &mut Vec<u8>) {
    if let Err(err) = std::str::from_utf8(buf) {
        if err.error_len().is_none() {
            buf.truncate(err.valid_up_to());
        }
    }
}

// Returns the number of bytes skipped, not counting the terminator.
fn skip_rest_of_line(reader: &mut impl BufRead) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(skipped + pos);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped += len;
            }
        }
    }
}
