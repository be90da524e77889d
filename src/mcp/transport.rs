//! Newline-delimited JSON transport for the MCP server.
//!
//! - One UTF-8 JSON-RPC message per line, no embedded newlines
//! - Requests arrive on the reader (stdin in production)
//! - Replies go to the writer (stdout in production)
//! - Logging goes to stderr and never touches the writer

use std::io;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Line transport over any async reader/writer pair.
#[derive(Debug)]
pub struct Transport<R, W> {
    reader: R,
    writer: W,
}

/// Transport bound to the process's stdin and stdout.
pub type StdioTransport = Transport<BufReader<Stdin>, Stdout>;

impl StdioTransport {
    /// Creates a transport on stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::stdio()
    }
}

impl<R, W> Transport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a transport over `reader` and `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next line without its terminator.
    ///
    /// Returns `None` once the reader is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Serialises `message` as one line and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_message<T: Serialize>(&mut self, message: &T) -> io::Result<()> {
        let json = serde_json::to_string(message).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug_assert!(!json.contains('\n'), "JSON message must not contain embedded newlines");

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
