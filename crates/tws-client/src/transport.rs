// crates/tws-client/src/transport.rs

use std::io;
use std::sync::Arc;

use tokio::net::TcpStream;
use tracing::debug;
use tws_protocol::Transport;

/// Non-blocking writes into a tokio socket shared with the read loop.
///
/// `send` never waits: if the socket buffer is full it accepts zero bytes
/// and the session keeps the remainder queued until the driver sees the
/// socket writable again. The socket itself closes when the driver drops
/// its last handle; `close` only refuses further writes.
pub struct TokioTransport {
    stream: Arc<TcpStream>,
    closed: bool,
}

impl TokioTransport {
    pub fn new(stream: Arc<TcpStream>) -> Self {
        TokioTransport {
            stream,
            closed: false,
        }
    }
}

impl Transport for TokioTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "transport closed"));
        }
        match self.stream.try_write(bytes) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            debug!("transport closed");
            self.closed = true;
        }
    }
}
