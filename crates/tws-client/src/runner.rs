// crates/tws-client/src/runner.rs

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::BytesMut;
use tokio::net::TcpStream;
use tracing::{debug, error, info, warn};
use tws_core::error::{NO_VALID_ID, SOCKET_EXCEPTION};
use tws_core::{ClientError, Event, EventSink};
use tws_protocol::{ConnectionState, Session};

use crate::config::Config;
use crate::transport::TokioTransport;
use crate::types::{ChannelSink, EventTx};

const READ_CHUNK: usize = 64 * 1024;

/// One live TCP connection driving a protocol session.
pub struct Client {
    session: Session<TokioTransport>,
    stream: Arc<TcpStream>,
    sink: ChannelSink,
    read_buf: BytesMut,
}

impl Client {
    /// Open the socket and send the client version.
    pub async fn connect(config: &Config, events: EventTx) -> Result<Self> {
        let addr = config.socket_addr_string();
        info!("Connecting to {}...", addr);

        let stream = TcpStream::connect(&addr)
            .await
            .with_context(|| format!("connecting to {addr}"))?;
        stream.set_nodelay(true)?;
        let stream = Arc::new(stream);

        let transport = TokioTransport::new(Arc::clone(&stream));
        let mut session = Session::new(transport, config.session_config());
        session.connect()?;
        info!(client_id = config.client_id, "Connected, awaiting server greeting");

        Ok(Client {
            session,
            stream,
            sink: ChannelSink::new(events),
            read_buf: BytesMut::with_capacity(READ_CHUNK),
        })
    }

    /// Pump bytes both ways until the connection ends.
    ///
    /// Returns `Ok` when the server closes the connection and an error for
    /// anything fatal. Either way the sink has seen
    /// [`Event::ConnectionClosed`] by the time this returns.
    pub async fn run(mut self) -> Result<()> {
        loop {
            if self.session.state() == ConnectionState::Disconnected {
                return Ok(());
            }
            let want_write = !self.session.pending_output().is_empty();

            tokio::select! {
                ready = self.stream.readable() => {
                    self.check_ready(ready)?;
                    self.on_readable()?;
                }
                ready = self.stream.writable(), if want_write => {
                    self.check_ready(ready)?;
                    self.on_writable()?;
                }
            }
        }
    }

    /// A failed readiness wait ends the connection like a failed read.
    fn check_ready(&mut self, ready: io::Result<()>) -> Result<()> {
        ready.map_err(|e| {
            error!("Socket error: {}", e);
            self.report_socket_error(&e);
            e.into()
        })
    }

    fn on_readable(&mut self) -> Result<()> {
        self.read_buf.clear();
        self.read_buf.reserve(READ_CHUNK);
        match self.stream.try_read_buf(&mut self.read_buf) {
            Ok(0) => {
                info!("Server closed the connection");
                self.close();
                Ok(())
            }
            Ok(n) => {
                debug!(bytes = n, "read");
                self.session.on_data(&self.read_buf, &mut self.sink)?;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(()),
            Err(e) => {
                error!("Read error: {}", e);
                self.report_socket_error(&e);
                Err(e.into())
            }
        }
    }

    fn on_writable(&mut self) -> Result<()> {
        match self.session.flush() {
            Ok(n) => {
                debug!(bytes = n, "flushed");
                Ok(())
            }
            Err(e) => {
                warn!("Write error: {}", e);
                self.report_socket_error(&e);
                Err(e.into())
            }
        }
    }

    fn report_socket_error(&mut self, cause: &dyn std::fmt::Display) {
        self.sink.emit(Event::ClientError(ClientError::with_detail(
            NO_VALID_ID,
            SOCKET_EXCEPTION,
            cause,
        )));
        self.close();
    }

    fn close(&mut self) {
        self.session.disconnect();
        self.sink.emit(Event::ConnectionClosed);
    }
}

/// Connect and run until the connection ends.
pub async fn run(config: Config, events: EventTx) -> Result<()> {
    Client::connect(&config, events).await?.run().await
}
