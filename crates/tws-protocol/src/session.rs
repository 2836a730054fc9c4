//! The connection engine.
//!
//! [`Session`] owns the inbound frame buffer, the outbound encoder and the
//! transport. The owner of the socket drives it:
//!
//! 1. [`Session::connect`] once the byte stream is up (sends the client
//!    version).
//! 2. [`Session::on_data`] with every chunk read, of any size.
//! 3. [`Session::flush`] whenever the transport can take more bytes.
//!
//! `on_data` decodes every complete message in the buffer and stops at the
//! first incomplete one without moving the committed boundary. Events go
//! to the sink synchronously and in wire order.
//!
//! Anything that breaks trust in the field stream (an unknown message tag,
//! a field that does not parse, a server that is too old) is fatal: a
//! [`Event::ClientError`] is emitted, the connection is torn down, and
//! [`Event::ConnectionClosed`] follows. Reconnecting is up to the caller.

use bytes::Bytes;
use tracing::{debug, error, info, trace, warn};
use tws_core::error::{BAD_MESSAGE, NO_VALID_ID, SOCKET_EXCEPTION, UNKNOWN_ID, UPDATE_TWS};
use tws_core::{ClientError, Event, EventSink};

use crate::decoder::{self, FieldReader};
use crate::encoder::Encoder;
use crate::error::{ProtocolError, SessionError};
use crate::frame_buffer::FrameBuffer;
use crate::handshake::{self, Greeting};
use crate::transport::Transport;
use crate::wire_types::{CLIENT_VERSION, MIN_SERVER_VERSION};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    AwaitingServerGreeting,
    Connected,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub client_id: i32,

    /// Sent as the very first field.
    pub client_version: i32,

    /// Servers below this are refused.
    pub min_server_version: i32,

    /// Hold the start-session request back until the server reports a
    /// successful API verification.
    pub extra_auth: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            client_id: 0,
            client_version: CLIENT_VERSION,
            min_server_version: MIN_SERVER_VERSION,
            extra_auth: false,
        }
    }
}

pub struct Session<T: Transport> {
    transport: T,
    config: SessionConfig,
    state: ConnectionState,

    inbound: FrameBuffer,
    outbound: Encoder,

    server_version: i32,
    server_time: Bytes,

    /// No non-empty read seen since `connect`.
    first_read: bool,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Session {
            transport,
            config,
            state: ConnectionState::Disconnected,
            inbound: FrameBuffer::new(),
            outbound: Encoder::new(),
            server_version: 0,
            server_time: Bytes::new(),
            first_read: true,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Start the handshake on a freshly opened transport.
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if self.state != ConnectionState::Disconnected {
            return Err(SessionError::AlreadyConnected);
        }

        self.state = ConnectionState::AwaitingServerGreeting;
        self.first_read = true;
        handshake::encode_client_version(&mut self.outbound, self.config.client_version);
        debug!(client_version = self.config.client_version, "sent client version");

        if let Err(e) = self.outbound.flush(&mut self.transport) {
            warn!(error = %e, "failed to send client version");
            self.teardown();
            return Err(e.into());
        }
        Ok(())
    }

    /// Drop the connection and every piece of negotiated state.
    ///
    /// Emits nothing. Calling it on a disconnected session is a no-op
    /// apart from closing the transport again.
    pub fn disconnect(&mut self) {
        if self.state != ConnectionState::Disconnected {
            info!(server_version = self.server_version, "disconnecting");
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        self.transport.close();
        self.inbound.clear();
        self.outbound.clear();
        self.server_version = 0;
        self.server_time = Bytes::new();
        self.state = ConnectionState::Disconnected;
    }

    // ------------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------------

    /// Feed bytes read from the transport.
    ///
    /// Empty chunks and chunks arriving while disconnected are ignored.
    /// Returns an error only for fatal outcomes, after the sink has seen
    /// the client error and the connection-closed event.
    pub fn on_data<S: EventSink + ?Sized>(
        &mut self,
        bytes: &[u8],
        sink: &mut S,
    ) -> Result<(), SessionError> {
        if bytes.is_empty() {
            trace!("ignoring empty read");
            return Ok(());
        }
        if self.state == ConnectionState::Disconnected {
            warn!(len = bytes.len(), "dropping bytes received while disconnected");
            return Ok(());
        }

        self.inbound.append(bytes);

        if self.first_read {
            self.first_read = false;
            if self.inbound.strip_leading_delimiter() {
                debug!("stripped leading delimiter from first read");
            }
        }

        if self.state == ConnectionState::AwaitingServerGreeting {
            if self.inbound.is_empty() {
                return Ok(());
            }
            match handshake::read_greeting(&mut self.inbound) {
                Ok(greeting) => self.complete_handshake(greeting, sink)?,
                Err(ProtocolError::Incomplete) => {
                    self.inbound.rollback();
                    return Ok(());
                }
                Err(e) => {
                    let report = ClientError::with_detail(NO_VALID_ID, BAD_MESSAGE, &e);
                    return Err(self.fail(report, e.into(), sink));
                }
            }
        }

        self.drain(sink)
    }

    fn complete_handshake<S: EventSink + ?Sized>(
        &mut self,
        greeting: Greeting,
        sink: &mut S,
    ) -> Result<(), SessionError> {
        self.inbound.compact();

        if greeting.server_version < self.config.min_server_version {
            let err = SessionError::ServerTooOld {
                server_version: greeting.server_version,
                min_version: self.config.min_server_version,
            };
            return Err(self.fail(ClientError::new(NO_VALID_ID, UPDATE_TWS), err, sink));
        }

        self.server_version = greeting.server_version;
        self.server_time = greeting.server_time;
        self.state = ConnectionState::Connected;

        info!(
            server_version = self.server_version,
            server_time = %String::from_utf8_lossy(&self.server_time),
            "handshake complete"
        );

        let sent = handshake::encode_identification(
            &mut self.outbound,
            self.server_version,
            self.config.client_id,
            self.config.extra_auth,
        );
        if sent {
            debug!(client_id = self.config.client_id, "identified client");
            self.flush_or_fail(sink)?;
        }
        Ok(())
    }

    /// Decode every complete message in the buffer.
    fn drain<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SessionError> {
        while self.state == ConnectionState::Connected && !self.inbound.is_empty() {
            let mut reader = FieldReader::new(&mut self.inbound, self.server_version);
            match decoder::decode_message(&mut reader) {
                Ok(events) => {
                    self.inbound.compact();
                    for event in events {
                        if let Event::VerifyCompleted {
                            is_successful: true,
                            ..
                        } = event
                        {
                            handshake::encode_start_api(&mut self.outbound, self.config.client_id);
                            self.flush_or_fail(sink)?;
                        }
                        trace!(kind = event.kind(), "event");
                        sink.emit(event);
                    }
                }
                Err(ProtocolError::Incomplete) => {
                    self.inbound.rollback();
                    break;
                }
                Err(e) => {
                    let report = match e {
                        ProtocolError::UnknownMessageType(tag) => ClientError::new(tag, UNKNOWN_ID),
                        _ => ClientError::with_detail(NO_VALID_ID, BAD_MESSAGE, &e),
                    };
                    return Err(self.fail(report, e.into(), sink));
                }
            }
        }
        Ok(())
    }

    /// Report, tear down, announce the close; hand back the cause.
    fn fail<S: EventSink + ?Sized>(
        &mut self,
        report: ClientError,
        cause: SessionError,
        sink: &mut S,
    ) -> SessionError {
        error!(%report, "closing connection");
        sink.emit(Event::ClientError(report));
        self.teardown();
        sink.emit(Event::ConnectionClosed);
        cause
    }

    // ------------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------------

    /// The outbound encoder, for layering further requests.
    ///
    /// Bytes encoded here go out with the next [`Session::flush`].
    pub fn encoder(&mut self) -> &mut Encoder {
        &mut self.outbound
    }

    /// Write as much pending output as the transport takes.
    pub fn flush(&mut self) -> Result<usize, SessionError> {
        if self.state == ConnectionState::Disconnected {
            return Err(SessionError::NotConnected);
        }
        Ok(self.outbound.flush(&mut self.transport)?)
    }

    fn flush_or_fail<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SessionError> {
        match self.outbound.flush(&mut self.transport) {
            Ok(_) => Ok(()),
            Err(e) => {
                let report = ClientError::with_detail(NO_VALID_ID, SOCKET_EXCEPTION, &e);
                Err(self.fail(report, e.into(), sink))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Negotiated server version, 0 before the handshake.
    pub fn server_version(&self) -> i32 {
        self.server_version
    }

    pub fn server_time(&self) -> &Bytes {
        &self.server_time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Bytes received but not yet decoded.
    pub fn buffered(&self) -> &[u8] {
        self.inbound.unconsumed()
    }

    /// Bytes encoded but not yet written.
    pub fn pending_output(&self) -> &[u8] {
        self.outbound.pending()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
