//! tws-protocol
//!
//! Synchronous engine for the TWS wire protocol:
//! - `wire_types`: delimiter, version thresholds, message tags
//! - `field_codec`: typed value <-> field text
//! - `frame_buffer`: inbound arena with consumed / pending cursors
//! - `encoder`: outbound buffer with partial-write-safe flush
//! - `schema` + `decoder`: versioned message decoding into events
//! - `handshake` + `session`: connection state machine
//!
//! The engine does no I/O of its own. Whoever owns the socket writes
//! through a [`Transport`] and feeds received bytes to
//! [`Session::on_data`].

pub mod wire_types;
pub mod error;
pub mod field_codec;
pub mod frame_buffer;
pub mod encoder;
pub mod transport;
pub mod schema;
pub mod decoder;
pub mod handshake;
pub mod session;

pub use wire_types::{
    server_version, IncomingType, CLIENT_VERSION, DELIMITER, MIN_SERVER_VERSION, NO_REQUEST_ID,
    START_API, START_API_VERSION,
};

pub use error::{ProtocolError, SessionError};
pub use frame_buffer::FrameBuffer;
pub use encoder::Encoder;
pub use transport::Transport;
pub use session::{ConnectionState, Session, SessionConfig};
