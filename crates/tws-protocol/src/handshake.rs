//! Version negotiation.
//!
//! ```text
//! client                      server
//!   | -- CLIENT_VERSION -------> |
//!   | <------ server_version --- |
//!   | <------ server_time ------ |   (server_version >= 20)
//!   | -- client_id ------------> |   (server_version < 70)
//!   | -- 71, 1, client_id -----> |   (server_version >= 70, no extra auth)
//! ```
//!
//! These helpers only read and encode fields; the session owns the state
//! transitions and decides what is fatal.

use bytes::Bytes;

use crate::encoder::Encoder;
use crate::error::ProtocolError;
use crate::field_codec;
use crate::frame_buffer::FrameBuffer;
use crate::wire_types::{server_version, START_API, START_API_VERSION};

/// What the server says first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub server_version: i32,

    /// Server wall-clock time, empty for servers older than
    /// [`server_version::TIME`].
    pub server_time: Bytes,
}

/// Scan the greeting fields from the start of the buffer.
pub fn read_greeting(buf: &mut FrameBuffer) -> Result<Greeting, ProtocolError> {
    let server_version = field_codec::decode_int(buf.next_field()?)?;
    let server_time = if server_version >= server_version::TIME {
        field_codec::decode_string(buf.next_field()?)
    } else {
        Bytes::new()
    };
    Ok(Greeting {
        server_version,
        server_time,
    })
}

/// The first field a client sends.
pub fn encode_client_version(enc: &mut Encoder, client_version: i32) {
    enc.encode_int(client_version);
}

/// The start-session request.
pub fn encode_start_api(enc: &mut Encoder, client_id: i32) {
    enc.encode_int(START_API)
        .encode_int(START_API_VERSION)
        .encode_int(client_id);
}

/// Identify the client once the greeting is in.
///
/// Returns `false` if nothing was encoded: servers too old to take a
/// client id, or extended authentication holding the start request back
/// until verification completes.
pub fn encode_identification(
    enc: &mut Encoder,
    server_version: i32,
    client_id: i32,
    extra_auth: bool,
) -> bool {
    if server_version < server_version::CLIENT_ID {
        return false;
    }
    if server_version < server_version::LINKING {
        enc.encode_int(client_id);
        true
    } else if !extra_auth {
        encode_start_api(enc, client_id);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_servers_send_no_time() {
        let mut buf = FrameBuffer::new();
        buf.append(b"19\0");
        let g = read_greeting(&mut buf).unwrap();
        assert_eq!(g.server_version, 19);
        assert!(g.server_time.is_empty());
    }

    #[test]
    fn greeting_waits_for_the_time_field() {
        let mut buf = FrameBuffer::new();
        buf.append(b"76\020240101 10:00:00");
        assert!(read_greeting(&mut buf).unwrap_err().is_incomplete());
    }

    #[test]
    fn identification_by_server_version() {
        let mut enc = Encoder::new();
        assert!(encode_identification(&mut enc, 69, 12, false));
        assert_eq!(enc.pending(), b"12\0");

        let mut enc = Encoder::new();
        assert!(encode_identification(&mut enc, 76, 12, false));
        assert_eq!(enc.pending(), b"71\01\012\0");

        let mut enc = Encoder::new();
        assert!(!encode_identification(&mut enc, 76, 12, true));
        assert!(enc.is_empty());
    }
}
