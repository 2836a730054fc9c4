//! Outbound encoder.
//!
//! Fields are appended to an owned buffer with the same delimiter
//! convention the decoder reads. [`Encoder::flush`] hands the buffer to a
//! [`Transport`] and keeps whatever the transport did not accept, so a
//! short write is simply finished by a later flush.

use std::io;

use bytes::{Buf, BytesMut};
use tracing::{trace, warn};

use crate::field_codec;
use crate::transport::Transport;
use crate::wire_types::DELIMITER;

#[derive(Debug, Default)]
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::default()
    }

    pub fn encode_int(&mut self, value: i32) -> &mut Self {
        field_codec::encode_int(&mut self.buf, value);
        self
    }

    pub fn encode_long(&mut self, value: i64) -> &mut Self {
        field_codec::encode_long(&mut self.buf, value);
        self
    }

    pub fn encode_double(&mut self, value: f64) -> &mut Self {
        field_codec::encode_double(&mut self.buf, value);
        self
    }

    pub fn encode_bool(&mut self, value: bool) -> &mut Self {
        field_codec::encode_bool(&mut self.buf, value);
        self
    }

    /// Append a string field verbatim.
    ///
    /// The protocol has no escaping, so an embedded delimiter is written as
    /// is and will split the field on the other side.
    pub fn encode_string(&mut self, value: &[u8]) -> &mut Self {
        if value.contains(&DELIMITER) {
            warn!(len = value.len(), "string field contains the field delimiter");
        }
        field_codec::encode_string(&mut self.buf, value);
        self
    }

    /// Bytes encoded but not yet accepted by the transport.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write as much as the transport accepts; keep the rest.
    ///
    /// Returns the number of bytes written by this call. A transport that
    /// would block counts as accepting nothing.
    pub fn flush<T: Transport + ?Sized>(&mut self, transport: &mut T) -> io::Result<usize> {
        let mut written = 0;
        while !self.buf.is_empty() {
            let n = match transport.send(&self.buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => 0,
                Err(e) => return Err(e),
            };
            if n == 0 {
                break;
            }
            self.buf.advance(n);
            written += n;
        }
        trace!(written, remaining = self.buf.len(), "flushed outbound buffer");
        Ok(written)
    }

    /// Drop everything not yet sent.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
