//! Inbound frame buffer.
//!
//! The protocol has no length prefix, so a message ends only where its
//! schema stops reading fields. The buffer therefore keeps two cursors
//! over one owned arena:
//!
//! ```text
//! [ consumed | scanned by the current decode | not yet scanned ]
//!            ^ consumed                      ^ pending
//! ```
//!
//! A decode scans fields forward from `pending`. If a delimiter is
//! missing the decode gives up and [`FrameBuffer::rollback`] puts
//! `pending` back on the message start; when a message is complete
//! [`FrameBuffer::compact`] drops it. Slices handed out by
//! [`FrameBuffer::next_field`] never outlive the borrow of the buffer.

use bytes::{Buf, BytesMut};

use crate::error::ProtocolError;
use crate::wire_types::DELIMITER;

/// Initial arena capacity.
const INITIAL_CAPACITY: usize = 64 * 1024;

#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,

    /// Start of the message currently being decoded.
    consumed: usize,

    /// Next byte the scanner will look at.
    pending: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            consumed: 0,
            pending: 0,
        }
    }

    /// Append freshly received bytes. Empty input is a no-op.
    pub fn append(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Scan the next field and advance the pending cursor past its delimiter.
    ///
    /// Returns [`ProtocolError::Incomplete`] without moving anything if the
    /// delimiter has not arrived.
    pub fn next_field(&mut self) -> Result<&[u8], ProtocolError> {
        let start = self.pending;
        let offset = self.buf[start..]
            .iter()
            .position(|&b| b == DELIMITER)
            .ok_or(ProtocolError::Incomplete)?;
        let end = start + offset;
        self.pending = end + 1;
        Ok(&self.buf[start..end])
    }

    /// Forget every field scanned since the last message boundary.
    pub fn rollback(&mut self) {
        self.pending = self.consumed;
    }

    /// Drop everything before the pending cursor and reset both cursors.
    ///
    /// Call only once a whole message has been scanned.
    pub fn compact(&mut self) {
        self.buf.advance(self.pending);
        self.consumed = 0;
        self.pending = 0;
    }

    /// Drop one leading delimiter byte, if there is one at the message start.
    pub fn strip_leading_delimiter(&mut self) -> bool {
        if self.consumed == self.pending && self.buf.get(self.consumed) == Some(&DELIMITER) {
            self.buf.advance(self.consumed + 1);
            self.consumed = 0;
            self.pending = 0;
            true
        } else {
            false
        }
    }

    /// Bytes not yet part of a completed message.
    pub fn unconsumed(&self) -> &[u8] {
        &self.buf[self.consumed..]
    }

    /// Returns `true` if there is nothing left to decode.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == self.consumed
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Position of the pending cursor, relative to the arena start.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Position of the consumed cursor, relative to the arena start.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Discard all buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.consumed = 0;
        self.pending = 0;
    }
}
