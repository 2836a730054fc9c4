//! The byte-stream boundary the session writes to.
//!
//! The engine never reads from the transport itself: whoever owns the
//! socket feeds inbound bytes to [`crate::Session::on_data`]. The
//! transport only has to take outbound bytes and be closable.

use std::io;

pub trait Transport {
    /// Offer `bytes` for transmission; return how many were accepted.
    ///
    /// Accepting fewer than offered (including zero) is allowed; the rest
    /// stays queued in the encoder.
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Close the underlying connection. Must be idempotent.
    fn close(&mut self);
}

/// In-memory sink that accepts everything, e.g. for replaying captures.
impl Transport for Vec<u8> {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn close(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        (**self).send(bytes)
    }

    fn close(&mut self) {
        (**self).close();
    }
}
