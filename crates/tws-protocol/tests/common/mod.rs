// crates/tws-protocol/tests/common/mod.rs
#![allow(dead_code)]

use std::io;

use tws_core::Event;
use tws_protocol::{Session, SessionConfig, Transport};

/// Transport that keeps everything it is given.
#[derive(Debug, Default)]
pub struct Recorder {
    pub sent: Vec<u8>,
    pub closed: bool,
}

impl Transport for Recorder {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.sent.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// NUL-terminate every field and concatenate.
pub fn wire(fields: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for f in fields {
        out.extend_from_slice(f.as_bytes());
        out.push(0);
    }
    out
}

pub fn wire_owned(fields: &[String]) -> Vec<u8> {
    let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    wire(&refs)
}

pub fn greeting(server_version: i32) -> Vec<u8> {
    let v = server_version.to_string();
    if server_version >= 20 {
        wire(&[&v, "20240102 09:30:00 EST"])
    } else {
        wire(&[&v])
    }
}

pub fn session_with(config: SessionConfig) -> Session<Recorder> {
    let mut session = Session::new(Recorder::default(), config);
    session.connect().unwrap();
    session
}

/// A session past the handshake, with the outbound log cleared.
pub fn connected(server_version: i32) -> Session<Recorder> {
    let mut session = session_with(SessionConfig {
        client_id: 12,
        ..SessionConfig::default()
    });
    let mut events = Vec::new();
    session
        .on_data(&greeting(server_version), &mut events)
        .unwrap();
    assert!(events.is_empty());
    assert!(session.is_connected());
    session.transport_mut().sent.clear();
    session
}

/// Feed `bytes` and collect what comes out.
pub fn feed(session: &mut Session<Recorder>, bytes: &[u8]) -> Vec<Event> {
    let mut events = Vec::new();
    session.on_data(bytes, &mut events).unwrap();
    events
}
