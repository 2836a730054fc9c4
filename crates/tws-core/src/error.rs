//! Client-side error codes.
//!
//! The server reports its own errors through the error message; these
//! are the codes the client raises itself when the connection can no
//! longer be trusted. They share the server's numbering space, which is
//! why they are plain `(code, text)` pairs rather than an enum.

use std::fmt;

/// A fixed `(code, text)` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CodeMsg {
    pub code: i32,
    pub msg: &'static str,
}

impl CodeMsg {
    pub const fn new(code: i32, msg: &'static str) -> Self {
        CodeMsg { code, msg }
    }
}

/// Id used for errors that are not tied to a request.
pub const NO_VALID_ID: i32 = -1;

pub const UPDATE_TWS: CodeMsg = CodeMsg::new(503, "The TWS is out of date and must be upgraded.");
pub const UNKNOWN_ID: CodeMsg = CodeMsg::new(505, "Fatal Error: Unknown message id.");
pub const BAD_MESSAGE: CodeMsg = CodeMsg::new(508, "Bad message");
pub const SOCKET_EXCEPTION: CodeMsg = CodeMsg::new(509, "Exception caught while reading socket - ");

/// A client-raised protocol error, delivered as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    /// Request / message id the error relates to, or [`NO_VALID_ID`].
    pub id: i32,
    pub code: i32,
    pub message: String,
}

impl ClientError {
    pub fn new(id: i32, code_msg: CodeMsg) -> Self {
        ClientError {
            id,
            code: code_msg.code,
            message: code_msg.msg.to_string(),
        }
    }

    /// Same as [`ClientError::new`] with extra detail appended to the text.
    pub fn with_detail(id: i32, code_msg: CodeMsg, detail: impl fmt::Display) -> Self {
        ClientError {
            id,
            code: code_msg.code,
            message: format!("{} {}", code_msg.msg, detail),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (id {})", self.code, self.message, self.id)
    }
}
