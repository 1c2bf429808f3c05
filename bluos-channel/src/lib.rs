//! Private HTTP/XML channel for BluOS player communication
//!
//! This crate provides the request primitive used by the rest of the SDK:
//! one GET against a player endpoint, with query parameters and a per-call
//! timeout, returning a typed document parsed from the device's XML.
//! It also defines the long-poll request parameters (`etag` change token
//! plus a server-side hold timeout) that the streaming layer builds on.

mod channel;
mod error;
mod poll;

pub mod documents;

pub use channel::{BluChannel, ChannelConfig, DEFAULT_PORT};
pub use error::{ChannelError, Result};
pub use poll::{ChangeToken, LongPoll, LongPollable};
