//! Change tokens and long-poll request parameters
//!
//! BluOS players version each pollable document with an opaque `etag`
//! attribute. A request that carries the last-seen etag plus a `timeout`
//! is held open by the device until the document changes or the timeout
//! elapses, then answered with a fresh document and a fresh etag.

use std::fmt;
use std::time::Duration;

/// Opaque change token returned by the device alongside a pollable document
///
/// Tokens are only comparable for equality; the device guarantees nothing
/// about their shape or ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeToken(String);

impl ChangeToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters for a long-poll request variant
///
/// `timeout` is the server-side hold time. The HTTP call itself is given
/// extra slack on top of this so a well-behaved device always answers
/// before the transport gives up.
#[derive(Debug, Clone)]
pub struct LongPoll {
    pub token: ChangeToken,
    pub timeout: Duration,
}

impl LongPoll {
    pub fn new(token: ChangeToken, timeout: Duration) -> Self {
        Self { token, timeout }
    }
}

/// A document the device serves through a long-pollable endpoint
///
/// `content_eq` intentionally ignores the change token: devices have been
/// observed to advance the etag without any semantic change, and such
/// responses must not be republished to subscribers.
pub trait LongPollable {
    /// The change token carried by this document, if any
    fn change_token(&self) -> Option<ChangeToken>;

    /// Value-level equality, excluding the change token
    fn content_eq(&self, other: &Self) -> bool;
}
