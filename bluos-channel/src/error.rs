use thiserror::Error;

/// Errors surfaced by channel requests
///
/// The variants map onto the retry taxonomy the higher layers rely on:
/// `Transport` and `Http` are network-level failures and are retryable,
/// `Remote` is a well-formed rejection by the device and requires caller
/// intervention, `Parse` means the device sent a document the channel
/// could not decode.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Network-level failure (connect, send, or timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with a non-success HTTP status and no error document
    #[error("device returned HTTP {status}")]
    Http { status: reqwest::StatusCode },

    /// The device answered with a well-formed error document
    #[error("device error: {message}")]
    Remote { message: String },

    /// The response body could not be decoded into the expected document
    #[error("malformed document: {0}")]
    Parse(#[from] quick_xml::DeError),

    /// The endpoint URL cannot be used as a request base
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl ChannelError {
    /// Whether a long-poll loop may retry after this error
    ///
    /// `Remote` is excluded: a device that rejects the poll request will
    /// keep rejecting it, so retrying inside the loop cannot help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ChannelError::Remote { .. } | ChannelError::Endpoint(_))
    }
}

/// Type alias for results that can return a ChannelError
pub type Result<T> = std::result::Result<T, ChannelError>;
