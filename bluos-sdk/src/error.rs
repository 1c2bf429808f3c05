use bluos_channel::ChannelError;
use bluos_stream::SubscriptionError;
use thiserror::Error;

/// Errors surfaced by the player facade
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A one-shot request failed at the wire layer
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A change feed failed, usually because its facet went terminal
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    /// A command argument was rejected before any request was issued
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors surfaced by content resolution and queue traversal
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The entry carries no browse key and cannot be resolved
    #[error("entry '{0}' is not resolvable")]
    NotResolvable(String),

    /// The node has no pagination cursor; this was the last page
    #[error("no more entries beyond this page")]
    NoMoreEntries,

    /// The underlying request failed
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Type alias for results that can return a PlayerError
pub type Result<T> = std::result::Result<T, PlayerError>;
