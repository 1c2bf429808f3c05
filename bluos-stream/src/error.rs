use std::sync::Arc;

use bluos_channel::ChannelError;
use thiserror::Error;

/// Terminal failure of one facet's poll loop
///
/// Raised once the consecutive-failure budget is exhausted; the loop stops
/// issuing requests and every current and future subscriber is handed this
/// error until the host is explicitly reactivated.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("facet '{facet}' unavailable after {failures} consecutive failures: {source}")]
    Unavailable {
        facet: &'static str,
        failures: u32,
        #[source]
        source: ChannelError,
    },
}

/// Errors surfaced through a facet subscription
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// The facet's loop went terminal; reconnect or reactivate to recover
    #[error("facet stream is unavailable: {0}")]
    Unavailable(Arc<StreamError>),

    /// The subscription was detached twice; each attach pairs with exactly
    /// one detach
    #[error("subscription was already detached")]
    AlreadyDetached,

    /// The host side of the subscription is gone
    #[error("facet stream closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display_names_facet() {
        let error = StreamError::Unavailable {
            facet: "status",
            failures: 5,
            source: ChannelError::Http {
                status: reqwest::StatusCode::BAD_GATEWAY,
            },
        };
        let rendered = error.to_string();
        assert!(rendered.contains("status"));
        assert!(rendered.contains("5"));
    }
}
