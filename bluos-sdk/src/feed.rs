//! Projected, distinct-until-changed change feeds

use bluos_stream::{FacetSubscription, SubscriptionError};

/// A typed change feed derived from one facet subscription
///
/// Applies a pure projection to every facet snapshot and delivers the
/// result only when it differs from the previously delivered value, so a
/// feed is distinct-until-changed at its own granularity even though the
/// underlying facet republishes on any field change.
pub struct ChangeFeed<S, T>
where
    S: Clone,
    T: Clone + PartialEq,
{
    subscription: FacetSubscription<S>,
    project: fn(&S) -> T,
    last: Option<T>,
}

impl<S, T> ChangeFeed<S, T>
where
    S: Clone,
    T: Clone + PartialEq,
{
    pub fn new(subscription: FacetSubscription<S>, project: fn(&S) -> T) -> Self {
        Self {
            subscription,
            project,
            last: None,
        }
    }

    /// Wait until the projected value changes, then return it
    ///
    /// The first call resolves with the current value as soon as the facet
    /// has published once. A terminal facet failure surfaces as
    /// [`SubscriptionError::Unavailable`].
    pub async fn next(&mut self) -> Result<T, SubscriptionError> {
        loop {
            let snapshot = self.subscription.next().await?;
            let value = (self.project)(&snapshot);
            if self.last.as_ref() != Some(&value) {
                self.last = Some(value.clone());
                return Ok(value);
            }
        }
    }

    /// Detach from the underlying facet
    ///
    /// As with facet subscriptions, exactly one detach pairs with each
    /// feed; a second call is reported as an error.
    pub fn detach(&mut self) -> Result<(), SubscriptionError> {
        self.subscription.detach()
    }
}
