//! Subscriber handles for facet change feeds

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::{StreamError, SubscriptionError};
use crate::host::HostControl;

/// One delivery to a facet subscriber
#[derive(Debug, Clone)]
pub enum FacetEvent<T> {
    /// A snapshot whose value differs from the previous publication
    Snapshot(T),
    /// The facet's loop went terminal
    Unavailable(Arc<StreamError>),
}

/// A live subscription to one facet's change feed
///
/// Each subscription owns a private FIFO queue, so deliveries are lossless
/// and arrive in fetch order. Dropping the handle detaches it; calling
/// [`FacetSubscription::detach`] does the same but reports a second call
/// as the caller error it is.
pub struct FacetSubscription<T> {
    id: u64,
    receiver: mpsc::UnboundedReceiver<FacetEvent<T>>,
    host: Arc<dyn HostControl>,
    detached: bool,
}

impl<T> FacetSubscription<T> {
    pub(crate) fn new(
        id: u64,
        receiver: mpsc::UnboundedReceiver<FacetEvent<T>>,
        host: Arc<dyn HostControl>,
    ) -> Self {
        Self {
            id,
            receiver,
            host,
            detached: false,
        }
    }

    /// Wait for the next published snapshot
    ///
    /// The first call resolves immediately with the replayed latest
    /// snapshot when the facet has published before. A terminal facet
    /// failure surfaces as [`SubscriptionError::Unavailable`]; "no change
    /// yet" never surfaces at all, the future simply stays pending.
    pub async fn next(&mut self) -> Result<T, SubscriptionError> {
        if self.detached {
            return Err(SubscriptionError::AlreadyDetached);
        }
        match self.receiver.recv().await {
            Some(FacetEvent::Snapshot(snapshot)) => Ok(snapshot),
            Some(FacetEvent::Unavailable(error)) => Err(SubscriptionError::Unavailable(error)),
            None => Err(SubscriptionError::Closed),
        }
    }

    /// Take the next delivery without waiting, if one is queued
    pub fn try_next(&mut self) -> Option<FacetEvent<T>> {
        if self.detached {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Detach from the facet
    ///
    /// Exactly one detach pairs with each attach; a second call is a
    /// caller error and is reported as such rather than ignored.
    pub fn detach(&mut self) -> Result<(), SubscriptionError> {
        if self.detached {
            return Err(SubscriptionError::AlreadyDetached);
        }
        self.detached = true;
        self.host.release(self.id);
        Ok(())
    }
}

impl<T> Drop for FacetSubscription<T> {
    fn drop(&mut self) {
        if !self.detached {
            self.host.release(self.id);
        }
    }
}
