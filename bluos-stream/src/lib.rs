//! Long-poll change-detection engine for BluOS players
//!
//! Each pollable facet of player state gets one [`FacetHost`]: a loop that
//! repeatedly long-polls the device with the last-seen change token and
//! republishes a snapshot only when its value actually changed. Hosts are
//! activated by their first subscriber and stopped by the last one; the
//! [`StreamMultiplexer`] owns the full set of hosts for one player.
//!
//! Delivery guarantees per facet: lossless, in fetch order, no consecutive
//! duplicates, and a replay of the latest snapshot to every newly attached
//! subscriber. Transient failures are retried with capped exponential
//! backoff; once the consecutive-failure budget is exhausted the facet
//! transitions to a terminal unavailable state that is pushed to
//! subscribers and holds until [`FacetHost::reactivate`] is called.

mod config;
mod error;
mod host;
mod multiplexer;
mod source;
mod subscription;

pub use config::StreamConfig;
pub use error::{StreamError, SubscriptionError};
pub use host::FacetHost;
pub use multiplexer::StreamMultiplexer;
pub use source::{
    PollSource, PresetsSource, QueueInfoSource, StatusSource, SyncStatusSource, VolumeSource,
};
pub use subscription::{FacetEvent, FacetSubscription};
