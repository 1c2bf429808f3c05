//! Poll sources: the seam between facet loops and the channel
//!
//! A [`PollSource`] issues one long-poll (or immediate) fetch of one facet
//! document. The engine is generic over this trait so the loop machinery
//! can be exercised without a device; the concrete sources below simply
//! delegate to [`BluChannel`].

use std::sync::Arc;

use async_trait::async_trait;

use bluos_channel::documents::{
    PlayQueueStatusResponse, PresetListResponse, StatusResponse, SyncStatusResponse, VolumeResponse,
};
use bluos_channel::{BluChannel, ChannelError, LongPoll, LongPollable};

/// One facet's fetch primitive
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    /// The document this facet serves
    type Snapshot: LongPollable + Clone + Send + Sync + 'static;

    /// Facet name used in logs and failure reports
    fn facet(&self) -> &'static str;

    /// Fetch the facet document, blocking server-side when `poll` is given
    async fn poll(&self, poll: Option<&LongPoll>) -> Result<Self::Snapshot, ChannelError>;
}

macro_rules! channel_source {
    ($(#[$doc:meta])* $name:ident, $snapshot:ty, $facet:literal, $method:ident) => {
        $(#[$doc])*
        pub struct $name {
            channel: Arc<BluChannel>,
        }

        impl $name {
            pub fn new(channel: Arc<BluChannel>) -> Self {
                Self { channel }
            }
        }

        #[async_trait]
        impl PollSource for $name {
            type Snapshot = $snapshot;

            fn facet(&self) -> &'static str {
                $facet
            }

            async fn poll(&self, poll: Option<&LongPoll>) -> Result<Self::Snapshot, ChannelError> {
                self.channel.$method(poll).await
            }
        }
    };
}

channel_source!(
    /// Polls `/Status`
    StatusSource,
    StatusResponse,
    "status",
    status
);

channel_source!(
    /// Polls `/SyncStatus`
    SyncStatusSource,
    SyncStatusResponse,
    "sync-status",
    sync_status
);

channel_source!(
    /// Polls `/Volume`
    VolumeSource,
    VolumeResponse,
    "volume",
    volume
);

channel_source!(
    /// Polls `/Presets`
    PresetsSource,
    PresetListResponse,
    "presets",
    presets
);

channel_source!(
    /// Polls the queue metadata on `/Playlist`
    QueueInfoSource,
    PlayQueueStatusResponse,
    "queue-info",
    playlist_status
);
