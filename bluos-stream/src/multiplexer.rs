//! One host per facet, owned together

use std::sync::Arc;

use bluos_channel::documents::{
    PlayQueueStatusResponse, PresetListResponse, StatusResponse, SyncStatusResponse, VolumeResponse,
};
use bluos_channel::BluChannel;

use crate::config::StreamConfig;
use crate::host::FacetHost;
use crate::source::{PresetsSource, QueueInfoSource, StatusSource, SyncStatusSource, VolumeSource};
use crate::subscription::FacetSubscription;

/// The set of facet hosts for one player
///
/// Every facet shares the same [`StreamConfig`] but runs its own loop; a
/// terminal failure in one facet leaves the others untouched. Subscribing
/// activates the facet's loop on first attach, reference-counted per
/// facet.
pub struct StreamMultiplexer {
    status: Arc<FacetHost<StatusSource>>,
    sync_status: Arc<FacetHost<SyncStatusSource>>,
    volume: Arc<FacetHost<VolumeSource>>,
    presets: Arc<FacetHost<PresetsSource>>,
    queue: Arc<FacetHost<QueueInfoSource>>,
}

impl StreamMultiplexer {
    pub fn new(channel: Arc<BluChannel>, config: StreamConfig) -> Self {
        Self {
            status: FacetHost::new(StatusSource::new(Arc::clone(&channel)), config.clone()),
            sync_status: FacetHost::new(
                SyncStatusSource::new(Arc::clone(&channel)),
                config.clone(),
            ),
            volume: FacetHost::new(VolumeSource::new(Arc::clone(&channel)), config.clone()),
            presets: FacetHost::new(PresetsSource::new(Arc::clone(&channel)), config.clone()),
            queue: FacetHost::new(QueueInfoSource::new(channel), config),
        }
    }

    /// Subscribe to playback status changes
    pub fn subscribe_status(&self) -> FacetSubscription<StatusResponse> {
        self.status.attach()
    }

    /// Subscribe to device identity / grouping changes
    pub fn subscribe_sync_status(&self) -> FacetSubscription<SyncStatusResponse> {
        self.sync_status.attach()
    }

    /// Subscribe to volume changes
    pub fn subscribe_volume(&self) -> FacetSubscription<VolumeResponse> {
        self.volume.attach()
    }

    /// Subscribe to preset list changes
    pub fn subscribe_presets(&self) -> FacetSubscription<PresetListResponse> {
        self.presets.attach()
    }

    /// Subscribe to play queue metadata changes
    pub fn subscribe_queue(&self) -> FacetSubscription<PlayQueueStatusResponse> {
        self.queue.attach()
    }

    /// Clear terminal failures on every facet, restarting loops that still
    /// have subscribers
    pub fn reactivate(&self) {
        self.status.reactivate();
        self.sync_status.reactivate();
        self.volume.reactivate();
        self.presets.reactivate();
        self.queue.reactivate();
    }

    /// Whether any facet is currently in the terminal failed state
    pub fn any_failed(&self) -> bool {
        self.status.is_failed()
            || self.sync_status.is_failed()
            || self.volume.is_failed()
            || self.presets.is_failed()
            || self.queue.is_failed()
    }
}
