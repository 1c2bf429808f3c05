//! The player facade: change feeds plus one-shot getters and commands

use std::sync::Arc;

use url::Url;

use bluos_channel::documents::{
    PlayQueueStatusResponse, PresetListResponse, StatusResponse, VolumeResponse,
};
use bluos_channel::{BluChannel, ChannelConfig};
use bluos_stream::{StreamConfig, StreamMultiplexer};

use crate::browser::MusicBrowser;
use crate::error::{BrowseError, PlayerError, Result};
use crate::feed::ChangeFeed;
use crate::queue::PlayQueue;
use crate::types::{
    PlayPosition, PlayQueueInfo, PlayerMedia, PlayerState, PlayerVolume, Preset, RepeatMode,
    ShuffleMode,
};

/// Handle to one connected BluOS player
///
/// Owns the channel and the per-facet long-poll loops; dropping the player
/// drops every derived subscription's host and stops all polling.
///
/// # Example
///
/// ```rust,ignore
/// let player = BluPlayer::connect_host("192.168.0.27").await?;
///
/// let mut states = player.state_changes();
/// player.play().await?;
/// println!("now {:?}", states.next().await?);
/// ```
pub struct BluPlayer {
    channel: Arc<BluChannel>,
    streams: StreamMultiplexer,
    name: String,
    brand: Option<String>,
    model: Option<String>,
}

impl BluPlayer {
    /// Connect to a player endpoint
    ///
    /// Performs one `/SyncStatus` fetch to validate the endpoint and learn
    /// the device identity. No polling starts until a feed is created.
    pub async fn connect(endpoint: Url) -> Result<Self> {
        Self::connect_with_config(endpoint, ChannelConfig::default(), StreamConfig::default()).await
    }

    /// Connect to a bare host on the default BluOS port
    pub async fn connect_host(host: &str) -> Result<Self> {
        let channel = BluChannel::for_host(host)?;
        let endpoint = channel.endpoint().clone();
        Self::connect_with_config(endpoint, ChannelConfig::default(), StreamConfig::default()).await
    }

    /// Connect with explicit channel timeouts and stream policy
    pub async fn connect_with_config(
        endpoint: Url,
        channel_config: ChannelConfig,
        stream_config: StreamConfig,
    ) -> Result<Self> {
        let channel = Arc::new(BluChannel::with_config(endpoint, channel_config)?);
        let sync = channel.sync_status(None).await?;
        let name = sync
            .name
            .clone()
            .unwrap_or_else(|| channel.endpoint().to_string());
        tracing::info!(
            name,
            brand = sync.brand.as_deref().unwrap_or("unknown"),
            endpoint = %channel.endpoint(),
            "connected to player"
        );
        let streams = StreamMultiplexer::new(Arc::clone(&channel), stream_config);
        Ok(Self {
            channel,
            streams,
            name,
            brand: sync.brand,
            model: sync.model_name.or(sync.model),
        })
    }

    /// Friendly name reported by the device
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// The endpoint this player was connected through
    pub fn endpoint(&self) -> &Url {
        self.channel.endpoint()
    }

    // ------------------------------------------------------------------
    // Change feeds
    // ------------------------------------------------------------------

    /// Transport state changes
    pub fn state_changes(&self) -> ChangeFeed<StatusResponse, PlayerState> {
        ChangeFeed::new(self.streams.subscribe_status(), PlayerState::from_status)
    }

    /// Shuffle mode changes
    pub fn shuffle_changes(&self) -> ChangeFeed<StatusResponse, ShuffleMode> {
        ChangeFeed::new(self.streams.subscribe_status(), ShuffleMode::from_status)
    }

    /// Repeat mode changes
    pub fn repeat_changes(&self) -> ChangeFeed<StatusResponse, RepeatMode> {
        ChangeFeed::new(self.streams.subscribe_status(), RepeatMode::from_status)
    }

    /// Play position changes
    ///
    /// Position advances with every status publication while playing;
    /// expect this feed to be the chattiest of the set.
    pub fn position_changes(&self) -> ChangeFeed<StatusResponse, PlayPosition> {
        ChangeFeed::new(self.streams.subscribe_status(), PlayPosition::from_status)
    }

    /// Current media (title lines and artwork) changes
    pub fn media_changes(&self) -> ChangeFeed<StatusResponse, PlayerMedia> {
        ChangeFeed::new(self.streams.subscribe_status(), PlayerMedia::from_status)
    }

    /// Volume changes
    pub fn volume_changes(&self) -> ChangeFeed<VolumeResponse, PlayerVolume> {
        ChangeFeed::new(self.streams.subscribe_volume(), PlayerVolume::from_volume)
    }

    /// Preset list changes
    pub fn preset_changes(&self) -> ChangeFeed<PresetListResponse, Vec<Preset>> {
        ChangeFeed::new(self.streams.subscribe_presets(), Preset::list_from)
    }

    /// Play queue metadata changes
    pub fn queue_changes(&self) -> ChangeFeed<PlayQueueStatusResponse, PlayQueueInfo> {
        ChangeFeed::new(self.streams.subscribe_queue(), PlayQueueInfo::from_status)
    }

    /// Clear terminal facet failures and resume polling where subscribers
    /// remain attached
    pub fn reactivate_streams(&self) {
        self.streams.reactivate();
    }

    // ------------------------------------------------------------------
    // One-shot getters
    // ------------------------------------------------------------------

    /// Fetch the current transport state
    pub async fn state(&self) -> Result<PlayerState> {
        Ok(PlayerState::from_status(&self.channel.status(None).await?))
    }

    /// Fetch the current volume
    pub async fn volume(&self) -> Result<PlayerVolume> {
        Ok(PlayerVolume::from_volume(&self.channel.volume(None).await?))
    }

    /// Fetch the current play position
    pub async fn position(&self) -> Result<PlayPosition> {
        Ok(PlayPosition::from_status(&self.channel.status(None).await?))
    }

    /// Fetch the current media
    pub async fn media(&self) -> Result<PlayerMedia> {
        Ok(PlayerMedia::from_status(&self.channel.status(None).await?))
    }

    /// Fetch the current shuffle mode
    pub async fn shuffle_mode(&self) -> Result<ShuffleMode> {
        Ok(ShuffleMode::from_status(&self.channel.status(None).await?))
    }

    /// Fetch the current repeat mode
    pub async fn repeat_mode(&self) -> Result<RepeatMode> {
        Ok(RepeatMode::from_status(&self.channel.status(None).await?))
    }

    /// Fetch the stored presets
    pub async fn presets(&self) -> Result<Vec<Preset>> {
        Ok(Preset::list_from(&self.channel.presets(None).await?))
    }

    // ------------------------------------------------------------------
    // Commands
    //
    // Commands return the device's acknowledgement; they never update the
    // published snapshots. Observe effects through the change feeds.
    // ------------------------------------------------------------------

    /// Start playback
    pub async fn play(&self) -> Result<PlayerState> {
        let ack = self.channel.play(None).await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Seek to `seconds` into the current track and play from there
    pub async fn play_from(&self, seconds: u32) -> Result<PlayerState> {
        let ack = self.channel.play(Some(seconds)).await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Start playing an arbitrary URL
    pub async fn play_url(&self, url: &str) -> Result<PlayerState> {
        let ack = self.channel.play_url(url).await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Pause playback; with `toggle`, alternate between pause and play
    pub async fn pause(&self, toggle: bool) -> Result<PlayerState> {
        let ack = self.channel.pause(toggle).await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Stop playback
    pub async fn stop(&self) -> Result<PlayerState> {
        let ack = self.channel.stop().await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Advance to the next song; returns the new queue index
    pub async fn skip(&self) -> Result<u32> {
        Ok(self.channel.skip().await?.id)
    }

    /// Return to the previous song; returns the new queue index
    pub async fn back(&self) -> Result<u32> {
        Ok(self.channel.back().await?.id)
    }

    /// Set the volume percentage, 0-100
    pub async fn set_volume(&self, percent: u32) -> Result<PlayerVolume> {
        if percent > 100 {
            return Err(PlayerError::InvalidParameter(format!(
                "volume must be 0-100, got {percent}"
            )));
        }
        let ack = self.channel.set_volume(percent).await?;
        Ok(PlayerVolume::from_volume(&ack))
    }

    /// Mute or unmute without touching the level
    pub async fn mute(&self, mute: bool) -> Result<PlayerVolume> {
        let ack = self.channel.mute(mute).await?;
        Ok(PlayerVolume::from_volume(&ack))
    }

    /// Recall a stored preset by number
    pub async fn load_preset(&self, number: u32) -> Result<PlayerState> {
        let ack = self.channel.load_preset(number).await?;
        Ok(PlayerState::from_token(&ack.state))
    }

    /// Set the queue shuffle mode
    pub async fn set_shuffle(&self, mode: ShuffleMode) -> Result<()> {
        self.channel.set_shuffle(mode.to_flag()).await?;
        Ok(())
    }

    /// Set the queue repeat mode
    pub async fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.channel.set_repeat(mode.to_state()).await?;
        Ok(())
    }

    /// Issue an arbitrary relative action URL, e.g. a browse item's
    /// `playURL`
    pub async fn action(&self, relative_url: &str) -> Result<()> {
        self.channel.action(relative_url).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Fetch the root of the music browsing tree (the device's top-level
    /// sources)
    pub async fn music_browser(&self) -> std::result::Result<MusicBrowser, BrowseError> {
        MusicBrowser::browse(Arc::clone(&self.channel)).await
    }

    /// The play queue of this player
    pub fn play_queue(&self) -> PlayQueue {
        PlayQueue::from_channel(Arc::clone(&self.channel))
    }
}
