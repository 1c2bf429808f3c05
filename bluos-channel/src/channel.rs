//! The request primitive: one GET against a player endpoint

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::documents::{
    BrowseResponse, ErrorDocument, PlayQueueListingResponse, PlayQueueStatusResponse,
    PlaylistModeResponse, PresetListResponse, QueueIndexResponse, StatusResponse,
    SyncStatusResponse, TransportStateResponse, VolumeResponse,
};
use crate::error::{ChannelError, Result};
use crate::poll::LongPoll;

/// Control port BluOS players listen on
pub const DEFAULT_PORT: u16 = 11000;

/// Timeouts applied to channel requests
///
/// Long-poll requests are held open server-side, so their HTTP timeout is
/// the requested hold time plus `long_poll_slack`; everything else uses
/// `request_timeout`.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// TCP connect timeout
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout for one-shot requests
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Slack added on top of a long-poll's server-side hold time
    /// Default: 5 seconds
    pub long_poll_slack: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            long_poll_slack: Duration::from_secs(5),
        }
    }
}

/// HTTP channel to one BluOS player
///
/// Wraps a single endpoint and exposes every control-surface request the
/// SDK issues: the five long-pollable facet documents, the browse/search
/// surface, queue listing pages, and the one-shot transport commands.
///
/// The channel is stateless; cloning it is cheap and all methods take
/// `&self`.
#[derive(Debug, Clone)]
pub struct BluChannel {
    base: Url,
    client: reqwest::Client,
    config: ChannelConfig,
}

impl BluChannel {
    /// Create a channel for an endpoint URL
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::with_config(endpoint, ChannelConfig::default())
    }

    /// Create a channel for an endpoint URL with custom timeouts
    pub fn with_config(endpoint: Url, config: ChannelConfig) -> Result<Self> {
        let mut base = endpoint;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            base,
            client,
            config,
        })
    }

    /// Create a channel for a bare host, using the default BluOS port
    pub fn for_host(host: &str) -> Result<Self> {
        let endpoint = Url::parse(&format!("http://{host}:{DEFAULT_PORT}/"))?;
        Self::new(endpoint)
    }

    /// The endpoint this channel talks to
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    // ------------------------------------------------------------------
    // Long-pollable facet documents
    // ------------------------------------------------------------------

    /// Fetch `/Status`; blocks server-side when `poll` is given
    pub async fn status(&self, poll: Option<&LongPoll>) -> Result<StatusResponse> {
        self.get_document("Status", poll_query(poll), self.timeout_for(poll)).await
    }

    /// Fetch `/SyncStatus`; blocks server-side when `poll` is given
    pub async fn sync_status(&self, poll: Option<&LongPoll>) -> Result<SyncStatusResponse> {
        self.get_document("SyncStatus", poll_query(poll), self.timeout_for(poll)).await
    }

    /// Fetch `/Volume`; blocks server-side when `poll` is given
    pub async fn volume(&self, poll: Option<&LongPoll>) -> Result<VolumeResponse> {
        self.get_document("Volume", poll_query(poll), self.timeout_for(poll)).await
    }

    /// Fetch `/Presets`; blocks server-side when `poll` is given
    pub async fn presets(&self, poll: Option<&LongPoll>) -> Result<PresetListResponse> {
        self.get_document("Presets", poll_query(poll), self.timeout_for(poll)).await
    }

    /// Fetch play queue metadata from `/Playlist`; blocks server-side when
    /// `poll` is given
    pub async fn playlist_status(&self, poll: Option<&LongPoll>) -> Result<PlayQueueStatusResponse> {
        self.get_document("Playlist", poll_query(poll), self.timeout_for(poll)).await
    }

    // ------------------------------------------------------------------
    // Content browsing and queue listing
    // ------------------------------------------------------------------

    /// Fetch one browse listing page; no key returns the top-level sources
    pub async fn browse(&self, key: Option<&str>) -> Result<BrowseResponse> {
        let mut query = Vec::new();
        if let Some(key) = key {
            query.push(("key", key.to_string()));
        }
        self.get_document("Browse", query, self.config.request_timeout).await
    }

    /// Search within a browse location; results form a fresh listing root
    pub async fn search(&self, key: Option<&str>, term: &str) -> Result<BrowseResponse> {
        let mut query = Vec::new();
        if let Some(key) = key {
            query.push(("key", key.to_string()));
        }
        query.push(("q", term.to_string()));
        self.get_document("Browse", query, self.config.request_timeout).await
    }

    /// Fetch one page of the play queue song listing
    pub async fn playlist(&self, start: u32, length: u32) -> Result<PlayQueueListingResponse> {
        let query = vec![("start", start.to_string()), ("length", length.to_string())];
        self.get_document("Playlist", query, self.config.request_timeout).await
    }

    // ------------------------------------------------------------------
    // One-shot commands
    // ------------------------------------------------------------------

    /// Start playback, optionally seeking to `seek` seconds first
    pub async fn play(&self, seek: Option<u32>) -> Result<TransportStateResponse> {
        let mut query = Vec::new();
        if let Some(seek) = seek {
            query.push(("seek", seek.to_string()));
        }
        self.get_document("Play", query, self.config.request_timeout).await
    }

    /// Start playing an arbitrary URL
    pub async fn play_url(&self, url: &str) -> Result<TransportStateResponse> {
        let query = vec![("url", url.to_string())];
        self.get_document("Play", query, self.config.request_timeout).await
    }

    /// Pause playback; with `toggle`, alternate between pause and play
    pub async fn pause(&self, toggle: bool) -> Result<TransportStateResponse> {
        let mut query = Vec::new();
        if toggle {
            query.push(("toggle", "1".to_string()));
        }
        self.get_document("Pause", query, self.config.request_timeout).await
    }

    /// Stop playback
    pub async fn stop(&self) -> Result<TransportStateResponse> {
        self.get_document("Stop", Vec::new(), self.config.request_timeout).await
    }

    /// Advance to the next song in the queue
    pub async fn skip(&self) -> Result<QueueIndexResponse> {
        self.get_document("Skip", Vec::new(), self.config.request_timeout).await
    }

    /// Return to the previous song in the queue
    pub async fn back(&self) -> Result<QueueIndexResponse> {
        self.get_document("Back", Vec::new(), self.config.request_timeout).await
    }

    /// Set the volume as a percentage, 0-100
    pub async fn set_volume(&self, level: u32) -> Result<VolumeResponse> {
        let query = vec![("level", level.to_string())];
        self.get_document("Volume", query, self.config.request_timeout).await
    }

    /// Mute or unmute without touching the level
    pub async fn mute(&self, mute: bool) -> Result<VolumeResponse> {
        let query = vec![("mute", if mute { "1" } else { "0" }.to_string())];
        self.get_document("Volume", query, self.config.request_timeout).await
    }

    /// Recall a stored preset by number
    pub async fn load_preset(&self, id: u32) -> Result<TransportStateResponse> {
        let query = vec![("id", id.to_string())];
        self.get_document("Preset", query, self.config.request_timeout).await
    }

    /// Set the queue shuffle flag
    pub async fn set_shuffle(&self, on: bool) -> Result<PlaylistModeResponse> {
        let query = vec![("state", if on { "1" } else { "0" }.to_string())];
        self.get_document("Shuffle", query, self.config.request_timeout).await
    }

    /// Set the queue repeat mode: 0 = queue, 1 = track, 2 = off
    pub async fn set_repeat(&self, state: u8) -> Result<PlaylistModeResponse> {
        let query = vec![("state", state.to_string())];
        self.get_document("Repeat", query, self.config.request_timeout).await
    }

    /// Issue an arbitrary relative action URL, e.g. an item's `playURL`
    ///
    /// The response body is only checked for an error document; its shape
    /// varies per action and is otherwise discarded.
    pub async fn action(&self, relative_url: &str) -> Result<()> {
        self.fetch(relative_url, Vec::new(), self.config.request_timeout).await?;
        Ok(())
    }

    // ------------------------------------------------------------------

    fn timeout_for(&self, poll: Option<&LongPoll>) -> Duration {
        match poll {
            Some(poll) => poll.timeout + self.config.long_poll_slack,
            None => self.config.request_timeout,
        }
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&str, String)>,
        timeout: Duration,
    ) -> Result<T> {
        let body = self.fetch(path, query, timeout).await?;
        Ok(quick_xml::de::from_str(&body)?)
    }

    async fn fetch(&self, path: &str, query: Vec<(&str, String)>, timeout: Duration) -> Result<String> {
        let url = self.base.join(path)?;
        tracing::trace!(%url, "issuing request");

        let response = self
            .client
            .get(url)
            .query(&query)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if let Some(message) = parse_error_document(&body) {
            return Err(ChannelError::Remote { message });
        }
        if !status.is_success() {
            return Err(ChannelError::Http { status });
        }
        Ok(body)
    }
}

fn poll_query(poll: Option<&LongPoll>) -> Vec<(&'static str, String)> {
    match poll {
        Some(poll) => vec![
            ("etag", poll.token.as_str().to_string()),
            ("timeout", poll.timeout.as_secs().to_string()),
        ],
        None => Vec::new(),
    }
}

/// Decode the device's `<error>` document, if that is what `body` holds
fn parse_error_document(body: &str) -> Option<String> {
    let trimmed = body.trim_start();
    if !trimmed.starts_with("<error") {
        return None;
    }
    quick_xml::de::from_str::<ErrorDocument>(trimmed)
        .ok()
        .map(|doc| doc.message)
}
