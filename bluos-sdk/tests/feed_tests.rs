//! Projection-level deduplication tests for change feeds

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use bluos_channel::documents::StatusResponse;
use bluos_channel::{ChannelError, LongPoll};
use bluos_sdk::{ChangeFeed, PlayerState, PlayerVolume, PlayerMedia};
use bluos_stream::{FacetHost, PollSource, StreamConfig};

/// Plays back a fixed sequence of status documents, then pends forever
struct ScriptedStatus {
    script: Mutex<VecDeque<StatusResponse>>,
}

impl ScriptedStatus {
    fn new(script: Vec<StatusResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl PollSource for ScriptedStatus {
    type Snapshot = StatusResponse;

    fn facet(&self) -> &'static str {
        "scripted-status"
    }

    async fn poll(&self, _poll: Option<&LongPoll>) -> Result<StatusResponse, ChannelError> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(status) => Ok(status),
            None => std::future::pending().await,
        }
    }
}

fn status(etag: &str, state: &str, volume: i32, title: &str) -> StatusResponse {
    StatusResponse {
        etag: Some(etag.to_string()),
        state: Some(state.to_string()),
        volume: Some(volume),
        title1: Some(title.to_string()),
        ..StatusResponse::default()
    }
}

fn fast_config() -> StreamConfig {
    StreamConfig {
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        ..StreamConfig::default()
    }
}

#[tokio::test]
async fn feeds_deduplicate_at_the_projected_value() {
    // Three facet-level changes, but the volume field moves only once
    let source = ScriptedStatus::new(vec![
        status("e1", "play", 10, "So What"),
        status("e2", "pause", 10, "So What"),
        status("e3", "pause", 35, "So What"),
    ]);
    let host = FacetHost::new(source, fast_config());

    let mut states: ChangeFeed<StatusResponse, PlayerState> =
        ChangeFeed::new(host.attach(), PlayerState::from_status);
    let mut volumes: ChangeFeed<StatusResponse, Option<i32>> =
        ChangeFeed::new(host.attach(), |s: &StatusResponse| s.volume);

    assert_eq!(states.next().await.unwrap(), PlayerState::Playing);
    assert_eq!(states.next().await.unwrap(), PlayerState::Paused);

    // The volume projection skips the state-only change entirely
    assert_eq!(volumes.next().await.unwrap(), Some(10));
    assert_eq!(volumes.next().await.unwrap(), Some(35));

    // No further state change is pending
    let pending = tokio::time::timeout(Duration::from_millis(50), states.next()).await;
    assert!(pending.is_err());
}

#[tokio::test]
async fn media_feed_ignores_transport_flapping() {
    let source = ScriptedStatus::new(vec![
        status("e1", "play", 10, "So What"),
        status("e2", "pause", 10, "So What"),
        status("e3", "play", 10, "So What"),
        status("e4", "play", 10, "Freddie Freeloader"),
    ]);
    let host = FacetHost::new(source, fast_config());

    let mut media: ChangeFeed<StatusResponse, PlayerMedia> =
        ChangeFeed::new(host.attach(), PlayerMedia::from_status);

    assert_eq!(media.next().await.unwrap().titles, vec!["So What"]);
    assert_eq!(
        media.next().await.unwrap().titles,
        vec!["Freddie Freeloader"]
    );
}

#[tokio::test]
async fn feed_detach_reports_double_detach() {
    let source = ScriptedStatus::new(vec![status("e1", "play", 10, "So What")]);
    let host = FacetHost::new(source, fast_config());

    let mut volumes: ChangeFeed<StatusResponse, PlayerVolume> = ChangeFeed::new(
        host.attach(),
        |s: &StatusResponse| PlayerVolume {
            percent: s.volume.unwrap_or(0).max(0) as u32,
            db: None,
            muted: s.mute == Some(1),
        },
    );

    volumes.detach().unwrap();
    assert!(volumes.detach().is_err());
    assert_eq!(host.subscriber_count(), 0);
}
