use serde::Deserialize;

use crate::poll::{ChangeToken, LongPollable};

/// Playback status document served by `/Status`
///
/// This is the richest facet: transport state, the up-to-three display
/// title lines, artwork, play position, and the playlist mode flags all
/// travel in one document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "@etag")]
    pub etag: Option<String>,

    /// Transport state: `play`, `pause`, `stop`, `stream` or `connecting`
    pub state: Option<String>,

    /// Shuffle flag: 0 = off, 1 = on
    pub shuffle: Option<u8>,

    /// Repeat flag: 0 = queue, 1 = track, 2 = off
    pub repeat: Option<u8>,

    pub volume: Option<i32>,
    pub mute: Option<u8>,

    /// Elapsed seconds into the current track
    pub secs: Option<u32>,

    /// Total track length in seconds; 0 for endless streams
    #[serde(rename = "totlen")]
    pub total_length: Option<u32>,

    #[serde(rename = "canSeek")]
    pub can_seek: Option<u8>,

    /// Display lines, top to bottom (track / artist / album for most services)
    pub title1: Option<String>,
    pub title2: Option<String>,
    pub title3: Option<String>,

    /// Artwork URL, absolute or relative to the player endpoint
    pub image: Option<String>,

    /// Identifier of the service the player is sourcing from
    pub service: Option<String>,

    /// Index of the current song within the play queue
    pub song: Option<u32>,

    #[serde(rename = "streamUrl")]
    pub stream_url: Option<String>,
}

impl LongPollable for StatusResponse {
    fn change_token(&self) -> Option<ChangeToken> {
        self.etag.clone().map(ChangeToken::new)
    }

    fn content_eq(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.etag = None;
        b.etag = None;
        a == b
    }
}
