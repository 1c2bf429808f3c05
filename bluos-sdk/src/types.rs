//! Player-level value types projected from facet snapshots
//!
//! Every projection here is a pure function of one snapshot; the change
//! feeds rely on that purity to deduplicate at the projected-value level.

use std::fmt;
use std::time::Duration;

use bluos_channel::documents::{
    PlayQueueStatusResponse, PresetElement, PresetListResponse, StatusResponse, VolumeResponse,
};

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
    /// Playing a live stream; position and seeking do not apply
    Streaming,
    Connecting,
    Unknown,
}

impl PlayerState {
    /// Decode a transport state token as the device reports it
    pub fn from_token(token: &str) -> Self {
        match token {
            "play" => PlayerState::Playing,
            "pause" => PlayerState::Paused,
            "stop" => PlayerState::Stopped,
            "stream" => PlayerState::Streaming,
            "connecting" => PlayerState::Connecting,
            _ => PlayerState::Unknown,
        }
    }

    pub fn from_status(status: &StatusResponse) -> Self {
        status
            .state
            .as_deref()
            .map_or(PlayerState::Unknown, PlayerState::from_token)
    }
}

/// Queue shuffle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    ShuffleOff,
    ShuffleOn,
}

impl ShuffleMode {
    pub fn from_status(status: &StatusResponse) -> Self {
        match status.shuffle {
            Some(1) => ShuffleMode::ShuffleOn,
            _ => ShuffleMode::ShuffleOff,
        }
    }

    pub(crate) fn to_flag(self) -> bool {
        self == ShuffleMode::ShuffleOn
    }
}

/// Queue repeat mode, using the device's encoding: 0 = whole queue,
/// 1 = current track, 2 = off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    RepeatAll,
    RepeatOne,
    RepeatOff,
}

impl RepeatMode {
    pub fn from_status(status: &StatusResponse) -> Self {
        match status.repeat {
            Some(0) => RepeatMode::RepeatAll,
            Some(1) => RepeatMode::RepeatOne,
            _ => RepeatMode::RepeatOff,
        }
    }

    pub(crate) fn to_state(self) -> u8 {
        match self {
            RepeatMode::RepeatAll => 0,
            RepeatMode::RepeatOne => 1,
            RepeatMode::RepeatOff => 2,
        }
    }
}

/// Play position within the current track
///
/// `length` is absent for endless sources (the device reports a total
/// length of zero for live streams).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayPosition {
    pub elapsed: Duration,
    pub length: Option<Duration>,
}

impl PlayPosition {
    pub fn from_status(status: &StatusResponse) -> Self {
        Self {
            elapsed: Duration::from_secs(u64::from(status.secs.unwrap_or(0))),
            length: status
                .total_length
                .filter(|&total| total != 0)
                .map(|total| Duration::from_secs(u64::from(total))),
        }
    }
}

impl fmt::Display for PlayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mmss(duration: Duration) -> String {
            let secs = duration.as_secs();
            format!("{}:{:02}", secs / 60, secs % 60)
        }
        match self.length {
            Some(length) => write!(f, "{} / {}", mmss(self.elapsed), mmss(length)),
            None => write!(f, "{}", mmss(self.elapsed)),
        }
    }
}

/// What the player is currently rendering: the display title lines plus
/// optional artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMedia {
    /// Up to three lines, top to bottom (track / artist / album for most
    /// services)
    pub titles: Vec<String>,
    /// Artwork URL, absolute or relative to the player endpoint
    pub image: Option<String>,
}

impl PlayerMedia {
    pub fn from_status(status: &StatusResponse) -> Self {
        let titles = [&status.title1, &status.title2, &status.title3]
            .into_iter()
            .filter_map(|title| title.clone())
            .collect();
        Self {
            titles,
            image: status.image.clone(),
        }
    }
}

/// Volume as the device reports it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerVolume {
    /// Percentage, 0-100
    pub percent: u32,
    /// Amplifier gain, when the device reports it
    pub db: Option<f32>,
    pub muted: bool,
}

impl PlayerVolume {
    pub fn from_volume(volume: &VolumeResponse) -> Self {
        Self {
            percent: volume.level,
            db: volume.db,
            muted: volume.is_muted(),
        }
    }
}

/// One stored preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub number: u32,
    pub name: String,
    pub image: Option<String>,
    /// The URL the device loads when the preset is recalled
    pub url: Option<String>,
}

impl Preset {
    fn from_element(element: &PresetElement) -> Self {
        Self {
            number: element.id,
            name: element.name.clone(),
            image: element.image.clone(),
            url: element.url.clone(),
        }
    }

    /// Project a preset listing document into the flat set of presets
    pub fn list_from(list: &PresetListResponse) -> Vec<Preset> {
        list.presets.iter().map(Preset::from_element).collect()
    }
}

/// Play queue metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayQueueInfo {
    pub name: Option<String>,
    /// Number of songs in the queue
    pub length: u32,
    /// Whether the queue has unsaved edits
    pub modified: bool,
}

impl PlayQueueInfo {
    pub fn from_status(status: &PlayQueueStatusResponse) -> Self {
        Self {
            name: status.name.clone(),
            length: status.length,
            modified: status.modified == Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tokens() {
        assert_eq!(PlayerState::from_token("play"), PlayerState::Playing);
        assert_eq!(PlayerState::from_token("stream"), PlayerState::Streaming);
        assert_eq!(PlayerState::from_token("weird"), PlayerState::Unknown);
    }

    #[test]
    fn test_state_from_missing_token() {
        let status = StatusResponse::default();
        assert_eq!(PlayerState::from_status(&status), PlayerState::Unknown);
    }

    #[test]
    fn test_position_omits_length_for_streams() {
        let status = StatusResponse {
            secs: Some(43),
            total_length: Some(0),
            ..StatusResponse::default()
        };
        let position = PlayPosition::from_status(&status);
        assert_eq!(position.elapsed, Duration::from_secs(43));
        assert!(position.length.is_none());
    }

    #[test]
    fn test_position_display() {
        let position = PlayPosition {
            elapsed: Duration::from_secs(43),
            length: Some(Duration::from_secs(256)),
        };
        assert_eq!(position.to_string(), "0:43 / 4:16");
    }

    #[test]
    fn test_repeat_mode_roundtrip() {
        for mode in [RepeatMode::RepeatAll, RepeatMode::RepeatOne, RepeatMode::RepeatOff] {
            let status = StatusResponse {
                repeat: Some(mode.to_state()),
                ..StatusResponse::default()
            };
            assert_eq!(RepeatMode::from_status(&status), mode);
        }
    }

    #[test]
    fn test_media_skips_missing_title_lines() {
        let status = StatusResponse {
            title1: Some("So What".to_string()),
            title3: Some("Kind of Blue".to_string()),
            ..StatusResponse::default()
        };
        let media = PlayerMedia::from_status(&status);
        assert_eq!(media.titles, vec!["So What", "Kind of Blue"]);
        assert!(media.image.is_none());
    }

    #[test]
    fn test_queue_info_projection() {
        let status = PlayQueueStatusResponse {
            name: Some("Jazz evening".to_string()),
            length: 12,
            modified: Some(1),
            ..PlayQueueStatusResponse::default()
        };
        let info = PlayQueueInfo::from_status(&status);
        assert_eq!(info.length, 12);
        assert!(info.modified);
    }
}
