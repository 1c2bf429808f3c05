//! Client SDK for BluOS players
//!
//! [`BluPlayer`] is the entry point: it validates an endpoint, owns the
//! per-facet long-poll loops, and exposes typed change feeds, one-shot
//! getters and commands, the music browser, and the play queue.
//!
//! Change feeds are distinct-until-changed at the projected-value level:
//! the volume feed does not re-emit because an unrelated status field
//! moved. Commands never touch the published snapshots; their effect shows
//! up on the feeds once the device reports it through the next poll cycle.

mod browser;
mod error;
mod feed;
mod player;
mod queue;
mod types;

pub use browser::{MusicBrowser, MusicContentEntry, MusicContentNode};
pub use error::{BrowseError, PlayerError, Result};
pub use feed::ChangeFeed;
pub use player::BluPlayer;
pub use queue::{PlayQueue, QueueSong, SongPages};
pub use types::{
    PlayPosition, PlayQueueInfo, PlayerMedia, PlayerState, PlayerVolume, Preset, RepeatMode,
    ShuffleMode,
};

// The wire and engine layers callers may need for advanced use
pub use bluos_channel::{BluChannel, ChannelConfig, ChannelError, DEFAULT_PORT};
pub use bluos_stream::{StreamConfig, SubscriptionError};
