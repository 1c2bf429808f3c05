//! Paged, forward-only traversal of the play queue

use std::sync::Arc;

use bluos_channel::documents::SongElement;
use bluos_channel::BluChannel;

use crate::error::Result;
use crate::types::PlayQueueInfo;

/// One song in the play queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSong {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl QueueSong {
    fn from_element(element: &SongElement) -> Self {
        Self {
            title: element.title.clone(),
            artist: element.artist.clone(),
            album: element.album.clone(),
        }
    }
}

/// The play queue of one player
pub struct PlayQueue {
    channel: Arc<BluChannel>,
}

impl PlayQueue {
    /// Build a queue handle directly over a channel
    ///
    /// Normally reached through `BluPlayer::play_queue`.
    pub fn from_channel(channel: Arc<BluChannel>) -> Self {
        Self { channel }
    }

    /// Fetch the queue metadata (name, length, modified flag)
    pub async fn info(&self) -> Result<PlayQueueInfo> {
        let status = self.channel.playlist_status(None).await?;
        Ok(PlayQueueInfo::from_status(&status))
    }

    /// Begin a fresh forward-only traversal of the queue's songs
    ///
    /// Each traversal starts from offset zero; drive it with
    /// [`SongPages::next_page`]. Queues can run to thousands of songs, so
    /// only one page is held in memory at a time.
    pub fn songs(&self, page_size: u32) -> SongPages {
        SongPages {
            channel: Arc::clone(&self.channel),
            page_size,
            offset: 0,
            done: page_size == 0,
        }
    }
}

/// Forward-only page puller over the play queue
///
/// Each request offsets by the number of songs already delivered. The
/// traversal ends when the device returns a page shorter than requested
/// (the short page is still delivered) or an empty page; it cannot be
/// restarted, start a new one with [`PlayQueue::songs`].
pub struct SongPages {
    channel: Arc<BluChannel>,
    page_size: u32,
    offset: u32,
    done: bool,
}

impl SongPages {
    /// Fetch the next page, or `None` once the queue is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Vec<QueueSong>>> {
        if self.done {
            return Ok(None);
        }
        let listing = self.channel.playlist(self.offset, self.page_size).await?;
        let songs: Vec<QueueSong> = listing.songs.iter().map(QueueSong::from_element).collect();
        if songs.is_empty() {
            self.done = true;
            return Ok(None);
        }
        if (songs.len() as u32) < self.page_size {
            self.done = true;
        }
        self.offset += songs.len() as u32;
        tracing::debug!(
            delivered = self.offset,
            page = songs.len(),
            "fetched play queue page"
        );
        Ok(Some(songs))
    }
}
