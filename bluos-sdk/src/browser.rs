//! Lazily-resolved music browsing over the device's content catalog
//!
//! The catalog is addressed by opaque browse keys. Nothing is cached and
//! no tree is held in memory: a [`MusicContentNode`] is one fetched page
//! plus the cursor to the next, and resolving an entry fetches its listing
//! on demand.

use std::sync::Arc;

use bluos_channel::documents::{BrowseItem, BrowseResponse};
use bluos_channel::BluChannel;

use crate::error::BrowseError;

/// One entry inside a resolved listing
///
/// Entries never own children; a resolvable entry is resolved into a
/// fresh [`MusicContentNode`] on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicContentEntry {
    name: String,
    browse_key: Option<String>,
    image: Option<String>,
    play_url: Option<String>,
}

impl MusicContentEntry {
    fn from_item(item: &BrowseItem) -> Self {
        Self {
            name: item.text.clone(),
            browse_key: item.browse_key.clone(),
            image: item.image.clone(),
            play_url: item.play_url.clone(),
        }
    }

    /// Display name of the entry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entry can be resolved into a further listing
    pub fn is_resolvable(&self) -> bool {
        self.browse_key.is_some()
    }

    /// Artwork URL, when the service provides one
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Action URL that starts playback of this entry, when playable
    pub fn play_url(&self) -> Option<&str> {
        self.play_url.as_deref()
    }
}

/// One resolved page of a browse location
///
/// Identity is the resolution key, not the content: re-resolving the same
/// entry performs a fresh fetch. The pagination cursor only moves forward;
/// [`MusicContentNode::resolve_next`] on the last page is an error, not a
/// no-op.
#[derive(Debug)]
pub struct MusicContentNode {
    channel: Arc<BluChannel>,
    key: Option<String>,
    entries: Vec<MusicContentEntry>,
    next_key: Option<String>,
}

impl MusicContentNode {
    fn from_response(channel: Arc<BluChannel>, key: Option<String>, response: BrowseResponse) -> Self {
        Self {
            channel,
            key,
            entries: response.items.iter().map(MusicContentEntry::from_item).collect(),
            next_key: response.next_key,
        }
    }

    /// The resolution key this node was fetched with; `None` for the root
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Entries of the current page, in listing order
    pub fn entries(&self) -> &[MusicContentEntry] {
        &self.entries
    }

    /// Whether a further page exists beyond this one
    pub fn has_next(&self) -> bool {
        self.next_key.is_some()
    }

    /// Resolve an entry of this node into its own listing
    pub async fn resolve(&self, entry: &MusicContentEntry) -> Result<MusicContentNode, BrowseError> {
        let key = entry
            .browse_key
            .as_deref()
            .ok_or_else(|| BrowseError::NotResolvable(entry.name.clone()))?;
        tracing::debug!(key, "resolving content entry");
        let response = self.channel.browse(Some(key)).await?;
        Ok(Self::from_response(
            Arc::clone(&self.channel),
            Some(key.to_owned()),
            response,
        ))
    }

    /// Fetch the next page of this listing
    ///
    /// Fails with [`BrowseError::NoMoreEntries`] when this is the last
    /// page; the failure is stable, calling again fails the same way.
    pub async fn resolve_next(&self) -> Result<MusicContentNode, BrowseError> {
        let key = self.next_key.as_deref().ok_or(BrowseError::NoMoreEntries)?;
        tracing::debug!(key, "resolving next content page");
        let response = self.channel.browse(Some(key)).await?;
        Ok(Self::from_response(
            Arc::clone(&self.channel),
            Some(key.to_owned()),
            response,
        ))
    }

    /// Search within this node's location
    ///
    /// The result is a fresh pagination root, independent of this node's
    /// entries.
    pub async fn search(&self, term: &str) -> Result<MusicContentNode, BrowseError> {
        tracing::debug!(key = self.key.as_deref().unwrap_or(""), term, "searching");
        let response = self.channel.search(self.key.as_deref(), term).await?;
        Ok(Self::from_response(Arc::clone(&self.channel), self.key.clone(), response))
    }

    /// Walk the tree below this node depth-first, visiting every entry of
    /// the pages already fetched
    ///
    /// Resolvability is checked before recursing and the walk stops at
    /// `max_depth` levels regardless of remaining entries or cursors, so
    /// catalogs of unbounded depth stay bounded. `visit` receives the
    /// zero-based level of each entry.
    pub async fn visit_entries<F>(&self, max_depth: usize, visit: &mut F) -> Result<(), BrowseError>
    where
        F: FnMut(usize, &MusicContentEntry),
    {
        self.visit_level(0, max_depth, visit).await
    }

    async fn visit_level<F>(
        &self,
        level: usize,
        max_depth: usize,
        visit: &mut F,
    ) -> Result<(), BrowseError>
    where
        F: FnMut(usize, &MusicContentEntry),
    {
        if level >= max_depth {
            return Ok(());
        }
        for entry in &self.entries {
            visit(level, entry);
            if entry.is_resolvable() && level + 1 < max_depth {
                let child = self.resolve(entry).await?;
                Box::pin(child.visit_level(level + 1, max_depth, visit)).await?;
            }
        }
        Ok(())
    }
}

/// Root of the music browsing tree: the device's top-level sources
#[derive(Debug)]
pub struct MusicBrowser {
    root: MusicContentNode,
}

impl MusicBrowser {
    /// Fetch the top-level sources listing
    pub async fn browse(channel: Arc<BluChannel>) -> Result<Self, BrowseError> {
        let response = channel.browse(None).await?;
        Ok(Self {
            root: MusicContentNode::from_response(channel, None, response),
        })
    }
}

impl std::ops::Deref for MusicBrowser {
    type Target = MusicContentNode;

    fn deref(&self) -> &MusicContentNode {
        &self.root
    }
}
