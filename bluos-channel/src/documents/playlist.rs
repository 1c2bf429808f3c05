use serde::Deserialize;

use crate::poll::{ChangeToken, LongPollable};

/// Play queue metadata served by `/Playlist`
///
/// Only the root attributes are decoded here; the song listing variant of
/// the endpoint is decoded as [`PlayQueueListingResponse`] instead. This
/// keeps the long-pollable facet small: queue edits bump `modified` and
/// `length` without the stream layer carrying every song.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayQueueStatusResponse {
    #[serde(rename = "@etag")]
    pub etag: Option<String>,

    #[serde(rename = "@id")]
    pub id: Option<u32>,

    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@length", default)]
    pub length: u32,

    /// Set while the queue has unsaved edits
    #[serde(rename = "@modified")]
    pub modified: Option<u8>,
}

impl LongPollable for PlayQueueStatusResponse {
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

/// One page of the play queue song listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayQueueListingResponse {
    #[serde(rename = "@name")]
    pub name: Option<String>,

    /// Total queue length, not the page length
    #[serde(rename = "@length", default)]
    pub length: u32,

    #[serde(rename = "song", default)]
    pub songs: Vec<SongElement>,
}

/// One song inside a play queue listing page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SongElement {
    #[serde(rename = "@id")]
    pub id: Option<u32>,

    pub title: Option<String>,

    #[serde(rename = "art")]
    pub artist: Option<String>,

    #[serde(rename = "alb")]
    pub album: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_XML: &str = r#"
        <playlist name="Jazz evening" length="1200" id="1" modified="0">
            <song id="0"><title>So What</title><art>Miles Davis</art><alb>Kind of Blue</alb></song>
            <song id="1"><title>Freddie Freeloader</title><art>Miles Davis</art><alb>Kind of Blue</alb></song>
        </playlist>"#;

    #[test]
    fn test_parse_listing() {
        let listing: PlayQueueListingResponse = quick_xml::de::from_str(LISTING_XML).unwrap();
        assert_eq!(listing.name.as_deref(), Some("Jazz evening"));
        assert_eq!(listing.length, 1200);
        assert_eq!(listing.songs.len(), 2);
        assert_eq!(listing.songs[1].title.as_deref(), Some("Freddie Freeloader"));
        assert_eq!(listing.songs[1].artist.as_deref(), Some("Miles Davis"));
    }

    #[test]
    fn test_parse_queue_status_ignores_songs() {
        let status: PlayQueueStatusResponse = quick_xml::de::from_str(LISTING_XML).unwrap();
        assert_eq!(status.length, 1200);
        assert_eq!(status.id, Some(1));
        assert_eq!(status.modified, Some(0));
    }

    #[test]
    fn test_parse_empty_queue() {
        let listing: PlayQueueListingResponse =
            quick_xml::de::from_str(r#"<playlist length="0"/>"#).unwrap();
        assert!(listing.songs.is_empty());
    }

    #[test]
    fn test_content_eq_tracks_length() {
        let a: PlayQueueStatusResponse =
            quick_xml::de::from_str(r#"<playlist id="1" length="10" etag="a"/>"#).unwrap();
        let b: PlayQueueStatusResponse =
            quick_xml::de::from_str(r#"<playlist id="1" length="10" etag="b"/>"#).unwrap();
        let c: PlayQueueStatusResponse =
            quick_xml::de::from_str(r#"<playlist id="1" length="11" etag="b"/>"#).unwrap();
        assert!(a.content_eq(&b));
        assert!(!a.content_eq(&c));
    }
}
