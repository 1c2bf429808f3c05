use serde::Deserialize;

/// One page of a content listing served by `/Browse`
///
/// The device pages large listings: when more entries exist beyond this
/// page, `nextKey` carries the browse key that fetches the following page.
/// Browse responses are one-shot documents; they carry no change token.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrowseResponse {
    #[serde(rename = "@sid")]
    pub sid: Option<String>,

    /// Cursor for the next page, absent on the last page
    #[serde(rename = "@nextKey")]
    pub next_key: Option<String>,

    #[serde(rename = "item", default)]
    pub items: Vec<BrowseItem>,
}

/// One entry inside a browse listing
///
/// An item with a `browseKey` can be resolved into a further listing; an
/// item without one is a leaf. `playURL` is the action that makes the
/// player start the item, when the service offers one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrowseItem {
    #[serde(rename = "@browseKey")]
    pub browse_key: Option<String>,

    #[serde(rename = "@text", default)]
    pub text: String,

    #[serde(rename = "@type")]
    pub kind: Option<String>,

    #[serde(rename = "@image")]
    pub image: Option<String>,

    #[serde(rename = "@playURL")]
    pub play_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse_root() {
        let xml = r#"
            <browse sid="4">
                <item browseKey="LocalMusic:" text="Library" type="menu" image="/images/LibraryIcon.png"/>
                <item browseKey="TuneIn:" text="TuneIn" type="menu"/>
            </browse>"#;
        let browse: BrowseResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(browse.items.len(), 2);
        assert!(browse.next_key.is_none());
        assert_eq!(browse.items[0].text, "Library");
        assert_eq!(browse.items[0].browse_key.as_deref(), Some("LocalMusic:"));
    }

    #[test]
    fn test_parse_paged_listing() {
        let xml = r#"
            <browse sid="4" nextKey="LocalMusic:albums?page=2">
                <item text="Abbey Road" browseKey="LocalMusic:album:1"
                      playURL="/Play?url=LocalMusic%3Aalbum%3A1"/>
            </browse>"#;
        let browse: BrowseResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(browse.next_key.as_deref(), Some("LocalMusic:albums?page=2"));
        assert!(browse.items[0].play_url.is_some());
    }

    #[test]
    fn test_parse_leaf_item() {
        let xml = r#"<browse><item text="Now Playing"/></browse>"#;
        let browse: BrowseResponse = quick_xml::de::from_str(xml).unwrap();
        assert!(browse.items[0].browse_key.is_none());
        assert!(browse.items[0].play_url.is_none());
    }
}
