use serde::Deserialize;

use crate::poll::{ChangeToken, LongPollable};

/// Preset listing served by `/Presets`
///
/// Presets are a flat, fully-materialized set; the document is never paged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PresetListResponse {
    #[serde(rename = "@etag")]
    pub etag: Option<String>,

    #[serde(rename = "preset", default)]
    pub presets: Vec<PresetElement>,
}

/// One stored preset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PresetElement {
    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(rename = "@name")]
    pub name: String,

    /// The URL loaded when the preset is recalled
    #[serde(rename = "@url")]
    pub url: Option<String>,

    #[serde(rename = "@image")]
    pub image: Option<String>,
}

impl LongPollable for PresetListResponse {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presets() {
        let xml = r#"
            <presets prid="2" etag="9c">
                <preset url="Preset?id=1" id="1" name="Radio Paradise" image="/Sources/images/ParadiseRadioIcon.png"/>
                <preset url="Preset?id=2" id="2" name="NTS 1"/>
            </presets>"#;
        let list: PresetListResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(list.presets.len(), 2);
        assert_eq!(list.presets[0].id, 1);
        assert_eq!(list.presets[0].name, "Radio Paradise");
        assert!(list.presets[1].image.is_none());
    }

    #[test]
    fn test_parse_no_presets() {
        let list: PresetListResponse = quick_xml::de::from_str(r#"<presets prid="0"/>"#).unwrap();
        assert!(list.presets.is_empty());
    }

    #[test]
    fn test_content_eq_tracks_set() {
        let a: PresetListResponse = quick_xml::de::from_str(
            r#"<presets etag="1"><preset id="1" name="A"/></presets>"#,
        )
        .unwrap();
        let b: PresetListResponse = quick_xml::de::from_str(
            r#"<presets etag="2"><preset id="1" name="A"/></presets>"#,
        )
        .unwrap();
        let c: PresetListResponse = quick_xml::de::from_str(
            r#"<presets etag="2"><preset id="1" name="B"/></presets>"#,
        )
        .unwrap();
        assert!(a.content_eq(&b));
        assert!(!a.content_eq(&c));
    }
}
