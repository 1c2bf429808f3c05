use serde::Deserialize;

use crate::poll::{ChangeToken, LongPollable};

/// Device identity and grouping document served by `/SyncStatus`
///
/// Everything of interest travels in attributes of the root element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SyncStatusResponse {
    #[serde(rename = "@etag")]
    pub etag: Option<String>,

    /// Friendly name of the player
    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@brand")]
    pub brand: Option<String>,

    #[serde(rename = "@model")]
    pub model: Option<String>,

    #[serde(rename = "@modelName")]
    pub model_name: Option<String>,

    /// Device icon path, relative to the player endpoint
    #[serde(rename = "@icon")]
    pub icon: Option<String>,

    #[serde(rename = "@volume")]
    pub volume: Option<i32>,

    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "@mac")]
    pub mac: Option<String>,
}

impl LongPollable for SyncStatusResponse {
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
