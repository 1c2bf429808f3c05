use serde::Deserialize;

use crate::poll::{ChangeToken, LongPollable};

/// Volume document served by `/Volume`
///
/// The percent level is the element text; decibels and the mute flag are
/// attributes. The same document shape is returned by the volume and mute
/// command variants of the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeResponse {
    #[serde(rename = "@etag")]
    pub etag: Option<String>,

    #[serde(rename = "@db")]
    pub db: Option<f32>,

    /// Mute flag: 0 = audible, 1 = muted
    #[serde(rename = "@mute")]
    pub mute: Option<u8>,

    /// Volume as a percentage, 0-100
    #[serde(rename = "$text")]
    pub level: u32,
}

impl VolumeResponse {
    pub fn is_muted(&self) -> bool {
        self.mute == Some(1)
    }
}

impl LongPollable for VolumeResponse {
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
