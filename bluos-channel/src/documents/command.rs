use serde::Deserialize;

/// Acknowledgement of a transport command (`/Play`, `/Pause`, `/Stop`, `/Preset`)
///
/// The device answers with the transport state it switched to, e.g.
/// `<state>play</state>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransportStateResponse {
    #[serde(rename = "$text")]
    pub state: String,
}

/// Acknowledgement of `/Skip` and `/Back`: the queue index now playing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueIndexResponse {
    #[serde(rename = "$text")]
    pub id: u32,
}

/// Acknowledgement of `/Shuffle` and `/Repeat`: the resulting queue modes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistModeResponse {
    #[serde(rename = "@shuffle")]
    pub shuffle: Option<u8>,

    #[serde(rename = "@repeat")]
    pub repeat: Option<u8>,
}

/// Error document the device returns when it rejects a request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDocument {
    #[serde(rename = "$text")]
    pub message: String,
}
