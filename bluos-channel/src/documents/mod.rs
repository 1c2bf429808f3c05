//! Typed XML documents returned by BluOS endpoints
//!
//! One module per facet/endpoint family. All documents are plain serde
//! structs deserialized with quick-xml; unknown elements and attributes
//! are ignored so newer firmware cannot break decoding.

mod browse;
mod command;
mod playlist;
mod presets;
mod status;
mod sync_status;
mod volume;

pub use browse::{BrowseItem, BrowseResponse};
pub use command::{ErrorDocument, PlaylistModeResponse, QueueIndexResponse, TransportStateResponse};
pub use playlist::{PlayQueueListingResponse, PlayQueueStatusResponse, SongElement};
pub use presets::{PresetElement, PresetListResponse};
pub use status::StatusResponse;
pub use sync_status::SyncStatusResponse;
pub use volume::VolumeResponse;
