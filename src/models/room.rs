use serde::{Deserialize, Serialize};

use super::LabId;

pub type RoomId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    /// Often left out when rooms come nested in their lab; see
    /// [`Lab::claim_rooms`](super::Lab::claim_rooms).
    #[serde(default)]
    pub lab_id: LabId,
}

/// Create/update payload: a room without its identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomInput {
    pub name: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lab_id: LabId,
}
