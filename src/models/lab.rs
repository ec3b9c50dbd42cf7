use serde::{Deserialize, Serialize};

use super::Room;

pub type LabId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub id: LabId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    /// Filled by the backend by convention; absent means no rooms known.
    #[serde(default)]
    pub rooms: Vec<Room>,
}

/// Create/update payload: a lab without its identifier or rooms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabInput {
    pub name: String,
    pub location: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Lab {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Point every nested room at this lab, whether or not the payload
    /// repeated `labId`.
    pub fn claim_rooms(mut self) -> Self {
        for room in &mut self.rooms {
            room.lab_id = self.id;
        }
        self
    }

    pub fn to_input(&self) -> LabInput {
        LabInput {
            name: self.name.clone(),
            location: self.location.clone(),
            capacity: self.capacity,
            description: self.description.clone(),
        }
    }
}
