use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RoomId;

pub type BookingId = i64;

/// A booking as the backend reports it. Only the identifier and room
/// reference are interpreted; time range and requester metadata ride along
/// untouched in `details`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Booking payloads are passed through verbatim; their shape belongs to the
/// backend.
pub type BookingInput = Map<String, Value>;
