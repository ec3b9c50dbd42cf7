use serde::{Deserialize, Serialize};

use super::{optional, parse_capacity, required, FormError};
use crate::models::{LabId, Room, RoomId, RoomInput};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomForm {
    pub name: String,
    pub capacity: String,
    pub description: String,
}

impl RoomForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            capacity: room.capacity.to_string(),
            description: room.description.clone().unwrap_or_default(),
        }
    }

    /// The owning lab is never typed in; it comes from the current selection.
    pub fn validate(&self, lab_id: LabId) -> Result<RoomInput, FormError> {
        Ok(RoomInput {
            name: required(&self.name, "name")?,
            capacity: parse_capacity(&self.capacity)?,
            description: optional(&self.description),
            lab_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomSubmission {
    Create(RoomInput),
    Update(RoomId, RoomInput),
}

/// Room modal. The owning lab is fixed when the modal opens, so a selection
/// change before submit cannot move the room elsewhere.
#[derive(Debug, Clone, Default)]
pub struct RoomModal {
    open: bool,
    editing: Option<RoomId>,
    lab_id: Option<LabId>,
    pub form: RoomForm,
}

impl RoomModal {
    pub fn open_create(&mut self, lab_id: LabId) {
        self.open = true;
        self.editing = None;
        self.lab_id = Some(lab_id);
        self.form = RoomForm::blank();
    }

    pub fn open_edit(&mut self, room: &Room, lab_id: LabId) {
        self.open = true;
        self.editing = Some(room.id);
        self.lab_id = Some(lab_id);
        self.form = RoomForm::from_room(room);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.lab_id = None;
        self.form = RoomForm::blank();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<RoomId> {
        self.editing
    }

    pub fn lab_id(&self) -> Option<LabId> {
        self.lab_id
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit room"
        } else {
            "New room"
        }
    }

    pub fn submit(&mut self) -> Result<RoomSubmission, FormError> {
        let Some(lab_id) = self.lab_id.filter(|_| self.open) else {
            return Err(FormError::NotOpen);
        };
        let input = self.form.validate(lab_id)?;
        let submission = match self.editing {
            Some(id) => RoomSubmission::Update(id, input),
            None => RoomSubmission::Create(input),
        };
        self.close();
        Ok(submission)
    }
}
