use serde::{Deserialize, Serialize};

use crate::{
    forms::{LabModal, RoomModal},
    models::{Lab, LabId, Room, RoomId},
    patch::Patch,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    Mutating,
}

impl Default for ListStatus {
    fn default() -> Self {
        ListStatus::Idle
    }
}

/// Everything the management view shows: the lab list, which lab is
/// selected, and the two modals.
#[derive(Debug, Clone, Default)]
pub struct ManageState {
    pub status: ListStatus,
    pub labs: Vec<Lab>,
    /// Pointer into `labs`; resolved on read so edits to the selected lab
    /// show up without a second copy.
    pub selected_lab: Option<LabId>,
    pub lab_modal: LabModal,
    pub room_modal: RoomModal,
}

impl ManageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_lab(&self) -> Option<&Lab> {
        let id = self.selected_lab?;
        self.labs.iter().find(|lab| lab.id == id)
    }

    pub fn lab(&self, lab_id: LabId) -> Option<&Lab> {
        self.labs.iter().find(|lab| lab.id == lab_id)
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.selected_lab()?
            .rooms
            .iter()
            .find(|room| room.id == room_id)
    }

    pub fn replace_labs(&mut self, labs: Vec<Lab>) {
        self.labs = labs;
        if self.selected_lab().is_none() {
            self.selected_lab = None;
        }
        self.status = ListStatus::Loaded;
    }

    pub fn patch_labs(&mut self, patch: Patch<Lab>) -> usize {
        if let Patch::Remove(id) = &patch {
            if self.selected_lab == Some(*id) {
                self.selected_lab = None;
            }
        }
        patch.apply(&mut self.labs)
    }

    /// Patch the rooms of `lab_id`. Returns 0 when the lab is not in the list.
    pub fn patch_rooms(&mut self, lab_id: LabId, patch: Patch<Room>) -> usize {
        match self.labs.iter_mut().find(|lab| lab.id == lab_id) {
            Some(lab) => patch.apply(&mut lab.rooms),
            None => 0,
        }
    }
}
