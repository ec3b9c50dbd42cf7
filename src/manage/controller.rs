use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    api::ApiError,
    forms::{FormError, LabForm, LabSubmission, RoomForm, RoomSubmission},
    log_error, log_info,
    models::{Lab, LabId, Room, RoomId},
    notify::Notifier,
    patch::Patch,
    session::SessionContext,
};

use super::{ListStatus, ManageState};

const ENABLE_LOGS: bool = true;

const LOAD_FAILED: &str = "Could not load the laboratories.";
const SAVE_LAB_FAILED: &str = "Could not save the laboratory.";
const DELETE_LAB_FAILED: &str = "Could not delete the laboratory.";
const SAVE_ROOM_FAILED: &str = "Could not save the room.";
const DELETE_ROOM_FAILED: &str = "Could not delete the room.";

/// Failure of a modal submission: either the form refused the input or the
/// backend refused the request.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageSnapshot {
    pub status: ListStatus,
    pub labs: Vec<Lab>,
    pub selected_lab: Option<Lab>,
}

/// Management view: the lab list with its rooms, the selection, and the lab
/// and room modals. Mutations patch the cached list instead of re-fetching.
#[derive(Clone)]
pub struct ManageController {
    state: Arc<Mutex<ManageState>>,
    session: Arc<SessionContext>,
    notifier: Notifier,
}

impl ManageController {
    pub fn new(session: Arc<SessionContext>, notifier: Notifier) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManageState::new())),
            session,
            notifier,
        }
    }

    pub async fn snapshot(&self) -> ManageSnapshot {
        let state = self.state.lock().await;
        ManageSnapshot {
            status: state.status,
            labs: state.labs.clone(),
            selected_lab: state.selected_lab().cloned(),
        }
    }

    pub async fn status(&self) -> ListStatus {
        self.state.lock().await.status
    }

    pub async fn fetch_labs(&self) -> Result<Vec<Lab>, ApiError> {
        let token = self.session.require_token().await?;
        self.set_status(ListStatus::Loading).await;

        let result = self.session.api().get_labs(&token).await;
        let labs = self.settle(result, LOAD_FAILED).await?;

        log_info!("Fetched {} laboratories", labs.len());
        self.state.lock().await.replace_labs(labs.clone());
        Ok(labs)
    }

    /// Select a lab already in the list. Unknown ids leave the selection as is.
    pub async fn select_lab(&self, lab_id: LabId) -> Option<Lab> {
        let mut state = self.state.lock().await;
        let lab = state.lab(lab_id).cloned()?;
        state.selected_lab = Some(lab_id);
        Some(lab)
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.selected_lab = None;
    }

    pub async fn selected_lab(&self) -> Option<Lab> {
        self.state.lock().await.selected_lab().cloned()
    }

    pub async fn save_lab(&self, submission: LabSubmission) -> Result<Lab, ApiError> {
        let token = self.session.require_token().await?;
        self.set_status(ListStatus::Mutating).await;
        let api = self.session.api();

        match submission {
            LabSubmission::Create(input) => {
                log_info!("Creating laboratory '{}'", input.name);
                let result = api.create_lab(&token, &input).await;
                let lab = self.settle(result, SAVE_LAB_FAILED).await?;

                {
                    let mut state = self.state.lock().await;
                    state.patch_labs(Patch::Append(lab.clone()));
                    state.status = ListStatus::Loaded;
                }
                self.notifier.success(
                    "Laboratory created",
                    "The laboratory was created successfully.",
                );
                Ok(lab)
            }
            LabSubmission::Update(lab_id, input) => {
                log_info!("Updating laboratory {lab_id}");
                let result = api.update_lab(&token, lab_id, &input).await;
                let mut lab = self.settle(result, SAVE_LAB_FAILED).await?;

                {
                    let mut state = self.state.lock().await;
                    // Update responses may omit rooms; keep the cached ones.
                    if lab.rooms.is_empty() {
                        if let Some(cached) = state.lab(lab_id) {
                            lab.rooms = cached.rooms.clone();
                        }
                    }
                    state.patch_labs(Patch::Replace {
                        key: lab_id,
                        item: lab.clone(),
                    });
                    state.status = ListStatus::Loaded;
                }
                self.notifier
                    .success("Laboratory updated", "The changes were saved successfully.");
                Ok(lab)
            }
        }
    }

    pub async fn delete_lab(&self, lab_id: LabId) -> Result<(), ApiError> {
        let token = self.session.require_token().await?;
        self.set_status(ListStatus::Mutating).await;

        log_info!("Deleting laboratory {lab_id}");
        let result = self.session.api().delete_lab(&token, lab_id).await;
        self.settle(result, DELETE_LAB_FAILED).await?;

        {
            let mut state = self.state.lock().await;
            state.patch_labs(Patch::Remove(lab_id));
            state.status = ListStatus::Loaded;
        }
        self.notifier.success(
            "Laboratory deleted",
            "The laboratory was removed successfully.",
        );
        Ok(())
    }

    /// Save a room into the lab named by the submission. Without a selected
    /// lab nothing is sent and `Ok(None)` comes back.
    pub async fn save_room(&self, submission: RoomSubmission) -> Result<Option<Room>, ApiError> {
        if self.state.lock().await.selected_lab().is_none() {
            return Ok(None);
        }
        let lab_id = match &submission {
            RoomSubmission::Create(input) | RoomSubmission::Update(_, input) => input.lab_id,
        };
        let token = self.session.require_token().await?;
        self.set_status(ListStatus::Mutating).await;
        let api = self.session.api();

        let (patch, room, title, description) = match submission {
            RoomSubmission::Create(input) => {
                log_info!("Creating room '{}' in laboratory {lab_id}", input.name);
                let result = api.create_room(&token, &input).await;
                let mut room = self.settle(result, SAVE_ROOM_FAILED).await?;
                room.lab_id = lab_id;
                (
                    Patch::Append(room.clone()),
                    room,
                    "Room created",
                    "The room was created successfully.",
                )
            }
            RoomSubmission::Update(room_id, input) => {
                log_info!("Updating room {room_id}");
                let result = api.update_room(&token, room_id, &input).await;
                let mut room = self.settle(result, SAVE_ROOM_FAILED).await?;
                room.lab_id = lab_id;
                (
                    Patch::Replace {
                        key: room_id,
                        item: room.clone(),
                    },
                    room,
                    "Room updated",
                    "The changes were saved successfully.",
                )
            }
        };

        {
            let mut state = self.state.lock().await;
            state.patch_rooms(lab_id, patch);
            state.status = ListStatus::Loaded;
        }
        self.notifier.success(title, description);
        Ok(Some(room))
    }

    /// Delete a room of the selected lab. Returns `false` without a selection.
    pub async fn delete_room(&self, room_id: RoomId) -> Result<bool, ApiError> {
        let Some(lab_id) = self.state.lock().await.selected_lab().map(|lab| lab.id) else {
            return Ok(false);
        };
        let token = self.session.require_token().await?;
        self.set_status(ListStatus::Mutating).await;

        log_info!("Deleting room {room_id}");
        let result = self.session.api().delete_room(&token, room_id).await;
        self.settle(result, DELETE_ROOM_FAILED).await?;

        {
            let mut state = self.state.lock().await;
            state.patch_rooms(lab_id, Patch::Remove(room_id));
            state.status = ListStatus::Loaded;
        }
        self.notifier
            .success("Room deleted", "The room was removed successfully.");
        Ok(true)
    }

    /// Open the lab modal blank (`None`) or for editing a listed lab.
    pub async fn open_lab_modal(&self, lab_id: Option<LabId>) -> bool {
        let mut state = self.state.lock().await;
        match lab_id {
            None => {
                state.lab_modal.open_create();
                true
            }
            Some(id) => match state.lab(id).cloned() {
                Some(lab) => {
                    state.lab_modal.open_edit(&lab);
                    true
                }
                None => false,
            },
        }
    }

    pub async fn edit_lab_form<F: FnOnce(&mut LabForm)>(&self, edit: F) {
        edit(&mut self.state.lock().await.lab_modal.form);
    }

    pub async fn close_lab_modal(&self) {
        self.state.lock().await.lab_modal.close();
    }

    pub async fn submit_lab_modal(&self) -> Result<Lab, ActionError> {
        let submission = self.state.lock().await.lab_modal.submit()?;
        Ok(self.save_lab(submission).await?)
    }

    /// Room modal needs a selected lab; editing also needs the room to be in it.
    pub async fn open_room_modal(&self, room_id: Option<RoomId>) -> bool {
        let mut state = self.state.lock().await;
        let Some(lab_id) = state.selected_lab().map(|lab| lab.id) else {
            return false;
        };
        match room_id {
            None => {
                state.room_modal.open_create(lab_id);
                true
            }
            Some(id) => match state.room(id).cloned() {
                Some(room) => {
                    state.room_modal.open_edit(&room, lab_id);
                    true
                }
                None => false,
            },
        }
    }

    pub async fn edit_room_form<F: FnOnce(&mut RoomForm)>(&self, edit: F) {
        edit(&mut self.state.lock().await.room_modal.form);
    }

    pub async fn close_room_modal(&self) {
        self.state.lock().await.room_modal.close();
    }

    /// Submits into the lab the modal was opened for. With no lab selected
    /// the modal closes and nothing is sent.
    pub async fn submit_room_modal(&self) -> Result<Option<Room>, ActionError> {
        let submission = {
            let mut state = self.state.lock().await;
            if state.selected_lab().is_none() {
                state.room_modal.close();
                return Ok(None);
            }
            state.room_modal.submit()?
        };
        Ok(self.save_room(submission).await?)
    }

    async fn set_status(&self, status: ListStatus) {
        self.state.lock().await.status = status;
    }

    /// Route a façade result through the session's unauthorized handling; on
    /// failure log the detail, show the fixed message and unfreeze the list.
    async fn settle<T>(&self, result: Result<T, ApiError>, failure: &str) -> Result<T, ApiError> {
        let result = self.session.check(result).await;
        if let Err(err) = &result {
            log_error!("{failure} ({err})");
            self.notifier.error(failure);
            self.state.lock().await.status = ListStatus::Loaded;
        }
        result
    }
}
