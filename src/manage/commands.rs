//! User actions of the management view, as the shell invokes them.
//!
//! Lab and room edits go through the modal forms so the shell gets exactly
//! the validation a form submit would.

use crate::{
    models::{Lab, LabId, Room, RoomId},
    AppState,
};

/// Raw field values as typed. `None` leaves a prefilled field untouched.
#[derive(Debug, Clone, Default)]
pub struct LabFields {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RoomFields {
    pub name: Option<String>,
    pub capacity: Option<String>,
    pub description: Option<String>,
}

pub async fn get_labs(state: &AppState) -> Result<Vec<Lab>, String> {
    state.manage.fetch_labs().await.map_err(|e| e.to_string())
}

pub async fn get_lab(state: &AppState, lab_id: LabId) -> Result<Lab, String> {
    select_lab(state, lab_id).await
}

pub async fn create_lab(state: &AppState, fields: LabFields) -> Result<Lab, String> {
    let manage = &state.manage;
    manage.open_lab_modal(None).await;
    manage
        .edit_lab_form(|form| {
            assign(&mut form.name, fields.name);
            assign(&mut form.location, fields.location);
            assign(&mut form.capacity, fields.capacity);
            assign(&mut form.description, fields.description);
        })
        .await;
    manage.submit_lab_modal().await.map_err(|e| e.to_string())
}

pub async fn update_lab(state: &AppState, lab_id: LabId, fields: LabFields) -> Result<Lab, String> {
    let manage = &state.manage;
    manage.fetch_labs().await.map_err(|e| e.to_string())?;
    if !manage.open_lab_modal(Some(lab_id)).await {
        return Err(format!("laboratory {lab_id} not found"));
    }
    manage
        .edit_lab_form(|form| {
            assign(&mut form.name, fields.name);
            assign(&mut form.location, fields.location);
            assign(&mut form.capacity, fields.capacity);
            assign(&mut form.description, fields.description);
        })
        .await;
    manage.submit_lab_modal().await.map_err(|e| e.to_string())
}

pub async fn delete_lab(state: &AppState, lab_id: LabId) -> Result<(), String> {
    state
        .manage
        .delete_lab(lab_id)
        .await
        .map_err(|e| e.to_string())
}

/// Rooms of one lab, or every room the backend knows when `lab_id` is `None`.
pub async fn get_rooms(state: &AppState, lab_id: Option<LabId>) -> Result<Vec<Room>, String> {
    match lab_id {
        Some(lab_id) => Ok(select_lab(state, lab_id).await?.rooms),
        None => {
            let session = &state.session;
            let token = session.require_token().await.map_err(|e| e.to_string())?;
            let result = session.api().get_rooms(&token).await;
            state.report(result, "Could not load the rooms.").await
        }
    }
}

pub async fn create_room(
    state: &AppState,
    lab_id: LabId,
    fields: RoomFields,
) -> Result<Room, String> {
    let manage = &state.manage;
    select_lab(state, lab_id).await?;
    manage.open_room_modal(None).await;
    manage
        .edit_room_form(|form| {
            assign(&mut form.name, fields.name);
            assign(&mut form.capacity, fields.capacity);
            assign(&mut form.description, fields.description);
        })
        .await;
    manage
        .submit_room_modal()
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "select a laboratory first".to_string())
}

pub async fn update_room(
    state: &AppState,
    lab_id: LabId,
    room_id: RoomId,
    fields: RoomFields,
) -> Result<Room, String> {
    let manage = &state.manage;
    select_lab(state, lab_id).await?;
    if !manage.open_room_modal(Some(room_id)).await {
        return Err(format!("room {room_id} not found in laboratory {lab_id}"));
    }
    manage
        .edit_room_form(|form| {
            assign(&mut form.name, fields.name);
            assign(&mut form.capacity, fields.capacity);
            assign(&mut form.description, fields.description);
        })
        .await;
    manage
        .submit_room_modal()
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "select a laboratory first".to_string())
}

pub async fn delete_room(state: &AppState, lab_id: LabId, room_id: RoomId) -> Result<(), String> {
    select_lab(state, lab_id).await?;
    let deleted = state
        .manage
        .delete_room(room_id)
        .await
        .map_err(|e| e.to_string())?;
    if deleted {
        Ok(())
    } else {
        Err("select a laboratory first".to_string())
    }
}

async fn select_lab(state: &AppState, lab_id: LabId) -> Result<Lab, String> {
    let manage = &state.manage;
    if manage.select_lab(lab_id).await.is_none() {
        manage.fetch_labs().await.map_err(|e| e.to_string())?;
    }
    manage
        .select_lab(lab_id)
        .await
        .ok_or_else(|| format!("laboratory {lab_id} not found"))
}

fn assign(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}
