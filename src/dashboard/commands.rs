use crate::{
    dashboard::DashboardSnapshot,
    models::{Booking, BookingId, BookingInput, RoomId},
    AppState,
};

pub async fn get_dashboard(state: &AppState) -> Result<DashboardSnapshot, String> {
    state.dashboard.refresh().await.map_err(|e| e.to_string())
}

pub async fn list_bookings(
    state: &AppState,
    room_id: Option<RoomId>,
) -> Result<Vec<Booking>, String> {
    if let Some(room_id) = room_id {
        return state
            .dashboard
            .room_bookings(room_id)
            .await
            .map_err(|e| e.to_string());
    }

    let session = &state.session;
    let token = session.require_token().await.map_err(|e| e.to_string())?;
    let result = session.api().get_bookings(&token).await;
    state.report(result, "Could not load the bookings.").await
}

pub async fn create_booking(state: &AppState, booking: BookingInput) -> Result<Booking, String> {
    let session = &state.session;
    let token = session.require_token().await.map_err(|e| e.to_string())?;
    let result = session.api().create_booking(&token, &booking).await;
    let created = state.report(result, "Could not save the booking.").await?;
    state
        .notifier
        .success("Booking created", "The booking was created successfully.");
    Ok(created)
}

pub async fn update_booking(
    state: &AppState,
    booking_id: BookingId,
    booking: BookingInput,
) -> Result<Booking, String> {
    let session = &state.session;
    let token = session.require_token().await.map_err(|e| e.to_string())?;
    let result = session.api().update_booking(&token, booking_id, &booking).await;
    let updated = state.report(result, "Could not save the booking.").await?;
    state
        .notifier
        .success("Booking updated", "The changes were saved successfully.");
    Ok(updated)
}

pub async fn delete_booking(state: &AppState, booking_id: BookingId) -> Result<(), String> {
    let session = &state.session;
    let token = session.require_token().await.map_err(|e| e.to_string())?;
    let result = session.api().delete_booking(&token, booking_id).await;
    state.report(result, "Could not delete the booking.").await?;
    state
        .notifier
        .success("Booking deleted", "The booking was removed successfully.");
    Ok(())
}
