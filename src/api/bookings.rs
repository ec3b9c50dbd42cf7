use reqwest::Method;
use serde::de::IgnoredAny;

use super::{ApiClient, ApiError};
use crate::models::{Booking, BookingId, BookingInput, RoomId};

impl ApiClient {
    pub async fn get_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        self.execute(self.request(Method::GET, "/bookings", Some(token)))
            .await
    }

    pub async fn get_bookings_by_room(
        &self,
        token: &str,
        room_id: RoomId,
    ) -> Result<Vec<Booking>, ApiError> {
        let endpoint = format!("/bookings/room/{room_id}");
        self.execute(self.request(Method::GET, &endpoint, Some(token)))
            .await
    }

    pub async fn create_booking(
        &self,
        token: &str,
        booking: &BookingInput,
    ) -> Result<Booking, ApiError> {
        let builder = Self::with_body(self.request(Method::POST, "/bookings", Some(token)), booking);
        self.execute(builder).await
    }

    pub async fn update_booking(
        &self,
        token: &str,
        booking_id: BookingId,
        booking: &BookingInput,
    ) -> Result<Booking, ApiError> {
        let endpoint = format!("/bookings/{booking_id}");
        let builder = Self::with_body(self.request(Method::PUT, &endpoint, Some(token)), booking);
        self.execute(builder).await
    }

    pub async fn delete_booking(&self, token: &str, booking_id: BookingId) -> Result<(), ApiError> {
        let endpoint = format!("/bookings/{booking_id}");
        let _: IgnoredAny = self
            .execute(self.request(Method::DELETE, &endpoint, Some(token)))
            .await?;
        Ok(())
    }
}
