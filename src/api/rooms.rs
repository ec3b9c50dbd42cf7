use reqwest::Method;
use serde::de::IgnoredAny;

use super::{ApiClient, ApiError};
use crate::models::{Room, RoomId, RoomInput};

impl ApiClient {
    pub async fn get_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        self.execute(self.request(Method::GET, "/rooms", Some(token)))
            .await
    }

    pub async fn create_room(&self, token: &str, room: &RoomInput) -> Result<Room, ApiError> {
        let builder = Self::with_body(self.request(Method::POST, "/rooms", Some(token)), room);
        self.execute(builder).await
    }

    pub async fn update_room(
        &self,
        token: &str,
        room_id: RoomId,
        room: &RoomInput,
    ) -> Result<Room, ApiError> {
        let endpoint = format!("/rooms/{room_id}");
        let builder = Self::with_body(self.request(Method::PUT, &endpoint, Some(token)), room);
        self.execute(builder).await
    }

    pub async fn delete_room(&self, token: &str, room_id: RoomId) -> Result<(), ApiError> {
        let endpoint = format!("/rooms/{room_id}");
        let _: IgnoredAny = self
            .execute(self.request(Method::DELETE, &endpoint, Some(token)))
            .await?;
        Ok(())
    }
}
