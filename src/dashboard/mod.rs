//! Landing view: resource totals and the lab cards.

pub mod commands;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    api::ApiError,
    log_error, log_info,
    models::{Booking, Lab, LabId, RoomId},
    notify::Notifier,
    session::SessionContext,
};

const ENABLE_LOGS: bool = true;

const LOAD_FAILED: &str = "Could not load the dashboard.";
const BOOKINGS_FAILED: &str = "Could not load the bookings.";

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_labs: usize,
    pub total_rooms: usize,
    pub total_bookings: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabCard {
    pub id: LabId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub room_count: usize,
    pub description: Option<String>,
}

impl From<&Lab> for LabCard {
    fn from(lab: &Lab) -> Self {
        Self {
            id: lab.id,
            name: lab.name.clone(),
            location: lab.location.clone(),
            capacity: lab.capacity,
            room_count: lab.room_count(),
            description: lab.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub labs: Vec<LabCard>,
}

#[derive(Clone)]
pub struct DashboardController {
    snapshot: Arc<Mutex<DashboardSnapshot>>,
    session: Arc<SessionContext>,
    notifier: Notifier,
}

impl DashboardController {
    pub fn new(session: Arc<SessionContext>, notifier: Notifier) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(DashboardSnapshot::default())),
            session,
            notifier,
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Fetch labs, rooms and bookings together. Without a session this
    /// routes to login and sends nothing.
    pub async fn refresh(&self) -> Result<DashboardSnapshot, ApiError> {
        let token = self.session.require_token().await?;
        let api = self.session.api();

        let result = tokio::try_join!(
            api.get_labs(&token),
            api.get_rooms(&token),
            api.get_bookings(&token),
        );
        let (labs, rooms, bookings) = self.settle(result, LOAD_FAILED).await?;

        let snapshot = DashboardSnapshot {
            stats: DashboardStats {
                total_labs: labs.len(),
                total_rooms: rooms.len(),
                total_bookings: bookings.len(),
            },
            labs: labs.iter().map(LabCard::from).collect(),
        };
        log_info!(
            "Dashboard: {} labs, {} rooms, {} bookings",
            snapshot.stats.total_labs,
            snapshot.stats.total_rooms,
            snapshot.stats.total_bookings
        );

        *self.snapshot.lock().await = snapshot.clone();
        Ok(snapshot)
    }

    pub async fn room_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>, ApiError> {
        let token = self.session.require_token().await?;
        let result = self
            .session
            .api()
            .get_bookings_by_room(&token, room_id)
            .await;
        self.settle(result, BOOKINGS_FAILED).await
    }

    async fn settle<T>(&self, result: Result<T, ApiError>, failure: &str) -> Result<T, ApiError> {
        let result = self.session.check(result).await;
        if let Err(err) = &result {
            log_error!("{failure} ({err})");
            self.notifier.error(failure);
        }
        result
    }
}
