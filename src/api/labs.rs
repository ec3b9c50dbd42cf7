use reqwest::Method;
use serde::de::IgnoredAny;

use super::{ApiClient, ApiError};
use crate::models::{Lab, LabId, LabInput};

impl ApiClient {
    pub async fn get_labs(&self, token: &str) -> Result<Vec<Lab>, ApiError> {
        let labs: Vec<Lab> = self
            .execute(self.request(Method::GET, "/labs", Some(token)))
            .await?;
        Ok(labs.into_iter().map(Lab::claim_rooms).collect())
    }

    pub async fn create_lab(&self, token: &str, lab: &LabInput) -> Result<Lab, ApiError> {
        let builder = Self::with_body(self.request(Method::POST, "/labs", Some(token)), lab);
        let created: Lab = self.execute(builder).await?;
        Ok(created.claim_rooms())
    }

    pub async fn update_lab(
        &self,
        token: &str,
        lab_id: LabId,
        lab: &LabInput,
    ) -> Result<Lab, ApiError> {
        let endpoint = format!("/labs/{lab_id}");
        let builder = Self::with_body(self.request(Method::PUT, &endpoint, Some(token)), lab);
        let updated: Lab = self.execute(builder).await?;
        Ok(updated.claim_rooms())
    }

    pub async fn delete_lab(&self, token: &str, lab_id: LabId) -> Result<(), ApiError> {
        let endpoint = format!("/labs/{lab_id}");
        let _: IgnoredAny = self
            .execute(self.request(Method::DELETE, &endpoint, Some(token)))
            .await?;
        Ok(())
    }
}
