//! Which resource types are in scan scope.

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{ResourceTypeSetting, UpdateResourceTypeSettingRequest};

#[derive(Clone)]
pub struct ResourceTypeSettingService {
    api: ApiClient,
}

impl ResourceTypeSettingService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<ResourceTypeSetting>, ApiError> {
        self.api.get("/resource-type-settings").await
    }

    pub async fn update_enabled(&self, resource_type: &str, enabled: bool) -> Result<ResourceTypeSetting, ApiError> {
        self.api
            .put_json(
                &format!("/resource-type-settings/{resource_type}/enabled"),
                &UpdateResourceTypeSettingRequest { enabled },
            )
            .await
    }
}
