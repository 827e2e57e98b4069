use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{AwsResource, ResourceStats};

#[derive(Clone)]
pub struct ResourceService {
    api: ApiClient,
}

impl ResourceService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /resources`, optionally filtered by resource type.
    pub async fn list_resources(&self, resource_type: Option<&str>) -> Result<Vec<AwsResource>, ApiError> {
        self.api.get_with_query("/resources", &[("type", resource_type.map(ToOwned::to_owned))]).await
    }

    pub async fn get_resource(&self, id: &str) -> Result<AwsResource, ApiError> {
        self.api.get(&format!("/resources/{id}")).await
    }

    pub async fn get_account_resources(&self, account_id: &str) -> Result<Vec<AwsResource>, ApiError> {
        self.api.get(&format!("/resources/accounts/{account_id}")).await
    }

    pub async fn get_resource_stats(&self) -> Result<ResourceStats, ApiError> {
        self.api.get("/resources/stats").await
    }
}
