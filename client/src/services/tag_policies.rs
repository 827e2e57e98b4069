//! `/tag-policies` endpoints.

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{CreateTagPolicyRequest, TagPolicy, TagPolicyStats, UpdateTagPolicyRequest};

#[derive(Clone)]
pub struct TagPolicyService {
    api: ApiClient,
}

impl TagPolicyService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /tag-policies`; `enabled` filters when set.
    pub async fn get_all(&self, enabled: Option<bool>) -> Result<Vec<TagPolicy>, ApiError> {
        self.api.get_with_query("/tag-policies", &[("enabled", enabled.map(|e| e.to_string()))]).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<TagPolicy, ApiError> {
        self.api.get(&format!("/tag-policies/{id}")).await
    }

    pub async fn create(&self, request: &CreateTagPolicyRequest) -> Result<TagPolicy, ApiError> {
        self.api.post_json("/tag-policies", request).await
    }

    pub async fn update(&self, id: &str, request: &UpdateTagPolicyRequest) -> Result<TagPolicy, ApiError> {
        self.api.put_json(&format!("/tag-policies/{id}"), request).await
    }

    pub async fn enable(&self, id: &str) -> Result<TagPolicy, ApiError> {
        self.api.post_empty(&format!("/tag-policies/{id}/enable")).await
    }

    pub async fn disable(&self, id: &str) -> Result<TagPolicy, ApiError> {
        self.api.post_empty(&format!("/tag-policies/{id}/disable")).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/tag-policies/{id}")).await
    }

    pub async fn get_stats(&self) -> Result<TagPolicyStats, ApiError> {
        self.api.get("/tag-policies/stats").await
    }
}

#[cfg(test)]
#[path = "tag_policies_test.rs"]
mod tag_policies_test;
