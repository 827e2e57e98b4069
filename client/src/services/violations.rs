//! `/violations` endpoints.

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{ComplianceViolation, ViolationStats, ViolationStatus};

#[derive(Clone)]
pub struct ViolationService {
    api: ApiClient,
}

impl ViolationService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_violations(&self, status: Option<ViolationStatus>) -> Result<Vec<ComplianceViolation>, ApiError> {
        self.api
            .get_with_query("/violations", &[("status", status.map(|s| s.as_str().to_owned()))])
            .await
    }

    pub async fn get_violation(&self, id: &str) -> Result<ComplianceViolation, ApiError> {
        self.api.get(&format!("/violations/{id}")).await
    }

    pub async fn get_account_violations(&self, account_id: &str) -> Result<Vec<ComplianceViolation>, ApiError> {
        self.api.get(&format!("/violations/accounts/{account_id}")).await
    }

    pub async fn get_resource_violations(&self, resource_id: &str) -> Result<Vec<ComplianceViolation>, ApiError> {
        self.api.get(&format!("/violations/resources/{resource_id}")).await
    }

    pub async fn get_policy_violations(&self, policy_id: &str) -> Result<Vec<ComplianceViolation>, ApiError> {
        self.api.get(&format!("/violations/policies/{policy_id}")).await
    }

    pub async fn ignore_violation(&self, id: &str) -> Result<ComplianceViolation, ApiError> {
        self.api.post_empty(&format!("/violations/{id}/ignore")).await
    }

    pub async fn reopen_violation(&self, id: &str) -> Result<ComplianceViolation, ApiError> {
        self.api.post_empty(&format!("/violations/{id}/reopen")).await
    }

    pub async fn get_violation_stats(&self) -> Result<ViolationStats, ApiError> {
        self.api.get("/violations/stats").await
    }
}

#[cfg(test)]
#[path = "violations_test.rs"]
mod violations_test;
