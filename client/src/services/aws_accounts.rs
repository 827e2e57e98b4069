//! `/aws-accounts` endpoints, including per-account region configuration.

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{
    AwsAccount, AwsRegion, CreateAccountRequest, ExternalIdResponse, TestConnectionResponse, UpdateAliasRequest,
    UpdateRegionsRequest,
};

#[derive(Clone)]
pub struct AwsAccountsService {
    api: ApiClient,
}

impl AwsAccountsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the backend for a fresh external id to put in the IAM trust policy.
    pub async fn generate_external_id(&self) -> Result<ExternalIdResponse, ApiError> {
        self.api.post_empty("/aws-accounts/external-id").await
    }

    pub async fn list_accounts(&self) -> Result<Vec<AwsAccount>, ApiError> {
        self.api.get("/aws-accounts").await
    }

    pub async fn get_account(&self, id: &str) -> Result<AwsAccount, ApiError> {
        self.api.get(&format!("/aws-accounts/{id}")).await
    }

    /// Connect an account through IAM role assumption.
    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<AwsAccount, ApiError> {
        self.api.post_json("/aws-accounts/role", request).await
    }

    pub async fn test_connection(&self, id: &str) -> Result<TestConnectionResponse, ApiError> {
        self.api.post_empty(&format!("/aws-accounts/{id}/test")).await
    }

    pub async fn update_alias(&self, id: &str, request: &UpdateAliasRequest) -> Result<AwsAccount, ApiError> {
        self.api.patch_json(&format!("/aws-accounts/{id}/alias"), request).await
    }

    pub async fn delete_account(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/aws-accounts/{id}")).await
    }

    pub async fn get_regions(&self, id: &str) -> Result<Vec<AwsRegion>, ApiError> {
        self.api.get(&format!("/aws-accounts/{id}/regions")).await
    }

    /// Replace the enabled region set; every other region is disabled.
    pub async fn update_regions(&self, id: &str, request: &UpdateRegionsRequest) -> Result<Vec<AwsRegion>, ApiError> {
        self.api.patch_json(&format!("/aws-accounts/{id}/regions"), request).await
    }

    pub async fn rediscover_regions(&self, id: &str) -> Result<Vec<AwsRegion>, ApiError> {
        self.api.post_empty(&format!("/aws-accounts/{id}/regions/rediscover")).await
    }
}

#[cfg(test)]
#[path = "aws_accounts_test.rs"]
mod aws_accounts_test;
