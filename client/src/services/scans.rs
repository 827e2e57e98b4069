//! `/scans` endpoints.

use async_trait::async_trait;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::ScanJob;
use crate::poll::scan_status::ScanJobSource;

#[derive(Clone)]
pub struct ScanService {
    api: ApiClient,
}

impl ScanService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Start a scan; the returned job is usually `PENDING`.
    pub async fn trigger_scan(&self, account_id: &str) -> Result<ScanJob, ApiError> {
        self.api.post_empty(&format!("/scans/accounts/{account_id}")).await
    }

    pub async fn get_scan_job(&self, job_id: &str) -> Result<ScanJob, ApiError> {
        self.api.get(&format!("/scans/{job_id}")).await
    }

    pub async fn list_scans(&self) -> Result<Vec<ScanJob>, ApiError> {
        self.api.get("/scans").await
    }

    pub async fn get_account_scans(&self, account_id: &str) -> Result<Vec<ScanJob>, ApiError> {
        self.api.get(&format!("/scans/accounts/{account_id}")).await
    }

    /// Latest scan for an account. A 404 means "never scanned" and is `Ok(None)`.
    pub async fn get_latest_scan(&self, account_id: &str) -> Result<Option<ScanJob>, ApiError> {
        match self.api.get(&format!("/scans/accounts/{account_id}/latest")).await {
            Ok(job) => Ok(Some(job)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ScanJobSource for ScanService {
    async fn fetch_job(&self, job_id: &str) -> Result<ScanJob, ApiError> {
        self.get_scan_job(job_id).await
    }
}

#[cfg(test)]
#[path = "scans_test.rs"]
mod scans_test;
