use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::ComplianceRate;

#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Compliant vs non-compliant resource counts for the current user.
    pub async fn compliance_rate(&self) -> Result<ComplianceRate, ApiError> {
        self.api.get("/dashboard/compliance-rate").await
    }
}
