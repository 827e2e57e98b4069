//! Domain services: one HTTP call per method, typed results.
//!
//! Services never cache and never retry; caching lives in [`crate::query`].

pub mod auth;
pub mod aws_accounts;
pub mod dashboard;
pub mod resource_type_settings;
pub mod resources;
pub mod scans;
pub mod tag_policies;
pub mod violations;

use crate::net::api::ApiClient;

pub use auth::AuthService;
pub use aws_accounts::AwsAccountsService;
pub use dashboard::DashboardService;
pub use resource_type_settings::ResourceTypeSettingService;
pub use resources::ResourceService;
pub use scans::ScanService;
pub use tag_policies::TagPolicyService;
pub use violations::ViolationService;

/// Every service, sharing one [`ApiClient`].
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub aws_accounts: AwsAccountsService,
    pub scans: ScanService,
    pub violations: ViolationService,
    pub resources: ResourceService,
    pub tag_policies: TagPolicyService,
    pub resource_type_settings: ResourceTypeSettingService,
    pub dashboard: DashboardService,
}

impl Services {
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            aws_accounts: AwsAccountsService::new(api.clone()),
            scans: ScanService::new(api.clone()),
            violations: ViolationService::new(api.clone()),
            resources: ResourceService::new(api.clone()),
            tag_policies: TagPolicyService::new(api.clone()),
            resource_type_settings: ResourceTypeSettingService::new(api.clone()),
            dashboard: DashboardService::new(api.clone()),
        }
    }
}
