//! Wire DTOs for the Resonant REST API.
//!
//! DESIGN
//! ======
//! These records mirror backend JSON (camelCase) one-to-one. Status and
//! severity enums are closed: an unknown variant is a decode error rather
//! than a silently-defaulted value, so display code can match exhaustively.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Lifecycle of a scan job as observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl ScanStatus {
    /// `SUCCESS` and `FAILED` end a scan; nothing is polled after them.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Connection state of an AWS account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Invalid,
    Expired,
    Testing,
}

impl AccountStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Invalid => "INVALID",
            Self::Expired => "EXPIRED",
            Self::Testing => "TESTING",
        }
    }
}

/// Policy severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Violation workflow state. `OPEN` can move to `RESOLVED` or `IGNORED`;
/// ignored violations can be reopened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationStatus {
    Open,
    Resolved,
    Ignored,
}

impl ViolationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Resolved => "RESOLVED",
            Self::Ignored => "IGNORED",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

// =============================================================================
// AUTH
// =============================================================================

/// An authenticated user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Normalized login/register result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// The backend answers login/register with a flat record; older builds
/// nested the user. Both shapes decode into [`AuthResponse`].
#[derive(Deserialize)]
#[serde(untagged)]
enum AuthResponseWire {
    Nested {
        token: String,
        user: User,
    },
    Flat {
        token: String,
        id: String,
        name: String,
        email: String,
        #[serde(default)]
        role: UserRole,
        #[serde(default = "default_true")]
        enabled: bool,
    },
}

impl<'de> Deserialize<'de> for AuthResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match AuthResponseWire::deserialize(deserializer)? {
            AuthResponseWire::Nested { token, user } => Self { token, user },
            AuthResponseWire::Flat { token, id, name, email, role, enabled } => {
                Self { token, user: User { id, email, name, role, enabled } }
            }
        })
    }
}

// =============================================================================
// AWS ACCOUNTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsAccount {
    pub id: String,
    /// The 12-digit AWS account number.
    pub account_id: String,
    pub account_alias: String,
    pub role_arn: String,
    #[serde(default)]
    pub credential_type: String,
    pub status: AccountStatus,
    pub last_synced_at: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdResponse {
    pub external_id: String,
    pub instructions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionResponse {
    pub success: bool,
    pub message: String,
    pub account_id: String,
    pub assumed_role_arn: String,
    pub available_region_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_alias: String,
    pub role_arn: String,
    pub external_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAliasRequest {
    pub account_alias: String,
}

/// One scannable region of a connected account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsRegion {
    pub id: String,
    pub region_code: String,
    pub enabled: bool,
    pub last_scan_at: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionsRequest {
    pub enabled_region_codes: Vec<String>,
}

// =============================================================================
// SCANS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanJob {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub account_alias: String,
    pub status: ScanStatus,
    #[serde(default)]
    pub resources_scanned: u64,
    #[serde(default)]
    pub violations_found: u64,
    #[serde(default)]
    pub violations_resolved: u64,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub duration_seconds: Option<u64>,
    pub error_message: Option<String>,
    pub created_at: String,
}

// =============================================================================
// VIOLATIONS
// =============================================================================

/// A tag whose value is outside the policy's allowed set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidTag {
    pub current: String,
    pub allowed: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub invalid_tags: BTreeMap<String, InvalidTag>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceViolation {
    pub id: String,
    pub resource_id: String,
    pub resource_arn: String,
    pub resource_type: String,
    #[serde(default)]
    pub resource_name: String,
    pub policy_id: String,
    pub policy_name: String,
    pub severity: Severity,
    pub status: ViolationStatus,
    #[serde(default)]
    pub violation_details: ViolationDetails,
    pub detected_at: String,
    pub resolved_at: Option<String>,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationStats {
    pub total_open: u64,
    #[serde(default)]
    pub by_severity: BTreeMap<Severity, u64>,
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsResource {
    pub id: String,
    pub resource_id: String,
    pub resource_arn: String,
    pub resource_type: String,
    pub region: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub tag_count: u64,
    pub discovered_at: String,
    pub last_seen_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStats {
    pub total: u64,
    #[serde(default)]
    pub by_type: BTreeMap<String, u64>,
}

// =============================================================================
// TAG POLICIES
// =============================================================================

/// Required tag key → allowed values. `None` means any value is accepted.
pub type RequiredTags = BTreeMap<String, Option<Vec<String>>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPolicy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_tags: RequiredTags,
    pub resource_types: Vec<String>,
    pub severity: Severity,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagPolicyRequest {
    pub name: String,
    pub description: String,
    pub required_tags: RequiredTags,
    pub resource_types: Vec<String>,
    pub severity: Severity,
    pub enabled: bool,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_tags: Option<RequiredTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPolicyStats {
    pub total: u64,
    pub enabled: u64,
    pub disabled: u64,
}

// =============================================================================
// SETTINGS + DASHBOARD
// =============================================================================

/// Whether a resource type is in scan scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeSetting {
    pub id: String,
    pub resource_type: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResourceTypeSettingRequest {
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRate {
    pub total_resources: u64,
    pub compliant_resources: u64,
    pub non_compliant_resources: u64,
    /// Percentage in `0.0..=100.0`.
    pub compliance_rate: f64,
}

fn default_true() -> bool {
    true
}
