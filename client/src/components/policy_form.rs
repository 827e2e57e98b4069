//! Create/edit form model for tag policies.
//!
//! Required tags are entered as `key=v1|v2` (value must be one of the
//! listed) or `key=*` / bare `key` (any value).

#[cfg(test)]
#[path = "policy_form_test.rs"]
mod policy_form_test;

use std::str::FromStr;

use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{CreateTagPolicyRequest, RequiredTags, Severity, TagPolicy, UpdateTagPolicyRequest};
use crate::query::hooks;
use crate::util::validation::{
    FormErrors, ValidationError, validate_description, validate_policy_name, validate_resource_types,
    validate_tag_key,
};

pub const COMMON_RESOURCE_TYPES: [&str; 10] = [
    "ec2:instance",
    "s3:bucket",
    "rds:db-instance",
    "lambda:function",
    "dynamodb:table",
    "ebs:volume",
    "ecs:service",
    "eks:cluster",
    "elb:loadbalancer",
    "cloudfront:distribution",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRequirement {
    pub key: String,
    /// `None` accepts any value.
    pub allowed: Option<Vec<String>>,
}

impl FromStr for TagRequirement {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (key, values) = match input.split_once('=') {
            Some((key, values)) => (key.trim(), values.trim()),
            None => (input.trim(), "*"),
        };
        validate_tag_key(key)?;
        let allowed: Vec<String> = values
            .split(['|', ','])
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != "*")
            .map(ToOwned::to_owned)
            .collect();
        Ok(Self { key: key.to_owned(), allowed: (!allowed.is_empty()).then_some(allowed) })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyFormError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyForm {
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub enabled: bool,
    pub resource_types: Vec<String>,
    pub required_tags: Vec<TagRequirement>,
}

impl Default for PolicyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            severity: Severity::Medium,
            enabled: true,
            resource_types: Vec::new(),
            required_tags: Vec::new(),
        }
    }
}

impl PolicyForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing policy for editing.
    #[must_use]
    pub fn from_policy(policy: &TagPolicy) -> Self {
        Self {
            name: policy.name.clone(),
            description: policy.description.clone(),
            severity: policy.severity,
            enabled: policy.enabled,
            resource_types: policy.resource_types.clone(),
            required_tags: policy
                .required_tags
                .iter()
                .map(|(key, allowed)| TagRequirement { key: key.clone(), allowed: allowed.clone() })
                .collect(),
        }
    }

    pub fn toggle_resource_type(&mut self, resource_type: &str) {
        if let Some(pos) = self.resource_types.iter().position(|t| t == resource_type) {
            self.resource_types.remove(pos);
        } else {
            self.resource_types.push(resource_type.to_owned());
        }
    }

    /// Parse and append one `key=...` entry.
    pub fn add_tag(&mut self, input: &str) -> Result<(), ValidationError> {
        let requirement = input.parse::<TagRequirement>()?;
        self.required_tags.retain(|t| t.key != requirement.key);
        self.required_tags.push(requirement);
        Ok(())
    }

    fn required_tags_map(&self) -> RequiredTags {
        self.required_tags
            .iter()
            .filter(|t| !t.key.trim().is_empty())
            .map(|t| (t.key.trim().to_owned(), t.allowed.clone()))
            .collect()
    }

    /// Validated create payload.
    pub fn to_request(&self) -> Result<CreateTagPolicyRequest, FormErrors> {
        let required_tags = self.required_tags_map();
        let tags_present = if required_tags.is_empty() {
            Err(ValidationError::new("requiredTags", "At least one tag key is required"))
        } else {
            Ok(())
        };
        FormErrors::check(
            [
                validate_policy_name(self.name.trim()),
                validate_description(&self.description),
                validate_resource_types(&self.resource_types),
                tags_present,
            ]
            .into_iter()
            .chain(required_tags.keys().map(|k| validate_tag_key(k))),
        )?;
        Ok(CreateTagPolicyRequest {
            name: self.name.trim().to_owned(),
            description: self.description.clone(),
            required_tags,
            resource_types: self.resource_types.clone(),
            severity: self.severity,
            enabled: self.enabled,
        })
    }

    /// Validated full-replacement update payload.
    pub fn to_update_request(&self) -> Result<UpdateTagPolicyRequest, FormErrors> {
        let request = self.to_request()?;
        Ok(UpdateTagPolicyRequest {
            name: Some(request.name),
            description: Some(request.description),
            required_tags: Some(request.required_tags),
            resource_types: Some(request.resource_types),
            severity: Some(request.severity),
            enabled: Some(request.enabled),
        })
    }

    /// Create, or update `editing` when given. Nothing is sent when
    /// validation fails.
    pub async fn submit(&self, ctx: &AppContext, editing: Option<&str>) -> Result<TagPolicy, PolicyFormError> {
        match editing {
            Some(id) => {
                let request = self.to_update_request()?;
                Ok(hooks::update_policy(ctx, id, &request).await?)
            }
            None => {
                let request = self.to_request()?;
                Ok(hooks::create_policy(ctx, &request).await?)
            }
        }
    }
}

/// Case-insensitive severity name.
#[must_use]
pub fn parse_severity(input: &str) -> Option<Severity> {
    Severity::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(input.trim()))
}
