//! Two-step "connect AWS account" flow.
//!
//! Step 1 fetches a fresh external id and shows how to deploy the IAM role
//! that trusts it. Step 2 collects the alias and role ARN, validates them
//! locally, and only then calls the backend.

#[cfg(test)]
#[path = "add_account_wizard_test.rs"]
mod add_account_wizard_test;

use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{AwsAccount, CreateAccountRequest};
use crate::query::hooks;
use crate::util::validation::{FormErrors, validate_alias, validate_role_arn};

pub const TEMPLATE_FILE_NAME: &str = "resonant-iam-role.yaml";

/// CloudFormation template for the read-only role Resonant assumes.
pub const CLOUDFORMATION_TEMPLATE: &str = "AWSTemplateFormatVersion: '2010-09-09'
Description: 'Resonant AWS Account Integration Role'

Parameters:
  ExternalId:
    Type: String
    Description: External ID provided by Resonant
    NoEcho: true

Resources:
  ResonantRole:
    Type: AWS::IAM::Role
    Properties:
      RoleName: ResonantComplianceRole
      AssumeRolePolicyDocument:
        Version: '2012-10-17'
        Statement:
          - Effect: Allow
            Principal:
              AWS: 'arn:aws:iam::YOUR_RESONANT_ACCOUNT:root'
            Action: 'sts:AssumeRole'
            Condition:
              StringEquals:
                'sts:ExternalId': !Ref ExternalId
      ManagedPolicyArns:
        - 'arn:aws:iam::aws:policy/ReadOnlyAccess'
      Policies:
        - PolicyName: ResonantTaggingPolicy
          PolicyDocument:
            Version: '2012-10-17'
            Statement:
              - Effect: Allow
                Action:
                  - 'tag:GetResources'
                  - 'tag:GetTagKeys'
                  - 'tag:GetTagValues'
                  - 'resourcegroupstaggingapi:*'
                Resource: '*'

Outputs:
  RoleArn:
    Description: ARN of the created IAM role
    Value: !GetAtt ResonantRole.Arn
    Export:
      Name: ResonantRoleArn
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    GeneratingCredentials,
    DeployRole,
    AccountDetails,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no external id yet; generate credentials first")]
    NotReady,
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug)]
pub struct AddAccountWizard {
    step: WizardStep,
    external_id: Option<String>,
    instructions: String,
    pub account_alias: String,
    pub role_arn: String,
}

impl Default for AddAccountWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::GeneratingCredentials,
            external_id: None,
            instructions: String::new(),
            account_alias: String::new(),
            role_arn: String::new(),
        }
    }
}

impl AddAccountWizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue with an external id generated in an earlier session.
    #[must_use]
    pub fn resume(external_id: impl Into<String>) -> Self {
        Self { step: WizardStep::DeployRole, external_id: Some(external_id.into()), ..Self::default() }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Generate the external id and move to the role deployment step.
    /// On failure the wizard stays on step 0 and the error toast has
    /// already been emitted.
    pub async fn start(&mut self, ctx: &AppContext) -> Result<(), ApiError> {
        let generated = hooks::generate_external_id(ctx).await?;
        self.external_id = Some(generated.external_id);
        self.instructions = generated.instructions;
        self.step = WizardStep::DeployRole;
        Ok(())
    }

    /// Move from the role instructions to the details form.
    pub fn proceed(&mut self) -> Result<(), WizardError> {
        if self.external_id.is_none() {
            return Err(WizardError::NotReady);
        }
        self.step = WizardStep::AccountDetails;
        Ok(())
    }

    pub fn back(&mut self) {
        if self.step == WizardStep::AccountDetails {
            self.step = WizardStep::DeployRole;
        }
    }

    /// Validated create request from the current form fields.
    pub fn request(&self) -> Result<CreateAccountRequest, WizardError> {
        let external_id = self.external_id.clone().ok_or(WizardError::NotReady)?;
        let alias = self.account_alias.trim();
        let role_arn = self.role_arn.trim();
        FormErrors::check([validate_alias(alias), validate_role_arn(role_arn)])?;
        Ok(CreateAccountRequest { account_alias: alias.to_owned(), role_arn: role_arn.to_owned(), external_id })
    }

    /// Validate, then connect the account. Nothing is sent when validation
    /// fails.
    pub async fn submit(&self, ctx: &AppContext) -> Result<AwsAccount, WizardError> {
        let request = self.request()?;
        Ok(hooks::create_account(ctx, &request).await?)
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self.step {
            WizardStep::GeneratingCredentials => "Generating credentials...",
            WizardStep::DeployRole => "Step 1 of 2: Deploy IAM role",
            WizardStep::AccountDetails => "Step 2 of 2: Enter account details",
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("Connect AWS Account\n{}\n", self.description());
        match self.step {
            WizardStep::GeneratingCredentials => {}
            WizardStep::DeployRole => {
                out.push_str(&format!("\nExternal ID: {}\n", self.external_id.as_deref().unwrap_or_default()));
                if !self.instructions.is_empty() {
                    out.push_str(&format!("\n{}\n", self.instructions));
                }
                out.push_str(&format!(
                    "\nDeploy the CloudFormation template ({TEMPLATE_FILE_NAME}) with this External ID, \
                     then copy the RoleArn output.\n"
                ));
            }
            WizardStep::AccountDetails => {
                out.push_str(&format!("\nAccount Alias *  {}\n", self.account_alias));
                out.push_str(&format!("IAM Role ARN *   {}\n", self.role_arn));
            }
        }
        out
    }
}

/// The 12-digit account number embedded in a role ARN.
#[must_use]
pub fn account_id_from_role_arn(role_arn: &str) -> Option<&str> {
    let rest = role_arn.strip_prefix("arn:aws:iam::")?;
    let (account, _) = rest.split_once(':')?;
    (account.len() == 12 && account.bytes().all(|b| b.is_ascii_digit())).then_some(account)
}
