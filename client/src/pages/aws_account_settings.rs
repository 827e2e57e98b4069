//! Region scope for one account.

#[cfg(test)]
#[path = "aws_account_settings_test.rs"]
mod aws_account_settings_test;

use super::heading;
use crate::components::account_card::display_name;
use crate::components::region_selector::RegionSelector;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::AwsRegion;
use crate::query::hooks;

pub const ABOUT_REGIONS: &str = "About Regions
Each AWS region is an isolated geographic location. Selecting which regions to scan controls
where Resonant looks for resources and keeps scans short.
New regions launched after the account was connected appear after `rediscover`.
At least one region must stay enabled; scans fail when none are.
";

/// Load the account's regions into a selector.
pub async fn load_selector(ctx: &AppContext, account_id: &str) -> Result<RegionSelector, ApiError> {
    Ok(RegionSelector::new(hooks::use_account_regions(ctx, account_id).await?))
}

/// Persist the selector's choice and reload it from the backend. Returns
/// `Ok(None)` when there was nothing valid to save.
pub async fn save(
    ctx: &AppContext,
    account_id: &str,
    selector: &mut RegionSelector,
) -> Result<Option<Vec<AwsRegion>>, ApiError> {
    let Some(codes) = selector.save_codes() else {
        return Ok(None);
    };
    let saved = hooks::update_regions(ctx, account_id, codes).await?;
    selector.reload(hooks::use_account_regions(ctx, account_id).await?);
    Ok(Some(saved))
}

pub async fn render(ctx: &AppContext, account_id: &str) -> Result<String, ApiError> {
    let account = hooks::use_aws_account(ctx, account_id).await?;
    let selector = load_selector(ctx, account_id).await?;
    let mut out = heading("Account Settings", &format!("Configure scanning for {}", display_name(&account)));
    out.push('\n');
    out.push_str(&selector.render());
    out.push('\n');
    out.push_str(ABOUT_REGIONS);
    Ok(out)
}
