//! Connected account list.

#[cfg(test)]
#[path = "aws_accounts_test.rs"]
mod aws_accounts_test;

use time::OffsetDateTime;

use super::heading;
use crate::components::account_card::render_account_cards;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::query::hooks;

pub async fn render(ctx: &AppContext) -> Result<String, ApiError> {
    let accounts = hooks::use_aws_accounts(ctx).await?;
    let mut out = heading("AWS Accounts", "Manage the AWS accounts monitored for tag compliance");
    out.push('\n');
    out.push_str(&render_account_cards(&accounts, OffsetDateTime::now_utc()));
    Ok(out)
}
