//! Connected AWS account summary.

#[cfg(test)]
#[path = "account_card_test.rs"]
mod account_card_test;

use time::OffsetDateTime;

use super::status_badge::account_badge;
use crate::net::types::AwsAccount;
use crate::util::time_ago::time_ago;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to disconnect this account?";

/// Alias, falling back to the account number when unset.
#[must_use]
pub fn display_name(account: &AwsAccount) -> &str {
    if account.account_alias.trim().is_empty() { &account.account_id } else { &account.account_alias }
}

/// Trimmed alias for a rename, `None` when blank.
#[must_use]
pub fn alias_edit(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[must_use]
pub fn render_account_card(account: &AwsAccount, now: OffsetDateTime) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", display_name(account), account_badge(account.status)));
    out.push_str(&format!("  ID:          {}\n", account.id));
    out.push_str(&format!("  Account:     {}\n", account.account_id));
    out.push_str(&format!("  Role ARN:    {}\n", account.role_arn));
    if let Some(synced) = account.last_synced_at.as_deref() {
        out.push_str(&format!("  Last Synced: {}\n", time_ago(synced, now)));
    }
    out
}

/// Cards for every account, or the empty state.
#[must_use]
pub fn render_account_cards(accounts: &[AwsAccount], now: OffsetDateTime) -> String {
    if accounts.is_empty() {
        return "No AWS accounts connected\nRun `resonant accounts add` to connect one.\n".to_owned();
    }
    accounts.iter().map(|a| render_account_card(a, now)).collect::<Vec<_>>().join("\n")
}
