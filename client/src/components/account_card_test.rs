use time::macros::datetime;

use super::*;
use crate::test_support::account;

#[test]
fn card_shows_alias_badge_and_sync() {
    let mut acct = account("acct-1");
    acct.last_synced_at = Some("2024-03-01T11:00:00Z".into());
    let out = render_account_card(&acct, datetime!(2024-03-01 12:00:00 UTC));

    assert!(out.starts_with("acct-1-alias  [✓ ACTIVE]"));
    assert!(out.contains("Account:     123456789012"));
    assert!(out.contains("Last Synced: about 1 hour ago"));
}

#[test]
fn blank_alias_falls_back_to_account_number() {
    let mut acct = account("acct-1");
    acct.account_alias = "  ".into();
    assert_eq!(display_name(&acct), "123456789012");
}

#[test]
fn alias_edit_trims_and_rejects_blank() {
    assert_eq!(alias_edit("  prod  ").as_deref(), Some("prod"));
    assert_eq!(alias_edit("   "), None);
}
