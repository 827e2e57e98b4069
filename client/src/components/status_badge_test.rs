use super::*;

#[test]
fn account_badges_follow_status() {
    assert_eq!(account_badge(AccountStatus::Active).variant, BadgeVariant::Success);
    assert_eq!(account_badge(AccountStatus::Invalid).variant, BadgeVariant::Destructive);
    assert_eq!(account_badge(AccountStatus::Expired).variant, BadgeVariant::Warning);
    assert_eq!(account_badge(AccountStatus::Testing).to_string(), "[↻ TESTING]");
}

#[test]
fn scan_badges_follow_status() {
    assert_eq!(scan_badge(ScanStatus::Pending).variant, BadgeVariant::Secondary);
    assert_eq!(scan_badge(ScanStatus::Running).variant, BadgeVariant::Default);
    assert_eq!(scan_badge(ScanStatus::Failed).to_string(), "[✗ FAILED]");
}

#[test]
fn violation_badges_use_readable_labels() {
    assert_eq!(violation_badge(ViolationStatus::Open).to_string(), "[! Open]");
    assert_eq!(violation_badge(ViolationStatus::Ignored).variant, BadgeVariant::Secondary);
}

#[test]
fn high_and_critical_are_destructive() {
    for severity in Severity::ALL {
        let destructive = severity_badge(severity).variant == BadgeVariant::Destructive;
        assert_eq!(destructive, severity >= Severity::High, "{severity:?}");
    }
}

#[test]
fn paint_wraps_known_badges_only() {
    let text = format!("web-1  {}  [? other]", severity_badge(Severity::High));
    let painted = paint_badges(&text, Theme::Dark);
    assert!(painted.contains("\x1b[91m[! HIGH]\x1b[0m"), "{painted:?}");
    assert!(painted.ends_with("[? other]"));
}

#[test]
fn default_variant_is_never_colored() {
    let badge = scan_badge(ScanStatus::Running);
    assert_eq!(badge.paint(Theme::Light), "[↻ RUNNING]");
    assert_ne!(BadgeVariant::Success.ansi_color(Theme::Light), BadgeVariant::Success.ansi_color(Theme::Dark));
}
