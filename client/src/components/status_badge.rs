//! Status badges for accounts, scans, severities and violations.

#[cfg(test)]
#[path = "status_badge_test.rs"]
mod status_badge_test;

use std::fmt;

use crate::net::types::{AccountStatus, ScanStatus, Severity, ViolationStatus};
use crate::state::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
    Secondary,
    Default,
    Success,
    Destructive,
    Warning,
    Outline,
}

impl BadgeVariant {
    /// SGR parameters for this variant on a light or dark background.
    /// `Default` keeps the terminal's own foreground.
    #[must_use]
    pub fn ansi_color(self, theme: Theme) -> Option<&'static str> {
        match (self, theme) {
            (Self::Default, _) => None,
            (Self::Secondary, Theme::Light) => Some("90"),
            (Self::Secondary, Theme::Dark) => Some("37"),
            (Self::Success, Theme::Light) => Some("32"),
            (Self::Success, Theme::Dark) => Some("92"),
            (Self::Destructive, Theme::Light) => Some("31"),
            (Self::Destructive, Theme::Dark) => Some("91"),
            (Self::Warning, Theme::Light) => Some("33"),
            (Self::Warning, Theme::Dark) => Some("93"),
            (Self::Outline, Theme::Light) => Some("34"),
            (Self::Outline, Theme::Dark) => Some("96"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub glyph: char,
    pub variant: BadgeVariant,
}

impl Badge {
    fn new(label: impl Into<String>, glyph: char, variant: BadgeVariant) -> Self {
        Self { label: label.into(), glyph, variant }
    }
}

impl Badge {
    /// The badge text wrapped in its variant's color.
    #[must_use]
    pub fn paint(&self, theme: Theme) -> String {
        match self.variant.ansi_color(theme) {
            Some(code) => format!("\x1b[{code}m{self}\x1b[0m"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.glyph, self.label)
    }
}

#[must_use]
pub fn account_badge(status: AccountStatus) -> Badge {
    let (glyph, variant) = match status {
        AccountStatus::Active => ('✓', BadgeVariant::Success),
        AccountStatus::Invalid => ('✗', BadgeVariant::Destructive),
        AccountStatus::Expired => ('!', BadgeVariant::Warning),
        AccountStatus::Testing => ('↻', BadgeVariant::Outline),
    };
    Badge::new(status.as_str(), glyph, variant)
}

#[must_use]
pub fn scan_badge(status: ScanStatus) -> Badge {
    let (glyph, variant) = match status {
        ScanStatus::Pending => ('…', BadgeVariant::Secondary),
        ScanStatus::Running => ('↻', BadgeVariant::Default),
        ScanStatus::Success => ('✓', BadgeVariant::Success),
        ScanStatus::Failed => ('✗', BadgeVariant::Destructive),
    };
    Badge::new(status.as_str(), glyph, variant)
}

#[must_use]
pub fn severity_badge(severity: Severity) -> Badge {
    let (glyph, variant) = match severity {
        Severity::Critical => ('‼', BadgeVariant::Destructive),
        Severity::High => ('!', BadgeVariant::Destructive),
        Severity::Medium => ('•', BadgeVariant::Secondary),
        Severity::Low => ('·', BadgeVariant::Secondary),
    };
    Badge::new(severity.as_str(), glyph, variant)
}

#[must_use]
pub fn violation_badge(status: ViolationStatus) -> Badge {
    let (label, glyph, variant) = match status {
        ViolationStatus::Open => ("Open", '!', BadgeVariant::Destructive),
        ViolationStatus::Resolved => ("Resolved", '✓', BadgeVariant::Default),
        ViolationStatus::Ignored => ("Ignored", '-', BadgeVariant::Secondary),
    };
    Badge::new(label, glyph, variant)
}

/// Capitalized severity name as shown in breakdowns ("Critical", "High").
#[must_use]
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
    }
}

/// Every badge a renderer can emit.
#[must_use]
pub fn all_badges() -> Vec<Badge> {
    let accounts = [AccountStatus::Active, AccountStatus::Invalid, AccountStatus::Expired, AccountStatus::Testing]
        .map(account_badge);
    let scans = [ScanStatus::Pending, ScanStatus::Running, ScanStatus::Success, ScanStatus::Failed].map(scan_badge);
    let violations =
        [ViolationStatus::Open, ViolationStatus::Resolved, ViolationStatus::Ignored].map(violation_badge);
    let severities = Severity::ALL.map(severity_badge);
    accounts.into_iter().chain(scans).chain(violations).chain(severities).collect()
}

/// Color every badge found in rendered `text`. Renderers stay plain; the
/// terminal front end calls this when color is on.
#[must_use]
pub fn paint_badges(text: &str, theme: Theme) -> String {
    let mut out = text.to_owned();
    for badge in all_badges() {
        let plain = badge.to_string();
        if out.contains(&plain) {
            out = out.replace(&plain, &badge.paint(theme));
        }
    }
    out
}
