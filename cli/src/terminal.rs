//! Terminal output: toasts on stderr, results on stdout.

use std::io::Write;

use resonant_client::components::status_badge::paint_badges;
use resonant_client::notify::{Notifier, Toast};
use resonant_client::state::theme::Theme;
use serde::Serialize;

use crate::CliError;

/// Prints toasts to stderr as they arrive.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let line = format_toast(&toast);
        let mut stderr = std::io::stderr().lock();
        if writeln!(stderr, "{line}").is_err() {
            tracing::debug!(title = %toast.title, "toast: stderr closed");
        }
    }
}

/// `✓ Title: description`, or `✗ ...` for errors. Empty descriptions drop
/// the separator.
pub fn format_toast(toast: &Toast) -> String {
    let glyph = if toast.is_error() { '✗' } else { '✓' };
    if toast.description.is_empty() {
        format!("{glyph} {}", toast.title)
    } else {
        format!("{glyph} {}: {}", toast.title, toast.description)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// How results reach stdout.
#[derive(Clone, Copy, Debug)]
pub struct Output {
    pub json: bool,
    /// Badge palette; `None` prints plain text.
    color: Option<Theme>,
}

impl Output {
    pub fn new(json: bool, color: Option<Theme>) -> Self {
        Self { json, color }
    }

    pub fn text(&self, text: &str) {
        match self.color {
            Some(theme) => print_text(&paint_badges(text, theme)),
            None => print_text(text),
        }
    }
}

/// Print `text` without doubling a trailing newline.
fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}
