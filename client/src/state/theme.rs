//! Light/dark theme preference.
//!
//! Reads the stored preference, falling back to the system preference the
//! caller detected. Toggle and set write back to storage.
//!
//! TRADE-OFFS
//! ==========
//! A terminal has no `prefers-color-scheme` query. The CLI passes what it can
//! infer from `RESONANT_THEME` or the `COLORFGBG` convention; anything else
//! is treated as light.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::util::storage::{Storage, StorageError};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Infer the system theme from an explicit override or `COLORFGBG`
/// (`"fg;bg"`, where a background of 0-6 or 8 is a dark palette entry).
#[must_use]
pub fn detect_system_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit.and_then(Theme::parse) {
        return theme;
    }
    let background = colorfgbg.and_then(|raw| raw.rsplit(';').next()).map(|bg| bg.trim().parse::<u8>());
    match background {
        Some(Ok(0..=6 | 8)) => Theme::Dark,
        _ => Theme::Light,
    }
}

pub struct ThemeStore {
    storage: Arc<dyn Storage>,
    theme: Mutex<Theme>,
}

impl ThemeStore {
    /// Stored value wins; unreadable or absent values use `system`.
    pub fn restore(storage: Arc<dyn Storage>, system: Theme) -> Result<Self, StorageError> {
        let stored = storage.get(THEME_KEY)?.as_deref().and_then(Theme::parse);
        Ok(Self { storage, theme: Mutex::new(stored.unwrap_or(system)) })
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, theme: Theme) -> Result<(), StorageError> {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = theme;
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Flip the theme, persist it, and return the new value.
    pub fn toggle(&self) -> Result<Theme, StorageError> {
        let next = self.theme().flipped();
        self.set(next)?;
        Ok(next)
    }
}
