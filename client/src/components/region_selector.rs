//! Region selection model for an account's scan scope.
//!
//! Starts from the regions the backend reports as enabled. Edits stay
//! local until `save_codes` hands back the set to persist.

#[cfg(test)]
#[path = "region_selector_test.rs"]
mod region_selector_test;

use std::collections::BTreeSet;

use crate::net::types::AwsRegion;

pub const EMPTY_SELECTION_WARNING: &str = "At least one region must be enabled to perform scans";

#[derive(Clone, Debug, Default)]
pub struct RegionSelector {
    regions: Vec<AwsRegion>,
    selected: BTreeSet<String>,
    has_changes: bool,
}

impl RegionSelector {
    #[must_use]
    pub fn new(mut regions: Vec<AwsRegion>) -> Self {
        regions.sort_by(|a, b| a.region_code.cmp(&b.region_code));
        let selected = regions.iter().filter(|r| r.enabled).map(|r| r.region_code.clone()).collect();
        Self { regions, selected, has_changes: false }
    }

    /// Flip one region. Unknown codes are ignored.
    pub fn toggle(&mut self, region_code: &str) {
        if !self.regions.iter().any(|r| r.region_code == region_code) {
            return;
        }
        if !self.selected.remove(region_code) {
            self.selected.insert(region_code.to_owned());
        }
        self.has_changes = true;
    }

    pub fn select_all(&mut self) {
        self.selected = self.regions.iter().map(|r| r.region_code.clone()).collect();
        self.has_changes = true;
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.has_changes = true;
    }

    #[must_use]
    pub fn is_selected(&self, region_code: &str) -> bool {
        self.selected.contains(region_code)
    }

    /// Selected region codes in ascending order.
    #[must_use]
    pub fn selected_codes(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    #[must_use]
    pub fn warning(&self) -> Option<&'static str> {
        self.selected.is_empty().then_some(EMPTY_SELECTION_WARNING)
    }

    /// Codes to persist, or `None` when nothing changed or the selection is
    /// empty.
    #[must_use]
    pub fn save_codes(&self) -> Option<Vec<String>> {
        (self.has_changes && !self.selected.is_empty()).then(|| self.selected_codes())
    }

    /// Reset to a freshly loaded region list after a successful save.
    pub fn reload(&mut self, regions: Vec<AwsRegion>) {
        *self = Self::new(regions);
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("AWS Regions\nSelect which AWS regions to scan for resources\n");
        if let Some(warning) = self.warning() {
            out.push_str(&format!("! {warning}\n"));
        }
        out.push_str(&format!("{} / {} enabled\n", self.selected.len(), self.regions.len()));
        for region in &self.regions {
            let mark = if self.is_selected(&region.region_code) { 'x' } else { ' ' };
            out.push_str(&format!("  [{mark}] {}\n", region.region_code));
        }
        out
    }
}
