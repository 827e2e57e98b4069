//! Resource type scan scope.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use super::heading;
use crate::components::table::render_table;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::ResourceTypeSetting;
use crate::query::hooks;

#[must_use]
pub fn render_resource_types(settings: &[ResourceTypeSetting]) -> String {
    let mut out = String::from(
        "Resource Types to Scan\nEnable or disable which AWS resource types are scanned for tag compliance.\n\n",
    );
    let rows: Vec<Vec<String>> = settings
        .iter()
        .map(|s| {
            vec![
                if s.enabled { "[x]" } else { "[ ]" }.to_owned(),
                s.resource_type.clone(),
                s.display_name.clone(),
                s.description.clone(),
            ]
        })
        .collect();
    out.push_str(&render_table(&["", "Type", "Name", "Description"], &rows));
    out
}

pub async fn render(ctx: &AppContext) -> Result<String, ApiError> {
    let settings = hooks::use_resource_type_settings(ctx).await?;
    let mut out = heading("Settings", "Configure your AWS tag compliance platform settings");
    out.push('\n');
    out.push_str(&render_resource_types(&settings));
    Ok(out)
}
