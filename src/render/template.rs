// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Changeset message rendering.

use handlebars::Handlebars;
use serde_json::json;

use crate::error::RenderError;
use crate::group::DependencyGroup;

/// Template used when neither the update type nor the configuration
/// provides one.
pub const DEFAULT_TEMPLATE: &str =
    "Updated {{update_type}} dependencies: {{dependencies}}{{#if version}} ({{version}}){{/if}}";

/// Render a group's changelog message from a template.
///
/// Recognized placeholders: `{{dependencies}}` (comma-joined names or the
/// generic descriptor), `{{version}}`, `{{update_type}}`, `{{file_count}}`.
/// Unknown placeholders render empty.
pub fn render_message(group: &DependencyGroup, template: &str) -> Result<String, RenderError> {
    let handlebars = Handlebars::new();
    let data = json!({
        "dependencies": group.descriptor(),
        "version": group.version,
        "update_type": group.update_type,
        "file_count": group.file_count,
    });

    handlebars
        .render_template(template, &data)
        .map_err(|e| RenderError::Template {
            update_type: group.update_type.clone(),
            message: e.to_string(),
        })
}
