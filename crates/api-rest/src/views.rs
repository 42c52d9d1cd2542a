//! HTML rendering for the model index and the viewer page.

use twin_files::DisplayEntry;

const DIGITAL_TWIN_TEMPLATE: &str = include_str!("../templates/digital_twin.html");
const TOKEN_PLACEHOLDER: &str = "{{CESIUM_ION_TOKEN}}";

/// Escapes text for use in HTML content and double- or single-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Path of the serving endpoint for a stored model, with the name percent-encoded as
/// a single path segment.
pub fn model_url(stored_name: &str) -> String {
    format!("/models/{}", urlencoding::encode(stored_name))
}

const INDEX_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Models Directory</title>
  <style>
    body { font-family: sans-serif; margin: 20px; }
    h1 { margin-bottom: 0.5em; }
    ul { list-style: none; padding-left: 0; }
    li { margin: 4px 0; }
    a { text-decoration: none; color: #0066cc; }
    a:hover { text-decoration: underline; }
    .empty { color: #777; }
    .filename-small { font-size: 11px; color: #999; margin-left: 6px; }
  </style>
</head>
<body>
  <h1>Available Models</h1>
"#;

/// Renders the model index: one link per entry with its stored name as a secondary id, or an
/// explicit empty state.
pub fn render_model_index(entries: &[DisplayEntry]) -> String {
    let mut html = String::from(INDEX_HEAD);

    if entries.is_empty() {
        html.push_str("  <p class=\"empty\">No model files uploaded yet.</p>\n");
    } else {
        html.push_str("  <ul>\n");
        for entry in entries {
            html.push_str(&format!(
                "    <li>\n      <a href=\"{}\" target=\"_blank\">{}</a>\n      <span class=\"filename-small\">(id: {})</span>\n    </li>\n",
                html_escape(&model_url(&entry.stored_name)),
                html_escape(&entry.display_name),
                html_escape(&entry.stored_name),
            ));
        }
        html.push_str("  </ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the viewer page, embedding `token` when given.
pub fn render_digital_twin(token: Option<&str>) -> String {
    DIGITAL_TWIN_TEMPLATE.replace(TOKEN_PLACEHOLDER, &html_escape(token.unwrap_or_default()))
}
