//! Server-rendered HTML.

pub mod students;

use std::fmt::Write;

use roster_core::{escape_html, FlashLevel, FlashMessage};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Page shell shared by every screen. A pending flash message is shown as a
/// toast in the top-right corner.
pub fn layout(app_name: &str, title: &str, flash: Option<&FlashMessage>, content: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app_name}</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS}">
</head>
<body>
"#,
        title = escape_html(title),
        app_name = escape_html(app_name),
    );
    if let Some(message) = flash {
        let _ = write!(
            html,
            r#"<div class="toast-container position-fixed top-0 end-0 p-3">
<div class="alert alert-{class} shadow-sm" role="alert" data-flash="{level}">{text}</div>
</div>
"#,
            class = alert_class(message.level),
            level = message.level.as_str(),
            text = escape_html(&message.text),
        );
    }
    html.push_str(content);
    html.push_str("</body>\n</html>\n");
    html
}

fn alert_class(level: FlashLevel) -> &'static str {
    match level {
        FlashLevel::Success => "success",
        FlashLevel::Info => "info",
        FlashLevel::Error => "danger",
    }
}
