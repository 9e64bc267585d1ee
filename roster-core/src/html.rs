//! HTML helpers shared by the error page and application views.

use std::fmt::Write;

use axum::http::StatusCode;

/// Escapes the characters that are significant in HTML text and attribute
/// values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Standalone error page used by [`HttpError`](crate::error::HttpError).
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{code} {reason}</title>
</head>
<body>
<main class="container mt-5">
<h1>{code} | {reason}</h1>
<p class="error-message">{message}</p>
<a href="/students">Back to students</a>
</main>
</body>
</html>
"#,
        code = status.as_u16(),
        reason = escape_html(reason),
        message = escape_html(message),
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page(StatusCode::NOT_FOUND, "<script>");
        assert!(page.contains("404 | Not Found"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
