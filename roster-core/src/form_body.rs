use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;

use crate::error::HttpError;

/// Upper bound on a buffered form body.
pub const MAX_FORM_BYTES: usize = 64 * 1024;

pub(crate) fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Buffer a urlencoded body, returning the rebuilt request and the decoded
/// fields. Downstream extractors see the same bytes.
pub(crate) async fn read_form(req: Request) -> Result<(Request, Vec<(String, String)>), HttpError> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| HttpError::BadRequest(format!("Unreadable form body: {e}")))?;
    let fields = form_urlencoded::parse(&bytes).into_owned().collect();
    Ok((Request::from_parts(parts, Body::from(bytes)), fields))
}

pub(crate) fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
