use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, IntoHeaderName, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use roster_core::csrf::CSRF_COOKIE;
use tower::util::ServiceExt;

/// In-process HTTP test client wrapping an Axum `Router`.
///
/// Uses `tower::ServiceExt::oneshot` to dispatch requests without binding
/// to a TCP port. Cookies set by responses are kept in a jar and sent with
/// later requests, so flash messages and CSRF tokens behave as in a browser.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    jar: Arc<Mutex<HashMap<String, String>>>,
}

impl TestApp {
    /// Create a `TestApp` from an assembled `axum::Router`.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            jar: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a `TestApp` from an `AppBuilder` by calling `.build()`.
    pub fn from_builder(builder: roster_core::AppBuilder) -> Self {
        Self::new(builder.build())
    }

    /// Start building a GET request.
    pub fn get(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::GET, path)
    }

    /// Start building a POST request.
    pub fn post(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::POST, path)
    }

    /// Start building a PUT request.
    pub fn put(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::PUT, path)
    }

    /// Start building a PATCH request.
    pub fn patch(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::PATCH, path)
    }

    /// Start building a DELETE request.
    pub fn delete(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::DELETE, path)
    }

    /// Start building a request with an arbitrary HTTP method.
    pub fn request(&self, method: Method, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, method, path)
    }

    /// Current value of a cookie in the jar.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.jar.lock().unwrap().get(name).cloned()
    }

    /// The CSRF token issued to this client, if a form page was fetched.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE)
    }

    /// Drop every cookie from the jar.
    pub fn clear_cookies(&self) {
        self.jar.lock().unwrap().clear();
    }

    fn cookie_header(&self) -> Option<String> {
        let jar = self.jar.lock().unwrap();
        if jar.is_empty() {
            return None;
        }
        let mut pairs: Vec<String> = jar.iter().map(|(k, v)| format!("{k}={v}")).collect();
        pairs.sort();
        Some(pairs.join("; "))
    }

    fn store_cookies(&self, headers: &HeaderMap) {
        let mut jar = self.jar.lock().unwrap();
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let mut attrs = raw.split(';');
            let Some((name, value)) = attrs.next().and_then(|p| p.trim().split_once('=')) else {
                continue;
            };
            let expired = attrs
                .map(str::trim)
                .any(|a| a.eq_ignore_ascii_case("max-age=0"));
            if expired || value.is_empty() {
                jar.remove(name);
            } else {
                jar.insert(name.to_string(), value.to_string());
            }
        }
    }
}

/// Builder for constructing and sending a test HTTP request.
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    use_jar: bool,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: Method, path: &str) -> Self {
        Self {
            app,
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
            use_jar: true,
        }
    }

    /// Add a custom header.
    pub fn header(mut self, name: impl IntoHeaderName, value: impl AsRef<str>) -> Self {
        self.headers.insert(name, value.as_ref().parse().unwrap());
        self
    }

    /// Send an explicit `Cookie` header instead of the jar's contents.
    pub fn cookie(mut self, cookie: impl AsRef<str>) -> Self {
        self.headers.insert(COOKIE, cookie.as_ref().parse().unwrap());
        self.use_jar = false;
        self
    }

    /// Send no cookies at all.
    pub fn without_cookies(mut self) -> Self {
        self.use_jar = false;
        self
    }

    /// Set the request body as an urlencoded form. Also sets Content-Type to
    /// `application/x-www-form-urlencoded`.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.body = Some(body.into_bytes());
        self.headers.insert(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        self
    }

    /// Set a raw request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> TestResponse {
        let body = match self.body {
            Some(b) => Body::from(b),
            None => Body::empty(),
        };

        let mut builder = Request::builder().method(self.method).uri(&self.path);

        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if self.use_jar {
            if let Some(cookies) = self.app.cookie_header() {
                builder = builder.header(COOKIE, cookies);
            }
        }

        let request = builder.body(body).unwrap();

        let response = self
            .app
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();

        self.app.store_cookies(&headers);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

// ─── TestResponse ───

/// Response wrapper with status, redirect and HTML body assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    // ── Status assertions (common codes) ──

    /// Assert status is 200 OK.
    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    /// Assert status is 400 Bad Request.
    pub fn assert_bad_request(self) -> Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    /// Assert status is 403 Forbidden.
    pub fn assert_forbidden(self) -> Self {
        self.assert_status(StatusCode::FORBIDDEN)
    }

    /// Assert status is 404 Not Found.
    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// Assert status is 422 Unprocessable Entity.
    pub fn assert_unprocessable(self) -> Self {
        self.assert_status(StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// Assert the response has a specific status code.
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected {expected}, got {}\nBody: {}",
            self.status,
            self.text()
        );
        self
    }

    // ── Redirect assertions ──

    /// Assert a redirect (3xx) whose `Location` is `location`.
    pub fn assert_redirect_to(self, location: &str) -> Self {
        assert!(
            self.status.is_redirection(),
            "Expected a redirect, got {}\nBody: {}",
            self.status,
            self.text()
        );
        assert_eq!(
            self.header(LOCATION.as_str()),
            Some(location),
            "Unexpected redirect target"
        );
        self
    }

    // ── Body assertions ──

    /// Assert the body contains `needle`.
    pub fn assert_body_contains(self, needle: &str) -> Self {
        assert!(
            self.text().contains(needle),
            "Body does not contain {needle:?}\nBody: {}",
            self.text()
        );
        self
    }

    /// Assert the body does not contain `needle`.
    pub fn assert_body_lacks(self, needle: &str) -> Self {
        assert!(
            !self.text().contains(needle),
            "Body unexpectedly contains {needle:?}\nBody: {}",
            self.text()
        );
        self
    }

    /// Number of non-overlapping occurrences of `needle` in the body.
    pub fn count(&self, needle: &str) -> usize {
        self.text().matches(needle).count()
    }

    // ── Header access ──

    /// Get a response header value by name.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        let name: HeaderName = name.as_ref().parse().ok()?;
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All `Set-Cookie` values of the response.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    // ── Body helpers ──

    /// Return the response body as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
