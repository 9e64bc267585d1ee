use axum::body::Body;
use axum::extract::Path;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{Html, Redirect};
use axum::routing::{get, post, put};
use axum::Router;
use http_body_util::BodyExt;
use roster_core::{AppBuilder, CsrfToken, Flash, FlashMessage};
use tower::ServiceExt;

fn routes() -> Router {
    Router::new()
        .route("/items", get(|| async { "list" }).post(|| async { "created" }))
        .route(
            "/items/{id}",
            put(|Path(id): Path<u32>| async move { format!("put {id}") })
                .delete(|Path(id): Path<u32>| async move { format!("delete {id}") }),
        )
        .route(
            "/form",
            get(|token: CsrfToken| async move {
                let html = token.hidden_input();
                (token, Html(html))
            }),
        )
        .route(
            "/flash/set",
            post(|| async { (FlashMessage::success("Saved"), Redirect::to("/flash/show")) }),
        )
        .route(
            "/flash/show",
            get(|flash: Flash| async move {
                let text = flash
                    .message()
                    .map(|m| m.text.clone())
                    .unwrap_or_default();
                (flash, text)
            }),
        )
        .route(
            "/boom",
            get(|| async {
                if true {
                    panic!("kaboom");
                }
                "unreachable"
            }),
        )
}

struct Sent {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Sent {
    fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }
}

async fn send(app: &Router, req: Request<Body>) -> Sent {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    Sent {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

fn form_post(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(mut req: Request<Body>, cookie: &str) -> Request<Body> {
    req.headers_mut().insert(COOKIE, cookie.parse().unwrap());
    req
}

fn get_req(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn method_override_routes_put_and_delete() {
    let app = AppBuilder::new(routes()).csrf(false).build();

    let put = send(&app, form_post("/items/7", "_method=put&name=x")).await;
    assert_eq!(put.status, StatusCode::OK);
    assert_eq!(put.body, "put 7");

    let delete = send(&app, form_post("/items/7", "_method=DELETE")).await;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.body, "delete 7");
}

#[tokio::test]
async fn plain_post_to_member_route_is_not_allowed() {
    let app = AppBuilder::new(routes()).csrf(false).build();
    let resp = send(&app, form_post("/items/7", "name=x")).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn csrf_rejects_missing_token() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, form_post("/items", "name=x")).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert!(resp.body.contains("CSRF token mismatch"));
}

#[tokio::test]
async fn csrf_rejects_mismatched_token() {
    let app = AppBuilder::new(routes()).build();
    let req = with_cookie(form_post("/items", "_token=other"), "roster_csrf=abc");
    let resp = send(&app, req).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn csrf_accepts_matching_field_or_header() {
    let app = AppBuilder::new(routes()).build();

    let req = with_cookie(form_post("/items", "_token=abc&name=x"), "roster_csrf=abc");
    let resp = send(&app, req).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "created");

    let mut req = with_cookie(form_post("/items", "name=x"), "roster_csrf=abc");
    req.headers_mut()
        .insert("x-csrf-token", "abc".parse().unwrap());
    let resp = send(&app, req).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn csrf_applies_to_overridden_methods() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, form_post("/items/3", "_method=delete")).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let req = with_cookie(
        form_post("/items/3", "_method=delete&_token=t1"),
        "roster_csrf=t1",
    );
    let resp = send(&app, req).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "delete 3");
}

#[tokio::test]
async fn safe_methods_skip_csrf() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, get_req("/items")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "list");
}

#[tokio::test]
async fn csrf_token_is_issued_once() {
    let app = AppBuilder::new(routes()).build();

    let first = send(&app, get_req("/form")).await;
    let cookies = first.set_cookies();
    let issued = cookies
        .iter()
        .find(|c| c.starts_with("roster_csrf="))
        .expect("csrf cookie issued");
    let token = issued
        .trim_start_matches("roster_csrf=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(first.body.contains(&format!(r#"value="{token}""#)));

    let second = send(&app, with_cookie(get_req("/form"), &format!("roster_csrf={token}"))).await;
    assert!(second.set_cookies().is_empty());
    assert!(second.body.contains(&token));
}

#[tokio::test]
async fn flash_is_shown_once_and_cleared() {
    let app = AppBuilder::new(routes()).csrf(false).build();

    let set = send(&app, form_post("/flash/set", "")).await;
    assert_eq!(set.status, StatusCode::SEE_OTHER);
    assert_eq!(set.headers.get(LOCATION).unwrap(), "/flash/show");
    let cookie = set
        .set_cookies()
        .into_iter()
        .find(|c| c.starts_with("roster_flash="))
        .expect("flash cookie set");
    let pair = cookie.split(';').next().unwrap().to_string();

    let shown = send(&app, with_cookie(get_req("/flash/show"), &pair)).await;
    assert_eq!(shown.body, "Saved");
    assert!(shown
        .set_cookies()
        .iter()
        .any(|c| c.starts_with("roster_flash=;") && c.contains("Max-Age=0")));

    let again = send(&app, get_req("/flash/show")).await;
    assert_eq!(again.body, "");
    assert!(again.set_cookies().is_empty());
}

#[tokio::test]
async fn secure_headers_are_added() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, get_req("/items")).await;
    assert_eq!(resp.headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(resp.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(resp.headers.get("content-security-policy").is_some());
    assert!(resp.headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, get_req("/nope")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn panics_become_html_500() {
    let app = AppBuilder::new(routes()).build();
    let resp = send(&app, get_req("/boom")).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.contains("500 | Internal Server Error"));
}
