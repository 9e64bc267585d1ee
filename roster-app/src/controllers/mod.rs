pub mod student_controller;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(student_controller::routes())
}

async fn root() -> Redirect {
    Redirect::to("/students")
}
