use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, put};
use axum::{Form, Router};
use roster_core::{CsrfToken, FieldErrors, Flash, FlashMessage, HttpError};
use roster_data::Pageable;

use crate::models::StudentForm;
use crate::state::AppState;
use crate::views::{self, students::FormMode};

const INDEX: &str = "/students";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(index).post(store))
        .route("/students/create", get(create))
        .route("/students/{id}/edit", get(edit))
        .route(
            "/students/{id}",
            put(update).patch(update).delete(destroy),
        )
}

fn student_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, HttpError> {
    path.map(|Path(id)| id)
        .map_err(|_| HttpError::BadRequest("Invalid student id.".into()))
}

fn form_body(form: Result<Form<StudentForm>, FormRejection>) -> Result<StudentForm, HttpError> {
    form.map(|Form(form)| form).map_err(|rejection| {
        tracing::debug!(%rejection, "rejected form body");
        HttpError::BadRequest("Invalid form submission.".into())
    })
}

fn render_form(
    state: &AppState,
    mode: FormMode,
    form: &StudentForm,
    errors: &FieldErrors,
    token: &CsrfToken,
    flash: Option<&FlashMessage>,
) -> Html<String> {
    let body = views::students::form(mode, form, errors, token);
    Html(views::layout(&state.server.name, mode.title(), flash, &body))
}

async fn index(
    State(state): State<AppState>,
    flash: Flash,
    token: CsrfToken,
    Query(pageable): Query<Pageable>,
) -> Result<impl IntoResponse, HttpError> {
    let page = state.students.list(&pageable).await?;
    let body = views::students::index(&page, &token);
    let html = views::layout(&state.server.name, "Students", flash.message(), &body);
    Ok((flash, token, Html(html)))
}

async fn create(State(state): State<AppState>, flash: Flash, token: CsrfToken) -> impl IntoResponse {
    let html = render_form(
        &state,
        FormMode::Create,
        &StudentForm::default(),
        &FieldErrors::new(),
        &token,
        flash.message(),
    );
    (flash, token, html)
}

async fn store(
    State(state): State<AppState>,
    token: CsrfToken,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let form = form_body(form)?.trimmed();
    let input = match form.validated() {
        Ok(input) => input,
        Err(errors) => {
            let html = render_form(&state, FormMode::Create, &form, &errors, &token, None);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, token, html).into_response());
        }
    };

    state.students.create(&input).await?;
    Ok((FlashMessage::success("Student created"), Redirect::to(INDEX)).into_response())
}

async fn edit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    flash: Flash,
    token: CsrfToken,
) -> Result<impl IntoResponse, HttpError> {
    let id = student_id(path)?;
    let (student, address) = state.students.find_with_address(id).await?;
    let form = StudentForm::from_record(&student, &address);
    let html = render_form(
        &state,
        FormMode::Edit(id),
        &form,
        &FieldErrors::new(),
        &token,
        flash.message(),
    );
    Ok((flash, token, html))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    token: CsrfToken,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let id = student_id(path)?;
    let form = form_body(form)?.trimmed();
    let input = match form.validated() {
        Ok(input) => input,
        Err(errors) => {
            let html = render_form(&state, FormMode::Edit(id), &form, &errors, &token, None);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, token, html).into_response());
        }
    };

    state.students.update(id, &input).await?;
    Ok((FlashMessage::success("Student updated"), Redirect::to(INDEX)).into_response())
}

async fn destroy(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, HttpError> {
    let id = student_id(path)?;
    state.students.delete(id).await?;
    Ok((FlashMessage::success("Student deleted"), Redirect::to(INDEX)).into_response())
}
