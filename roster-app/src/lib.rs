//! # roster-app
//!
//! Student records management: a paginated student list plus create, edit,
//! update and delete screens, each student stored with exactly one mailing
//! address.

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

use axum::Router;
use roster_core::{AppBuilder, RosterConfig};
use roster_data::DatabaseConfig;
use sqlx::migrate::Migrator;

pub use config::ServerConfig;
pub use error::AppError;
pub use services::StudentService;
pub use state::AppState;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connect to the configured database, apply migrations and assemble the
/// shared state.
pub async fn build_state(config: RosterConfig) -> Result<AppState, AppError> {
    let server: ServerConfig = config.section()?;
    let database: DatabaseConfig = config.section()?;

    let pool = roster_data::connect(&database).await?;
    MIGRATOR
        .run(&pool)
        .await
        .map_err(roster_data::DataError::from)?;
    tracing::info!("Database migrations applied");

    Ok(AppState {
        students: StudentService::new(pool.clone()),
        pool,
        server,
    })
}

/// The application with all middleware, ready to serve.
pub fn builder(state: AppState) -> AppBuilder {
    let csrf = state.server.csrf;
    AppBuilder::new(controllers::routes().with_state(state)).csrf(csrf)
}

pub fn app(state: AppState) -> Router {
    builder(state).build()
}
