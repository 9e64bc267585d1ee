use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub pool: SqlitePool,
    pub server: ServerConfig,
}
