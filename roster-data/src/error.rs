use roster_core::HttpError;

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The requested row does not exist.
    NotFound(String),
    /// Stored rows break a relationship the schema promises (e.g. a student
    /// without its address).
    Integrity(String),
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::Integrity(msg) => write!(f, "Integrity violation: {msg}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataError::NotFound("Row not found".into()),
            other => DataError::database(other),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DataError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DataError::database(err)
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => HttpError::NotFound(msg),
            DataError::Integrity(msg) => HttpError::Internal(format!("integrity: {msg}")),
            DataError::Database(e) => HttpError::Internal(e.to_string()),
        }
    }
}

/// Convenience alias for data-layer results.
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: DataError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DataError::NotFound(_)));
        assert!(matches!(HttpError::from(err), HttpError::NotFound(_)));
    }

    #[test]
    fn integrity_is_a_server_error() {
        let err = DataError::Integrity("student 4 has no address".into());
        assert_eq!(err.to_string(), "Integrity violation: student 4 has no address");
        let http = HttpError::from(err);
        assert_eq!(http.status().as_u16(), 500);
    }

    #[test]
    fn driver_errors_keep_their_source() {
        let err: DataError = sqlx::Error::PoolTimedOut.into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(HttpError::from(err), HttpError::Internal(_)));
    }
}
