use roster_core::ConfigError;
use roster_data::DataError;

/// Startup failures.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Data(DataError),
    Io(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Data(err) => write!(f, "{err}"),
            AppError::Io(err) => write!(f, "server error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Data(err) => Some(err),
            AppError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::Data(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}
