use super::{ConfigError, RosterConfig};

/// Trait for strongly-typed configuration sections.
///
/// ```ignore
/// pub struct DatabaseConfig {
///     pub url: String,
///     pub max_connections: u32,
/// }
///
/// impl ConfigProperties for DatabaseConfig {
///     fn prefix() -> &'static str { "database" }
///
///     fn from_config(config: &RosterConfig) -> Result<Self, ConfigError> {
///         Ok(Self {
///             url: config.get(&Self::key("url"))?,
///             max_connections: config.get_or(&Self::key("max_connections"), 5)?,
///         })
///     }
/// }
/// ```
pub trait ConfigProperties: Sized {
    /// The configuration key prefix (e.g., `"database"`).
    fn prefix() -> &'static str;

    /// Construct from a `RosterConfig` instance.
    fn from_config(config: &RosterConfig) -> Result<Self, ConfigError>;

    /// Absolute key for a property of this section.
    fn key(property: &str) -> String {
        format!("{}.{property}", Self::prefix())
    }
}
