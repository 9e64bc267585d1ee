use roster_core::config::{ConfigError, ConfigProperties, RosterConfig};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_APP_NAME: &str = "Student Records";

/// Server settings: `server.addr`, plus the `app.name` shown in page titles
/// and the `security.csrf` switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub name: String,
    pub csrf: bool,
}

impl ConfigProperties for ServerConfig {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &RosterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            addr: config.get_or(&Self::key("addr"), DEFAULT_ADDR.to_string())?,
            name: config.get_or("app.name", DEFAULT_APP_NAME.to_string())?,
            csrf: config.get_or("security.csrf", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let server: ServerConfig = RosterConfig::empty().section().unwrap();
        assert_eq!(server.addr, DEFAULT_ADDR);
        assert_eq!(server.name, DEFAULT_APP_NAME);
        assert!(server.csrf);
    }

    #[test]
    fn reads_all_three_sections() {
        let yaml = "app:\n  name: Registry\nserver:\n  addr: \"0.0.0.0:9000\"\nsecurity:\n  csrf: false\n";
        let server: ServerConfig = RosterConfig::from_yaml_str(yaml, "test")
            .unwrap()
            .section()
            .unwrap();
        assert_eq!(server.addr, "0.0.0.0:9000");
        assert_eq!(server.name, "Registry");
        assert!(!server.csrf);
    }
}
