//! Application settings, read from an optional `settings.toml` and from
//! `BUSFARE_` environment variables (`BUSFARE_SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

/// Where trips are stored.
///
/// In `settings.toml` either `database = "memory"` or
/// `database = { sqlite = "busfare.db" }`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    fn from_file(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("BUSFARE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .set_default("app.level", "info")
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn sqlite_server_settings() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            database = { sqlite = "trips.db" }
            bind = "0.0.0.0"
            port = 8080
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Sqlite("trips.db".to_string()));
        assert_eq!(server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn memory_database_and_default_level() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            port = 3000
            "#,
        );
        assert_eq!(settings.app.level, "info");
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Memory);
        assert!(server.bind.is_none());
    }

    #[test]
    fn missing_file_leaves_server_unset() {
        let settings = Settings::from_file("does-not-exist-busfare-settings").unwrap();
        assert!(settings.server.is_none());
    }
}
