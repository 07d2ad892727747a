use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Auth, Config, Database, Logging, Server};

/// Prefix of the environment variables mapped onto the configuration,
/// e.g. `PENSIONDATA__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "PENSIONDATA";

/// Loads the application configuration from `path` and the process environment.
///
/// Sources, from lowest to highest precedence:
/// 1. built-in defaults,
/// 2. the TOML file at `path` (optional),
/// 3. `PENSIONDATA__*` environment variables,
/// 4. the deployment variables `DATABASE_URL`, `SCRAPER_KEY` and
///    `ALWAYSDATA_HTTPD_IP`/`ALWAYSDATA_HTTPD_PORT` (only when both are set).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_env(path, std::env::vars().collect())
}

/// Same as [`load_config`] with an explicit environment snapshot.
pub fn load_config_with_env(path: &Path, env: config::Map<String, String>) -> Result<Config, ConfigError> {
    let httpd_addr = match (env.get("ALWAYSDATA_HTTPD_IP"), env.get("ALWAYSDATA_HTTPD_PORT")) {
        (Some(ip), Some(port)) if !ip.is_empty() && !port.is_empty() => Some((ip.clone(), port.clone())),
        _ => None,
    };

    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?
        .set_default("logging.file_prefix", "pensiondata.log")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(env.clone())),
        )
        .set_override_option("database.url", env.get("DATABASE_URL").cloned())?
        .set_override_option("auth.scraper_key", env.get("SCRAPER_KEY").cloned())?
        .set_override_option("server.host", httpd_addr.as_ref().map(|(ip, _)| ip.clone()))?
        .set_override_option("server.port", httpd_addr.map(|(_, port)| port))?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> config::Map<String, String> {
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = load_config_with_env(
            Path::new("does-not-exist.toml"),
            env(&[("DATABASE_URL", "postgres://localhost/pensiondata")]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.auth.scraper_key.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let file = config_file(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://db/pensiondata"
            max_connections = 4

            [auth]
            scraper_key = "s3cret"
            "#,
        );

        let config = load_config_with_env(file.path(), env(&[])).unwrap();

        assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database.url, "postgres://db/pensiondata");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.auth.scraper_key.as_deref(), Some("s3cret"));
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file(
            r#"
            [server]
            port = 3000

            [database]
            url = "postgres://db/pensiondata"
            "#,
        );

        let config = load_config_with_env(
            file.path(),
            env(&[
                ("PENSIONDATA__SERVER__PORT", "4000"),
                ("DATABASE_URL", "postgres://other/pensiondata"),
                ("SCRAPER_KEY", "from-env"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.url, "postgres://other/pensiondata");
        assert_eq!(config.auth.scraper_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn alwaysdata_address_requires_both_variables() {
        let base = [("DATABASE_URL", "postgres://localhost/pensiondata")];

        let only_ip = load_config_with_env(
            Path::new("does-not-exist.toml"),
            env(&[base[0], ("ALWAYSDATA_HTTPD_IP", "10.0.0.5")]),
        )
        .unwrap();
        assert_eq!(only_ip.server.host, "0.0.0.0");

        let both = load_config_with_env(
            Path::new("does-not-exist.toml"),
            env(&[base[0], ("ALWAYSDATA_HTTPD_IP", "10.0.0.5"), ("ALWAYSDATA_HTTPD_PORT", "8100")]),
        )
        .unwrap();
        assert_eq!(both.server.socket_addr().unwrap().to_string(), "10.0.0.5:8100");
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = load_config_with_env(Path::new("does-not-exist.toml"), env(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_scraper_key_counts_as_unset() {
        let config = load_config_with_env(
            Path::new("does-not-exist.toml"),
            env(&[("DATABASE_URL", "postgres://localhost/pensiondata"), ("SCRAPER_KEY", "")]),
        )
        .unwrap();

        assert!(config.auth.scraper_key.is_none());
    }

    #[test]
    fn scraper_key_is_redacted_in_debug_output() {
        let auth = Auth {
            scraper_key: Some("s3cret".to_string()),
        };

        assert!(!format!("{auth:?}").contains("s3cret"));
    }
}
