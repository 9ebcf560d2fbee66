use std::env;

use auth::TokenPolicy;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_service_name")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: i64,
}

/// Allowed browser origins. An empty list allows any origin.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub origins: Vec<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_service_name() -> String {
    "Auth Service".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    15
}

fn default_refresh_token_expire_days() -> i64 {
    7
}

impl JwtConfig {
    /// Token lifetimes handed to the authenticator at startup.
    pub fn token_policy(&self) -> TokenPolicy {
        TokenPolicy::new(
            Duration::minutes(self.access_token_expire_minutes),
            Duration::days(self.refresh_token_expire_days),
        )
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, CORS__ORIGINS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::environment())
    }

    /// Environment layer: `JWT__SECRET` maps to `jwt.secret`, and
    /// `CORS__ORIGINS=http://a,http://b` becomes a list.
    fn environment() -> Environment {
        Environment::default()
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors.origins")
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenType;
    use config::FileFormat;
    use config::Map;

    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_apply() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"

            [server]
            http_port = 8000

            [jwt]
            secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.name, "Auth Service");
        assert_eq!(config.jwt.access_token_expire_minutes, 15);
        assert_eq!(config.jwt.refresh_token_expire_days, 7);
        assert!(config.cors.origins.is_empty());
    }

    #[test]
    fn test_token_policy_from_config() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"

            [server]
            http_port = 8000

            [jwt]
            secret = "secret"
            access_token_expire_minutes = 5
            refresh_token_expire_days = 30

            [cors]
            origins = ["http://localhost:3000"]
            "#,
        )
        .unwrap();

        let policy = config.jwt.token_policy();
        assert_eq!(policy.lifetime(TokenType::Access), Duration::minutes(5));
        assert_eq!(policy.lifetime(TokenType::Refresh), Duration::days(30));
        assert_eq!(config.cors.origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_environment_overrides_files() {
        let variables = Map::from([
            ("JWT__SECRET".to_string(), "from-env-secret".to_string()),
            ("SERVER__HTTP_PORT".to_string(), "9999".to_string()),
            ("JWT__ACCESS_TOKEN_EXPIRE_MINUTES".to_string(), "30".to_string()),
            (
                "CORS__ORIGINS".to_string(),
                "http://a.example.com,http://b.example.com".to_string(),
            ),
        ]);

        let config = Config::load_with(Config::environment().source(Some(variables))).unwrap();

        assert_eq!(config.jwt.secret, "from-env-secret");
        assert_eq!(config.server.http_port, 9999);
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert_eq!(
            config.cors.origins,
            vec!["http://a.example.com", "http://b.example.com"]
        );
    }

    #[test]
    fn test_load_reads_process_environment() {
        env::set_var("JWT__SECRET", "process-env-secret");

        let config = Config::load().unwrap();

        assert_eq!(config.jwt.secret, "process-env-secret");
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"

            [server]
            http_port = 8000

            [jwt]
            "#,
        );

        assert!(result.is_err());
    }
}
