use std::time::Duration;

use clap::Parser;
use dishlens_core::domain::common::{DatabaseConfig, DishLensConfig, LLMConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "dishlens-api", version, about = "Dish recognition and nutrition API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix every route is mounted under, e.g. `/api`
    #[arg(long = "server-root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma separated; `*` allows any origin
    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,
}

impl ServerArgs {
    /// Root path with a leading slash and no trailing slash; empty when unset.
    pub fn root_path(&self) -> String {
        match self.root_path.trim().trim_matches('/') {
            "" => String::new(),
            path => format!("/{path}"),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin.trim() == "*")
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-url", env = "DATABASE_URL", default_value = "sqlite://food_analyzer.db")]
    pub url: String,

    #[arg(long = "database-max-connections", env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,

    /// Ceiling for one model call, in seconds
    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 45)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for DishLensConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                url: args.db.url,
                max_connections: args.db.max_connections,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_convert_into_core_config() {
        let args = Args::parse_from([
            "dishlens-api",
            "--database-url",
            "sqlite://test.db",
            "--gemini-api-key",
            "secret",
            "--gemini-model",
            "gemini-test",
            "--llm-timeout-secs",
            "3",
        ]);

        let config = DishLensConfig::from(args);
        assert_eq!(config.database.url, "sqlite://test.db");
        assert_eq!(config.llm.gemini_api_key, "secret");
        assert_eq!(config.llm.gemini_model, "gemini-test");
        assert_eq!(config.llm.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_root_path_is_normalized() {
        let mut args = Args::parse_from(["dishlens-api", "--server-root-path", "api/"]);
        assert_eq!(args.server.root_path(), "/api");

        args.server.root_path = "/".to_string();
        assert_eq!(args.server.root_path(), "");
    }

    #[test]
    fn test_allowed_origins_split_on_commas() {
        let args = Args::parse_from([
            "dishlens-api",
            "--server-allowed-origins",
            "http://localhost:3000,https://dishlens.app",
        ]);
        assert_eq!(args.server.allowed_origins.len(), 2);
        assert!(!args.server.allows_any_origin());
    }
}
