use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    /// `None` when the store is not configured; the service still starts.
    pub database: Option<DatabaseConfig>,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown ENVIRONMENT '{}': expected dev or prod", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Both the connection string and the database name must be present.
    pub fn from_parts(url: Option<String>, name: Option<String>) -> Option<Self> {
        let url = url.filter(|v| !v.trim().is_empty())?;
        let name = name.filter(|v| !v.trim().is_empty())?;
        Some(Self { url, name })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

impl CompetitionConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let database = DatabaseConfig::from_parts(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_NAME").ok(),
        );

        Ok(CompetitionConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("competition-service"))?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            database,
            swagger: SwaggerConfig {
                enabled: parse_flag(env::var("SWAGGER_ENABLED").ok().as_deref()),
            },
        })
    }

    pub fn swagger_enabled(&self) -> bool {
        self.environment == Environment::Dev || self.swagger.enabled
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
