use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to stop after shutdown starts (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Public page respondents open to answer a survey.
    pub public_survey_base_url: String,
    /// Interval between auto-send dispatcher passes, in seconds (default: `900`).
    pub survey_dispatch_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                          |
    /// |---------------------------------|----------------------------------|
    /// | `HOST`                          | `0.0.0.0`                        |
    /// | `PORT`                          | `3000`                           |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                             |
    /// | `PUBLIC_SURVEY_BASE_URL`        | `http://localhost:5173/survey`   |
    /// | `SURVEY_DISPATCH_INTERVAL_SECS` | `900`                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let public_survey_base_url = std::env::var("PUBLIC_SURVEY_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173/survey".into());

        let survey_dispatch_interval_secs: u64 = std::env::var("SURVEY_DISPATCH_INTERVAL_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("SURVEY_DISPATCH_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            public_survey_base_url,
            survey_dispatch_interval_secs,
            jwt,
        }
    }
}
