use crate::auth::jwt::JwtConfig;

/// Runtime settings for the rating server.
///
/// Everything except the JWT secret has a value that works on a developer
/// machine; deployments set the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `HOST`, default `0.0.0.0`.
    pub host: String,
    /// `PORT`, default `3000`.
    pub port: u16,
    /// `CORS_ORIGINS`, comma separated. Defaults to the local front end.
    pub cors_origins: Vec<String>,
    /// `REQUEST_TIMEOUT_SECS`, default 30. Slower requests get a 408.
    pub request_timeout_secs: u64,
    /// `SHUTDOWN_TIMEOUT_SECS`, default 30. Grace period for in-flight requests.
    pub shutdown_timeout_secs: u64,
    /// Token checking, see [`JwtConfig::from_env`].
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read the settings above. Panics on values that do not parse, since
    /// this runs before the listener is bound.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
