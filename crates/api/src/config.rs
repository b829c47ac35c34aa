use std::path::PathBuf;

/// Default browser origins allowed to call the API.
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,https://landing-page-application.vercel.app";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding finalized images, served publicly (default: `uploads`).
    pub uploads_dir: PathBuf,
    /// Private directory for raw uploads in flight (default: `uploads-staging`).
    pub staging_dir: PathBuf,
    /// Largest accepted request body in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                                              |
    /// |------------------------|----------------------------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                                            |
    /// | `PORT`                 | `5000`                                                               |
    /// | `CORS_ORIGINS`         | `http://localhost:5173,https://landing-page-application.vercel.app` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                                                 |
    /// | `UPLOADS_DIR`          | `uploads`                                                            |
    /// | `STAGING_DIR`          | `uploads-staging`                                                    |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                                                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let uploads_dir = std::env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let staging_dir = std::env::var("STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads-staging"));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            uploads_dir,
            staging_dir,
            max_upload_bytes,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
