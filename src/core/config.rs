use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub session: SessionConfig,
    pub pickups: PickupConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Session lifetime settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions untouched for longer than this are ended by the sweeper.
    /// `None` disables sweeping.
    pub idle_timeout: Option<Duration>,
    /// How often the sweeper wakes up
    pub sweep_interval: Duration,
}

/// Pickup dataset settings
#[derive(Debug, Clone)]
pub struct PickupConfig {
    /// CSV (or `.csv.gz`) file with `date/time,lat,lon,base` columns
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            session: SessionConfig::from_env()?,
            pickups: PickupConfig::from_env(),
            swagger: SwaggerConfig::from_env(),
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SessionConfig {
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 3600; // 1 hour
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let idle_timeout_secs = env::var("SESSION_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let sweep_interval_secs = env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_SWEEP_INTERVAL_SECS must be a valid number".to_string())?;

        if sweep_interval_secs == 0 {
            return Err("SESSION_SWEEP_INTERVAL_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            idle_timeout: (idle_timeout_secs > 0).then(|| Duration::from_secs(idle_timeout_secs)),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        })
    }
}

impl PickupConfig {
    pub fn from_env() -> Self {
        let data_path = env::var("PICKUP_DATA_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self { data_path }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Line Monitor API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Production line dashboard and issue reports".to_string());

        Self {
            username,
            password,
            title,
            version,
            description,
        }
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
