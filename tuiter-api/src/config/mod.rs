use crate::common::env::{env_bool, env_int, env_str};
use crate::common::time::HOUR;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub service: CoreConfig,
    pub db: DatabaseConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub port: usize,
    pub hostname: String,
    pub public_url: String,
    pub version: String,
    pub dev_mode: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: usize,
    /// Seconds to wait for a pooled connection.
    pub timeout: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_ms: i64,
}

pub fn env_to_cfg() -> ServerConfig {
    let port = env_int("TUITER_PORT").unwrap_or(8080);
    let hostname = env_str("TUITER_HOSTNAME").unwrap_or("localhost".to_string());
    let public_url = if hostname == "localhost" {
        format!("http://localhost:{port}")
    } else {
        format!("https://{hostname}")
    };
    let service_cfg = CoreConfig {
        port,
        hostname,
        public_url,
        version: env_str("TUITER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION").to_string()),
        dev_mode: env_bool("TUITER_DEV_MODE").unwrap_or(false),
    };
    let db_cfg = DatabaseConfig {
        url: env_str("DATABASE_URL").unwrap_or("".to_string()),
        pool_size: env_int("TUITER_DB_POOL_SIZE").unwrap_or(20),
        timeout: env_int("TUITER_DB_TIMEOUT").unwrap_or(30),
    };
    let ttl_hours = env_int("TUITER_SESSION_TTL_HOURS").unwrap_or(24 * 7) as i64;
    let session_cfg = SessionConfig {
        cookie_name: env_str("TUITER_SESSION_COOKIE").unwrap_or("tuiter_session".to_string()),
        ttl_ms: ttl_hours * HOUR,
    };
    ServerConfig {
        service: service_cfg,
        db: db_cfg,
        session: session_cfg,
    }
}
