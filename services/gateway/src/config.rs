//! Environment-driven configuration
//!
//! The service boots from environment variables alone; every value has a
//! development default so a bare `cargo run` serves a working instance.

use types::settings::EventSettings;

#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on
    pub port: u16,
    /// Credentials checked by the admin login endpoint
    pub admin_username: String,
    pub admin_password: String,
    /// HS256 secret for admin session tokens
    pub jwt_secret: String,
    /// Initial display title
    pub event_title: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3001),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            jwt_secret: env_or("JWT_SECRET", "voting-dev-secret"),
            event_title: env_or("EVENT_TITLE", &EventSettings::default().event_title),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
