use std::env;

/// Process-wide settings, read once at startup and shared via `web::Data`.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: String,
    /// Hours added to the start date when a room is created without an
    /// explicit end date.
    pub default_expiration_hours: i64,
}

impl Config {
    pub fn from_env() -> Config {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "data/parlor.db".to_string());
        let default_expiration_hours = match env::var("ROOM_DEFAULT_EXPIRATION_HOURS") {
            Ok(val) => val.parse().unwrap_or_else(|_| {
                log::warn!("Invalid ROOM_DEFAULT_EXPIRATION_HOURS {val:?} — using 24");
                24
            }),
            Err(_) => 24,
        };

        Config {
            bind_addr,
            database_path,
            default_expiration_hours,
        }
    }
}
