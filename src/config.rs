use std::env;

/// Runtime configuration, read once at startup from the environment
/// (`.env` files supported via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    /// Festival name shown in the page header and on the monitor.
    pub festival_name: String,
    /// Operator contact shown on the login page.
    pub contact_name: String,
    pub contact_email: String,
    pub bind_addr: String,
    pub database_path: String,
    /// Seed admin credentials, applied only when the accounts table is empty.
    pub admin_email: String,
    pub admin_password: String,
    pub monitor: MonitorSettings,
}

/// Timing knobs for the public monitor display.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    /// Minutes between monitor data refreshes (>= 1).
    pub refresh_interval_mins: u64,
    /// Seconds each monitor page stays on screen (>= 1).
    pub rotation_duration_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            refresh_interval_mins: 5,
            rotation_duration_secs: 12,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            festival_name: env_or("FESTIVAL_NAME", "Festival"),
            contact_name: env_or("CONTACT_NAME", "Festival committee"),
            contact_email: env_or("CONTACT_EMAIL", "festival@example.com"),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:8080"),
            database_path: env_or("DATABASE_PATH", "data/app.db"),
            admin_email: env_or("ADMIN_EMAIL", "admin@example.com"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            monitor: MonitorSettings {
                refresh_interval_mins: env_interval("MONITOR_REFRESH_INTERVAL", 5),
                rotation_duration_secs: env_interval("MONITOR_ROTATION_DURATION", 12),
            },
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse a positive interval from the environment, falling back to the
/// default on missing, unparsable, or zero values.
fn env_interval(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(val) => match val.parse::<u64>() {
            Ok(n) if n >= 1 => n,
            _ => {
                log::warn!("Ignoring {name}={val}: expected an integer >= 1");
                default
            }
        },
        Err(_) => default,
    }
}
