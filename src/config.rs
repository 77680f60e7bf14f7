use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "8000"),
            database_url: maybe_load("DATABASE_URL"),
            database_name: maybe_load("DATABASE_NAME"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

// Database settings stay optional so the diagnostics route can report
// them unset instead of the process refusing to start.
fn maybe_load(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_load_falls_back_to_default() {
        let port: u16 = try_load("RENTAL_TEST_UNSET_PORT", "8000");
        assert_eq!(port, 8000);
    }

    #[test]
    fn maybe_load_absent_is_none() {
        assert_eq!(maybe_load("RENTAL_TEST_UNSET_URL"), None);
    }
}
