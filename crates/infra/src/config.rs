use docbook_utils::create_random_secret;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret code that has to be provided on sign up to register an admin
    pub admin_signup_secret_code: String,
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Lifetime of an issued session token in seconds
    pub jwt_expires_in_secs: i64,
    /// Maximum number of connections in the postgres pool
    pub pg_pool_max: u32,
    /// How long a request waits for a free connection before the
    /// store is reported as unavailable
    pub pg_acquire_timeout_secs: u64,
    /// How many times a booking is attempted when the store is
    /// temporarily unavailable
    pub booking_retry_attempts: usize,
    /// Reject appointments outside of the working hours of the doctor
    pub enforce_working_hours: bool,
    /// Serve request metrics in the prometheus text format on `/metrics`
    pub metrics_enabled: bool,
}

impl Config {
    pub fn new() -> Self {
        let admin_signup_secret_code = match std::env::var("ADMIN_SIGNUP_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find ADMIN_SIGNUP_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for signing up admins was generated and set to: {}",
                    code
                );
                code
            }
        };
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("Did not find JWT_SECRET environment variable. Going to generate one, issued tokens will not survive a restart.");
                create_random_secret(32)
            }
        };

        Self {
            port: env_or("PORT", 5000),
            admin_signup_secret_code,
            jwt_secret,
            jwt_expires_in_secs: env_or("JWT_EXPIRES_IN_SECS", 60 * 60 * 24),
            pg_pool_max: env_or("PG_POOL_MAX", 5),
            pg_acquire_timeout_secs: env_or("PG_ACQUIRE_TIMEOUT_SECS", 5),
            booking_retry_attempts: env_or("BOOKING_RETRY_ATTEMPTS", 3),
            enforce_working_hours: env_or("ENFORCE_WORKING_HOURS", false),
            metrics_enabled: env_or("METRICS_ENABLED", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or<T: FromStr + Display>(key: &str, default: T) -> T {
    parse_or(key, std::env::var(key).ok(), default)
}

fn parse_or<T: FromStr + Display>(key: &str, value: Option<String>, default: T) -> T {
    let value = match value {
        Some(value) => value,
        None => return default,
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                key, value, default
            );
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_given_values() {
        assert_eq!(parse_or("PORT", Some("8080".into()), 5000_usize), 8080);
        assert_eq!(parse_or("PG_POOL_MAX", Some(" 12 ".into()), 5_u32), 12);
        assert!(parse_or("ENFORCE_WORKING_HOURS", Some("true".into()), false));
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(parse_or("PORT", None, 5000_usize), 5000);
        assert_eq!(parse_or("PORT", Some("abc".into()), 5000_usize), 5000);
        assert_eq!(parse_or("BOOKING_RETRY_ATTEMPTS", Some("-1".into()), 3_usize), 3);
        assert!(!parse_or("ENFORCE_WORKING_HOURS", Some("yes".into()), false));
    }
}
