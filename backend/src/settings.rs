//! Application settings loaded via OrthoConfig.
//!
//! Values layer command-line flags over `COURSES_*` environment variables
//! over an optional configuration file.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_MAX_STUDENTS_PER_COURSE, EnrollmentPolicy};
use crate::outbound::persistence::{DEFAULT_POOL_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a valid socket address")]
    InvalidBindAddress { value: String },
    #[error("pool size must be at least 1")]
    EmptyPool,
}

/// Runtime configuration for the courses service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSES")]
pub struct AppSettings {
    /// Upper bound on students enrolled in one course.
    pub max_students_per_course: Option<usize>,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_address: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Return the configured enrollment cap, falling back to the default.
    pub fn max_students_per_course(&self) -> usize {
        self.max_students_per_course
            .unwrap_or(DEFAULT_MAX_STUDENTS_PER_COURSE)
    }

    /// Enrollment rule handed to the course service.
    pub fn enrollment_policy(&self) -> EnrollmentPolicy {
        EnrollmentPolicy::new(self.max_students_per_course())
    }

    /// Parse the listen address.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddress`] when the value is not a
    /// `host:port` socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse()
            .map_err(|_| SettingsError::InvalidBindAddress {
                value: raw.to_owned(),
            })
    }

    /// Pool settings when a database URL is configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::EmptyPool`] when the pool size is zero.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let max_size = self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        if max_size == 0 {
            return Err(SettingsError::EmptyPool);
        }
        Ok(Some(PoolConfig::new(url).with_max_size(max_size)))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "COURSES_MAX_STUDENTS_PER_COURSE",
        "COURSES_DATABASE_URL",
        "COURSES_BIND_ADDRESS",
        "COURSES_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("courses-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.max_students_per_course(), 10);
        assert_eq!(
            settings.enrollment_policy().max_students_per_course(),
            DEFAULT_MAX_STUDENTS_PER_COURSE
        );
        assert_eq!(
            settings.bind_address(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.pool_config(), Ok(None));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COURSES_MAX_STUDENTS_PER_COURSE", Some("3".to_owned())),
            (
                "COURSES_DATABASE_URL",
                Some("postgres://localhost/courses".to_owned()),
            ),
            ("COURSES_BIND_ADDRESS", Some("127.0.0.1:9000".to_owned())),
            ("COURSES_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.enrollment_policy().max_students_per_course(), 3);
        assert_eq!(
            settings.bind_address(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        let pool = settings
            .pool_config()
            .expect("valid pool settings")
            .expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/courses");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    #[case("localhost")]
    #[case("0.0.0.0:http")]
    fn malformed_bind_addresses_are_reported(#[case] raw: &str) {
        let settings = AppSettings {
            max_students_per_course: None,
            database_url: None,
            bind_address: Some(raw.to_owned()),
            pool_max_size: None,
        };
        assert_eq!(
            settings.bind_address(),
            Err(SettingsError::InvalidBindAddress {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn zero_sized_pool_is_rejected() {
        let settings = AppSettings {
            max_students_per_course: None,
            database_url: Some("postgres://localhost/courses".to_owned()),
            bind_address: None,
            pool_max_size: Some(0),
        };
        assert_eq!(settings.pool_config(), Err(SettingsError::EmptyPool));
    }
}
