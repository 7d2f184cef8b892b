//! Application settings loaded via OrthoConfig.
//!
//! Values come from `APP_*` environment variables, an optional configuration
//! file, and command-line flags. `port` carries a configuration default so an
//! empty merge still yields a settings object; the remaining fields are
//! optional and their accessors fall back to the defaults below.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_SWAGGER_TITLE: &str = "Starter API";
const DEFAULT_SWAGGER_DESCRIPTION: &str = "REST API Documentation";
const DEFAULT_SWAGGER_VERSION: &str = "1.0.0";

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development; Swagger UI is served.
    #[default]
    Development,
    /// Production; Swagger UI is not served.
    Production,
    /// Automated tests.
    Test,
}

impl Environment {
    /// Configuration spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(SettingsError::UnknownEnvironment {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid configuration values detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `environment` is not one of the recognised names.
    #[error("unknown environment `{value}`; expected development, production or test")]
    UnknownEnvironment {
        /// Rejected value.
        value: String,
    },
    /// Port zero cannot be advertised to clients.
    #[error("port must be between 1 and 65535")]
    InvalidPort,
    /// The host and port do not form a socket address.
    #[error("invalid bind address `{value}`")]
    InvalidBindAddress {
        /// Rejected `host:port` text.
        value: String,
    },
    /// `api_version` is empty or contains a path separator.
    #[error("api version must be a single non-empty path segment (got `{value}`)")]
    InvalidApiVersion {
        /// Rejected value.
        value: String,
    },
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// `development`, `production` or `test`.
    pub environment: Option<String>,
    /// Version segment in the API path prefix.
    pub api_version: Option<String>,
    /// OpenAPI document title.
    pub swagger_title: Option<String>,
    /// OpenAPI document description.
    pub swagger_description: Option<String>,
    /// OpenAPI document version.
    pub swagger_version: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            environment: None,
            api_version: None,
            swagger_title: None,
            swagger_description: None,
            swagger_version: None,
        }
    }
}

impl AppSettings {
    /// Interface to bind, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Listening port.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Parsed environment, falling back to development.
    ///
    /// # Errors
    /// Returns [`SettingsError::UnknownEnvironment`] for unrecognised names.
    pub fn environment(&self) -> Result<Environment, SettingsError> {
        self.environment
            .as_deref()
            .map_or(Ok(Environment::default()), str::parse)
    }

    /// API version segment, falling back to `v1`.
    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    /// Path prefix shared by every API route, e.g. `/api/v1`.
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version())
    }

    /// OpenAPI document title.
    pub fn swagger_title(&self) -> &str {
        self.swagger_title.as_deref().unwrap_or(DEFAULT_SWAGGER_TITLE)
    }

    /// OpenAPI document description.
    pub fn swagger_description(&self) -> &str {
        self.swagger_description
            .as_deref()
            .unwrap_or(DEFAULT_SWAGGER_DESCRIPTION)
    }

    /// OpenAPI document version.
    pub fn swagger_version(&self) -> &str {
        self.swagger_version
            .as_deref()
            .unwrap_or(DEFAULT_SWAGGER_VERSION)
    }

    /// Whether Swagger UI and the JSON document are served.
    ///
    /// # Errors
    /// Propagates [`AppSettings::environment`] failures.
    pub fn serves_docs(&self) -> Result<bool, SettingsError> {
        Ok(self.environment()? != Environment::Production)
    }

    /// Socket address built from host and port.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidPort`] for port zero and
    /// [`SettingsError::InvalidBindAddress`] when the host does not resolve.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let port = self.port();
        if port == 0 {
            return Err(SettingsError::InvalidPort);
        }
        let host = self.host();
        (host, port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| SettingsError::InvalidBindAddress {
                value: format!("{host}:{port}"),
            })
    }

    /// Check every derived value once so startup fails fast.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.environment()?;
        self.bind_addr()?;
        let version = self.api_version();
        if version.is_empty() || version.contains('/') {
            return Err(SettingsError::InvalidApiVersion {
                value: version.to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "APP_HOST",
        "APP_PORT",
        "APP_ENVIRONMENT",
        "APP_API_VERSION",
        "APP_SWAGGER_TITLE",
        "APP_SWAGGER_DESCRIPTION",
        "APP_SWAGGER_VERSION",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("starter-api")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 3000);
        assert_eq!(settings.environment(), Ok(Environment::Development));
        assert_eq!(settings.api_prefix(), "/api/v1");
        assert_eq!(settings.swagger_title(), "Starter API");
        assert_eq!(settings.swagger_description(), "REST API Documentation");
        assert_eq!(settings.swagger_version(), "1.0.0");
        assert_eq!(settings.serves_docs(), Ok(true));
        assert!(settings.validate().is_ok());
    }

    #[rstest]
    fn built_in_defaults_match_an_empty_load() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let loaded = load_from_empty_args();
        let defaults = AppSettings::default();
        assert_eq!(loaded.port(), defaults.port());
        assert_eq!(loaded.host(), defaults.host());
        assert_eq!(loaded.api_prefix(), defaults.api_prefix());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("APP_HOST", Some("127.0.0.1".to_owned())),
            ("APP_PORT", Some("8080".to_owned())),
            ("APP_ENVIRONMENT", Some("production".to_owned())),
            ("APP_API_VERSION", None::<String>),
            ("APP_SWAGGER_TITLE", Some("Inventory".to_owned())),
            ("APP_SWAGGER_DESCRIPTION", None::<String>),
            ("APP_SWAGGER_VERSION", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:8080".parse().expect("valid address"))
        );
        assert_eq!(settings.environment(), Ok(Environment::Production));
        assert_eq!(settings.serves_docs(), Ok(false));
        assert_eq!(settings.swagger_title(), "Inventory");
    }

    #[rstest]
    #[case("Development", Ok(Environment::Development))]
    #[case("test", Ok(Environment::Test))]
    #[case("staging", Err(SettingsError::UnknownEnvironment { value: "staging".to_owned() }))]
    fn environment_names_are_validated(
        #[case] raw: &str,
        #[case] expected: Result<Environment, SettingsError>,
    ) {
        let settings = AppSettings {
            environment: Some(raw.to_owned()),
            ..AppSettings::default()
        };
        assert_eq!(settings.environment(), expected);
    }

    #[rstest]
    fn port_zero_is_rejected() {
        let settings = AppSettings {
            port: 0,
            ..AppSettings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::InvalidPort));
    }

    #[rstest]
    #[case("")]
    #[case("v1/beta")]
    fn malformed_api_versions_are_rejected(#[case] version: &str) {
        let settings = AppSettings {
            api_version: Some(version.to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidApiVersion { .. })
        ));
    }

    #[rstest]
    fn unparseable_hosts_are_rejected() {
        let settings = AppSettings {
            host: Some("not a host".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddress { .. })
        ));
    }
}
