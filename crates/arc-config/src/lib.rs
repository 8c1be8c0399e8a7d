//! Configuration management for Arc.
//!
//! Parses `arc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Every credential, URL and realm field is expanded, so secrets can stay
//! out of the file:
//!
//! ```toml
//! [oauth1]
//! consumer_key = "arc"
//! consumer_secret = "${ARC_CONSUMER_SECRET}"
//! token = "${ARC_TOKEN:-}"
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use arc_oauth1::{
    AuthParamsLocation, Credentials, RsaKeyError, SignOptions, SignatureMethod, TokenEndpoints,
    TokenMethod, read_private_key,
};
use serde::Deserialize;

use crate::expand::{expand_env, expand_opt};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override consumer key.
    pub consumer_key: Option<String>,
    /// Override token.
    pub token: Option<String>,
    /// Override token secret.
    pub token_secret: Option<String>,
    /// Override signature method name.
    pub signature_method: Option<String>,
    /// Override parameters location name.
    pub location: Option<String>,
    /// Override realm.
    pub realm: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "arc.toml";

/// Default token request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client credentials and signing defaults.
    pub oauth1: OAuth1Config,
    /// Token endpoints (needed only by `generate-tokens`).
    pub endpoints: Option<EndpointsConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[oauth1]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OAuth1Config {
    /// Consumer key.
    pub consumer_key: String,
    /// Consumer secret (or inline PEM key for `RSA-SHA1`).
    pub consumer_secret: String,
    /// PEM private key file for `RSA-SHA1`, relative to the config file.
    pub private_key: Option<PathBuf>,
    /// Access token.
    pub token: Option<String>,
    /// Access token secret.
    pub token_secret: Option<String>,
    /// Signature method name.
    pub signature_method: String,
    /// Where parameters are sent: `header`, `body` or `querystring`.
    pub location: String,
    /// Authorization header realm.
    pub realm: Option<String>,
}

impl Default for OAuth1Config {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            private_key: None,
            token: None,
            token_secret: None,
            signature_method: SignatureMethod::default().as_str().to_owned(),
            location: AuthParamsLocation::default().as_str().to_owned(),
            realm: None,
        }
    }
}

impl OAuth1Config {
    /// Parsed signature method.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown method name.
    pub fn signature_method(&self) -> Result<SignatureMethod, ConfigError> {
        self.signature_method
            .parse()
            .map_err(|e| ConfigError::Validation(format!("oauth1.signature_method: {e}")))
    }

    /// Parsed parameters location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown location name.
    pub fn location(&self) -> Result<AuthParamsLocation, ConfigError> {
        self.location
            .parse()
            .map_err(|e| ConfigError::Validation(format!("oauth1.location: {e}")))
    }

    /// Signing options from the configured method, location and realm.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a name does not parse.
    pub fn sign_options(&self) -> Result<SignOptions, ConfigError> {
        let mut options =
            SignOptions::new(self.signature_method()?).with_location(self.location()?);
        options.realm.clone_from(&self.realm);
        Ok(options)
    }

    /// Client credentials.
    ///
    /// With `RSA-SHA1` and `private_key` set, the key file is read and used
    /// as the consumer secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the consumer key is empty, or
    /// `ConfigError::PrivateKey` if the key file cannot be read.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        require_non_empty(&self.consumer_key, "oauth1.consumer_key")?;

        let consumer_secret = match (&self.private_key, self.signature_method()?) {
            (Some(path), SignatureMethod::RsaSha1) => {
                read_private_key(path).map_err(|source| ConfigError::PrivateKey {
                    path: path.clone(),
                    source,
                })?
            }
            _ => self.consumer_secret.clone(),
        };

        let credentials = Credentials::new(&self.consumer_key, consumer_secret);
        Ok(match &self.token {
            Some(token) if !token.is_empty() => {
                credentials.with_token(token, self.token_secret.as_deref().unwrap_or(""))
            }
            _ => credentials,
        })
    }

    /// Validate that names parse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signature_method()?;
        self.location()?;
        Ok(())
    }
}

/// `[endpoints]` section.
#[derive(Debug, Deserialize)]
pub struct EndpointsConfig {
    /// Temporary credentials endpoint.
    pub request_token_url: String,
    /// Resource owner authorization endpoint.
    pub authorization_url: String,
    /// Token credentials endpoint.
    pub access_token_url: String,
    /// HTTP method for token requests.
    #[serde(default = "default_auth_token_method")]
    pub auth_token_method: String,
    /// `oauth_callback` sent with the request token.
    #[serde(default = "default_callback")]
    pub callback: String,
    /// Timeout for each token request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EndpointsConfig {
    /// Validate URLs, method and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (url, field) in [
            (&self.request_token_url, "endpoints.request_token_url"),
            (&self.authorization_url, "endpoints.authorization_url"),
            (&self.access_token_url, "endpoints.access_token_url"),
        ] {
            require_non_empty(url, field)?;
            require_http_url(url, field)?;
        }
        self.token_method()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "endpoints.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Endpoint URLs for the token exchange.
    #[must_use]
    pub fn token_endpoints(&self) -> TokenEndpoints {
        TokenEndpoints::new(
            &self.request_token_url,
            &self.authorization_url,
            &self.access_token_url,
        )
    }

    /// Parsed token request method.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` unless the method is GET or POST.
    pub fn token_method(&self) -> Result<TokenMethod, ConfigError> {
        self.auth_token_method
            .parse()
            .map_err(|e| ConfigError::Validation(format!("endpoints.auth_token_method: {e}")))
    }

    /// Token request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_auth_token_method() -> String {
    TokenMethod::default().as_str().to_owned()
}

fn default_callback() -> String {
    arc_oauth1::OUT_OF_BAND.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`oauth1.consumer_secret`").
        field: String,
        /// Error message (e.g., "${`ARC_SECRET`} not set").
        message: String,
    },
    /// Private key file could not be loaded.
    #[error("Failed to load private key {}", path.display())]
    PrivateKey {
        /// Resolved key path.
        path: PathBuf,
        /// Underlying key error.
        #[source]
        source: RsaKeyError,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `arc.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and take precedence over
    /// config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative paths are resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let oauth1 = &mut self.oauth1;
        if let Some(consumer_key) = &settings.consumer_key {
            oauth1.consumer_key.clone_from(consumer_key);
        }
        if let Some(token) = &settings.token {
            oauth1.token = Some(token.clone());
        }
        if let Some(token_secret) = &settings.token_secret {
            oauth1.token_secret = Some(token_secret.clone());
        }
        if let Some(method) = &settings.signature_method {
            oauth1.signature_method.clone_from(method);
        }
        if let Some(location) = &settings.location {
            oauth1.location.clone_from(location);
        }
        if let Some(realm) = &settings.realm {
            oauth1.realm = Some(realm.clone());
        }
    }

    /// Get validated endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_endpoints(&self) -> Result<&EndpointsConfig, ConfigError> {
        let endpoints = self.endpoints.as_ref().ok_or_else(|| {
            ConfigError::Validation("[endpoints] section required in config".into())
        })?;
        endpoints.validate()?;
        Ok(endpoints)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Credentials are checked only when they are used, so a config with
    /// just `[endpoints]` loads fine.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oauth1.validate()?;
        if let Some(endpoints) = &self.endpoints {
            endpoints.validate()?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let oauth1 = &mut self.oauth1;
        oauth1.consumer_key = expand_env(&oauth1.consumer_key, "oauth1.consumer_key")?;
        oauth1.consumer_secret = expand_env(&oauth1.consumer_secret, "oauth1.consumer_secret")?;
        expand_opt(&mut oauth1.token, "oauth1.token")?;
        expand_opt(&mut oauth1.token_secret, "oauth1.token_secret")?;
        expand_opt(&mut oauth1.realm, "oauth1.realm")?;
        if let Some(path) = &oauth1.private_key {
            let expanded = expand_env(&path.to_string_lossy(), "oauth1.private_key")?;
            oauth1.private_key = Some(PathBuf::from(expanded));
        }

        if let Some(endpoints) = &mut self.endpoints {
            endpoints.request_token_url =
                expand_env(&endpoints.request_token_url, "endpoints.request_token_url")?;
            endpoints.authorization_url =
                expand_env(&endpoints.authorization_url, "endpoints.authorization_url")?;
            endpoints.access_token_url =
                expand_env(&endpoints.access_token_url, "endpoints.access_token_url")?;
            endpoints.callback = expand_env(&endpoints.callback, "endpoints.callback")?;
        }

        Ok(())
    }

    /// Resolve the private key path against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(path) = &self.oauth1.private_key
            && path.is_relative()
        {
            self.oauth1.private_key = Some(config_dir.join(path));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_CONFIG: &str = r#"
[oauth1]
consumer_key = "key"
consumer_secret = "secret"
token = "accesskey"
token_secret = "accesssecret"
signature_method = "PLAINTEXT"
location = "querystring"
realm = "Photos"

[endpoints]
request_token_url = "https://provider.example.com/oauth/request_token"
authorization_url = "https://provider.example.com/oauth/authorize"
access_token_url = "https://provider.example.com/oauth/access_token"
auth_token_method = "GET"
callback = "https://client.example.com/ready"
timeout_secs = 5
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.oauth1.signature_method, "HMAC-SHA1");
        assert_eq!(config.oauth1.location, "header");
        assert!(config.endpoints.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("", Path::new("/project")).unwrap();
        assert_eq!(config.oauth1.consumer_key, "");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(FULL_CONFIG, Path::new("/project")).unwrap();

        assert_eq!(config.oauth1.signature_method().unwrap(), SignatureMethod::Plaintext);
        assert_eq!(config.oauth1.location().unwrap(), AuthParamsLocation::QueryString);

        let options = config.oauth1.sign_options().unwrap();
        assert_eq!(options.realm.as_deref(), Some("Photos"));

        let endpoints = config.require_endpoints().unwrap();
        assert_eq!(endpoints.token_method().unwrap(), TokenMethod::Get);
        assert_eq!(endpoints.timeout(), Duration::from_secs(5));
        assert_eq!(endpoints.callback, "https://client.example.com/ready");
        assert_eq!(
            endpoints.token_endpoints().access_token_url,
            "https://provider.example.com/oauth/access_token"
        );
    }

    #[test]
    fn test_endpoint_defaults() {
        let toml = r#"
[endpoints]
request_token_url = "https://p.example.com/request"
authorization_url = "https://p.example.com/authorize"
access_token_url = "https://p.example.com/access"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        let endpoints = config.require_endpoints().unwrap();
        assert_eq!(endpoints.auth_token_method, "POST");
        assert_eq!(endpoints.callback, "oob");
        assert_eq!(endpoints.timeout_secs, 30);
    }

    #[test]
    fn test_credentials_with_token() {
        let config = Config::from_toml(FULL_CONFIG, Path::new("/project")).unwrap();
        let credentials = config.oauth1.credentials().unwrap();
        assert_eq!(
            credentials,
            Credentials::new("key", "secret").with_token("accesskey", "accesssecret")
        );
    }

    #[test]
    fn test_credentials_empty_token_is_consumer_only() {
        let toml = r#"
[oauth1]
consumer_key = "key"
consumer_secret = "secret"
token = ""
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        let credentials = config.oauth1.credentials().unwrap();
        assert_eq!(credentials.token, None);
    }

    #[test]
    fn test_credentials_require_consumer_key() {
        let config = Config::default();
        let err = config.oauth1.credentials().unwrap_err();
        assert!(err.to_string().contains("oauth1.consumer_key"));
    }

    #[test]
    fn test_private_key_resolved_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"
[oauth1]
consumer_key = "key"
signature_method = "RSA-SHA1"
private_key = "keys/private.pem"
"#,
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("keys")).unwrap();
        std::fs::write(dir.path().join("keys/private.pem"), "not a key").unwrap();

        let config = Config::load(Some(&dir.path().join(CONFIG_FILENAME)), None).unwrap();

        assert_eq!(
            config.oauth1.private_key,
            Some(dir.path().join("keys/private.pem"))
        );
        let err = config.oauth1.credentials().unwrap_err();
        assert!(matches!(err, ConfigError::PrivateKey { .. }));
    }

    #[test]
    fn test_private_key_ignored_for_hmac() {
        let toml = r#"
[oauth1]
consumer_key = "key"
consumer_secret = "secret"
private_key = "/missing.pem"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert_eq!(config.oauth1.credentials().unwrap().consumer_secret, "secret");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/arc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_sets_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_apply_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();
        let settings = CliSettings {
            consumer_key: Some("other".to_owned()),
            signature_method: Some("HMAC-SHA1".to_owned()),
            location: Some("body".to_owned()),
            ..CliSettings::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.oauth1.consumer_key, "other");
        assert_eq!(config.oauth1.signature_method().unwrap(), SignatureMethod::HmacSha1);
        assert_eq!(config.oauth1.location().unwrap(), AuthParamsLocation::Body);
        assert_eq!(config.oauth1.token.as_deref(), Some("accesskey"));
    }

    #[test]
    fn test_apply_cli_settings_invalid_method() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            signature_method: Some("HMAC-SHA256".to_owned()),
            ..CliSettings::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(err.to_string().contains("HMAC-SHA256"));
    }

    #[test]
    fn test_validate_unknown_location() {
        let toml = r#"
[oauth1]
location = "cookie"
"#;
        let err = Config::from_toml(toml, Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("cookie"));
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let toml = r#"
[endpoints]
request_token_url = "ftp://p.example.com/request"
authorization_url = "https://p.example.com/authorize"
access_token_url = "https://p.example.com/access"
"#;
        let err = Config::from_toml(toml, Path::new("/project")).unwrap_err();
        assert!(
            err.to_string()
                .contains("endpoints.request_token_url must start with http:// or https://")
        );
    }

    #[test]
    fn test_validate_endpoint_method_and_timeout() {
        let base = r#"
[endpoints]
request_token_url = "https://p.example.com/request"
authorization_url = "https://p.example.com/authorize"
access_token_url = "https://p.example.com/access"
"#;
        let err = Config::from_toml(&format!("{base}auth_token_method = \"PUT\"\n"), Path::new("/"))
            .unwrap_err();
        assert!(err.to_string().contains("PUT"));

        let err = Config::from_toml(&format!("{base}timeout_secs = 0\n"), Path::new("/"))
            .unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_require_endpoints_missing_section() {
        let err = Config::default().require_endpoints().unwrap_err();
        assert!(err.to_string().contains("[endpoints] section required"));
    }

    #[test]
    fn test_expand_env_vars_oauth1() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("ARC_TEST_CONSUMER_SECRET", "from-env");
            std::env::set_var("ARC_TEST_TOKEN", "token-from-env");
        }
        let toml = r#"
[oauth1]
consumer_key = "key"
consumer_secret = "${ARC_TEST_CONSUMER_SECRET}"
token = "${ARC_TEST_TOKEN}"
token_secret = "${ARC_TEST_TOKEN_SECRET:-}"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert_eq!(config.oauth1.consumer_secret, "from-env");
        assert_eq!(config.oauth1.token.as_deref(), Some("token-from-env"));
        assert_eq!(config.oauth1.token_secret.as_deref(), Some(""));
        unsafe {
            std::env::remove_var("ARC_TEST_CONSUMER_SECRET");
            std::env::remove_var("ARC_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_endpoints() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("ARC_TEST_PROVIDER", "provider.example.com");
        }
        let toml = r#"
[endpoints]
request_token_url = "https://${ARC_TEST_PROVIDER}/request"
authorization_url = "https://${ARC_TEST_PROVIDER}/authorize"
access_token_url = "https://${ARC_TEST_PROVIDER}/access"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();
        assert_eq!(
            config.require_endpoints().unwrap().request_token_url,
            "https://provider.example.com/request"
        );
        unsafe {
            std::env::remove_var("ARC_TEST_PROVIDER");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("ARC_TEST_MISSING_SECRET");
        }
        let toml = r#"
[oauth1]
consumer_secret = "${ARC_TEST_MISSING_SECRET}"
"#;
        let err = Config::from_toml(toml, Path::new("/project")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVar { ref field, .. } if field == "oauth1.consumer_secret"
        ));
    }
}
