use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// Comma separated list of allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: String,

    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_minutes: i64,

    #[serde(default)]
    pub admin_email: String,

    #[serde(default)]
    pub admin_password_hash: String,

    #[serde(default = "default_upload_max_bytes")]
    pub upload_max_bytes: usize,

    #[serde(default)]
    pub cloudinary_cloud_name: Option<String>,

    #[serde(default)]
    pub cloudinary_api_key: Option<String>,

    #[serde(default)]
    pub cloudinary_api_secret: Option<String>,

    #[serde(default = "default_cloudinary_folder")]
    pub cloudinary_folder: String,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    #[serde(default)]
    pub smtp_from: Option<String>,

    /// Where inquiry notifications go. Falls back to `admin_email`.
    #[serde(default)]
    pub notify_email: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-CMS".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_max_connections() -> u32 {
    20
}
fn default_cors_origins() -> String {
    "*".to_string()
}
fn default_jwt_expiration() -> i64 {
    60
}
fn default_upload_max_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_cloudinary_folder() -> String {
    "portfolio_uploads".to_string()
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}

/// Credentials for the hosted image service.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Zeroizing<String>,
    pub folder: String,
}

/// Outbound mail settings for inquiry notifications.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Zeroizing<String>,
    pub from: String,
    pub notify_to: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Deployments that predate the APP_ prefix still export the bare names
        config.database_url = fill_or_env(config.database_url, &["APP_DATABASE_URL", "DATABASE_URL", "POSTGRES_URL"])?;
        config.jwt_secret = fill_or_env(config.jwt_secret, &["APP_JWT_SECRET", "JWT_SECRET"])?;
        config.admin_email = fill_or_env(config.admin_email, &["APP_ADMIN_EMAIL", "ADMIN_EMAIL"])?;
        config.admin_password_hash = fill_or_env(config.admin_password_hash, &["APP_ADMIN_PASSWORD_HASH", "ADMIN_PASSWORD_HASH"])?;

        config.cloudinary_cloud_name = or_env(config.cloudinary_cloud_name, "CLOUDINARY_CLOUD_NAME");
        config.cloudinary_api_key = or_env(config.cloudinary_api_key, "CLOUDINARY_API_KEY");
        config.cloudinary_api_secret = or_env(config.cloudinary_api_secret, "CLOUDINARY_API_SECRET");
        config.smtp_username = or_env(config.smtp_username, "EMAIL_USER");
        config.smtp_password = or_env(config.smtp_password, "EMAIL_PASS");

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.jwt_secret.len() < 32 {
            errors.push("JWT_SECRET must be at least 32 characters");
        }
        if self.jwt_expiration_minutes <= 0 {
            errors.push("JWT_EXPIRATION_MINUTES must be positive");
        }
        if !self.admin_email.contains('@') {
            errors.push("ADMIN_EMAIL must be a valid email address");
        }
        if self.admin_password_hash.trim().is_empty() {
            errors.push("ADMIN_PASSWORD_HASH cannot be empty");
        }
        if self.upload_max_bytes == 0 {
            errors.push("UPLOAD_MAX_BYTES must be greater than zero");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns `None` unless all three Cloudinary credentials are present.
    pub fn cloudinary(&self) -> Option<CloudinaryConfig> {
        let cloud_name = non_blank(&self.cloudinary_cloud_name)?;
        let api_key = non_blank(&self.cloudinary_api_key)?;
        let api_secret = non_blank(&self.cloudinary_api_secret)?;

        Some(CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret: Zeroizing::new(api_secret),
            folder: self.cloudinary_folder.clone(),
        })
    }

    /// Returns `None` unless SMTP credentials are present.
    pub fn smtp(&self) -> Option<SmtpConfig> {
        let username = non_blank(&self.smtp_username)?;
        let password = non_blank(&self.smtp_password)?;

        Some(SmtpConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            from: non_blank(&self.smtp_from).unwrap_or_else(|| username.clone()),
            notify_to: non_blank(&self.notify_email).unwrap_or_else(|| self.admin_email.clone()),
            username,
            password: Zeroizing::new(password),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn fill_or_env(current: String, env_keys: &[&str]) -> Result<String, ConfigError> {
    if !current.trim().is_empty() {
        return Ok(current);
    }

    env_keys
        .iter()
        .find_map(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| ConfigError::Message(format!("{} must be set", env_keys[0])))
}

fn or_env(current: Option<String>, env_key: &str) -> Option<String> {
    current.or_else(|| env::var(env_key).ok())
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        self.as_deref().unwrap_or_default().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("admin_email", &self.admin_email)
            .field("admin_password_hash", &self.admin_password_hash.redact())
            .field("upload_max_bytes", &self.upload_max_bytes)
            .field("cloudinary_cloud_name", &self.cloudinary_cloud_name)
            .field("cloudinary_api_key", &self.cloudinary_api_key.redact())
            .field("cloudinary_api_secret", &self.cloudinary_api_secret.redact())
            .field("cloudinary_folder", &self.cloudinary_folder)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.redact())
            .field("notify_email", &self.notify_email)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Portfolio CMS Test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            database_url: "postgres://localhost/portfolio_test".to_string(),
            database_max_connections: 2,
            cors_allowed_origins: "*".to_string(),
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".to_string(),
            jwt_expiration_minutes: 60,
            admin_email: "admin@example.com".to_string(),
            admin_password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
            upload_max_bytes: 1024,
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
            cloudinary_folder: default_cloudinary_folder(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            smtp_from: None,
            notify_email: None,
        }
    }

    #[test]
    fn sample_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut config = sample_config();
        config.jwt_secret = "short".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"));
    }

    #[test]
    fn wildcard_cors_is_rejected_in_production() {
        let mut config = sample_config();
        config.env = AppEnvironment::Production;

        assert!(config.validate().is_err());

        config.cors_allowed_origins = "https://example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let mut config = sample_config();
        config.cors_allowed_origins = " https://a.dev , ,https://b.dev".to_string();

        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn cloudinary_requires_every_credential() {
        let mut config = sample_config();
        config.cloudinary_cloud_name = Some("demo".to_string());
        config.cloudinary_api_key = Some("key".to_string());
        assert!(config.cloudinary().is_none());

        config.cloudinary_api_secret = Some("secret".to_string());
        let cloudinary = config.cloudinary().unwrap();
        assert_eq!(cloudinary.cloud_name, "demo");
        assert_eq!(cloudinary.folder, "portfolio_uploads");
    }

    #[test]
    fn smtp_defaults_sender_and_recipient() {
        let mut config = sample_config();
        config.smtp_username = Some("mailer@example.com".to_string());
        config.smtp_password = Some("app-password".to_string());

        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.from, "mailer@example.com");
        assert_eq!(smtp.notify_to, "admin@example.com");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", sample_config());

        assert!(!rendered.contains("test_jwt_secret"));
        assert!(!rendered.contains("argon2id"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
