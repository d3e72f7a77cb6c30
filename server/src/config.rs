//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Base URL of the MedAI backend, without a trailing slash.
    pub medai_api_base_url: String,
    /// Base URL of the GoTrue-compatible identity service.
    pub identity_url: String,
    pub identity_anon_key: String,
    /// Public origin of this server, used for password reset links.
    pub public_url: String,
    pub cookie_secure: bool,
    pub upstream_timeout_secs: u64,
    pub upstream_connect_timeout_secs: u64,
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `MEDAI_API_BASE_URL`
    /// - `IDENTITY_URL`, `IDENTITY_ANON_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_URL`: default `http://localhost:{PORT}`
    /// - `COOKIE_SECURE`: inferred from the `PUBLIC_URL` scheme when absent
    /// - `UPSTREAM_TIMEOUT_SECS`: default 300
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// [`ConfigError`] naming the first missing or malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] naming the first missing or malformed variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &str| lookup(var).map(|raw| raw.trim().to_owned()).filter(|raw| !raw.is_empty());
        let required = |var: &'static str| value(var).ok_or(ConfigError::Missing { var });
        let number = |var: &'static str, default: u64| match value(var) {
            None => Ok(default),
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid { var, value: raw }),
        };

        let port = match value("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
        };
        let medai_api_base_url = required("MEDAI_API_BASE_URL")?.trim_end_matches('/').to_owned();
        let identity_url = required("IDENTITY_URL")?.trim_end_matches('/').to_owned();
        let identity_anon_key = required("IDENTITY_ANON_KEY")?;
        let public_url = value("PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();
        let cookie_secure = match value("COOKIE_SECURE") {
            None => public_url.starts_with("https://"),
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
        };

        Ok(Self {
            port,
            medai_api_base_url,
            identity_url,
            identity_anon_key,
            public_url,
            cookie_secure,
            upstream_timeout_secs: number("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?,
            upstream_connect_timeout_secs: number("UPSTREAM_CONNECT_TIMEOUT_SECS", DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS)?,
        })
    }

    /// Where the identity provider sends users after a recovery e-mail.
    #[must_use]
    pub fn reset_redirect_url(&self) -> String {
        format!("{}/reset-password", self.public_url)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
