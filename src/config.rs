use std::{env, fmt, time::Duration};

use lettre::{message::Mailbox, Address};
use tracing::info;

pub const RELAY_HOST: &str = "smtp.gmail.com";
pub const RELAY_PORT: u16 = 465;

pub const DEFAULT_PORT: u16 = 3003;
pub const DEFAULT_RELAY_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SENDER_NAME: &str = "Tempest";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Login and sender identity for the outbound SMTP relay.
#[derive(Clone)]
pub struct RelayCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub app_password: String,
    pub sender: Mailbox,
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("app_password", &"[redacted]")
            .field("sender", &self.sender.to_string())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub relay: RelayCredentials,
    pub relay_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let username = read("GMAIL_USER").ok_or(ConfigError::Missing("GMAIL_USER"))?;
        let app_password =
            read("GMAIL_APP_PASSWORD").ok_or(ConfigError::Missing("GMAIL_APP_PASSWORD"))?;

        let address: Address = username.parse().map_err(|e| ConfigError::Invalid {
            var: "GMAIL_USER",
            reason: format!("not an email address ({e})"),
        })?;
        let sender_name =
            read("MAIL_SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());

        let port = match read("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match read("RELAY_TIMEOUT_SECONDS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "RELAY_TIMEOUT_SECONDS",
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "RELAY_TIMEOUT_SECONDS",
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_RELAY_TIMEOUT_SECONDS,
        };

        Ok(Config {
            port,
            relay: RelayCredentials {
                host: RELAY_HOST.to_string(),
                port: RELAY_PORT,
                username,
                app_password,
                sender: Mailbox::new(Some(sender_name), address),
            },
            relay_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Logs the relay endpoint and timeout. Credentials stay out of the log.
    pub fn log_loaded(&self) {
        info!(
            relay_host = %self.relay.host,
            relay_port = self.relay.port,
            relay_timeout = ?self.relay_timeout,
            port = self.port,
            "loaded configuration"
        );
    }
}

#[cfg(test)]
pub(crate) fn test_relay() -> RelayCredentials {
    RelayCredentials {
        host: RELAY_HOST.to_string(),
        port: RELAY_PORT,
        username: "relay@example.com".to_string(),
        app_password: "super-secret-app-password".to_string(),
        sender: Mailbox::new(
            Some(DEFAULT_SENDER_NAME.to_string()),
            "relay@example.com".parse().unwrap(),
        ),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        port: DEFAULT_PORT,
        relay: test_relay(),
        relay_timeout: Duration::from_secs(DEFAULT_RELAY_TIMEOUT_SECONDS),
    }
}
