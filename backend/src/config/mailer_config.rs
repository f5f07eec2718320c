use std::net::SocketAddr;
use std::path::PathBuf;

use lettre::message::Mailbox;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CONTACT_TO: &str = "ootbmedia0@gmail.com";
pub const DEFAULT_CONTACT_FROM: &str = "OOTB Media Website <mailer@ootb-media.local>";
pub const DEFAULT_SUBJECT: &str = "New Campaign Inquiry - OOTB Media";
pub const DEFAULT_CONTACT_PAGE_URL: &str = "/contact";
pub const DEFAULT_FRONTEND_DIST: &str = "../frontend/dist";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be set when {context}")]
    Missing { var: &'static str, context: &'static str },

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportConfig {
    /// Hand the message to the local `sendmail` binary.
    Sendmail { command: Option<String> },
    Smtp {
        host: String,
        port: u16,
        credentials: Option<(String, String)>,
    },
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub bind_addr: SocketAddr,
    pub contact_to: Mailbox,
    pub contact_from: Mailbox,
    pub subject: String,
    pub contact_page_url: String,
    pub transport: TransportConfig,
    pub frontend_dist: PathBuf,
    pub max_body_bytes: usize,
    pub sentry_dsn: Option<String>,
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the
    /// process environment. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid { var: "BIND_ADDR", reason: e.to_string() })?;

        let contact_to = parse_mailbox("CONTACT_TO", get("CONTACT_TO"), DEFAULT_CONTACT_TO)?;
        let contact_from = parse_mailbox("CONTACT_FROM", get("CONTACT_FROM"), DEFAULT_CONTACT_FROM)?;

        let transport = match get("MAIL_TRANSPORT").as_deref().unwrap_or("sendmail") {
            "sendmail" => TransportConfig::Sendmail { command: get("SENDMAIL_COMMAND") },
            "smtp" => {
                let host = get("SMTP_HOST").ok_or(ConfigError::Missing {
                    var: "SMTP_HOST",
                    context: "MAIL_TRANSPORT=smtp",
                })?;
                let port = match get("SMTP_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .map_err(|e| ConfigError::Invalid { var: "SMTP_PORT", reason: e.to_string() })?,
                    None => DEFAULT_SMTP_PORT,
                };
                let credentials = match (get("SMTP_USERNAME"), get("SMTP_PASSWORD")) {
                    (Some(user), Some(pass)) => Some((user, pass)),
                    (None, None) => None,
                    _ => {
                        return Err(ConfigError::Invalid {
                            var: "SMTP_USERNAME",
                            reason: "SMTP_USERNAME and SMTP_PASSWORD must be set together".to_string(),
                        })
                    }
                };
                TransportConfig::Smtp { host, port, credentials }
            }
            other => {
                return Err(ConfigError::Invalid {
                    var: "MAIL_TRANSPORT",
                    reason: format!("expected 'sendmail' or 'smtp', got '{}'", other),
                })
            }
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "MAX_BODY_BYTES",
                    reason: format!("expected a positive byte count, got '{}'", raw),
                })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            contact_to,
            contact_from,
            subject: get("CONTACT_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            contact_page_url: get("CONTACT_PAGE_URL").unwrap_or_else(|| DEFAULT_CONTACT_PAGE_URL.to_string()),
            transport,
            frontend_dist: PathBuf::from(get("FRONTEND_DIST").unwrap_or_else(|| DEFAULT_FRONTEND_DIST.to_string())),
            max_body_bytes,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }

    /// Transport name for logs; never prints credentials.
    pub fn transport_kind(&self) -> &'static str {
        match self.transport {
            TransportConfig::Sendmail { .. } => "sendmail",
            TransportConfig::Smtp { .. } => "smtp",
        }
    }
}

fn parse_mailbox(var: &'static str, value: Option<String>, default: &str) -> Result<Mailbox, ConfigError> {
    value
        .as_deref()
        .unwrap_or(default)
        .parse::<Mailbox>()
        .map_err(|e| ConfigError::Invalid { var, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<MailerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MailerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.contact_to.email.to_string(), DEFAULT_CONTACT_TO);
        assert_eq!(config.contact_from.name.as_deref(), Some("OOTB Media Website"));
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert_eq!(config.transport, TransportConfig::Sendmail { command: None });
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("CONTACT_SUBJECT", "   "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_smtp_transport() {
        let config = config_from(&[
            ("MAIL_TRANSPORT", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USERNAME", "relay"),
            ("SMTP_PASSWORD", "hunter2"),
        ])
        .unwrap();
        assert_eq!(
            config.transport,
            TransportConfig::Smtp {
                host: "smtp.example.com".to_string(),
                port: 2525,
                credentials: Some(("relay".to_string(), "hunter2".to_string())),
            }
        );
    }

    #[test]
    fn test_smtp_requires_host() {
        let err = config_from(&[("MAIL_TRANSPORT", "smtp")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "SMTP_HOST", .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("MAIL_TRANSPORT", "pigeon")]).unwrap_err(),
            ConfigError::Invalid { var: "MAIL_TRANSPORT", .. }
        ));
        assert!(matches!(
            config_from(&[("CONTACT_TO", "not an address")]).unwrap_err(),
            ConfigError::Invalid { var: "CONTACT_TO", .. }
        ));
        assert!(matches!(
            config_from(&[("MAX_BODY_BYTES", "0")]).unwrap_err(),
            ConfigError::Invalid { var: "MAX_BODY_BYTES", .. }
        ));
        assert!(matches!(
            config_from(&[("MAIL_TRANSPORT", "smtp"), ("SMTP_HOST", "h"), ("SMTP_USERNAME", "u")]).unwrap_err(),
            ConfigError::Invalid { var: "SMTP_USERNAME", .. }
        ));
    }
}
