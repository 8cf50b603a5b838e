//! Run configuration (`input/reportgen.config.json`).
//!
//! Keys use a dotted naming convention (`smtp.enabled`). They are looked up
//! flat first, then as a nested path (`{"smtp": {"enabled": true}}`).
//!
//! Only `smtp.enabled` is read eagerly. The remaining SMTP keys are resolved
//! by [`ReportConfig::smtp_settings`], which is only called when mail is
//! actually sent.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::io::json::load_json_value;

pub const DEFAULT_CONFIG_PATH: &str = "input/reportgen.config.json";
/// Overrides `smtp.password` when set.
pub const PASSWORD_ENV: &str = "REPORTGEN_SMTP_PASSWORD";

#[derive(Debug, Clone)]
pub struct ReportConfig {
    path: PathBuf,
    values: Map<String, Value>,
}

/// Everything needed to deliver the report mail.
#[derive(Clone)]
pub struct SmtpSettings {
    pub from: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Upgrade with STARTTLS before authenticating.
    pub use_tls: bool,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .field("subject", &self.subject)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("use_tls", &self.use_tls)
            .finish_non_exhaustive()
    }
}

impl ReportConfig {
    /// Load the config document. The path is made absolute against the
    /// working directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let path = std::path::absolute(path)
            .map_err(|e| AppError::io(format!("Failed to resolve config path '{}': {e}", path.display())))?;
        let value = load_json_value(&path)?;
        Self::from_value(path, value)
    }

    pub fn from_value(path: PathBuf, value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(values) => Ok(Self { path, values }),
            _ => Err(AppError::schema(format!(
                "Config '{}' must be a JSON object",
                path.display()
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the report mail should be sent at all.
    pub fn smtp_enabled(&self) -> Result<bool, AppError> {
        let value = self.require("smtp.enabled")?;
        value
            .as_bool()
            .ok_or_else(|| self.wrong_type("smtp.enabled", "a boolean", value))
    }

    /// Resolve the SMTP settings.
    ///
    /// `password_override` replaces `smtp.password`, which then need not be
    /// present in the file.
    pub fn smtp_settings(&self, password_override: Option<String>) -> Result<SmtpSettings, AppError> {
        let password = match password_override {
            Some(password) => password,
            None => self.require_str("smtp.password")?,
        };

        let port_value = self.require("smtp.port")?;
        let port = port_value
            .as_u64()
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(|| self.wrong_type("smtp.port", "a port number", port_value))?;

        let use_tls = match self.lookup("smtp.tls") {
            None | Some(Value::Null) => true,
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.wrong_type("smtp.tls", "a boolean", value))?,
        };

        Ok(SmtpSettings {
            from: self.require_str("smtp.from")?,
            recipients: self.recipients()?,
            subject: self.require_str("smtp.subject")?,
            message: self.require_str("smtp.message")?,
            server: self.require_str("smtp.server")?,
            port,
            username: self.require_str("smtp.username")?,
            password,
            use_tls,
        })
    }

    /// `smtp.recipients` as a list: either a comma-separated string or an
    /// array of strings.
    fn recipients(&self) -> Result<Vec<String>, AppError> {
        let value = self.require("smtp.recipients")?;
        let raw: Vec<&str> = match value {
            Value::String(s) => s.split(',').collect(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| self.wrong_type("smtp.recipients", "a list of strings", value))
                })
                .collect::<Result<Vec<&str>, AppError>>()?,
            other => return Err(self.wrong_type("smtp.recipients", "a string or list of strings", other)),
        };

        let recipients: Vec<String> = raw
            .into_iter()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        if recipients.is_empty() {
            return Err(AppError::schema(format!(
                "Config key `smtp.recipients` in '{}' lists no addresses",
                self.path.display()
            )));
        }
        Ok(recipients)
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }
        let mut parts = key.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn require(&self, key: &str) -> Result<&Value, AppError> {
        self.lookup(key).ok_or_else(|| {
            AppError::schema(format!(
                "Missing config key `{key}` in '{}'",
                self.path.display()
            ))
        })
    }

    fn require_str(&self, key: &str) -> Result<String, AppError> {
        let value = self.require(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(key, "a string", value))
    }

    fn wrong_type(&self, key: &str, expected: &str, got: &Value) -> AppError {
        AppError::schema(format!(
            "Config key `{key}` in '{}' must be {expected} (got {got})",
            self.path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn config(value: Value) -> ReportConfig {
        ReportConfig::from_value(PathBuf::from("/tmp/reportgen.config.json"), value).unwrap()
    }

    fn full_flat() -> Value {
        json!({
            "smtp.enabled": true,
            "smtp.from": "reports@example.org",
            "smtp.recipients": ["a@example.org", " b@example.org "],
            "smtp.subject": "Donation reports",
            "smtp.message": "Reports attached.",
            "smtp.server": "smtp.example.org",
            "smtp.port": 587,
            "smtp.username": "reports",
            "smtp.password": "hunter2"
        })
    }

    #[test]
    fn flat_keys_resolve() {
        let cfg = config(full_flat());
        assert!(cfg.smtp_enabled().unwrap());

        let smtp = cfg.smtp_settings(None).unwrap();
        assert_eq!(smtp.recipients, vec!["a@example.org", "b@example.org"]);
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.password, "hunter2");
        assert!(smtp.use_tls);
    }

    #[test]
    fn nested_keys_resolve() {
        let cfg = config(json!({
            "smtp": {
                "enabled": true,
                "from": "reports@example.org",
                "recipients": "a@example.org,b@example.org",
                "subject": "s",
                "message": "m",
                "server": "localhost",
                "port": 25,
                "username": "u",
                "password": "p",
                "tls": false
            }
        }));
        let smtp = cfg.smtp_settings(None).unwrap();
        assert_eq!(smtp.recipients, vec!["a@example.org", "b@example.org"]);
        assert_eq!(smtp.server, "localhost");
        assert!(!smtp.use_tls);
    }

    #[test]
    fn disabled_mail_ignores_malformed_smtp_settings() {
        let cfg = config(json!({"smtp.enabled": false, "smtp.port": "not a port"}));
        assert!(!cfg.smtp_enabled().unwrap());
        assert!(cfg.smtp_settings(None).is_err());
    }

    #[test]
    fn missing_key_is_named() {
        let mut value = full_flat();
        value.as_object_mut().unwrap().remove("smtp.server");
        let err = config(value).smtp_settings(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("`smtp.server`"));

        let err = config(json!({})).smtp_enabled().unwrap_err();
        assert!(err.to_string().contains("`smtp.enabled`"));
    }

    #[test]
    fn password_override_wins() {
        let mut value = full_flat();
        value.as_object_mut().unwrap().remove("smtp.password");
        let smtp = config(value).smtp_settings(Some("from-env".to_string())).unwrap();
        assert_eq!(smtp.password, "from-env");
        assert!(!format!("{smtp:?}").contains("from-env"));
    }

    #[test]
    fn non_object_config_is_rejected() {
        let err = ReportConfig::from_value(PathBuf::from("c.json"), json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
