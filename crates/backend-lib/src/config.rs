// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Login throttle settings
    pub throttle: ThrottleSettings,
    /// Password settings
    pub password: PasswordSettings,
}

/// Login-attempt throttle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleSettings {
    /// Failed attempts before an email is blocked
    pub max_attempts: u32,
    /// Cooldown window in seconds
    pub cooldown_secs: u64,
}

/// Password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSettings {
    /// Minimum password length
    pub min_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("valid default addr"),
            log_level: "info".to_string(),
            throttle: ThrottleSettings::default(),
            password: PasswordSettings::default(),
        }
    }
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            cooldown_secs: 15 * 60,
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl ThrottleSettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Settings {
    /// Load settings: defaults, then any config file in the working
    /// directory, then `AUTHAPP_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed("AUTHAPP_"))
            .extract()?;
        Ok(settings)
    }

    /// Load settings from one explicit file, on top of the defaults. No
    /// environment merge: the pinned file is the whole story, which keeps
    /// tests and `--config` runs reproducible.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let base = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => base.merge(Yaml::file(path)),
            Some("json") => base.merge(Json::file(path)),
            _ => base.merge(Toml::file(path)),
        };
        Ok(figment.extract()?)
    }

    /// Reject settings no deployment can mean
    pub fn validate(&self) -> Result<()> {
        const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.throttle.max_attempts == 0 {
            bail!("throttle.max_attempts must be at least 1");
        }
        if self.throttle.cooldown_secs == 0 {
            bail!("throttle.cooldown_secs must be at least 1");
        }
        if self.password.min_length == 0 {
            bail!("password.min_length must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.throttle.max_attempts, 5);
        assert_eq!(settings.throttle.cooldown(), Duration::from_secs(900));
        assert_eq!(settings.password.min_length, 8);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.log_level = "invalid".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.throttle.max_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.throttle.cooldown_secs = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.password.min_length = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
            bind_addr = "0.0.0.0:8080"
            log_level = "debug"

            [throttle]
            max_attempts = 3
            cooldown_secs = 60
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.throttle.max_attempts, 3);
        // Sections absent from the file keep their defaults
        assert_eq!(settings.password.min_length, 8);
    }

    #[test]
    fn test_load_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"log_level = "debug""#)?;
            jail.set_env("AUTHAPP_LOG_LEVEL", "warn");

            let settings = Settings::load().expect("load");
            assert_eq!(settings.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_load_without_any_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let settings = Settings::load().expect("load");
            assert_eq!(settings.throttle.max_attempts, 5);
            assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
            Ok(())
        });
    }
}
