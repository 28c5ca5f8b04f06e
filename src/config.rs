/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, bail};
use connector::session::{ROLE_KEY, TOKEN_KEY};
use connector::{Role, SessionStorage, UserMutations};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const LOG_LEVEL_ENV: &str = "GEARSYNC_LOG_LEVEL";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Copy, Debug, EnumIter, Display, EnumString, Hash, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConfigKey {
    Server,
    Token,
    Role,
    LogLevel,
    UserMutations,
}

impl ConfigKey {
    /// Key in the config file. Token and role share the session's keys.
    pub fn storage_key(&self) -> &'static str {
        match self {
            ConfigKey::Server => "server",
            ConfigKey::Token => TOKEN_KEY,
            ConfigKey::Role => ROLE_KEY,
            ConfigKey::LogLevel => "loglevel",
            ConfigKey::UserMutations => "usermutations",
        }
    }

    /// Keys owned by the session are only written through login and logout.
    pub fn read_only(&self) -> bool {
        matches!(self, ConfigKey::Token | ConfigKey::Role)
    }

    fn validate(&self, value: &str) -> Result<()> {
        match self {
            ConfigKey::Server => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    bail!("Server URL must start with http:// or https://");
                }
            }
            ConfigKey::LogLevel => {
                if !LOG_LEVELS.contains(&value.to_lowercase().as_str()) {
                    bail!("Log level must be one of: {}", LOG_LEVELS.join(", "));
                }
            }
            ConfigKey::UserMutations => {
                value.parse::<UserMutations>().map_err(|_| {
                    anyhow::anyhow!("usermutations must be either supported or unsupported")
                })?;
            }
            ConfigKey::Token => {}
            ConfigKey::Role => {
                value
                    .parse::<Role>()
                    .map_err(|_| anyhow::anyhow!("Unknown role: {}", value))?;
            }
        }

        Ok(())
    }
}

pub fn get_value(storage: &dyn SessionStorage, key: ConfigKey) -> Result<Option<String>> {
    let value = storage
        .get(key.storage_key())
        .with_context(|| format!("Failed to read {}", key))?;

    Ok(value.filter(|v| !v.is_empty()))
}

pub fn set_value(storage: &dyn SessionStorage, key: ConfigKey, value: &str) -> Result<()> {
    if key.read_only() {
        bail!("{} is managed by `gearsync login` and `gearsync logout`", key);
    }

    let value = value.trim();
    key.validate(value)?;

    storage
        .set(key.storage_key(), value)
        .with_context(|| format!("Failed to write {}", key))
}

pub fn user_mutations(storage: &dyn SessionStorage) -> Result<UserMutations> {
    Ok(get_value(storage, ConfigKey::UserMutations)?
        .and_then(|v| v.parse().ok())
        .unwrap_or_default())
}

/// Log filter from the environment, then the config file, then the default.
pub fn log_level(storage: Option<&dyn SessionStorage>) -> String {
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        if !level.trim().is_empty() {
            return level;
        }
    }

    storage
        .and_then(|storage| get_value(storage, ConfigKey::LogLevel).ok().flatten())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Backs `gearsync config <key> [value]`.
pub fn set_get_value_from_string(
    storage: &dyn SessionStorage,
    key: &str,
    value: Option<String>,
) -> Result<()> {
    let Ok(config_key) = key.parse::<ConfigKey>() else {
        let valid = ConfigKey::iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("Invalid key: {}. Valid keys are: {}", key, valid);
    };

    match value {
        Some(value) => {
            set_value(storage, config_key, &value)?;
            println!("{} set to \"{}\"", config_key, value.trim());
        }

        None => match get_value(storage, config_key)? {
            Some(value) => println!("{}", value),
            None => println!("[unset]"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use connector::{MemoryStorage, SessionStore};
    use std::sync::Arc;

    #[test]
    fn test_key_names() {
        assert_eq!(ConfigKey::LogLevel.to_string(), "loglevel");
        assert_eq!("SERVER".parse::<ConfigKey>().unwrap(), ConfigKey::Server);
        assert_eq!(
            "usermutations".parse::<ConfigKey>().unwrap(),
            ConfigKey::UserMutations
        );
        assert!("organization".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();

        assert_eq!(get_value(&storage, ConfigKey::Server).unwrap(), None);
        set_value(&storage, ConfigKey::Server, " https://garage.test/api ").unwrap();
        assert_eq!(
            get_value(&storage, ConfigKey::Server).unwrap().as_deref(),
            Some("https://garage.test/api")
        );
    }

    #[test]
    fn test_validation() {
        let storage = MemoryStorage::new();

        assert!(set_value(&storage, ConfigKey::Server, "garage.test").is_err());
        assert!(set_value(&storage, ConfigKey::LogLevel, "loud").is_err());
        assert!(set_value(&storage, ConfigKey::UserMutations, "maybe").is_err());
        set_value(&storage, ConfigKey::LogLevel, "DEBUG").unwrap();
        set_value(&storage, ConfigKey::UserMutations, "supported").unwrap();
        assert_eq!(user_mutations(&storage).unwrap(), UserMutations::Supported);
    }

    #[test]
    fn test_session_keys_are_read_only() {
        let storage = Arc::new(MemoryStorage::new());

        assert!(set_value(&*storage, ConfigKey::Token, "t1").is_err());
        assert!(set_value(&*storage, ConfigKey::Role, "ADMIN").is_err());

        let session = SessionStore::init(storage.clone()).unwrap();
        session.login("t1", Role::Admin).unwrap();

        assert_eq!(
            get_value(&*storage, ConfigKey::Token).unwrap().as_deref(),
            Some("t1")
        );
        assert_eq!(
            get_value(&*storage, ConfigKey::Role).unwrap().as_deref(),
            Some("ADMIN")
        );
    }

    #[test]
    fn test_user_mutations_default() {
        let storage = MemoryStorage::new();
        assert_eq!(user_mutations(&storage).unwrap(), UserMutations::Unsupported);
    }

    #[test]
    fn test_log_level_from_config() {
        let storage = MemoryStorage::new();
        storage.set("loglevel", "info").unwrap();

        if std::env::var(LOG_LEVEL_ENV).is_err() {
            assert_eq!(log_level(Some(&storage as &dyn SessionStorage)), "info");
            assert_eq!(log_level(None), DEFAULT_LOG_LEVEL);
        }
    }
}
