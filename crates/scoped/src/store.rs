// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide settings stores.
//!
//! A [`SettingsStore`] is anything that maps string keys to optional string
//! values and can be written back. Two stores ship with the crate:
//! [`SystemProperties`], a property table shared by the whole process, and
//! [`ProcessEnv`], the process environment.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

/// Key/value store holding process-wide configuration.
///
/// Absence is distinct from the empty string: `get` returning `None` means
/// the setting is unset.
pub trait SettingsStore {
    /// Error returned when the store refuses a write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current value of `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key` so that `get` returns `None`.
    fn unset(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn unset(&self, key: &str) -> Result<(), Self::Error> {
        (**self).unset(key)
    }
}

/// Errors from the built-in stores
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("setting '{0}' is read-only")]
    ReadOnly(String),

    #[error("invalid setting key '{0}'")]
    InvalidKey(String),

    #[error("invalid value for setting '{key}': {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

static GLOBAL_PROPERTIES: LazyLock<SystemProperties> = LazyLock::new(SystemProperties::new);

/// In-process property table, the equivalent of JVM system properties.
///
/// [`SystemProperties::global`] is shared by the whole process; separate
/// instances from [`SystemProperties::new`] are useful in tests.
#[derive(Debug, Default)]
pub struct SystemProperties {
    values: RwLock<HashMap<String, String>>,
    read_only: RwLock<HashSet<String>>,
}

impl SystemProperties {
    /// Create an empty, independent property table
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide property table
    pub fn global() -> &'static SystemProperties {
        &GLOBAL_PROPERTIES
    }

    /// Lock or unlock writes to `key`.
    ///
    /// A read-only key rejects both `set` and `unset` with
    /// [`SettingsError::ReadOnly`].
    pub fn set_read_only(&self, key: &str, read_only: bool) {
        let mut locked = self.read_only.write();
        if read_only {
            locked.insert(key.to_string());
        } else {
            locked.remove(key);
        }
    }

    /// Snapshot of all current properties
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values.read().clone()
    }

    fn check_writable(&self, key: &str) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }
        if self.read_only.read().contains(key) {
            return Err(SettingsError::ReadOnly(key.to_string()));
        }
        Ok(())
    }
}

impl SettingsStore for SystemProperties {
    type Error = SettingsError;

    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.check_writable(key)?;
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<(), SettingsError> {
        self.check_writable(key)?;
        self.values.write().remove(key);
        Ok(())
    }
}

/// The process environment.
///
/// Values that are not valid Unicode are read lossily.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    // std::env::set_var panics on these instead of returning an error.
    fn validate_key(key: &str) -> Result<(), SettingsError> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl SettingsStore for ProcessEnv {
    type Error = SettingsError;

    fn get(&self, key: &str) -> Option<String> {
        if Self::validate_key(key).is_err() {
            return None;
        }
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        Self::validate_key(key)?;
        if value.contains('\0') {
            return Err(SettingsError::InvalidValue {
                key: key.to_string(),
                reason: "contains a NUL byte",
            });
        }
        std::env::set_var(key, value);
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<(), SettingsError> {
        Self::validate_key(key)?;
        std::env::remove_var(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
