// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped overrides with guaranteed restore.
//!
//! An override reads the current value of a key, optionally writes a new
//! one, and puts the original value back when the scope ends. Restoration
//! happens on every exit path: normal return, an error from the block, an
//! early `?`, or a panic unwinding through the guard.
//!
//! Overrides are not synchronized. At most one override per key may be
//! active at a time, and overrides of the same key from several threads
//! race. Overrides of unrelated keys may nest freely.

use crate::error::{OverrideError, RestoreError, ScopedError};
use crate::store::SettingsStore;

/// Whether an override actually writes its value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyMode {
    /// Write the override value for the duration of the scope
    #[default]
    Apply,
    /// Leave the setting untouched, but still restore the value read at
    /// scope entry on exit
    RestoreOnly,
}

/// RAII guard that restores a setting when dropped.
///
/// Prefer [`OverrideGuard::restore`] when the caller can act on a restore
/// failure; `Drop` can only log it.
#[must_use = "the override is restored as soon as the guard is dropped"]
pub struct OverrideGuard<'a, S: SettingsStore + ?Sized> {
    store: &'a S,
    key: String,
    previous: Option<String>,
    armed: bool,
}

impl<'a, S: SettingsStore + ?Sized> OverrideGuard<'a, S> {
    /// Read the current value of `key`, then apply `value` according to `mode`.
    ///
    /// `None` unsets the key. On error nothing has been written and no guard
    /// exists.
    pub fn acquire(
        store: &'a S,
        key: &str,
        value: Option<&str>,
        mode: ApplyMode,
    ) -> Result<Self, OverrideError<S::Error>> {
        if key.is_empty() {
            return Err(OverrideError::EmptyKey);
        }

        let previous = store.get(key);

        if mode == ApplyMode::Apply {
            let applied = match value {
                Some(v) => store.set(key, v),
                None => store.unset(key),
            };
            applied.map_err(|source| OverrideError::Apply {
                key: key.to_string(),
                source,
            })?;
        }

        tracing::debug!(
            key,
            ?previous,
            ?value,
            ?mode,
            "override applied"
        );

        Ok(Self {
            store,
            key: key.to_string(),
            previous,
            armed: true,
        })
    }

    /// The overridden key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value the key held when the guard was acquired
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Restore the previous value now, reporting failure to the caller
    pub fn restore(mut self) -> Result<(), RestoreError<S::Error>> {
        self.armed = false;
        self.restore_previous()
    }

    fn restore_previous(&self) -> Result<(), RestoreError<S::Error>> {
        let restored = match &self.previous {
            Some(v) => self.store.set(&self.key, v),
            None => self.store.unset(&self.key),
        };
        restored.map_err(|source| RestoreError {
            key: self.key.clone(),
            previous: self.previous.clone(),
            source,
        })?;

        tracing::debug!(key = %self.key, previous = ?self.previous, "override restored");
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> Drop for OverrideGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(err) = self.restore_previous() {
            tracing::error!(key = %self.key, error = %err, "override left in place");
        }
    }
}

/// Run `block` with `key` set to `value`, then restore the previous value.
///
/// Equivalent to [`with_override_mode`] with [`ApplyMode::Apply`].
pub fn with_override<S, T, E, F>(
    store: &S,
    key: &str,
    value: Option<&str>,
    block: F,
) -> Result<T, ScopedError<E, S::Error>>
where
    S: SettingsStore + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    with_override_mode(store, key, value, ApplyMode::Apply, block)
}

/// Run `block` inside an override of `key`, restoring the previous value on exit.
///
/// The block's error is returned as [`ScopedError::Block`] after
/// restoration. If both the block and restoration fail, the block's error
/// wins and the restore failure is logged. A restore failure alone is
/// returned as [`ScopedError::Restore`].
pub fn with_override_mode<S, T, E, F>(
    store: &S,
    key: &str,
    value: Option<&str>,
    mode: ApplyMode,
    block: F,
) -> Result<T, ScopedError<E, S::Error>>
where
    S: SettingsStore + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    let guard = OverrideGuard::acquire(store, key, value, mode).map_err(ScopedError::Override)?;

    let outcome = block();
    let restored = guard.restore();

    match (outcome, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(restore)) => Err(ScopedError::Restore(restore)),
        (Err(err), Ok(())) => Err(ScopedError::Block(err)),
        (Err(err), Err(restore)) => {
            tracing::error!(key, error = %restore, "restore failed after block error");
            Err(ScopedError::Block(err))
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
