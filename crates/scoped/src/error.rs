// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while overriding and restoring settings.

use thiserror::Error;

/// Failure to establish an override. Nothing has been written when this is returned.
#[derive(Debug, Error)]
pub enum OverrideError<R> {
    #[error("override key must not be empty")]
    EmptyKey,

    #[error("failed to apply override for setting '{key}'")]
    Apply {
        key: String,
        #[source]
        source: R,
    },
}

/// The store could not be returned to the value it held before the override.
#[derive(Debug, Error)]
#[error("failed to restore setting '{key}' to {}", describe(.previous))]
pub struct RestoreError<R> {
    pub key: String,
    /// Value the setting should have been restored to
    pub previous: Option<String>,
    #[source]
    pub source: R,
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{v}'"),
        None => "unset".to_string(),
    }
}

/// Outcome of a failed [`with_override`](crate::with_override) call.
///
/// `E` is the block's error type and `R` the store's error type. A block
/// failure is kept verbatim in [`ScopedError::Block`] so callers can match on
/// their own error type after restoration.
#[derive(Debug, Error)]
pub enum ScopedError<E, R> {
    #[error(transparent)]
    Override(OverrideError<R>),

    #[error(transparent)]
    Block(E),

    #[error(transparent)]
    Restore(RestoreError<R>),
}

impl<E, R> ScopedError<E, R> {
    /// The block's own error, if the block is what failed
    pub fn into_block(self) -> Option<E> {
        match self {
            ScopedError::Block(e) => Some(e),
            _ => None,
        }
    }

    /// Borrow the block's own error, if the block is what failed
    pub fn block(&self) -> Option<&E> {
        match self {
            ScopedError::Block(e) => Some(e),
            _ => None,
        }
    }

    /// True when only cleanup failed
    pub fn is_restore(&self) -> bool {
        matches!(self, ScopedError::Restore(_))
    }
}
