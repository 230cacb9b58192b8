// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped overrides of process-wide settings.
//!
//! Tests often need a feature flag, a system property or an environment
//! variable set to a particular value for a short stretch of code. This crate
//! sets it, runs the code, and puts the original value back on every exit
//! path, including errors and panics.
//!
//! ```
//! use shotguard_scoped::{with_override, SettingsStore, SystemProperties};
//!
//! let props = SystemProperties::new();
//! let seen = with_override(&props, "flagX", Some("true"), || {
//!     Ok::<_, std::io::Error>(props.get("flagX"))
//! });
//! assert_eq!(seen.ok().flatten().as_deref(), Some("true"));
//! assert_eq!(props.get("flagX"), None);
//! ```

mod error;
mod guard;
mod store;

pub use error::{OverrideError, RestoreError, ScopedError};
pub use guard::{with_override, with_override_mode, ApplyMode, OverrideGuard};
pub use store::{ProcessEnv, SettingsError, SettingsStore, SystemProperties};
