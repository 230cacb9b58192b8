// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::store::{ProcessEnv, SettingsError, SystemProperties};
use proptest::prelude::*;
use rstest::rstest;
use serial_test::serial;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("boom")]
struct Boom;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
enum TestFailure {
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("io: {0}")]
    Io(String),
}

fn props_with(key: &str, initial: Option<&str>) -> SystemProperties {
    let props = SystemProperties::new();
    if let Some(v) = initial {
        props.set(key, v).unwrap();
    }
    props
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn block_sees_override_and_unset_is_restored() {
    let props = SystemProperties::new();

    let seen = with_override(&props, "flagX", Some("true"), || {
        Ok::<_, Boom>(props.get("flagX"))
    })
    .unwrap();

    assert_eq!(seen.as_deref(), Some("true"));
    assert_eq!(props.get("flagX"), None);
}

#[test]
fn failing_block_restores_unset_and_returns_boom() {
    let props = SystemProperties::new();

    let result: Result<(), _> = with_override(&props, "flagX", Some("true"), || Err(Boom));

    assert_eq!(props.get("flagX"), None);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.into_block(), Some(Boom));
}

// =============================================================================
// Restoration
// =============================================================================

#[rstest]
#[case(None, Some("true"))]
#[case(None, None)]
#[case(Some("false"), Some("true"))]
#[case(Some("false"), None)]
#[case(Some(""), Some("x"))]
#[case(Some("x"), Some(""))]
fn restores_exact_previous_value(#[case] initial: Option<&str>, #[case] value: Option<&str>) {
    let props = props_with("k", initial);

    let inside = with_override(&props, "k", value, || Ok::<_, Boom>(props.get("k"))).unwrap();

    assert_eq!(inside.as_deref(), value);
    assert_eq!(props.get("k").as_deref(), initial);
}

#[test]
fn previously_unset_key_is_not_left_as_empty_string() {
    let props = SystemProperties::new();

    with_override(&props, "k", Some(""), || Ok::<_, Boom>(())).unwrap();

    assert!(!props.snapshot().contains_key("k"));
}

#[test]
fn block_error_kind_is_preserved() {
    let props = props_with("k", Some("before"));

    let result: Result<(), _> = with_override(&props, "k", Some("after"), || {
        Err(TestFailure::Assertion("pixels differ".into()))
    });

    match result {
        Err(ScopedError::Block(TestFailure::Assertion(msg))) => assert_eq!(msg, "pixels differ"),
        other => panic!("expected assertion failure, got {other:?}"),
    }
    assert_eq!(props.get("k").as_deref(), Some("before"));
}

#[test]
fn block_error_source_is_transparent() {
    let props = SystemProperties::new();

    let result: Result<(), _> = with_override(&props, "k", Some("v"), || {
        Err(TestFailure::Io("disk full".into()))
    });

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "io: disk full");
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn panic_in_block_still_restores() {
    let props = props_with("k", Some("original"));

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let _: Result<(), ScopedError<Boom, SettingsError>> =
            with_override(&props, "k", Some("temp"), || panic!("render crashed"));
    }));

    assert!(outcome.is_err());
    assert_eq!(props.get("k").as_deref(), Some("original"));
}

#[test]
fn nested_overrides_of_unrelated_keys_restore_both() {
    let props = props_with("a", Some("a0"));

    with_override(&props, "a", Some("a1"), || -> Result<(), Boom> {
        with_override(&props, "b", Some("b1"), || {
            assert_eq!(props.get("a").as_deref(), Some("a1"));
            assert_eq!(props.get("b").as_deref(), Some("b1"));
            Ok::<_, Boom>(())
        })
        .map_err(|_| Boom)?;
        assert_eq!(props.get("b"), None);
        Ok(())
    })
    .unwrap();

    assert_eq!(props.get("a").as_deref(), Some("a0"));
    assert_eq!(props.get("b"), None);
}

#[test]
fn guards_released_out_of_order_restore_both() {
    let props = props_with("b", Some("b0"));

    let a = OverrideGuard::acquire(&props, "a", Some("a1"), ApplyMode::Apply).unwrap();
    let b = OverrideGuard::acquire(&props, "b", Some("b1"), ApplyMode::Apply).unwrap();

    drop(a);
    assert_eq!(props.get("a"), None);
    assert_eq!(props.get("b").as_deref(), Some("b1"));

    drop(b);
    assert_eq!(props.get("b").as_deref(), Some("b0"));
}

// =============================================================================
// Apply mode
// =============================================================================

#[rstest]
#[case(None)]
#[case(Some("old"))]
fn restore_only_leaves_setting_untouched(#[case] initial: Option<&str>) {
    let props = props_with("hw", initial);

    let inside = with_override_mode(&props, "hw", Some("true"), ApplyMode::RestoreOnly, || {
        Ok::<_, Boom>(props.get("hw"))
    })
    .unwrap();

    assert_eq!(inside.as_deref(), initial);
    assert_eq!(props.get("hw").as_deref(), initial);
}

#[test]
fn restore_only_undoes_changes_made_by_the_block() {
    let props = SystemProperties::new();

    with_override_mode(&props, "hw", Some("true"), ApplyMode::RestoreOnly, || {
        props.set("hw", "set-by-block")
    })
    .unwrap();

    assert_eq!(props.get("hw"), None);
}

// =============================================================================
// Failures of the store itself
// =============================================================================

#[test]
fn empty_key_is_rejected_before_block_runs() {
    let props = SystemProperties::new();
    let ran = Cell::new(false);

    let result = with_override(&props, "", Some("v"), || {
        ran.set(true);
        Ok::<_, Boom>(())
    });

    assert!(matches!(
        result,
        Err(ScopedError::Override(OverrideError::EmptyKey))
    ));
    assert!(!ran.get());
}

#[test]
fn apply_failure_skips_block() {
    let props = props_with("locked", Some("v0"));
    props.set_read_only("locked", true);
    let ran = Cell::new(false);

    let result = with_override(&props, "locked", Some("v1"), || {
        ran.set(true);
        Ok::<_, Boom>(())
    });

    match result {
        Err(ScopedError::Override(OverrideError::Apply { key, source })) => {
            assert_eq!(key, "locked");
            assert_eq!(source, SettingsError::ReadOnly("locked".into()));
        }
        other => panic!("expected apply failure, got {other:?}"),
    }
    assert!(!ran.get());
    assert_eq!(props.get("locked").as_deref(), Some("v0"));
}

#[test]
fn restore_failure_is_reported_when_block_succeeds() {
    let props = SystemProperties::new();

    let result = with_override(&props, "k", Some("v"), || {
        props.set_read_only("k", true);
        Ok::<_, Boom>(42)
    });

    let err = result.unwrap_err();
    assert!(err.is_restore());
    match err {
        ScopedError::Restore(restore) => {
            assert_eq!(restore.key, "k");
            assert_eq!(restore.previous, None);
            assert_eq!(restore.to_string(), "failed to restore setting 'k' to unset");
        }
        other => panic!("expected restore failure, got {other:?}"),
    }
    props.set_read_only("k", false);
}

#[test]
fn restore_failure_does_not_mask_block_error() {
    let props = props_with("k", Some("v0"));

    let result: Result<(), _> = with_override(&props, "k", Some("v1"), || {
        props.set_read_only("k", true);
        Err(Boom)
    });

    assert_eq!(result.unwrap_err().into_block(), Some(Boom));
    props.set_read_only("k", false);
}

#[test]
fn explicit_guard_restore_reports_failure() {
    let props = props_with("k", Some("v0"));
    let guard = OverrideGuard::acquire(&props, "k", Some("v1"), ApplyMode::Apply).unwrap();
    assert_eq!(guard.previous(), Some("v0"));
    assert_eq!(guard.key(), "k");

    props.set_read_only("k", true);
    let err = guard.restore().unwrap_err();
    assert_eq!(err.previous.as_deref(), Some("v0"));
    assert_eq!(err.to_string(), "failed to restore setting 'k' to 'v0'");
}

#[test]
fn guard_restores_on_early_return() {
    fn scenario(props: &SystemProperties, fail: bool) -> Result<(), Boom> {
        let _guard = OverrideGuard::acquire(props, "k", Some("v1"), ApplyMode::Apply)
            .map_err(|_| Boom)?;
        if fail {
            return Err(Boom);
        }
        Ok(())
    }

    let props = SystemProperties::new();
    assert_eq!(scenario(&props, true), Err(Boom));
    assert_eq!(props.get("k"), None);
    assert_eq!(scenario(&props, false), Ok(()));
    assert_eq!(props.get("k"), None);
}

// =============================================================================
// Process-global stores
// =============================================================================

#[test]
#[serial]
fn global_properties_are_restored() {
    let global = SystemProperties::global();
    global.unset("shotguard.test.global").unwrap();

    with_override(global, "shotguard.test.global", Some("on"), || {
        assert_eq!(
            SystemProperties::global().get("shotguard.test.global").as_deref(),
            Some("on")
        );
        Ok::<_, Boom>(())
    })
    .unwrap();

    assert_eq!(global.get("shotguard.test.global"), None);
}

#[test]
#[serial]
fn environment_variable_is_restored() {
    const KEY: &str = "SHOTGUARD_SCOPED_TEST_FLAG";
    std::env::remove_var(KEY);

    let result: Result<(), _> = with_override(&ProcessEnv, KEY, Some("1"), || {
        assert_eq!(std::env::var(KEY).as_deref(), Ok("1"));
        Err(Boom)
    });

    assert!(result.is_err());
    assert!(std::env::var_os(KEY).is_none());
}

proptest! {
    #[test]
    fn restores_any_initial_value(
        initial in proptest::option::of("[a-z0-9 ]{0,8}"),
        value in proptest::option::of("[a-z0-9 ]{0,8}"),
        fail in any::<bool>(),
    ) {
        let props = props_with("key", initial.as_deref());

        let result = with_override(&props, "key", value.as_deref(), || {
            if fail { Err(Boom) } else { Ok(props.get("key")) }
        });

        prop_assert_eq!(props.get("key"), initial);
        match result {
            Ok(inside) => {
                prop_assert!(!fail);
                prop_assert_eq!(inside, value);
            }
            Err(err) => {
                prop_assert!(fail);
                prop_assert_eq!(err.into_block(), Some(Boom));
            }
        }
    }
}
