// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A trap never returns, so these tests re-run this test binary filtered down to one of the
//! `child_*` tests and inspect how that process ends.

use std::env;
use std::process::{Command, Output};

use w2c_runtime::TrapKind;
use w2c_runtime::ffi::{w2c_runtime_cleanup, w2c_runtime_init, w2c_trap};

const CHILD_TRAP: &str = "W2C_RUNTIME_CHILD_TRAP";
const CHILD_LIFECYCLE: &str = "W2C_RUNTIME_CHILD_LIFECYCLE";

#[test]
fn child_trap() {
    let Ok(code) = env::var(CHILD_TRAP) else {
        return;
    };

    let instance = w2c_runtime_init();
    assert!(!instance.is_null());
    w2c_trap(code.parse().unwrap());
}

#[test]
fn child_lifecycle() {
    if env::var_os(CHILD_LIFECYCLE).is_none() {
        return;
    }

    let instance = w2c_runtime_init();
    assert!(!instance.is_null());
    // Safety: freshly allocated, released exactly once
    unsafe { w2c_runtime_cleanup(instance) };
}

fn run_child(test: &str, var: &str, value: &str) -> Output {
    Command::new(env::current_exe().unwrap())
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(var, value)
        .output()
        .unwrap()
}

fn trap_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.starts_with("TRAP:"))
        .map(ToOwned::to_owned)
        .collect()
}

#[track_caller]
fn assert_aborted(output: &Output) {
    assert!(!output.status.success(), "child exited normally");

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // SIGABRT
        assert_eq!(output.status.signal(), Some(6), "{:?}", output.status);
    }
}

#[test]
fn unreachable_trap_aborts() {
    let output = run_child("child_trap", CHILD_TRAP, "0");

    assert_aborted(&output);
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("TRAP: unreachable code executed\n")
    );
    assert_eq!(trap_lines(&output), ["TRAP: unreachable code executed"]);
}

#[test]
fn every_trap_kind_prints_its_description() {
    for kind in TrapKind::ALL {
        let output = run_child("child_trap", CHILD_TRAP, &u32::from(kind).to_string());

        assert_aborted(&output);
        assert_eq!(
            trap_lines(&output),
            [format!("TRAP: {}", kind.description())]
        );
    }
}

#[test]
fn unknown_trap_code_still_aborts() {
    let output = run_child("child_trap", CHILD_TRAP, "1234");

    assert_aborted(&output);
    assert_eq!(trap_lines(&output), ["TRAP: unknown trap (code 1234)"]);
}

#[test]
fn init_cleanup_exits_normally() {
    let output = run_child("child_lifecycle", CHILD_LIFECYCLE, "1");

    assert!(output.status.success(), "{:?}", output.status);
    assert!(trap_lines(&output).is_empty());
}
