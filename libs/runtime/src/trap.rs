// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::{self, Write};

use w2c_trap::Trap;

/// Writes the one-line trap diagnostic `TRAP: <description>\n` to `out`.
///
/// # Errors
///
/// Returns any error produced by `out`.
pub fn write_diagnostic<W: Write>(mut out: W, trap: Trap) -> io::Result<()> {
    writeln!(out, "TRAP: {trap}")?;
    out.flush()
}

/// Reports a trap raised by translated code and terminates the process.
///
/// Traps are never recovered from at this layer: the diagnostic is printed on a best-effort
/// basis, then the process is aborted. This never unwinds.
pub fn handle_trap(trap: Trap) -> ! {
    let _ = write_diagnostic(io::stderr().lock(), trap);
    log::logger().flush();

    abort()
}

/// Terminates the current process in an abnormal fashion. This function will never return.
///
/// # Breakpoint support
///
/// This function is never inlined so you can put a breakpoint on it to catch the process just
/// before it exits because of a trap.
#[inline(never)]
#[cold]
fn abort() -> ! {
    std::process::abort()
}
