// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Diagnostic callbacks the generated code links against.
//!
//! Nothing is wired up behind them: both callbacks accept any context pointer, including null,
//! and return immediately without touching it.

use core::ffi::c_void;

/// `runtime__exceptionHandler`
#[unsafe(export_name = "runtime__exceptionHandler")]
pub extern "C" fn exception_handler(_ctx: *mut c_void) {}

/// `runtime__printErrorMessage`
#[unsafe(export_name = "runtime__printErrorMessage")]
pub extern "C" fn print_error_message(_ctx: *mut c_void) {}

/// Normalizes a module name the way the toolchain does when prefixing its symbols, by dropping
/// every `_` and `-`.
///
/// `keccak_256-test` becomes `keccak256test`, so its callbacks are expected as
/// `keccak256test_runtime__exceptionHandler` and `keccak256test_runtime__printErrorMessage`.
pub fn compressed_module_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, '_' | '-')).collect()
}

/// Defines the module-prefixed diagnostic callbacks for one or more translated modules.
///
/// When several modules are linked into one binary the toolchain prefixes the callback symbols
/// with the module name. Pass the name in its compressed form (see [`compressed_module_name`]).
///
/// ```
/// w2c_runtime::runtime_stubs!(multiplier2, keccak256test);
///
/// multiplier2_runtime__exceptionHandler(core::ptr::null_mut());
/// keccak256test_runtime__printErrorMessage(core::ptr::null_mut());
/// ```
#[macro_export]
macro_rules! runtime_stubs {
    ($($module:ident),+ $(,)?) => {
        $(
            $crate::paste::paste! {
                #[unsafe(no_mangle)]
                #[allow(non_snake_case, reason = "symbol name is dictated by the generated code")]
                pub extern "C" fn [<$module _runtime__exceptionHandler>](_ctx: *mut ::core::ffi::c_void) {}

                #[unsafe(no_mangle)]
                #[allow(non_snake_case, reason = "symbol name is dictated by the generated code")]
                pub extern "C" fn [<$module _runtime__printErrorMessage>](_ctx: *mut ::core::ffi::c_void) {}
            }
        )+
    };
}
