// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The C ABI surface of the runtime.
//!
//! | symbol                          | called by      |
//! |---------------------------------|----------------|
//! | `w2c_runtime_init`              | host           |
//! | `w2c_runtime_resolver`          | host           |
//! | `w2c_runtime_resolve_import`    | generated code |
//! | `w2c_runtime_cleanup`           | host           |
//! | `trap`                          | generated code |
//! | `runtime__exceptionHandler`     | generated code |
//! | `runtime__printErrorMessage`    | generated code |
//!
//! Instance handles returned by [`w2c_runtime_init`] must be released with
//! [`w2c_runtime_cleanup`], never with `free`, since they come from Rust's global allocator.

use core::ffi::{CStr, c_char, c_void};
use core::ptr::{self, NonNull};

use w2c_trap::Trap;

pub use crate::callbacks::{exception_handler, print_error_message};
use crate::{Instance, OwnedInstance, ResolveImportsFn};

/// Allocates a new module instance, returning null if the allocation failed.
#[unsafe(no_mangle)]
pub extern "C" fn w2c_runtime_init() -> *mut Instance {
    match OwnedInstance::new() {
        Ok(instance) => {
            let ptr = instance.into_raw().as_ptr();
            log::trace!("allocated module instance at {ptr:p}");
            ptr
        }
        Err(err) => {
            log::error!("{err}");
            ptr::null_mut()
        }
    }
}

/// Returns the import resolver to pass into `<module>Instantiate`, which is always null.
#[unsafe(no_mangle)]
pub extern "C" fn w2c_runtime_resolver() -> Option<ResolveImportsFn> {
    crate::resolver()
}

/// Resolves the import `module.name` to a host capability. Always returns null.
///
/// # Safety
///
/// Each argument must either be null or point to a NUL-terminated string that stays valid for
/// the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn w2c_runtime_resolve_import(
    module: *const c_char,
    name: *const c_char,
) -> *mut c_void {
    if module.is_null() || name.is_null() {
        return ptr::null_mut();
    }

    // Safety: ensured by caller
    let (module, name) = unsafe { (CStr::from_ptr(module), CStr::from_ptr(name)) };

    crate::resolve_import(module, name).map_or(ptr::null_mut(), NonNull::as_ptr)
}

/// Releases an instance returned by [`w2c_runtime_init`]. Null is ignored.
///
/// # Safety
///
/// `instance` must be null or a handle returned by [`w2c_runtime_init`] that has not been
/// released yet. The handle must not be used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn w2c_runtime_cleanup(instance: *mut Instance) {
    let Some(instance) = NonNull::new(instance) else {
        return;
    };

    log::trace!("releasing module instance at {:p}", instance.as_ptr());

    // Safety: ensured by caller
    drop(unsafe { OwnedInstance::from_raw(instance) });
}

/// Called by the generated code when the module faults. Prints the trap and aborts.
#[unsafe(export_name = "trap")]
pub extern "C" fn w2c_trap(trap: u32) -> ! {
    crate::handle_trap(Trap::from_raw(trap))
}
