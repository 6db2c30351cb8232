// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::ffi::{CStr, c_char, c_void};
use core::ptr::NonNull;

/// The import resolution hook the generated `<module>Instantiate` accepts.
///
/// Given a module and field name it returns the host capability to use for that import, or null
/// to fall back to the module's own default.
pub type ResolveImportsFn =
    unsafe extern "C" fn(module: *const c_char, name: *const c_char) -> *mut c_void;

/// Looks up the host capability for the import `module.field`.
///
/// No capabilities are provided, so this always yields `None` and the generated code falls back
/// to its defaults.
pub fn resolve_import(module: &CStr, field: &CStr) -> Option<NonNull<c_void>> {
    log::trace!(
        "no host override for import {}.{}",
        module.to_string_lossy(),
        field.to_string_lossy()
    );
    None
}

/// The resolver handed to `<module>Instantiate`.
///
/// Returns `None`, which the generated code reads as "there is no resolver" and skips import
/// overrides entirely.
pub fn resolver() -> Option<ResolveImportsFn> {
    None
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn no_resolver() {
        assert!(resolver().is_none());
    }

    #[test]
    fn empty_names() {
        assert!(resolve_import(c"", c"").is_none());
        assert!(resolve_import(c"env", c"memory").is_none());
    }

    proptest! {
        #[test]
        fn resolve_is_total(module in "[^\0]*", field in "[^\0]*") {
            let module = CString::new(module).unwrap();
            let field = CString::new(field).unwrap();
            prop_assert!(resolve_import(&module, &field).is_none());
        }
    }
}
