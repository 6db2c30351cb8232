// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Runtime shim for WebAssembly modules translated to C by [w2c2].
//!
//! The translated C code expects a handful of external symbols to be provided by whoever links
//! it: two diagnostic callbacks, a `trap` function it calls on faults, and a way for the host to
//! allocate the module instance it passes into `<module>Instantiate`. This crate provides all of
//! them, both as a Rust API and as `extern "C"` symbols (see [`ffi`]).
//!
//! ```no_run
//! use w2c_runtime::{OwnedInstance, resolver};
//!
//! let instance = OwnedInstance::new()?;
//! let _resolve = resolver(); // passed to `<module>Instantiate` alongside the instance
//! // ... call into the translated module ...
//! drop(instance);
//! # Ok::<(), w2c_runtime::Error>(())
//! ```
//!
//! Traps are always fatal: [`handle_trap`] prints a single diagnostic line to stderr and aborts
//! the process.
//!
//! [w2c2]: https://github.com/turbolent/w2c2

mod callbacks;
mod error;
pub mod ffi;
mod instance;
mod resolver;
mod trap;

pub use callbacks::{compressed_module_name, exception_handler, print_error_message};
pub use error::Error;
pub use instance::{Instance, ModuleInstanceCommon, OwnedInstance, WasmMemory, WasmTable};
pub use resolver::{ResolveImportsFn, resolve_import, resolver};
pub use trap::{handle_trap, write_diagnostic};
pub use w2c_trap::{Trap, TrapKind, UnknownTrapCode};

#[doc(hidden)]
pub use paste;

pub type Result<T> = core::result::Result<T, Error>;
