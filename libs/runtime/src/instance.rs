// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::alloc::Layout;
use core::ffi::c_void;
use core::marker::{PhantomData, PhantomPinned};
use core::mem::{offset_of, size_of};
use core::ops::Deref;
use core::ptr::NonNull;
use core::{fmt, mem};
use std::alloc;

use static_assertions::const_assert_eq;

use crate::Error;
use crate::resolver::ResolveImportsFn;

/// The toolchain's `wasmModuleInstance` block embedded at the start of every instance.
///
/// Only the translated code reads or writes this; the fields exist so the block has the size the
/// toolchain's headers give it.
#[repr(C)]
pub struct ModuleInstanceCommon {
    _func_exports: *mut c_void,
    _resolve_imports: Option<ResolveImportsFn>,
    _new_child: *mut c_void,
}

/// The toolchain's `wasmMemory`. Instances only ever hold a pointer to one.
#[repr(C)]
pub struct WasmMemory {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// The toolchain's `wasmTable`, stored inline in the instance.
#[repr(C)]
pub struct WasmTable {
    _data: *mut c_void,
    _size: u32,
    _max_size: u32,
}

/// The state of one translated module, laid out the way the generated code expects it:
/// `{ wasmModuleInstance common; wasmMemory* m0; wasmTable t0; }`.
///
/// The shim never initializes `m0` or `t0` itself, that is the job of the generated
/// `<module>Instantiate` function.
#[repr(C)]
pub struct Instance {
    common: ModuleInstanceCommon,
    m0: *mut WasmMemory,
    t0: WasmTable,
}

const_assert_eq!(offset_of!(Instance, common), 0);
const_assert_eq!(offset_of!(Instance, m0), size_of::<ModuleInstanceCommon>());
const_assert_eq!(
    offset_of!(Instance, t0),
    size_of::<ModuleInstanceCommon>() + size_of::<*mut WasmMemory>()
);
const_assert_eq!(size_of::<WasmTable>(), size_of::<usize>() + 2 * size_of::<u32>());

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("m0", &self.m0)
            .finish_non_exhaustive()
    }
}

impl Instance {
    /// The layout of every allocation made by [`Instance::allocate`].
    pub const LAYOUT: Layout = Layout::new::<Instance>();

    /// Allocates a new, zero-initialized instance on the heap.
    ///
    /// Ownership of the allocation passes to the caller, who must eventually release it through
    /// [`Instance::deallocate`] (or let an [`OwnedInstance`] do it).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the global allocator fails.
    pub fn allocate() -> crate::Result<NonNull<Instance>> {
        // Safety: `Instance` is not zero-sized, and all-zeroes is a valid bit pattern for it
        // (null pointers, `None` function pointer, zero integers).
        let ptr = unsafe { alloc::alloc_zeroed(Self::LAYOUT) };

        NonNull::new(ptr.cast::<Instance>()).ok_or(Error::Alloc {
            layout: Self::LAYOUT,
        })
    }

    /// Releases an instance previously returned by [`Instance::allocate`].
    ///
    /// # Safety
    ///
    /// `instance` must come from [`Instance::allocate`], must not have been deallocated yet, and
    /// must never be used again after this call.
    pub unsafe fn deallocate(instance: NonNull<Instance>) {
        // Safety: ensured by caller
        unsafe {
            alloc::dealloc(instance.as_ptr().cast(), Self::LAYOUT);
        }
    }

    /// The linear memory handle, null until the generated code has set it up.
    pub fn memory(&self) -> *mut WasmMemory {
        self.m0
    }

    /// The indirect call table, empty until the generated code has set it up.
    pub fn table(&self) -> &WasmTable {
        &self.t0
    }
}

/// An exclusively owned, heap-allocated [`Instance`] that is released on drop.
pub struct OwnedInstance(NonNull<Instance>);

impl fmt::Debug for OwnedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedInstance").field(&self.0).finish()
    }
}

impl OwnedInstance {
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the instance could not be allocated.
    pub fn new() -> crate::Result<Self> {
        Instance::allocate().map(Self)
    }

    /// Returns the raw pointer handed to the translated code.
    pub fn as_ptr(&self) -> *mut Instance {
        self.0.as_ptr()
    }

    /// Gives up ownership without releasing the allocation.
    pub fn into_raw(self) -> NonNull<Instance> {
        let ptr = self.0;
        mem::forget(self);
        ptr
    }

    /// Takes ownership of an instance handle.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`Instance::allocate`] (directly or through [`OwnedInstance::into_raw`])
    /// and must not be owned by anything else.
    pub unsafe fn from_raw(ptr: NonNull<Instance>) -> Self {
        Self(ptr)
    }
}

impl Deref for OwnedInstance {
    type Target = Instance;

    fn deref(&self) -> &Self::Target {
        // Safety: the pointer is valid and zero-initialized for as long as `self` is alive
        unsafe { self.0.as_ref() }
    }
}

impl Drop for OwnedInstance {
    fn drop(&mut self) {
        // Safety: we own the allocation and nobody can observe it after drop
        unsafe { Instance::deallocate(self.0) }
    }
}
