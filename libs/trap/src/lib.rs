// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Trap descriptors raised by w2c2-translated WebAssembly code.
//!
//! The translated C code reports faults by calling `trap(Trap)` where `Trap` is a plain C enum,
//! so on the Rust side a trap arrives as a raw 32-bit code. [`Trap::from_raw`] turns that code
//! into something printable without ever failing: codes this crate does not know about are kept
//! around verbatim so the diagnostic still says *something* useful.

#![cfg_attr(not(test), no_std)]

use core::fmt;

/// The fault classifications the translation toolchain knows about.
///
/// The discriminants match the toolchain's `Trap` enum and must not be reordered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum TrapKind {
    /// Code that was supposed to have been unreachable was reached.
    Unreachable = 0,
    /// An integer division by zero.
    DivByZero = 1,
    /// An integer arithmetic operation caused an overflow.
    IntOverflow = 2,
    /// Failed float-to-int conversion.
    InvalidConversion = 3,
    /// Growing or allocating a linear memory failed.
    AllocationFailed = 4,
}

impl TrapKind {
    /// Every known trap kind, in discriminant order.
    pub const ALL: [TrapKind; 5] = [
        TrapKind::Unreachable,
        TrapKind::DivByZero,
        TrapKind::IntOverflow,
        TrapKind::InvalidConversion,
        TrapKind::AllocationFailed,
    ];

    /// Returns the trap kind for the raw toolchain code, or `None` if the code is unknown.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Unreachable),
            1 => Some(Self::DivByZero),
            2 => Some(Self::IntOverflow),
            3 => Some(Self::InvalidConversion),
            4 => Some(Self::AllocationFailed),
            _ => None,
        }
    }

    /// The canonical human-readable description, as printed in trap diagnostics.
    pub const fn description(self) -> &'static str {
        match self {
            TrapKind::Unreachable => "unreachable code executed",
            TrapKind::DivByZero => "divide by zero",
            TrapKind::IntOverflow => "integer overflow",
            TrapKind::InvalidConversion => "invalid conversion",
            TrapKind::AllocationFailed => "allocation failed",
        }
    }
}

impl fmt::Display for TrapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<TrapKind> for u32 {
    fn from(value: TrapKind) -> Self {
        value as u32
    }
}

impl TryFrom<u32> for TrapKind {
    type Error = UnknownTrapCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or(UnknownTrapCode(value))
    }
}

/// Error returned when converting a raw code that names no known [`TrapKind`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnknownTrapCode(pub u32);

impl fmt::Display for UnknownTrapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown trap code {}", self.0)
    }
}

impl core::error::Error for UnknownTrapCode {}

/// A trap descriptor as received from translated code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Trap {
    /// A code the toolchain documents.
    Known(TrapKind),
    /// Any other raw code, kept verbatim for the diagnostic.
    Unknown(u32),
}

impl Trap {
    /// Classifies a raw toolchain code. Never fails.
    pub const fn from_raw(raw: u32) -> Self {
        match TrapKind::from_raw(raw) {
            Some(kind) => Trap::Known(kind),
            None => Trap::Unknown(raw),
        }
    }

    /// The known trap kind, or `None` for an unknown code.
    pub const fn kind(self) -> Option<TrapKind> {
        match self {
            Trap::Known(kind) => Some(kind),
            Trap::Unknown(_) => None,
        }
    }
}

impl From<TrapKind> for Trap {
    fn from(kind: TrapKind) -> Self {
        Trap::Known(kind)
    }
}

/// Unknown codes render as `unknown trap (code N)`, keeping the raw code in the diagnostic.
impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::Known(kind) => f.write_str(kind.description()),
            Trap::Unknown(raw) => write!(f, "unknown trap (code {raw})"),
        }
    }
}

impl core::error::Error for Trap {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn descriptions() {
        assert_eq!(
            TrapKind::Unreachable.to_string(),
            "unreachable code executed"
        );
        assert_eq!(TrapKind::DivByZero.to_string(), "divide by zero");
        assert_eq!(TrapKind::IntOverflow.to_string(), "integer overflow");
        assert_eq!(
            TrapKind::InvalidConversion.to_string(),
            "invalid conversion"
        );
        assert_eq!(TrapKind::AllocationFailed.to_string(), "allocation failed");
    }

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, kind) in TrapKind::ALL.iter().enumerate() {
            assert_eq!(u32::from(*kind), u32::try_from(i).unwrap());
            assert_eq!(TrapKind::from_raw(u32::from(*kind)), Some(*kind));
        }
    }

    #[test]
    fn unknown_code() {
        assert_eq!(TrapKind::try_from(5), Err(UnknownTrapCode(5)));
        assert_eq!(Trap::from_raw(42), Trap::Unknown(42));
        assert_eq!(Trap::from_raw(42).to_string(), "unknown trap (code 42)");
        assert_eq!(Trap::from_raw(42).kind(), None);
    }

    #[test]
    fn known_trap_renders_like_its_kind() {
        for kind in TrapKind::ALL {
            assert_eq!(Trap::from(kind).to_string(), kind.description());
        }
    }

    proptest! {
        #[test]
        fn from_raw_is_total(raw in any::<u32>()) {
            let trap = Trap::from_raw(raw);
            match trap {
                Trap::Known(kind) => prop_assert_eq!(u32::from(kind), raw),
                Trap::Unknown(code) => {
                    prop_assert_eq!(code, raw);
                    prop_assert!(raw >= 5);
                }
            }
            prop_assert!(!trap.to_string().is_empty());
        }
    }
}
