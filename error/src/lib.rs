/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error codes reported by the Borg diagnostic firmware.

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Borg Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BorgError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: BorgError = BorgError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl BorgError {
    /// Create an error; intended to only be used from const contexts, as we
    /// don't want runtime panics if val is zero. Use `BorgError::try_from()`
    /// to convert a value read back from hardware or a log.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("BorgError cannot be 0"),
        }
    }

    define_error_constants![
        (
            DRIVER_BORG_HALT_TIMEOUT,
            0x0001_0001,
            "Coprocessor did not raise the halt flag within the poll budget"
        ),
        (
            DRIVER_BORG_NO_STATUS_REG,
            0x0001_0002,
            "Handshake protocol requires a status register and instruction memory"
        ),
        (
            DIAG_VALIDATION_FAILURE,
            0x0002_0001,
            "Coprocessor result differs from the software reference beyond epsilon"
        ),
        (
            DIAG_CONFIG_ZERO_POLL_BUDGET,
            0x0002_0002,
            "Poll budget must be at least one iteration"
        ),
        (
            DIAG_CONFIG_INVALID_EPSILON,
            0x0002_0003,
            "Epsilon must be finite and greater than zero"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::BorgError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::BorgError(val)
    }
}

impl From<BorgError> for core::num::NonZeroU32 {
    fn from(val: BorgError) -> Self {
        val.0
    }
}

impl From<BorgError> for u32 {
    fn from(val: BorgError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for BorgError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        NonZeroU32::try_from(val).map(BorgError)
    }
}

pub type BorgResult<T> = Result<T, BorgError>;
