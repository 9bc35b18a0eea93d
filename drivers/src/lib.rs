/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Borg coprocessor driver library.

--*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
pub mod printer;

mod borg;
mod config;
mod csr;
mod encoder;
mod fixed;
mod uart;
mod validator;
pub mod wait;

pub use borg::{Borg, BorgHandshake, BorgSync, CoprocAlg, ExecutionStatus};
pub use borg_error::{BorgError, BorgResult};
pub use config::{
    DiagConfig, HwRevision, DEFAULT_EPSILON, DEFAULT_POLL_BUDGET, DEFAULT_RESET_DELAY,
};
pub use csr::{CycleCounter, Mcycle};
pub use encoder::{encode, BorgOp, DEST_REG, SRC1_REG, SRC2_REG};
pub use fixed::FixedPoint2;
pub use uart::Uart;
pub use validator::{reference_add, TestVector, Validation};
