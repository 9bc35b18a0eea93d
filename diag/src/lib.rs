/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Borg coprocessor diagnostic harness.

--*/

#![cfg_attr(not(test), no_std)]

mod reporter;
mod runner;
mod vectors;

pub use reporter::Reporter;
pub use runner::{BatchRunner, BatchSummary, CaseOutcome, TestResult};
pub use vectors::{TEST_VECTORS, VECTOR_EPSILON};
