/*++

Licensed under the Apache-2.0 license.

File Name:

    reporter.rs

Abstract:

    File contains the console report of a diagnostic batch.

--*/

use borg_drivers::FixedPoint2;
use ufmt::{uWrite, uwriteln};

use crate::{BatchSummary, TestResult};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Writes the batch report to any `ufmt` sink.
pub struct Reporter<W: uWrite> {
    out: W,
}

impl<W: uWrite> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> Result<(), W::Error> {
        uwriteln!(self.out, "--- Starting Programmable Adder Batch ---")
    }

    /// One line per case: operands, actual and expected values, or the hang
    /// diagnostic when no result was read.
    pub fn case(&mut self, result: &TestResult) -> Result<(), W::Error> {
        match result.validation {
            Some(v) => uwriteln!(
                self.out,
                "Shader: {} + {} -> Actual: {} (Exp: {})",
                FixedPoint2(result.vector.a),
                FixedPoint2(result.vector.b),
                FixedPoint2(v.actual),
                FixedPoint2(v.expected)
            ),
            None => uwriteln!(
                self.out,
                "  [Error] Hardware Hang! Timeout waiting for execution to halt."
            ),
        }
    }

    /// Verdict and cycle count. The counter is printed as a signed 32-bit
    /// value, so it goes negative once bit 31 is set.
    pub fn footer(&mut self, summary: &BatchSummary) -> Result<(), W::Error> {
        let cycles = summary.cycles as i32;
        if summary.passed {
            uwriteln!(self.out, "--- All Tests Passed ---")?;
            uwriteln!(
                self.out,
                "{}, {}SUCCESS{}] TinyQV Borg Test Finished",
                cycles,
                GREEN,
                RESET
            )
        } else {
            uwriteln!(self.out, "--- TESTS FAILED ---")?;
            uwriteln!(
                self.out,
                "{}, {}FAILURE{}] TinyQV Borg Test Finished",
                cycles,
                RED,
                RESET
            )
        }
    }
}
