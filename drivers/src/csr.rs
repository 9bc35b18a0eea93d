/*++

Licensed under the Apache-2.0 license.

File Name:

    csr.rs

Abstract:

    File contains access to the free-running cycle counter.

--*/

/// Source of diagnostic timestamps. Never used for timing control.
pub trait CycleCounter {
    fn cycles(&self) -> u32;
}

/// The hart's `cycle` CSR.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mcycle;

impl CycleCounter for Mcycle {
    fn cycles(&self) -> u32 {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "riscv32")] {
                riscv::register::cycle::read() as u32
            } else {
                0
            }
        }
    }
}
