/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for for Borg Emulator Peripheral library.

--*/

mod coprocessor;
mod uart;

pub use coprocessor::Coprocessor;
pub use uart::Uart;
