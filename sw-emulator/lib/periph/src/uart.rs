/*++

Licensed under the Apache-2.0 license.

File Name:

    uart.rs

Abstract:

    File contains the TinyQV UART device implementation.

--*/

use borg_emu_bus::testing::Log;
use borg_emu_bus::{Bus, BusError};
use borg_emu_types::{RvAddr, RvData, RvSize};
use std::fmt::Write;

/// Transmit-only UART. Every byte written to the data register is appended
/// to `output`.
pub struct Uart {
    base: RvAddr,
    pub output: Log,
}

impl Uart {
    /// Transmit Data Register
    const ADDR_TX_DATA: RvAddr = 0x0000_0000;

    /// Transmit status Register
    const ADDR_TX_STATUS: RvAddr = 0x0000_0004;

    pub fn new(base: RvAddr) -> Self {
        Self {
            base,
            output: Log::new(),
        }
    }
}

impl Bus for Uart {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match (size, addr.wrapping_sub(self.base)) {
            // Never busy
            (RvSize::Word, Uart::ADDR_TX_STATUS) => Ok(0),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, value: RvData) -> Result<(), BusError> {
        match (size, addr.wrapping_sub(self.base)) {
            (RvSize::Word, Uart::ADDR_TX_DATA) => {
                let _ = self.output.w().write_char(value as u8 as char);
            }
            _ => Err(BusError::StoreAccessFault)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_collects_output() {
        let mut uart = Uart::new(0x0800_0080);
        assert_eq!(uart.read(RvSize::Word, 0x0800_0084), Ok(0));
        for byte in b"ok\n" {
            uart.write(RvSize::Word, 0x0800_0080, *byte as u32).unwrap();
        }
        assert_eq!(uart.output.take(), "ok\n");
    }

    #[test]
    fn test_unmapped_access_faults() {
        let mut uart = Uart::new(0x0800_0080);
        assert_eq!(
            uart.read(RvSize::Word, 0x0800_0080),
            Err(BusError::LoadAccessFault)
        );
        assert_eq!(
            uart.write(RvSize::Byte, 0x0800_0080, 0x41),
            Err(BusError::StoreAccessFault)
        );
    }
}
