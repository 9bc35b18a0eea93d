/*++

Licensed under the Apache-2.0 license.

File Name:

    uart.rs

Abstract:

    File contains API for accessing the TinyQV UART

--*/

use core::convert::Infallible;

use ureg::{MmioMut, RealMmioMut, RegRef};

use crate::wait;

/// Peripheral 2 in the TinyQV peripheral window.
const UART_BASE: u32 = 0x0800_0080;
const UART_TX_DATA: u32 = 0x00;
const UART_TX_STATUS: u32 = 0x04;
const UART_TX_BUSY: u32 = 1 << 0;

/// TinyQV UART transmitter
pub struct Uart<TMmio: MmioMut = RealMmioMut<'static>> {
    base: u32,
    mmio: TMmio,
}

impl Uart<RealMmioMut<'static>> {
    /// Create an instance of the TinyQV UART
    ///
    /// # Safety
    ///
    /// Only valid on TinyQV hardware.
    pub unsafe fn new() -> Self {
        Self::new_with_mmio(UART_BASE, RealMmioMut::default())
    }
}

impl<TMmio: MmioMut> Uart<TMmio> {
    /// # Safety
    ///
    /// `base` must address a TinyQV UART reachable through `mmio`.
    pub unsafe fn new_with_mmio(base: u32, mmio: TMmio) -> Self {
        Self { base, mmio }
    }

    fn reg(&self, offset: u32) -> RegRef<'_, TMmio> {
        unsafe { RegRef::new(&self.mmio, (self.base + offset) as usize as *mut u32) }
    }

    /// Write the string to UART
    ///
    /// # Arguments
    ///
    /// `str` - String to write to UART
    pub fn write(&mut self, str: &str) {
        for byte in str.bytes() {
            match byte {
                // ESC is let through for the ANSI color codes of the verdict
                0x20..=0x7e | b'\n' | b'\t' | 0x1b => self.write_byte(byte),
                _ => self.write_byte(0xfe),
            }
        }
    }

    /// Write the byte to UART
    ///
    /// # Arguments
    ///
    /// `byte` - Byte to write to UART
    pub fn write_byte(&mut self, byte: u8) {
        let status = self.reg(UART_TX_STATUS);
        wait::until(|| status.read() & UART_TX_BUSY == 0);
        self.reg(UART_TX_DATA).write(byte as u32);
    }
}

impl<TMmio: MmioMut> ufmt::uWrite for Uart<TMmio> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borg_emu_bus::testing::FakeBus;
    use borg_emu_bus::BusMmio;

    #[test]
    fn test_write_waits_for_idle_transmitter() {
        let mut fake_bus = FakeBus::new();
        fake_bus.read_queue.extend([1, 1, 0]);
        let log = fake_bus.log.clone();
        let mut uart = unsafe { Uart::new_with_mmio(UART_BASE, BusMmio::new(fake_bus)) };
        uart.write("S");
        assert_eq!(
            log.take(),
            "read(RvSize::Word, 0x8000084)\n\
             read(RvSize::Word, 0x8000084)\n\
             read(RvSize::Word, 0x8000084)\n\
             write(RvSize::Word, 0x8000080, 0x53)\n"
        );
    }

    #[test]
    fn test_non_printable_bytes_are_replaced() {
        let fake_bus = FakeBus::new();
        let log = fake_bus.log.clone();
        let mut uart = unsafe { Uart::new_with_mmio(UART_BASE, BusMmio::new(fake_bus)) };
        uart.write("\x1b\x07");
        let out = log.take();
        assert!(out.contains("write(RvSize::Word, 0x8000080, 0x1b)\n"));
        assert!(out.contains("write(RvSize::Word, 0x8000080, 0xfe)\n"));
    }

    #[test]
    fn test_ufmt_through_emulated_uart() {
        let emu = borg_emu_periph::Uart::new(UART_BASE);
        let output = emu.output.clone();
        let mut uart = unsafe { Uart::new_with_mmio(UART_BASE, BusMmio::new(emu)) };
        ufmt::uwriteln!(uart, "{}, \x1b[32mSUCCESS\x1b[0m]", 17u32).unwrap();
        assert_eq!(output.take(), "17, \x1b[32mSUCCESS\x1b[0m]\n");
    }
}
