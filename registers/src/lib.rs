/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the register map of the Borg floating point coprocessor.

--*/
#![cfg_attr(not(test), no_std)]

use ureg::{Mmio, MmioMut, RealMmioMut, RegRef};

/// Peripheral 23 in the TinyQV user peripheral window.
pub const BORG_BASE: u32 = 0x0800_05C0;

/// Offsets of every coprocessor register from the peripheral base address.
///
/// `status` and `imem` only exist on the handshake hardware revision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterMap {
    pub base: u32,
    pub operand0: u32,
    pub operand1: u32,
    pub result: u32,
    pub status: Option<u32>,
    pub imem: Option<u32>,
    pub control: u32,
}

impl RegisterMap {
    /// Revision with a micro-sequencer, instruction memory and a halt flag.
    pub const HANDSHAKE: Self = Self {
        base: BORG_BASE,
        operand0: 0x00,
        operand1: 0x04,
        result: 0x08,
        status: Some(0x10),
        imem: Some(0x20),
        control: 0x3C,
    };

    /// Revision that completes within a single write-then-read bus sequence.
    /// The control register doubles as the instruction register.
    pub const SYNC: Self = Self {
        base: BORG_BASE,
        operand0: 0x00,
        operand1: 0x04,
        result: 0x08,
        status: None,
        imem: None,
        control: 0x3C,
    };

    pub const fn addr(&self, offset: u32) -> u32 {
        self.base + offset
    }
}

bitflags::bitflags! {
    /// Control register
    pub struct Control : u32 {
        /// Start executing instruction memory
        const START = 1 << 0;
        /// Reset the micro-sequencer program counter
        const RESET = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Status register
    pub struct Status : u32 {
        /// Micro-program finished
        const HALTED = 1 << 1;
    }
}

impl From<u32> for Status {
    /// Converts to this type from the input type.
    fn from(value: u32) -> Self {
        Status::from_bits_truncate(value)
    }
}

bitfield::bitfield! {
    /// Coprocessor instruction word (RISC-V R-type layout)
    #[derive(PartialEq, Eq, Clone, Copy)]
    pub struct InstructionWord(u32);
    impl Debug;

    /// Opcode
    pub u32, opcode, set_opcode: 6, 0;

    /// Destination Register
    pub u32, rd, set_rd: 11, 7;

    /// Opcode function
    pub u32, funct3, set_funct3: 14, 12;

    /// Source Register 1
    pub u32, rs1, set_rs1: 19, 15;

    /// Source Register 2
    pub u32, rs2, set_rs2: 24, 20;

    /// Opcode function
    pub u32, funct7, set_funct7: 31, 25;
}

impl InstructionWord {
    /// All-zero word; stops the micro-sequencer.
    pub const HALT: Self = Self(0);

    /// Floating point operation opcode (OP-FP)
    pub const OPCODE_OP_FP: u32 = 0x53;

    /// funct7 of single precision add
    pub const FUNCT7_FADD_S: u32 = 0x00;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_halt(self) -> bool {
        self == Self::HALT
    }
}

impl From<u32> for InstructionWord {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Coprocessor register block
pub struct BorgReg<TMmio: Mmio = RealMmioMut<'static>> {
    map: RegisterMap,
    mmio: TMmio,
}

impl BorgReg<RealMmioMut<'static>> {
    /// Register block backed by real hardware.
    ///
    /// # Safety
    ///
    /// The caller must own the coprocessor described by `map`; no other
    /// `BorgReg` may exist for the same peripheral at the same time.
    pub unsafe fn new(map: RegisterMap) -> Self {
        Self::new_with_mmio(map, RealMmioMut::default())
    }
}

impl<TMmio: Mmio> BorgReg<TMmio> {
    /// # Safety
    ///
    /// Every address described by `map` must be valid for `mmio`.
    pub unsafe fn new_with_mmio(map: RegisterMap, mmio: TMmio) -> Self {
        Self { map, mmio }
    }

    fn reg(&self, offset: u32) -> RegRef<'_, TMmio> {
        let ptr = self.map.addr(offset) as usize as *mut u32;
        unsafe { RegRef::new(&self.mmio, ptr) }
    }

    pub fn operand0(&self) -> RegRef<'_, TMmio> {
        self.reg(self.map.operand0)
    }

    pub fn operand1(&self) -> RegRef<'_, TMmio> {
        self.reg(self.map.operand1)
    }

    /// Destination register r2
    pub fn result(&self) -> RegRef<'_, TMmio> {
        self.reg(self.map.result)
    }

    /// Control register, or the instruction register on the synchronous revision.
    pub fn control(&self) -> RegRef<'_, TMmio> {
        self.reg(self.map.control)
    }

    pub fn status(&self) -> Option<RegRef<'_, TMmio>> {
        self.map.status.map(|offset| self.reg(offset))
    }

    /// Instruction memory word `slot`.
    pub fn imem(&self, slot: u32) -> Option<RegRef<'_, TMmio>> {
        self.map.imem.map(|offset| self.reg(offset + slot * 4))
    }
}

impl<TMmio: MmioMut> BorgReg<TMmio> {
    pub fn write_control(&self, control: Control) {
        self.control().write(control.bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_addresses() {
        let map = RegisterMap::HANDSHAKE;
        assert_eq!(map.addr(map.operand0), 0x0800_05C0);
        assert_eq!(map.addr(map.operand1), 0x0800_05C4);
        assert_eq!(map.addr(map.result), 0x0800_05C8);
        assert_eq!(map.status.map(|s| map.addr(s)), Some(0x0800_05D0));
        assert_eq!(map.imem.map(|s| map.addr(s)), Some(0x0800_05E0));
        assert_eq!(map.addr(map.control), 0x0800_05FC);
    }

    #[test]
    fn test_sync_has_no_status() {
        assert_eq!(RegisterMap::SYNC.status, None);
        assert_eq!(RegisterMap::SYNC.imem, None);
        assert_eq!(RegisterMap::SYNC.control, RegisterMap::HANDSHAKE.control);
    }

    #[test]
    fn test_control_bits() {
        assert_eq!(Control::START.bits(), 1);
        assert_eq!(Control::RESET.bits(), 2);
        assert_eq!(Control::empty().bits(), 0);
    }

    #[test]
    fn test_instruction_word_fields() {
        let word = InstructionWord(0x0010_0153);
        assert_eq!(word.opcode(), InstructionWord::OPCODE_OP_FP);
        assert_eq!(word.rd(), 2);
        assert_eq!(word.rs1(), 0);
        assert_eq!(word.rs2(), 1);
        assert_eq!(word.funct3(), 0);
        assert_eq!(word.funct7(), InstructionWord::FUNCT7_FADD_S);
        assert!(!word.is_halt());
        assert!(InstructionWord::from(0).is_halt());
    }

    #[test]
    fn test_status_truncates_unknown_bits() {
        assert_eq!(Status::from(0xffff_fffd), Status::empty());
        assert!(Status::from(0x2).contains(Status::HALTED));
    }
}
