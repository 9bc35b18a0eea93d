/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for Borg Emulator Types library.

--*/

/// RISCV Data width
pub type RvData = u32;

/// RISCV Address width
pub type RvAddr = u32;

/// RISCV IO Operation size
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum RvSize {
    Byte = 1,
    HalfWord = 2,
    Word = 4,
}

impl RvSize {
    /// Size of a transaction moving a value of type `T`.
    pub const fn of<T>() -> RvSize {
        match core::mem::size_of::<T>() {
            1 => RvSize::Byte,
            2 => RvSize::HalfWord,
            4 => RvSize::Word,
            _other => panic!("Unsupported RvSize"),
        }
    }
}

impl From<RvSize> for usize {
    fn from(val: RvSize) -> usize {
        val as usize
    }
}
