// Licensed under the Apache-2.0 license

//! Minimal volatile register access layer.
//!
//! Register blocks are generic over an [`Mmio`] implementation so the same
//! driver code can touch real hardware through volatile pointers or an
//! emulated bus in host tests.

#![cfg_attr(not(test), no_std)]

use core::marker::PhantomData;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Unsigned integer types that may be moved across the bus.
pub trait Uint: Clone + Copy + Default + TryInto<u32> + private::Sealed {
    /// Truncating conversion from a bus word.
    fn from_u32(val: u32) -> Self;
}
impl Uint for u8 {
    fn from_u32(val: u32) -> Self {
        val as u8
    }
}
impl Uint for u16 {
    fn from_u32(val: u32) -> Self {
        val as u16
    }
}
impl Uint for u32 {
    fn from_u32(val: u32) -> Self {
        val
    }
}

/// A read-capable bus view.
pub trait Mmio: Sized {
    /// Loads from address `src` and returns the value.
    ///
    /// # Safety
    ///
    /// Same as [`core::ptr::read_volatile`].
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T;
}

/// A write-capable bus view.
pub trait MmioMut: Mmio {
    /// Stores `src` to address `dst`.
    ///
    /// # Safety
    ///
    /// Same as [`core::ptr::write_volatile`].
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T);
}

impl<TMmio: Mmio> Mmio for &TMmio {
    #[inline(always)]
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T {
        (**self).read_volatile(src)
    }
}
impl<TMmio: MmioMut> MmioMut for &TMmio {
    #[inline(always)]
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T) {
        (**self).write_volatile(dst, src)
    }
}

/// Read-write access to real memory-mapped registers.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealMmioMut<'a>(PhantomData<&'a mut ()>);
impl Mmio for RealMmioMut<'_> {
    #[inline(always)]
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T {
        core::ptr::read_volatile(src)
    }
}
impl MmioMut for RealMmioMut<'_> {
    #[inline(always)]
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T) {
        core::ptr::write_volatile(dst, src)
    }
}

/// A single 32-bit register at a fixed address.
///
/// Every `read()` and `write()` is exactly one bus transaction.
pub struct RegRef<'a, TMmio: Mmio> {
    mmio: &'a TMmio,
    ptr: *mut u32,
}
impl<'a, TMmio: Mmio> RegRef<'a, TMmio> {
    /// # Safety
    ///
    /// `ptr` must be a valid register address for the lifetime of the
    /// returned value when accessed through `mmio`.
    #[inline(always)]
    pub unsafe fn new(mmio: &'a TMmio, ptr: *mut u32) -> Self {
        Self { mmio, ptr }
    }

    #[inline(always)]
    pub fn ptr(&self) -> *mut u32 {
        self.ptr
    }

    #[inline(always)]
    pub fn read(&self) -> u32 {
        unsafe { self.mmio.read_volatile(self.ptr) }
    }
}
impl<TMmio: MmioMut> RegRef<'_, TMmio> {
    #[inline(always)]
    pub fn write(&self, val: u32) {
        unsafe { self.mmio.write_volatile(self.ptr, val) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_mmio_round_trip() {
        let mut cell = [0u32; 2];
        let mmio = RealMmioMut::default();
        let reg = unsafe { RegRef::new(&mmio, cell.as_mut_ptr().add(1)) };
        reg.write(0x3f80_0000);
        assert_eq!(reg.read(), 0x3f80_0000);
        assert_eq!(cell, [0, 0x3f80_0000]);
    }

    #[test]
    fn test_uint_from_u32_truncates() {
        assert_eq!(u8::from_u32(0x1234), 0x34);
        assert_eq!(u16::from_u32(0x1234_5678), 0x5678);
        assert_eq!(u32::from_u32(0x1234_5678), 0x1234_5678);
    }
}
