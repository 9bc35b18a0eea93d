// Licensed under the Apache-2.0 license

use std::cell::RefCell;

use borg_emu_types::RvSize;
use ureg::Uint;

use crate::Bus;

/// An MMIO implementation that reads and writes to a `borg_emu_bus::Bus`.
pub struct BusMmio<TBus: Bus> {
    bus: RefCell<TBus>,
}
impl<TBus: Bus> BusMmio<TBus> {
    pub fn new(bus: TBus) -> Self {
        Self {
            bus: RefCell::new(bus),
        }
    }

    pub fn into_inner(self) -> TBus {
        self.bus.into_inner()
    }
}
impl<TBus: Bus> ureg::Mmio for BusMmio<TBus> {
    /// Loads from address `src` on the bus and returns the value.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't read from, this Mmio implementation isn't actually
    /// unsafe for POD types like u8/u16/u32.
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T {
        let val_u32 = self
            .bus
            .borrow_mut()
            .read(RvSize::of::<T>(), src as usize as u32)
            .unwrap();
        T::from_u32(val_u32)
    }
}

impl<TBus: Bus> ureg::MmioMut for BusMmio<TBus> {
    /// Stores `src` to address `dst` on the bus.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't written to, this Mmio implementation isn't actually
    /// unsafe for POD types like u8/u16/u32.
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T) {
        let val_u32: u32 = src.try_into().unwrap_or_default();
        self.bus
            .borrow_mut()
            .write(RvSize::of::<T>(), dst as usize as u32, val_u32)
            .unwrap()
    }
}
