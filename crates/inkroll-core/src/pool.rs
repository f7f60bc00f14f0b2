//! Fixed-capacity printer slots.

use crate::printer::TextPrinter;

pub const DEFAULT_POOL_SIZE: usize = 32;
/// Largest pool a [`PrinterId`] can address.
pub const MAX_POOL_SIZE: usize = u8::MAX as usize + 1;

/// Stable handle to a pool slot.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PrinterId(pub u8);

impl PrinterId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// `N` independently active printer slots.
///
/// A slot whose printer is inactive (or empty) is free; installing a new
/// printer overwrites it. `N` may not exceed [`MAX_POOL_SIZE`]; larger pools
/// fail to compile.
pub struct PrinterPool<'a, const N: usize = DEFAULT_POOL_SIZE> {
    slots: [Option<TextPrinter<'a>>; N],
}

impl<'a, const N: usize> Default for PrinterPool<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> PrinterPool<'a, N> {
    pub const fn new() -> Self {
        const { assert!(N <= MAX_POOL_SIZE, "printer pool larger than PrinterId can address") };
        Self {
            slots: [const { None }; N],
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Lowest free slot, if any.
    pub fn free_slot(&self) -> Option<PrinterId> {
        let index = self
            .slots
            .iter()
            .position(|slot| !slot.as_ref().is_some_and(TextPrinter::is_active))?;
        u8::try_from(index).ok().map(PrinterId)
    }

    /// Stores `printer` at `id`, replacing whatever finished job was there.
    pub fn install(&mut self, id: PrinterId, printer: TextPrinter<'a>) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Some(printer);
        }
    }

    pub fn get(&self, id: PrinterId) -> Option<&TextPrinter<'a>> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: PrinterId) -> Option<&mut TextPrinter<'a>> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn is_active(&self, id: PrinterId) -> bool {
        self.get(id).is_some_and(TextPrinter::is_active)
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.as_ref().is_some_and(TextPrinter::is_active))
            .count()
    }

    /// Active printers in slot order.
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut TextPrinter<'a>> {
        self.slots
            .iter_mut()
            .filter_map(Option::as_mut)
            .filter(|printer| printer.is_active())
    }

    pub fn deactivate(&mut self, id: PrinterId) {
        if let Some(printer) = self.get_mut(id) {
            printer.deactivate();
        }
    }

    pub fn deactivate_all(&mut self) {
        for printer in self.slots.iter_mut().flatten() {
            printer.deactivate();
        }
    }
}
