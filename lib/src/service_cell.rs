//! Write-once holder for a kernel service reference.

use core::sync::atomic::{AtomicBool, Ordering};

use spin::Once;

/// A named, register-once slot for a `'static` service reference.
///
/// Registration happens exactly once during boot; a second registration is a
/// kernel bug and panics. Accessors on hot paths use [`try_get`] and turn an
/// empty cell into an error instead of panicking.
///
/// [`try_get`]: ServiceCell::try_get
pub struct ServiceCell<T: ?Sized + 'static> {
    slot: Once<&'static T>,
    registered: AtomicBool,
    name: &'static str,
}

impl<T: ?Sized + 'static> ServiceCell<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            slot: Once::new(),
            registered: AtomicBool::new(false),
            name,
        }
    }

    /// Store the service reference. Panics if the cell is already occupied.
    pub fn register(&self, service: &'static T) {
        let prior = self.registered.swap(true, Ordering::AcqRel);
        assert!(!prior, "service '{}' registered twice", self.name);
        self.slot.call_once(|| service);
    }

    /// Fetch the service, panicking with the cell name if unregistered.
    /// Reserved for paths that cannot run before boot completes.
    pub fn get(&self) -> &'static T {
        match self.slot.get() {
            Some(service) => service,
            None => panic!("service '{}' used before registration", self.name),
        }
    }

    /// Fetch the service if registered.
    #[inline]
    pub fn try_get(&self) -> Option<&'static T> {
        self.slot.get().copied()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}
