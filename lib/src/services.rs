//! Global registry of the kernel services the shim layer consumes.

use hearth_abi::services::{ConsoleService, HeapService, SchedulerService, StorageService};

use crate::service_cell::ServiceCell;

static HEAP: ServiceCell<dyn HeapService> = ServiceCell::new("heap");
static STORAGE: ServiceCell<dyn StorageService> = ServiceCell::new("storage");
static SCHEDULER: ServiceCell<dyn SchedulerService> = ServiceCell::new("scheduler");
static CONSOLE: ServiceCell<dyn ConsoleService> = ServiceCell::new("console");

pub fn register_heap(service: &'static dyn HeapService) {
    HEAP.register(service);
}

pub fn register_storage(service: &'static dyn StorageService) {
    STORAGE.register(service);
}

pub fn register_scheduler(service: &'static dyn SchedulerService) {
    SCHEDULER.register(service);
}

pub fn register_console(service: &'static dyn ConsoleService) {
    CONSOLE.register(service);
}

#[inline]
pub fn heap() -> Option<&'static dyn HeapService> {
    HEAP.try_get()
}

#[inline]
pub fn storage() -> Option<&'static dyn StorageService> {
    STORAGE.try_get()
}

#[inline]
pub fn scheduler() -> Option<&'static dyn SchedulerService> {
    SCHEDULER.try_get()
}

#[inline]
pub fn console() -> Option<&'static dyn ConsoleService> {
    CONSOLE.try_get()
}
