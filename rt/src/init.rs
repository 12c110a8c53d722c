//! Runtime bring-up.
//!
//! The kernel hands over one implementation of each service it provides;
//! registration is one-shot and happens before the hosted application's
//! entry point runs.

use hearth_abi::services::{ConsoleService, HeapService, SchedulerService, StorageService};
use hearth_lib::errno::clear_last_error;
use hearth_lib::klog::klog_init;
use hearth_lib::klog_info;
use hearth_lib::services;

/// The kernel services backing the compatibility layer. The console is
/// optional; without one, stdout output and kernel log lines are dropped.
pub struct KernelServices {
    pub heap: &'static dyn HeapService,
    pub storage: &'static dyn StorageService,
    pub scheduler: &'static dyn SchedulerService,
    pub console: Option<&'static dyn ConsoleService>,
}

/// Register the services and reset runtime state. Panics if called twice;
/// the kernel wires the layer up exactly once during boot.
pub fn runtime_init(services_in: KernelServices) {
    if let Some(console) = services_in.console {
        services::register_console(console);
    }
    services::register_heap(services_in.heap);
    services::register_storage(services_in.storage);
    services::register_scheduler(services_in.scheduler);

    clear_last_error();
    klog_init();
    klog_info!("hearth runtime ready");
}
