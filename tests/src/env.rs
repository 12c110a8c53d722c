//! Shared test environment.
//!
//! The service registry, the stream table and the error cell are process
//! globals, so scenarios serialize on one lock and register the fake
//! services exactly once per test process.

use std::sync::{Mutex, MutexGuard, OnceLock};

use hearth_lib::errno::clear_last_error;
use hearth_rt::init::{KernelServices, runtime_init};

use crate::mock::{CaptureConsole, CountingHeap, ManualClock};
use crate::ramstore::RamStore;

pub struct TestEnv {
    pub heap: &'static CountingHeap,
    pub store: &'static RamStore,
    pub clock: &'static ManualClock,
    pub console: &'static CaptureConsole,
}

static ENV_LOCK: Mutex<()> = Mutex::new(());
static ENV: OnceLock<TestEnv> = OnceLock::new();

/// Acquire the environment. The guard serializes scenarios; hold it for
/// the whole test.
pub fn test_env() -> (MutexGuard<'static, ()>, &'static TestEnv) {
    let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let env = ENV.get_or_init(|| {
        let heap: &'static CountingHeap = Box::leak(Box::new(CountingHeap::new()));
        let store: &'static RamStore = Box::leak(Box::new(RamStore::new()));
        let clock: &'static ManualClock = Box::leak(Box::new(ManualClock::new()));
        let console: &'static CaptureConsole = Box::leak(Box::new(CaptureConsole::new()));
        runtime_init(KernelServices {
            heap,
            storage: store,
            scheduler: clock,
            console: Some(console),
        });
        TestEnv {
            heap,
            store,
            clock,
            console,
        }
    });
    clear_last_error();
    env.console.take();
    (guard, env)
}
