//! malloc/calloc/realloc/free semantics over the registered heap service.
//!
//! The heap service owns block bookkeeping; this layer adds the C contract
//! on top: zero-size requests, overflow checks, errno on exhaustion and the
//! realloc pointer rules.

use core::ptr;
use core::sync::atomic::{AtomicU64, Ordering};

use hearth_abi::errno::ENOMEM;
use hearth_abi::services::HeapService;
use hearth_lib::errno::set_last_error;
use hearth_lib::klog_debug;
use hearth_lib::services;

/// Alignment handed to the heap for every C allocation. Covers the largest
/// scalar the hosted application stores, including SSE loads the compiler
/// may emit for struct copies.
pub const BRIDGE_ALIGN: usize = 16;

static ALLOC_CALLS: AtomicU64 = AtomicU64::new(0);
static RELEASE_CALLS: AtomicU64 = AtomicU64::new(0);
static FAILED_CALLS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeStats {
    pub alloc_calls: u64,
    pub release_calls: u64,
    pub failed_calls: u64,
}

pub fn bridge_stats() -> BridgeStats {
    BridgeStats {
        alloc_calls: ALLOC_CALLS.load(Ordering::Relaxed),
        release_calls: RELEASE_CALLS.load(Ordering::Relaxed),
        failed_calls: FAILED_CALLS.load(Ordering::Relaxed),
    }
}

fn heap() -> Option<&'static dyn HeapService> {
    services::heap()
}

fn fail_nomem(size: usize) -> *mut u8 {
    FAILED_CALLS.fetch_add(1, Ordering::Relaxed);
    set_last_error(ENOMEM);
    klog_debug!("alloc bridge: {} byte request failed", size);
    ptr::null_mut()
}

/// `malloc`. Zero-size requests return null without touching the error
/// cell; the hosted application treats that as a valid "nothing" answer.
pub fn allocate(size: usize) -> *mut u8 {
    if size == 0 {
        return ptr::null_mut();
    }
    let Some(heap) = heap() else {
        return fail_nomem(size);
    };

    let ptr = heap.allocate(size, BRIDGE_ALIGN);
    if ptr.is_null() {
        return fail_nomem(size);
    }
    ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
    ptr
}

/// `calloc`. The element-count product is overflow-checked before it
/// reaches the heap.
pub fn allocate_zeroed(count: usize, size: usize) -> *mut u8 {
    let Some(total) = count.checked_mul(size) else {
        return fail_nomem(usize::MAX);
    };
    let ptr = allocate(total);
    if !ptr.is_null() {
        unsafe { ptr::write_bytes(ptr, 0, total) };
    }
    ptr
}

/// `realloc`. Null grows from nothing, zero size releases, and a failed
/// resize leaves the original block untouched.
pub fn reallocate(ptr: *mut u8, new_size: usize) -> *mut u8 {
    if ptr.is_null() {
        return allocate(new_size);
    }
    if new_size == 0 {
        release(ptr);
        return ptr::null_mut();
    }
    let Some(heap) = heap() else {
        return fail_nomem(new_size);
    };

    let moved = heap.resize(ptr, new_size);
    if moved.is_null() {
        return fail_nomem(new_size);
    }
    moved
}

/// `free`. Null is a no-op.
pub fn release(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    if let Some(heap) = heap() {
        heap.release(ptr);
        RELEASE_CALLS.fetch_add(1, Ordering::Relaxed);
    }
}
