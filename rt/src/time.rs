//! Monotonic time and cooperative sleep over the scheduler service.

use hearth_lib::services;

/// Microseconds since boot. Zero until a scheduler is registered.
pub fn uptime_us() -> u64 {
    match services::scheduler() {
        Some(sched) => sched.uptime_us(),
        None => 0,
    }
}

/// Milliseconds since boot.
pub fn uptime_ms() -> u64 {
    uptime_us() / 1_000
}

/// Sleep by yielding until the deadline passes. Other tasks run in the
/// gaps; without a scheduler this returns immediately rather than spinning
/// a dead machine.
pub fn sleep_us(us: u64) {
    let Some(sched) = services::scheduler() else {
        return;
    };
    let deadline = sched.uptime_us().saturating_add(us);
    while sched.uptime_us() < deadline {
        sched.yield_now();
    }
}

pub fn sleep_ms(ms: u64) {
    sleep_us(ms.saturating_mul(1_000));
}

pub fn sleep_s(seconds: u64) {
    sleep_us(seconds.saturating_mul(1_000_000));
}
