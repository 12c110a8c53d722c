//! Sleep and uptime scenarios against the manual clock.

use hearth_rt::time::{sleep_ms, sleep_us, uptime_ms, uptime_us};
use hearth_tests::env::test_env;

#[test]
fn sleep_yields_until_the_deadline() {
    let (_guard, env) = test_env();

    let start = uptime_us();
    let yields_before = env.clock.yields();
    sleep_us(1_000);
    assert!(uptime_us() >= start + 1_000);
    // The wait cooperates instead of spinning hot with interrupts off.
    assert!(env.clock.yields() > yields_before);
}

#[test]
fn zero_sleep_returns_immediately() {
    let (_guard, env) = test_env();

    let yields_before = env.clock.yields();
    sleep_us(0);
    assert_eq!(env.clock.yields(), yields_before);
}

#[test]
fn millisecond_sleep_scales() {
    let (_guard, _env) = test_env();

    let start = uptime_us();
    sleep_ms(3);
    assert!(uptime_us() >= start + 3_000);
}

#[test]
fn uptime_units_agree() {
    let (_guard, env) = test_env();

    env.clock.advance_us(5_000);
    let us = uptime_us();
    assert_eq!(uptime_ms(), us / 1_000);
}
