//! Kernel log and console capture scenarios.

use hearth_lib::klog::{KlogLevel, klog_get_level, klog_set_level};
use hearth_lib::{klog_debug, klog_error, klog_info};
use hearth_tests::env::test_env;

#[test]
fn log_lines_reach_the_console() {
    let (_guard, env) = test_env();

    klog_info!("loading {} lumps", 1264);
    let out = env.console.take_string();
    assert_eq!(out, "[info] loading 1264 lumps\n");
}

#[test]
fn levels_filter_output() {
    let (_guard, env) = test_env();

    // Info is the default; debug is below it.
    assert_eq!(klog_get_level(), KlogLevel::Info);
    klog_debug!("invisible");
    assert_eq!(env.console.take_string(), "");

    klog_set_level(KlogLevel::Error);
    klog_info!("also invisible");
    klog_error!("visible");
    let out = env.console.take_string();
    assert_eq!(out, "[error] visible\n");

    klog_set_level(KlogLevel::Info);
}

#[test]
fn raw_console_writes_are_captured() {
    use hearth_abi::services::ConsoleService;

    let (_guard, env) = test_env();

    env.console.write_bytes(b"PLAYPAL");
    assert_eq!(env.console.take(), b"PLAYPAL");
}
