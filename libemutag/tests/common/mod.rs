// Shared helpers for the integration test crates in `tests/`.
#![allow(dead_code)]


/// Capture `log` output in test runs; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
