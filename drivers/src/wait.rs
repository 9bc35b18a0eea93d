/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains common functions and macros to implement wait routines.

--*/

/// Spin until `predicate` holds. Only for peripherals that cannot hang,
/// such as the UART transmitter.
pub fn until<F>(predicate: F)
where
    F: Fn() -> bool,
{
    while !predicate() {}
}

/// Evaluate `predicate` at most `budget` times.
///
/// # Returns
///
/// * `Some(n)` - `predicate` held on evaluation `n` (1-based)
/// * `None` - `predicate` never held; exactly `budget` evaluations were made
pub fn until_or_timeout<F>(budget: u32, mut predicate: F) -> Option<u32>
where
    F: FnMut() -> bool,
{
    (1..=budget).find(|_| predicate())
}

/// Burn a fixed number of loop iterations.
///
/// The hardware offers no acknowledgement for some operations, so a short
/// delay is the only way to let them settle.
pub fn spin(iterations: u32) {
    for i in 0..iterations {
        core::hint::black_box(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_until_or_timeout_first_try() {
        assert_eq!(until_or_timeout(10, || true), Some(1));
    }

    #[test]
    fn test_until_or_timeout_counts_evaluations() {
        let calls = Cell::new(0u32);
        let result = until_or_timeout(100, || {
            calls.set(calls.get() + 1);
            calls.get() == 42
        });
        assert_eq!(result, Some(42));
        assert_eq!(calls.get(), 42);
    }

    #[test]
    fn test_until_or_timeout_exhausts_budget_exactly() {
        let mut calls = 0u32;
        assert_eq!(
            until_or_timeout(1000, || {
                calls += 1;
                false
            }),
            None
        );
        assert_eq!(calls, 1000);
    }

    #[test]
    fn test_until_or_timeout_zero_budget() {
        let mut calls = 0u32;
        assert_eq!(
            until_or_timeout(0, || {
                calls += 1;
                true
            }),
            None
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_until_returns_once_true() {
        let calls = Cell::new(0u32);
        until(|| {
            calls.set(calls.get() + 1);
            calls.get() == 3
        });
        assert_eq!(calls.get(), 3);
    }
}
