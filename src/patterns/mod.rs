//! Background light-pattern generators.
//!
//! Each generator owns at most one worker thread and supervises its
//! lifecycle: starting a pattern always stops and joins any previous
//! worker first, so two loops can never drive the same devices at once.
//! Cancellation is cooperative: workers observe shared flags at every
//! tick boundary and on slices of their longer sleeps.

pub mod blinkers;
pub mod flicker;
pub mod pulse;

use std::time::Duration;

/// Granularity at which sleeping workers re-check their cancel flags.
pub(crate) const CANCEL_SLICE: Duration = Duration::from_millis(100);

/// Sleep for `total`, waking every [`CANCEL_SLICE`] to evaluate `cancelled`.
/// Returns `false` if the sleep was cut short.
pub(crate) fn interruptible_sleep(total: Duration, cancelled: impl Fn() -> bool) -> bool {
    let mut remaining = total;
    while !remaining.is_zero() {
        if cancelled() {
            return false;
        }
        let slice = remaining.min(CANCEL_SLICE);
        std::thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
    !cancelled()
}
