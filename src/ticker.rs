use std::time::Duration;

/// Advisory timer poll interval in milliseconds.
///
/// Completion never depends on this cadence; the engine compares wall
/// clock to the persisted end time on every poll.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}
