use std::time::Duration;

/// Delay before the attempt that follows `attempt` (1-indexed): the base
/// wait plus one increment per completed failed attempt beyond the first.
pub fn linear_delay(base_seconds: u64, increment_seconds: u64, attempt: u32) -> Duration {
    let steps = u64::from(attempt.saturating_sub(1));
    let secs = base_seconds.saturating_add(increment_seconds.saturating_mul(steps));
    Duration::from_secs(secs)
}
