//! Schedulable clock.
//!
//! Every suspension point of a run goes through [`Clock::sleep`], so tests
//! can drive playback on tokio's paused virtual time or record the waits.

use std::time::Duration;

use async_trait::async_trait;

/// Source of timed waits for the scheduler.
#[async_trait(?Send)]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait(?Send)]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Convert a nominal delay in milliseconds to a wait at `speed`.
///
/// The multiplier divides the delay, rounded to the nanosecond. Negative
/// or undefined results clamp to zero and results too large to represent
/// saturate.
pub fn scaled_delay(ms: f64, speed: f64) -> Duration {
    let nanos = (ms * 1_000_000.0 / speed).round();
    if nanos.is_nan() || nanos <= 0.0 {
        Duration::ZERO
    } else if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_divided_by_speed() {
        assert_eq!(scaled_delay(1500.0, 1.0), Duration::from_millis(1500));
        assert_eq!(scaled_delay(1500.0, 2.0), Duration::from_millis(750));
        assert_eq!(scaled_delay(90.0, 0.5), Duration::from_millis(180));
        assert_eq!(scaled_delay(90.0, 1.0), Duration::from_millis(90));
        assert_eq!(scaled_delay(100.0, 3.0), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn extreme_speeds_saturate() {
        assert_eq!(scaled_delay(600.0, f64::INFINITY), Duration::ZERO);
        assert_eq!(scaled_delay(600.0, 0.0), Duration::MAX);
        assert_eq!(scaled_delay(-5.0, 1.0), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_advances_virtual_time() {
        let start = tokio::time::Instant::now();
        TokioClock.sleep(Duration::from_secs(3)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}
