mod benchmark;

use std::time::{Duration, Instant};

pub use self::benchmark::{Benchmark, BenchmarkReport};

/// Measures elapsed time since the first rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameClock {
    first_frame: Instant,
}

impl FrameClock {
    pub fn new(first_frame: Instant) -> Self {
        Self { first_frame }
    }

    /// Milliseconds elapsed between the first frame and `now`.
    pub fn elapsed_millis(&self, now: Instant) -> u128 {
        now.saturating_duration_since(self.first_frame).as_millis()
    }
}

/// An artificial delay applied after each buffer swap.
#[derive(Debug, Copy, Clone)]
pub struct SwapDelay {
    delay: Duration,
}

impl SwapDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Sleep for the configured delay. Does nothing when the delay is zero.
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            spin_sleep::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clock_measures_from_the_first_frame() {
        let start = Instant::now();
        let clock = FrameClock::new(start);
        assert_eq!(clock.elapsed_millis(start), 0);
        let later = start + Duration::from_millis(1234);
        assert_eq!(clock.elapsed_millis(later), 1234);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let clock = FrameClock::new(start);
        assert_eq!(clock.elapsed_millis(Instant::now()), 0);
    }

    #[test]
    fn zero_delay_returns_immediately() {
        let before = Instant::now();
        SwapDelay::new(Duration::ZERO).wait();
        assert!(before.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn delay_sleeps_at_least_the_requested_time() {
        let before = Instant::now();
        SwapDelay::new(Duration::from_micros(2000)).wait();
        assert!(before.elapsed() >= Duration::from_micros(2000));
    }
}
