use std::{
    fmt,
    time::{Duration, Instant},
};

/// Counts presented frames and produces a frame-rate report once per
/// interval.
///
/// The interval starts at the first poll with no frames counted, which is
/// the first frame of a run or the first frame after a report.
#[derive(Debug)]
pub struct Benchmark {
    interval: Duration,
    interval_start: Option<Instant>,
    frames: u32,
}

/// Frame count over one completed benchmark interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub frames: u32,
    pub interval: Duration,
}

impl BenchmarkReport {
    /// Frames per second over the nominal interval.
    pub fn frames_per_second(&self) -> f64 {
        let seconds = self.interval.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.frames as f64 / seconds
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames in {} seconds: {:.3} fps",
            self.frames,
            self.interval.as_secs(),
            self.frames_per_second()
        )
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark {
    /// The default reporting interval.
    pub const INTERVAL: Duration = Duration::from_secs(5);

    pub fn new() -> Self {
        Self::with_interval(Self::INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            interval_start: None,
            frames: 0,
        }
    }

    /// Record that a frame was submitted for presentation.
    pub fn frame_presented(&mut self) {
        self.frames += 1;
    }

    /// Called once per frame before rendering.
    ///
    /// Returns a report and starts a new interval once more than one
    /// interval has elapsed since the interval started.
    pub fn poll(&mut self, now: Instant) -> Option<BenchmarkReport> {
        if self.frames == 0 {
            self.interval_start = Some(now);
            return None;
        }
        let start = *self.interval_start.get_or_insert(now);
        if now.saturating_duration_since(start) <= self.interval {
            return None;
        }
        let report = BenchmarkReport {
            frames: self.frames,
            interval: self.interval,
        };
        self.interval_start = Some(now);
        self.frames = 0;
        Some(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_frames(
        benchmark: &mut Benchmark,
        start: Instant,
        count: u32,
        spacing: Duration,
    ) -> Option<BenchmarkReport> {
        let mut last = None;
        for frame in 0..count {
            if let Some(report) = benchmark.poll(start + spacing * frame) {
                last = Some(report);
            }
            benchmark.frame_presented();
        }
        last
    }

    #[test]
    fn no_report_before_the_interval_elapses() {
        let start = Instant::now();
        let mut benchmark = Benchmark::new();
        assert_eq!(benchmark.poll(start), None);
        benchmark.frame_presented();
        assert_eq!(benchmark.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn interval_starts_at_the_first_frame() {
        let created = Instant::now();
        let mut benchmark = Benchmark::new();

        // Setup time before the first frame is not counted.
        let first_frame = created + Duration::from_secs(3);
        assert_eq!(benchmark.poll(first_frame), None);
        benchmark.frame_presented();

        assert_eq!(benchmark.poll(created + Duration::from_millis(5500)), None);
        assert!(benchmark
            .poll(first_frame + Duration::from_millis(5001))
            .is_some());
    }

    #[test]
    fn fps_is_frames_over_the_nominal_interval() {
        let start = Instant::now();
        let mut benchmark = Benchmark::new();
        run_frames(&mut benchmark, start, 301, Duration::from_millis(10));

        let report = benchmark
            .poll(start + Duration::from_millis(5100))
            .unwrap();
        assert_eq!(report.frames, 301);
        assert_eq!(report.interval, Benchmark::INTERVAL);
        assert!((report.frames_per_second() - 301.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn report_resets_the_count() {
        let start = Instant::now();
        let mut benchmark = Benchmark::new();
        benchmark.poll(start);
        benchmark.frame_presented();

        let now = start + Duration::from_millis(5001);
        assert!(benchmark.poll(now).is_some());
        assert_eq!(benchmark.poll(now + Duration::from_secs(6)), None);
    }

    #[test]
    fn report_formats_like_a_benchmark_line() {
        let report = BenchmarkReport {
            frames: 300,
            interval: Duration::from_secs(5),
        };
        assert_eq!(report.to_string(), "300 frames in 5 seconds: 60.000 fps");
    }
}
