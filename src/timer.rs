use std::time::{Duration, Instant};

/// Wall-clock statistics for one named kernel region.
///
/// Samples are folded into running totals (Welford's update for the
/// variance), so a timer costs the same memory after a million steps as
/// after one.
pub struct Timer {
    pub region: &'static str,

    count: u32,
    total: Duration,
    mean_nanos: f64,
    m2_nanos: f64,

    started_at: Option<Instant>,
}

impl Timer {
    pub fn new(region: &'static str) -> Self {
        Timer {
            region,
            count: 0,
            total: Duration::from_secs(0),
            mean_nanos: 0.0,
            m2_nanos: 0.0,
            started_at: None,
        }
    }

    pub fn start(&mut self) {
        assert!(
            self.started_at.is_none(),
            "Timer region '{}' was started twice without stop().",
            self.region
        );
        self.started_at = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        let started_at = self.started_at.take().unwrap_or_else(|| {
            panic!(
                "Timer region '{}' was stopped without start().",
                self.region
            )
        });
        self.record(started_at.elapsed());
    }

    fn record(&mut self, sample: Duration) {
        self.count += 1;
        self.total += sample;

        let nanos = sample.as_nanos() as f64;
        let delta = nanos - self.mean_nanos;
        self.mean_nanos += delta / f64::from(self.count);
        self.m2_nanos += delta * (nanos - self.mean_nanos);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn mean(&self) -> Option<Duration> {
        match self.count {
            0 => None,
            count => Some(self.total / count),
        }
    }

    /// Population standard deviation of the samples.
    pub fn std_dev(&self) -> Option<Duration> {
        match self.count {
            0 => None,
            count => {
                let variance = (self.m2_nanos / f64::from(count)).max(0.0);
                Some(Duration::from_nanos(variance.sqrt().round() as u64))
            }
        }
    }
}
