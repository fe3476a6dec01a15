use std::time::Duration;

use log::info;

/// Receives the wall-clock time of each move decision.
pub trait MoveTimingObserver {
    fn observe(&mut self, elapsed: Duration);
}

impl<F: FnMut(Duration)> MoveTimingObserver for F {
    fn observe(&mut self, elapsed: Duration) {
        self(elapsed)
    }
}

/// Keeps every observed move time for an end-of-game summary.
#[derive(Debug, Clone, Default)]
pub struct TimingLog {
    samples: Vec<Duration>,
}

impl TimingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total(&self) -> Duration {
        self.samples.iter().sum()
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.total() / self.samples.len() as u32)
    }

    pub fn max(&self) -> Option<Duration> {
        self.samples.iter().max().copied()
    }
}

impl MoveTimingObserver for TimingLog {
    fn observe(&mut self, elapsed: Duration) {
        info!("[AI] move took {:.3} s", elapsed.as_secs_f64());
        self.samples.push(elapsed);
    }
}
