//! Timing of computations.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct Timed<V> {
    pub value: V,
    pub elapsed: Duration,
}
impl<V> Timed<V> {
    /// Times a fallible computation, discarding the timing if it fails.
    pub fn result<E>(f: impl FnOnce() -> Result<V, E>) -> Result<Timed<V>, E> {
        let start_time = Instant::now();
        f().map(|value| Timed {
            value,
            elapsed: start_time.elapsed(),
        })
    }

    /// Throughput, in units of work per second.
    pub fn rate(&self, units: u64) -> f64 {
        units as f64 / self.elapsed.as_secs_f64()
    }
}
