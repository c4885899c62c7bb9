//! Frame clock
//!
//! Turns display-frame timestamps (milliseconds) into bounded deltas (seconds).

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous timestamp.
    ///
    /// The first call after construction or `reset` returns 0, as does a
    /// timestamp that runs backwards. Long gaps (backgrounded tab, debugger)
    /// are clamped to `max_dt`.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the last timestamp so the next delta is 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_delta_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(123_456.0), 0.0);
        let dt = clock.delta(123_456.0 + 16.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset_zeroes_next_delta() {
        let mut clock = FrameClock::default();
        clock.delta(0.0);
        clock.delta(16.0);
        clock.reset();
        assert_eq!(clock.delta(5_000.0), 0.0);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new(0.1);
        clock.delta(1_000.0);
        assert_eq!(clock.delta(61_000.0), 0.1);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::default();
        clock.delta(1_000.0);
        assert_eq!(clock.delta(900.0), 0.0);
        // Resumes from the latest timestamp
        let dt = clock.delta(950.0);
        assert!((dt - 0.05).abs() < 1e-6);
    }
}
