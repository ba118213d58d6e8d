//! Fixed-rate frame deadlines
//!
//! Deadlines sit on a grid derived from the frame index, so rounding never
//! accumulates into drift.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Frame clock for one run of the application loop
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_rate: u32,
    start: Duration,
    index: u64,
    last_frame: Option<Duration>,
}

impl FramePacer {
    /// Pacer starting at `start`; a zero frame rate is treated as 1 fps
    pub fn new(frame_rate: u32, start: Duration) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
            start,
            index: 0,
            last_frame: None,
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Index of the frame about to run
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Start time of frame `index`
    pub fn deadline(&self, index: u64) -> Duration {
        let offset = u128::from(index) * NANOS_PER_SEC / u128::from(self.frame_rate);
        self.start + Duration::from_nanos(u64::try_from(offset).unwrap_or(u64::MAX))
    }

    /// Mark the start of a frame at `now` and return the time since the
    /// previous one. The first frame gets a zero `dt`.
    pub fn begin_frame(&mut self, now: Duration) -> Duration {
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);
        dt
    }

    /// Finish the current frame and return the deadline of the next one.
    ///
    /// Slots already in the past at `now` are skipped.
    pub fn finish_frame(&mut self, now: Duration) -> Duration {
        let mut next = self.index + 1;
        let behind = now.saturating_sub(self.start).as_nanos() * u128::from(self.frame_rate)
            / NANOS_PER_SEC;
        let behind = u64::try_from(behind).unwrap_or(u64::MAX);
        if behind >= next {
            log::debug!(
                "Frame {} overran, skipping {} frame slot(s)",
                self.index,
                behind + 1 - next
            );
            next = behind + 1;
        }
        self.index = next;
        self.deadline(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadlines_do_not_drift() {
        let pacer = FramePacer::new(30, Duration::ZERO);
        assert_eq!(pacer.deadline(1), Duration::from_nanos(33_333_333));
        assert_eq!(pacer.deadline(2), Duration::from_nanos(66_666_666));
        assert_eq!(pacer.deadline(30), Duration::from_secs(1));
        assert_eq!(pacer.deadline(60), Duration::from_secs(2));
    }

    #[test]
    fn test_dt_measured_between_frames() {
        let mut pacer = FramePacer::new(50, Duration::from_secs(5));
        assert_eq!(pacer.begin_frame(Duration::from_secs(5)), Duration::ZERO);
        assert_eq!(
            pacer.finish_frame(Duration::from_secs(5)),
            Duration::from_millis(5_020)
        );
        assert_eq!(
            pacer.begin_frame(Duration::from_millis(5_021)),
            Duration::from_millis(21)
        );
        assert_eq!(pacer.index(), 1);
    }

    #[test]
    fn test_overrun_skips_missed_slots() {
        let mut pacer = FramePacer::new(10, Duration::ZERO);
        pacer.begin_frame(Duration::ZERO);
        // Frame 0 took 350 ms: slots 1..=3 are gone
        let next = pacer.finish_frame(Duration::from_millis(350));
        assert_eq!(next, Duration::from_millis(400));
        assert_eq!(pacer.index(), 4);
    }

    #[test]
    fn test_zero_frame_rate_is_clamped() {
        let pacer = FramePacer::new(0, Duration::ZERO);
        assert_eq!(pacer.frame_rate(), 1);
        assert_eq!(pacer.deadline(3), Duration::from_secs(3));
    }
}
