use crate::story::timetable::TOTAL_DURATION;

const LOOP_MS: f64 = TOTAL_DURATION * 1000.0;

/// Playback clock as a value: where the loop started and where to continue from after a pause.
///
/// The epoch is latched lazily from the first timestamp seen, so a fresh or resumed clock can be
/// installed before the host delivers a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockState {
    epoch_ms: Option<f64>,
    resume_offset_ms: f64,
    last_elapsed_ms: f64,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl ClockState {
    /// A clock that reads 0 on its next tick.
    pub const fn fresh() -> Self {
        Self {
            epoch_ms: None,
            resume_offset_ms: 0.0,
            last_elapsed_ms: 0.0,
        }
    }

    pub fn epoch_ms(&self) -> Option<f64> {
        self.epoch_ms
    }

    /// Elapsed loop time in seconds at `timestamp_ms`, always in `[0, TOTAL_DURATION)`.
    ///
    /// Latches the epoch on the first call after `fresh` or `paused`.
    pub fn elapsed_at(&mut self, timestamp_ms: f64) -> f64 {
        let epoch = *self
            .epoch_ms
            .get_or_insert(timestamp_ms - self.resume_offset_ms);
        self.last_elapsed_ms = timestamp_ms - epoch;
        wrap_seconds(self.last_elapsed_ms / 1000.0)
    }

    /// The clock to install on pause: the next tick continues from the last elapsed position.
    pub fn paused(&self) -> Self {
        let offset = self.last_elapsed_ms.rem_euclid(LOOP_MS);
        Self {
            epoch_ms: None,
            resume_offset_ms: offset,
            last_elapsed_ms: offset,
        }
    }

    /// Elapsed seconds as of the last tick.
    pub fn last_elapsed(&self) -> f64 {
        wrap_seconds(self.last_elapsed_ms / 1000.0)
    }
}

/// Wrap any elapsed time into `[0, TOTAL_DURATION)`, including negative inputs.
pub fn wrap_seconds(secs: f64) -> f64 {
    let wrapped = secs.rem_euclid(TOTAL_DURATION);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= TOTAL_DURATION { 0.0 } else { wrapped }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/state.rs"]
mod tests;
