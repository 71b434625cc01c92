use std::time::Duration;

/// One tick of a [`FrameClock`].
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub frame_index: u64,
}

/// Produces clamped frame deltas from caller-supplied durations.
///
/// The lower clamp avoids zero-`dt` frames; the upper clamp keeps a long
/// step from teleporting animations to their end.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self { frame_index: 0, dt_min, dt_max }
    }

    /// Advances by `elapsed`, clamped.
    ///
    /// Offline renderers drive animations deterministically this way.
    pub fn step(&mut self, elapsed: Duration) -> FrameTime {
        let dt = elapsed.clamp(self.dt_min, self.dt_max);
        let ft = FrameTime { dt: dt.as_secs_f32(), frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
