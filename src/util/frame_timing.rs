use web_time::Instant;

/// Milliseconds of one frame at the 60 fps reference rate.
pub const TARGET_FRAME_DURATION: f32 = 1000.0 / 60.0;

/// Largest per-frame delta handed to the simulation, in milliseconds.
const MAX_FRAME_DELTA: f32 = 32.0;

/// Wall-clock frame driver.
///
/// Per-frame deltas are clamped so a minimized window or debugger
/// pause cannot inject a huge simulation step, and the frame counter
/// advances in 60 fps units so animation pacing stays constant across
/// refresh rates.
pub struct FrameClock {
    last_tick: Instant,
    frames: f32,
}

impl FrameClock {
    /// Create a clock whose first tick measures from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frames: 0.0,
        }
    }

    /// Advance the clock to the current instant. Returns the clamped
    /// delta in milliseconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32() * 1000.0;
        self.last_tick = now;
        self.advance(raw)
    }

    /// Cumulative frame count in 60 fps units.
    #[must_use]
    pub fn frames(&self) -> f32 {
        self.frames
    }

    fn advance(&mut self, raw_delta_ms: f32) -> f32 {
        let delta = raw_delta_ms.min(MAX_FRAME_DELTA);
        self.frames += delta / TARGET_FRAME_DURATION;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
