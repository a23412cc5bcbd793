use std::time::Instant;

/// Source of the timestamp written into every message header
pub enum SyncClock {
    /// Seconds elapsed since the clock was created
    Realtime(Instant),
    /// Externally driven time, for hosts with their own frame clock
    Manual(f32),
}

impl SyncClock {
    pub fn realtime() -> Self {
        Self::Realtime(Instant::now())
    }

    pub fn manual(start: f32) -> Self {
        Self::Manual(start)
    }

    pub fn now(&self) -> f32 {
        match self {
            Self::Realtime(start) => start.elapsed().as_secs_f32(),
            Self::Manual(now) => *now,
        }
    }

    /// Moves a manual clock to `now`. Has no effect on a realtime clock.
    pub fn set(&mut self, now: f32) {
        if let Self::Manual(current) = self {
            *current = now;
        }
    }

    pub fn advance(&mut self, delta: f32) {
        if let Self::Manual(current) = self {
            *current += delta;
        }
    }
}

impl Default for SyncClock {
    fn default() -> Self {
        Self::realtime()
    }
}
