use log::info;

/// Tuning of the frame-skip controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackpressureConfig {
    /// Outbound backlog above which a cycle counts as congested
    pub queue_threshold_bytes: usize,
    /// Net votes in one direction needed to move the stride
    pub votes_to_adjust: i32,
}

impl Default for BackpressureConfig {
    fn default() -> Self {
        Self {
            queue_threshold_bytes: 2048,
            votes_to_adjust: 10,
        }
    }
}

/// Counter-voting controller deciding how many frames to skip after a
/// congested cycle. Stride never drops below 1.
pub struct BackpressureController {
    config: BackpressureConfig,
    stride: u32,
    vote_counter: i32,
}

impl BackpressureController {
    pub fn new(config: BackpressureConfig) -> Self {
        Self {
            config,
            stride: 1,
            vote_counter: 0,
        }
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn vote_counter(&self) -> i32 {
        self.vote_counter
    }

    pub fn is_congested(&self, queued_bytes: usize) -> bool {
        queued_bytes > self.config.queue_threshold_bytes
    }

    /// Casts this cycle's vote from the current backlog. Returns whether the
    /// backlog counts as congested.
    pub fn evaluate(&mut self, queued_bytes: usize) -> bool {
        let congested = self.is_congested(queued_bytes);
        if congested {
            self.vote(true);
        } else if self.stride > 1 {
            self.vote(false);
        }
        congested
    }

    pub fn vote(&mut self, congested: bool) {
        if congested {
            self.vote_counter += 1;
        } else {
            self.vote_counter -= 1;
        }

        if self.vote_counter >= self.config.votes_to_adjust {
            self.stride += 1;
            self.vote_counter = 0;
            info!("Backpressure: stride raised to {}", self.stride);
        } else if self.vote_counter <= -self.config.votes_to_adjust {
            self.stride = self.stride.saturating_sub(1).max(1);
            self.vote_counter = 0;
            info!("Backpressure: stride lowered to {}", self.stride);
        }
    }
}

impl Default for BackpressureController {
    fn default() -> Self {
        Self::new(BackpressureConfig::default())
    }
}
