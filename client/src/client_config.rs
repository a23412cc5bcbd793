use std::default::Default;

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Whether `Client::interpolate` drives services that support smoothed
    /// playback between updates
    pub interpolation: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interpolation: true,
        }
    }
}
