mod server;
pub use server::Server;

mod server_config;
pub use server_config::{ReleasePolicy, ServerConfig};

mod frame_outcome;
pub use frame_outcome::{FrameOutcome, FrameStats};
