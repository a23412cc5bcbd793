pub mod assertions;
pub mod test_client;

pub use assertions::{count_messages, MessageCounts};
pub use test_client::TestClient;
pub use test_server::TestServer;
