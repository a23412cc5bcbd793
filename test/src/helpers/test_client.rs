use std::sync::Arc;

use scenesync_client::{Client, ClientConfig, ObserverEvents};
use scenesync_shared::ConnectionKey;

use crate::local_connection::LocalConnection;
use crate::test_protocol::protocol;
use crate::TestServer;

/// Observer wired to a `TestServer` through a `LocalConnection`
pub struct TestClient {
    pub client: Client,
    pub connection: Arc<LocalConnection>,
    pub key: ConnectionKey,
}

impl TestClient {
    pub fn new(key: u64) -> Self {
        Self::with_config(key, ClientConfig::default())
    }

    pub fn with_config(key: u64, config: ClientConfig) -> Self {
        Self {
            client: Client::new(config, protocol()),
            connection: LocalConnection::new(),
            key: ConnectionKey::new(key),
        }
    }

    /// Reports this observer as joined; takes effect on the next cycle
    pub fn connect(&self, server: &mut TestServer) {
        server.server.on_connected(self.key, self.connection.clone());
    }

    pub fn disconnect(&self, server: &mut TestServer) {
        server.server.on_disconnected(self.key);
    }

    /// Moves everything the authority sent into the client and applies it
    pub fn pump(&mut self) -> ObserverEvents {
        for payload in self.connection.take_sent() {
            self.client.receive(&payload);
        }
        self.client.process_incoming()
    }
}
