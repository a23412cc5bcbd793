//! Integration tests for interpolated playback between updates

use scenesync_client::ClientConfig;
use scenesync_test::{
    assert_position_eq, MirrorTransform, TestClient, TestServer, Transform, TRANSFORM,
};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn displayed(client: &TestClient, identity: &scenesync_shared::ObjectId) -> [f32; 3] {
    client
        .client
        .mirror(identity)
        .and_then(|node| node.component::<MirrorTransform>(&TRANSFORM))
        .map(|transform| transform.displayed_position)
        .unwrap()
}

#[test]
fn position_blends_towards_latest_update() {
    init_logging();
    let mut server = TestServer::new();
    let (key, identity) = server.spawn_transform(Transform::at([0.0, 0.0, 0.0])).unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    server
        .scene
        .update_transform(&key, |transform| transform.position = [10.0, 0.0, 0.0]);
    server.tick();
    client.pump();
    let received_at = client.client.last_timestamp();

    client.client.interpolate(received_at);
    assert_position_eq!(displayed(&client, &identity), [0.0, 0.0, 0.0]);

    client.client.interpolate(received_at + 0.05);
    assert_position_eq!(displayed(&client, &identity), [5.0, 0.0, 0.0]);

    client.client.interpolate(received_at + 1.0);
    assert_position_eq!(displayed(&client, &identity), [10.0, 0.0, 0.0]);
}

#[test]
fn interpolation_can_be_disabled() {
    init_logging();
    let mut server = TestServer::new();
    let (key, identity) = server.spawn_transform(Transform::at([0.0, 0.0, 0.0])).unwrap();

    let mut client = TestClient::with_config(
        1,
        ClientConfig {
            interpolation: false,
        },
    );
    client.connect(&mut server);
    server.tick();
    client.pump();

    server
        .scene
        .update_transform(&key, |transform| transform.position = [10.0, 0.0, 0.0]);
    server.tick();
    client.pump();

    client.client.interpolate(client.client.last_timestamp() + 1.0);
    assert_position_eq!(displayed(&client, &identity), [0.0, 0.0, 0.0]);
}
