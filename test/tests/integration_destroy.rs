//! Integration tests for culling broadcasters whose objects are gone

use scenesync_server::{ReleasePolicy, ServerConfig};
use scenesync_test::{count_messages, Light, TestClient, TestServer, Transform, LIGHT, TRANSFORM};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn despawn_emits_exactly_one_destroyed() {
    init_logging();
    let mut server = TestServer::new();
    let (key, identity) = server.spawn_transform(Transform::default()).unwrap();
    server.spawn_transform(Transform::default()).unwrap();

    let first = TestClient::new(1);
    let second = TestClient::new(2);
    first.connect(&mut server);
    second.connect(&mut server);
    server.tick();
    first.connection.take_sent();
    second.connection.take_sent();

    server.scene.despawn(&key);
    let outcome = server.tick();
    server.tick();

    for client in [&first, &second] {
        let counts = count_messages(&client.connection.take_sent(), None);
        assert_eq!(counts.destroyed, 1);
        assert_eq!(counts.updated, 0);
    }
    assert_eq!(outcome.stats().map(|stats| stats.culled), Some(1));
    assert_eq!(server.server.broadcaster_count(), 1);
    assert!(!server.server.objects().contains_identity(&identity));
    assert_eq!(server.log.borrow().destroyed, vec![(TRANSFORM, identity)]);
}

#[test]
fn observer_drops_mirror_on_destroyed() {
    init_logging();
    let mut server = TestServer::new();
    let (key, identity) = server.spawn_transform(Transform::default()).unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();
    assert!(client.client.mirrors().contains(&identity));

    server.scene.despawn(&key);
    server.tick();
    let events = client.pump();

    assert_eq!(events.destroyed(), &[(identity, TRANSFORM)]);
    assert!(!client.client.mirrors().contains(&identity));
}

#[test]
fn removing_one_component_keeps_the_identity() {
    init_logging();
    let mut server = TestServer::new();
    let (key, identity) = server.spawn_transform(Transform::default()).unwrap();
    server.add_light(key, Light::default()).unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    server.scene.remove_light(&key);
    server.tick();
    let events = client.pump();

    assert_eq!(events.destroyed(), &[(identity, LIGHT)]);
    assert_eq!(server.server.object_id(&key), Some(identity));
    let mirror = client.client.mirror(&identity).unwrap();
    assert!(mirror.has_component(&TRANSFORM));
    assert!(!mirror.has_component(&LIGHT));
}

#[test]
fn unannounced_broadcaster_dies_silently() {
    init_logging();
    let mut server = TestServer::new();
    let (key, _) = server.spawn_transform(Transform::default()).unwrap();
    server.scene.despawn(&key);

    let client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();

    assert_eq!(client.connection.sent_count(), 0);
    assert_eq!(server.server.broadcaster_count(), 0);
}

#[test]
fn broadcasters_are_retained_without_observers_by_default() {
    init_logging();
    let mut server = TestServer::new();
    server.spawn_transform(Transform::default()).unwrap();

    let client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.disconnect(&mut server);
    server.tick();

    assert_eq!(server.server.broadcaster_count(), 1);

    let returning = TestClient::new(2);
    returning.connect(&mut server);
    server.tick();
    assert_eq!(count_messages(&returning.connection.take_sent(), None).created, 1);
}

#[test]
fn release_policy_tears_down_without_observers() {
    init_logging();
    let mut server = TestServer::with_config(ServerConfig {
        release_policy: ReleasePolicy::ReleaseWhenUnobserved,
        ..Default::default()
    });
    server.spawn_transform(Transform::default()).unwrap();

    let client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    assert_eq!(server.server.broadcaster_count(), 1);

    client.disconnect(&mut server);
    server.tick();

    assert_eq!(server.server.broadcaster_count(), 0);
    assert!(server.server.objects().is_empty());
}
