//! Integration tests for the global property channel

use scenesync_shared::PropertyValue;
use scenesync_test::{count_messages, TestClient, TestServer};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn new_observer_receives_every_property() {
    init_logging();
    let mut server = TestServer::new();
    server
        .server
        .set_global_property("ambient", PropertyValue::Color([0.1, 0.1, 0.2, 1.0]));
    server
        .server
        .set_global_property("fog_density", PropertyValue::Float(0.02));
    server
        .server
        .set_global_property("scene_name", PropertyValue::Text("lobby".to_string()));

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    let events = client.pump();

    assert_eq!(events.property_changes().len(), 3);
    assert_eq!(
        client.client.global_property("scene_name"),
        Some(&PropertyValue::Text("lobby".to_string()))
    );
    let names: Vec<&str> = client
        .client
        .global_properties()
        .iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["ambient", "fog_density", "scene_name"]);
}

#[test]
fn continued_observer_receives_only_changed_properties() {
    init_logging();
    let mut server = TestServer::new();
    server
        .server
        .set_global_property("exposure", PropertyValue::Float(1.0));
    server
        .server
        .set_global_property("shadows", PropertyValue::Bool(true));

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    server.tick();
    assert_eq!(client.connection.sent_count(), 0);

    server
        .server
        .set_global_property("exposure", PropertyValue::Float(1.5));
    server.tick();

    let sent = client.connection.take_sent();
    assert_eq!(count_messages(&sent, None).global, 1);
    for payload in sent {
        client.client.receive(&payload);
    }
    let events = client.client.process_incoming();

    assert_eq!(events.property_changes(), &["exposure".to_string()]);
    assert_eq!(
        client.client.global_property("exposure"),
        Some(&PropertyValue::Float(1.5))
    );
    assert_eq!(
        client.client.global_property("shadows"),
        Some(&PropertyValue::Bool(true))
    );
}

#[test]
fn setting_the_same_value_is_not_a_change() {
    init_logging();
    let mut server = TestServer::new();

    assert!(server
        .server
        .set_global_property("gravity", PropertyValue::Vector3([0.0, -9.8, 0.0])));
    assert!(!server
        .server
        .set_global_property("gravity", PropertyValue::Vector3([0.0, -9.8, 0.0])));
    assert!(server
        .server
        .set_global_property("gravity", PropertyValue::Int(0)));
}
