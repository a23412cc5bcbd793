//! Integration tests for parent links between mirrored objects

use scenesync_test::{TestClient, TestServer, Transform};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn child_is_parented_under_its_mirror() {
    init_logging();
    let mut server = TestServer::new();
    let (parent_key, parent) = server.spawn_transform(Transform::default()).unwrap();
    let (_, child) = server
        .spawn_transform(Transform {
            parent: Some(parent_key),
            ..Default::default()
        })
        .unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    let mirrors = client.client.mirrors();
    assert_eq!(mirrors.get(&child).and_then(|node| node.parent()), Some(parent));
    assert_eq!(mirrors.children(&parent), vec![child]);
    assert_eq!(mirrors.roots(), vec![parent]);
}

#[test]
fn parent_referenced_before_creation_is_created_lazily() {
    init_logging();
    let mut server = TestServer::new();
    let parent_key = server.scene.spawn();
    let parent = server.server.register_object(parent_key).unwrap();
    let (_, child) = server
        .spawn_transform(Transform {
            parent: Some(parent_key),
            ..Default::default()
        })
        .unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    let mirrors = client.client.mirrors();
    assert!(mirrors.contains(&parent));
    assert!(mirrors.get(&parent).map(|node| node.is_empty()).unwrap_or(false));
    assert_eq!(mirrors.children(&parent), vec![child]);
}

#[test]
fn reparenting_to_root_is_a_delta() {
    init_logging();
    let mut server = TestServer::new();
    let (parent_key, parent) = server.spawn_transform(Transform::default()).unwrap();
    let (child_key, child) = server
        .spawn_transform(Transform {
            parent: Some(parent_key),
            ..Default::default()
        })
        .unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    server
        .scene
        .update_transform(&child_key, |transform| transform.parent = None);
    server.tick();
    let events = client.pump();

    assert_eq!(events.updated().len(), 1);
    let mirrors = client.client.mirrors();
    assert_eq!(mirrors.get(&child).and_then(|node| node.parent()), None);
    assert!(mirrors.children(&parent).is_empty());
}

#[test]
fn destroying_a_parent_reroots_its_children() {
    init_logging();
    let mut server = TestServer::new();
    let (parent_key, parent) = server.spawn_transform(Transform::default()).unwrap();
    let (_, child) = server
        .spawn_transform(Transform {
            parent: Some(parent_key),
            ..Default::default()
        })
        .unwrap();

    let mut client = TestClient::new(1);
    client.connect(&mut server);
    server.tick();
    client.pump();

    server.scene.despawn(&parent_key);
    server.tick();
    client.pump();

    let mirrors = client.client.mirrors();
    assert!(!mirrors.contains(&parent));
    assert_eq!(mirrors.roots(), vec![child]);
}
