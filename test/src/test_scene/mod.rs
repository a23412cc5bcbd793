/// Minimal authority-side scene: objects own their components behind
/// `Rc<RefCell<_>>`, broadcasters watch them through `Weak` handles so a
/// despawn is visible as a dead broadcaster.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use scenesync_shared::ObjectKey;

use crate::test_protocol::{Light, Transform};

#[derive(Default)]
pub struct TestObject {
    pub transform: Option<Rc<RefCell<Transform>>>,
    pub light: Option<Rc<RefCell<Light>>>,
}

#[derive(Default)]
pub struct TestScene {
    objects: HashMap<ObjectKey, TestObject>,
    next_key: u64,
}

impl TestScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> ObjectKey {
        self.next_key += 1;
        let key = ObjectKey::new(self.next_key);
        self.objects.insert(key, TestObject::default());
        key
    }

    pub fn insert_transform(&mut self, key: ObjectKey, transform: Transform) {
        self.objects.entry(key).or_default().transform = Some(Rc::new(RefCell::new(transform)));
    }

    pub fn insert_light(&mut self, key: ObjectKey, light: Light) {
        self.objects.entry(key).or_default().light = Some(Rc::new(RefCell::new(light)));
    }

    /// Mutates a transform in place. Returns false if the object has none.
    pub fn update_transform(&self, key: &ObjectKey, update: impl FnOnce(&mut Transform)) -> bool {
        let Some(transform) = self.objects.get(key).and_then(|object| object.transform.as_ref()) else {
            return false;
        };
        update(&mut transform.borrow_mut());
        true
    }

    pub fn update_light(&self, key: &ObjectKey, update: impl FnOnce(&mut Light)) -> bool {
        let Some(light) = self.objects.get(key).and_then(|object| object.light.as_ref()) else {
            return false;
        };
        update(&mut light.borrow_mut());
        true
    }

    /// Clone of the current transform value
    pub fn transform(&self, key: &ObjectKey) -> Option<Transform> {
        self.objects
            .get(key)
            .and_then(|object| object.transform.as_ref())
            .map(|transform| transform.borrow().clone())
    }

    pub fn light(&self, key: &ObjectKey) -> Option<Light> {
        self.objects
            .get(key)
            .and_then(|object| object.light.as_ref())
            .map(|light| light.borrow().clone())
    }

    pub fn transform_handle(&self, key: &ObjectKey) -> Option<Weak<RefCell<Transform>>> {
        self.objects
            .get(key)
            .and_then(|object| object.transform.as_ref())
            .map(Rc::downgrade)
    }

    pub fn light_handle(&self, key: &ObjectKey) -> Option<Weak<RefCell<Light>>> {
        self.objects
            .get(key)
            .and_then(|object| object.light.as_ref())
            .map(Rc::downgrade)
    }

    pub fn remove_light(&mut self, key: &ObjectKey) {
        if let Some(object) = self.objects.get_mut(key) {
            object.light = None;
        }
    }

    /// Drops the object and all of its components
    pub fn despawn(&mut self, key: &ObjectKey) {
        self.objects.remove(key);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
