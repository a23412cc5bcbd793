use scenesync_shared::{ObjectId, TypeTag};

use crate::ClientError;

/// What one call to `Client::process_incoming` changed
#[derive(Debug, Default)]
pub struct ObserverEvents {
    scene_reset: bool,
    created: Vec<(ObjectId, TypeTag)>,
    updated: Vec<(ObjectId, TypeTag)>,
    destroyed: Vec<(ObjectId, TypeTag)>,
    property_changes: Vec<String>,
    errors: Vec<ClientError>,
}

impl ObserverEvents {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // Public

    pub fn is_empty(&self) -> bool {
        !self.scene_reset
            && self.created.is_empty()
            && self.updated.is_empty()
            && self.destroyed.is_empty()
            && self.property_changes.is_empty()
            && self.errors.is_empty()
    }

    /// Whether every mirror was torn down before this batch was applied
    pub fn scene_reset(&self) -> bool {
        self.scene_reset
    }

    pub fn created(&self) -> &[(ObjectId, TypeTag)] {
        &self.created
    }

    pub fn updated(&self) -> &[(ObjectId, TypeTag)] {
        &self.updated
    }

    pub fn destroyed(&self) -> &[(ObjectId, TypeTag)] {
        &self.destroyed
    }

    /// Names of global properties whose value changed
    pub fn property_changes(&self) -> &[String] {
        &self.property_changes
    }

    pub fn errors(&self) -> &[ClientError] {
        &self.errors
    }

    // Crate-public

    pub(crate) fn push_scene_reset(&mut self) {
        self.scene_reset = true;
    }

    pub(crate) fn push_created(&mut self, identity: ObjectId, type_tag: TypeTag) {
        self.created.push((identity, type_tag));
    }

    pub(crate) fn push_updated(&mut self, identity: ObjectId, type_tag: TypeTag) {
        self.updated.push((identity, type_tag));
    }

    pub(crate) fn push_destroyed(&mut self, identity: ObjectId, type_tag: TypeTag) {
        self.destroyed.push((identity, type_tag));
    }

    pub(crate) fn push_property_change(&mut self, name: String) {
        self.property_changes.push(name);
    }

    pub(crate) fn push_error(&mut self, error: ClientError) {
        self.errors.push(error);
    }
}
