use std::{
    any::Any,
    collections::{hash_map, HashMap},
};

use log::info;

use crate::{ObjectId, TypeTag};

/// Observer-side node standing in for one authority-side object
pub struct MirrorNode {
    identity: ObjectId,
    parent: Option<ObjectId>,
    components: HashMap<TypeTag, Box<dyn Any>>,
}

impl MirrorNode {
    pub fn new(identity: ObjectId) -> Self {
        Self {
            identity,
            parent: None,
            components: HashMap::new(),
        }
    }

    pub fn identity(&self) -> ObjectId {
        self.identity
    }

    /// `None` means the node hangs directly under the synchronization root
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent.filter(|parent| parent.is_valid() && *parent != self.identity);
    }

    pub fn insert_component<T: Any>(&mut self, type_tag: TypeTag, component: T) {
        self.components.insert(type_tag, Box::new(component));
    }

    pub fn component<T: Any>(&self, type_tag: &TypeTag) -> Option<&T> {
        self.components.get(type_tag)?.downcast_ref::<T>()
    }

    pub fn component_mut<T: Any>(&mut self, type_tag: &TypeTag) -> Option<&mut T> {
        self.components.get_mut(type_tag)?.downcast_mut::<T>()
    }

    /// Returns the component stored under `type_tag`, inserting the default
    /// first if absent or of another type
    pub fn component_or_default<T: Any + Default>(&mut self, type_tag: TypeTag) -> &mut T {
        let entry = self
            .components
            .entry(type_tag)
            .or_insert_with(|| Box::new(T::default()));
        if !entry.is::<T>() {
            *entry = Box::new(T::default());
        }
        // is::<T>() was just established
        match entry.downcast_mut::<T>() {
            Some(component) => component,
            None => unreachable!("component type was replaced above"),
        }
    }

    pub fn remove_component(&mut self, type_tag: &TypeTag) -> bool {
        self.components.remove(type_tag).is_some()
    }

    pub fn has_component(&self, type_tag: &TypeTag) -> bool {
        self.components.contains_key(type_tag)
    }

    pub fn component_tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.components.keys().copied().collect();
        tags.sort();
        tags
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Arena of mirror nodes indexed by object identity
pub struct MirrorTable {
    nodes: HashMap<ObjectId, MirrorNode>,
}

impl MirrorTable {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub fn get(&self, identity: &ObjectId) -> Option<&MirrorNode> {
        self.nodes.get(identity)
    }

    pub fn get_mut(&mut self, identity: &ObjectId) -> Option<&mut MirrorNode> {
        self.nodes.get_mut(identity)
    }

    pub fn contains(&self, identity: &ObjectId) -> bool {
        self.nodes.contains_key(identity)
    }

    /// Resolves a node, creating it under the root on first reference
    pub fn get_or_create(&mut self, identity: ObjectId) -> &mut MirrorNode {
        self.nodes.entry(identity).or_insert_with(|| {
            info!("MirrorTable: creating mirror {}", identity);
            MirrorNode::new(identity)
        })
    }

    /// Makes sure the parent a node refers to exists, creating it on first
    /// reference
    pub fn link_parent(&mut self, identity: &ObjectId) {
        let Some(parent) = self.nodes.get(identity).and_then(|node| node.parent()) else {
            return;
        };
        self.get_or_create(parent);
    }

    /// Removes a node. Its children are reattached to the root.
    pub fn remove(&mut self, identity: &ObjectId) -> Option<MirrorNode> {
        let node = self.nodes.remove(identity)?;
        for child in self.nodes.values_mut() {
            if child.parent == Some(*identity) {
                child.parent = None;
            }
        }
        info!("MirrorTable: removed mirror {}", identity);
        Some(node)
    }

    pub fn children(&self, identity: &ObjectId) -> Vec<ObjectId> {
        let mut children: Vec<ObjectId> = self
            .nodes
            .values()
            .filter(|node| node.parent == Some(*identity))
            .map(|node| node.identity)
            .collect();
        children.sort();
        children
    }

    /// Nodes attached directly to the synchronization root
    pub fn roots(&self) -> Vec<ObjectId> {
        let mut roots: Vec<ObjectId> = self
            .nodes
            .values()
            .filter(|node| node.parent.is_none())
            .map(|node| node.identity)
            .collect();
        roots.sort();
        roots
    }

    pub fn identities(&self) -> Vec<ObjectId> {
        let mut identities: Vec<ObjectId> = self.nodes.keys().copied().collect();
        identities.sort();
        identities
    }

    pub fn iter(&self) -> hash_map::Values<'_, ObjectId, MirrorNode> {
        self.nodes.values()
    }

    pub fn iter_mut(&mut self) -> hash_map::ValuesMut<'_, ObjectId, MirrorNode> {
        self.nodes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn drain(&mut self) -> Vec<MirrorNode> {
        self.nodes.drain().map(|(_, node)| node).collect()
    }
}

impl Default for MirrorTable {
    fn default() -> Self {
        Self::new()
    }
}
