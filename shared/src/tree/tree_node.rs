use std::collections::BTreeMap;

use uuid::Uuid;

use crate::reference::{actor_reference::ActorReference, component_reference::ComponentReference};

#[derive(Clone, Debug)]
pub enum TreeNodeKind {
    Folder,
    Actor(ActorReference),
    Component(ComponentReference),
}

/// One node of the mirrored hierarchy
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub id: Uuid,
    pub name: String,
    pub class_name: String,
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,
    pub metadata: BTreeMap<String, String>,
    pub needs_reload: bool,
    pub kind: TreeNodeKind,
    /// pin ids, flattened, in creation order
    pub properties: Vec<Uuid>,
    pub functions: Vec<Uuid>,
}

impl TreeNode {
    pub fn folder(id: Uuid, name: &str, parent: Option<Uuid>) -> Self {
        Self::new(id, name, "Folder", parent, TreeNodeKind::Folder)
    }

    pub fn new(id: Uuid, name: &str, class_name: &str, parent: Option<Uuid>, kind: TreeNodeKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            class_name: class_name.to_string(),
            parent,
            children: Vec::new(),
            metadata: BTreeMap::new(),
            needs_reload: false,
            kind,
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Folder)
    }

    pub fn as_actor(&self) -> Option<&ActorReference> {
        match &self.kind {
            TreeNodeKind::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorReference> {
        match &mut self.kind {
            TreeNodeKind::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_component_mut(&mut self) -> Option<&mut ComponentReference> {
        match &mut self.kind {
            TreeNodeKind::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
