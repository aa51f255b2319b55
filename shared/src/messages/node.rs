use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages::pin::PinMessage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeContents {
    /// A node holding child nodes
    Graph,
    /// An invokable function node
    Job,
}

/// A node of the remote graph, either mirrored from the tree or engine-defined
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeMessage {
    pub id: Uuid,
    pub name: String,
    pub class_name: String,
    pub contents: NodeContents,
    pub category: String,
    pub description: String,
    pub pins: Vec<PinMessage>,
    pub functions: Vec<NodeMessage>,
    pub children: Vec<NodeMessage>,
    pub metadata: BTreeMap<String, String>,
}

impl NodeMessage {
    pub fn new(id: Uuid, name: &str, class_name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            class_name: class_name.to_string(),
            contents: NodeContents::Graph,
            category: String::new(),
            description: String::new(),
            pins: Vec::new(),
            functions: Vec::new(),
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn function(id: Uuid, name: &str, class_name: &str) -> Self {
        let mut node = Self::new(id, name, class_name);
        node.contents = NodeContents::Job;
        node
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Whether the node (or anything beneath it) carries pins or children
    pub fn has_content(&self) -> bool {
        !self.pins.is_empty() || !self.children.is_empty()
    }
}
