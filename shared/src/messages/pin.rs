use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CanShowAs, ShowAs};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualizerKind {
    ComboBox,
}

/// Rendering hint for the remote UI, e.g. a combo box fed by a string list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visualizer {
    pub kind: VisualizerKind,
    pub name: String,
}

impl Visualizer {
    pub fn combo_box(list_name: &str) -> Self {
        Self {
            kind: VisualizerKind::ComboBox,
            name: list_name.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinContents {
    /// A plain value pin
    Job,
    /// A redirect to the pin `source_id`
    Portal { source_id: Uuid },
    /// A parameter of a function node
    FunctionJob,
}

/// A pin as it travels to and from the remote graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinMessage {
    pub id: Uuid,
    pub display_name: String,
    pub type_name: String,
    pub show_as: ShowAs,
    pub can_show_as: CanShowAs,
    pub category: String,
    pub visualizer: Option<Visualizer>,
    pub data: Vec<u8>,
    pub default_value: Vec<u8>,
    pub min: Vec<u8>,
    pub max: Vec<u8>,
    pub read_only: bool,
    pub advanced: bool,
    pub transient: bool,
    pub metadata: BTreeMap<String, String>,
    pub contents: PinContents,
}

impl PinMessage {
    pub fn new(id: Uuid, display_name: &str, type_name: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            type_name: type_name.to_string(),
            show_as: ShowAs::Property,
            can_show_as: CanShowAs::InputOutputProperty,
            category: String::new(),
            visualizer: None,
            data: Vec::new(),
            default_value: Vec::new(),
            min: Vec::new(),
            max: Vec::new(),
            read_only: false,
            advanced: false,
            transient: true,
            metadata: BTreeMap::new(),
            contents: PinContents::Job,
        }
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn is_portal(&self) -> bool {
        matches!(self.contents, PinContents::Portal { .. })
    }
}
