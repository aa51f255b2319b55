use std::{collections::BTreeMap, ops::BitOr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    messages::{node::NodeMessage, pin::PinMessage},
    types::ShowAs,
};

/// Which parts of a node the remote side drops before applying an update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearFlags(u8);

impl ClearFlags {
    pub const NONE: ClearFlags = ClearFlags(0);
    pub const CLEAR_PINS: ClearFlags = ClearFlags(1 << 0);
    pub const CLEAR_FUNCTIONS: ClearFlags = ClearFlags(1 << 1);
    pub const CLEAR_NODES: ClearFlags = ClearFlags(1 << 2);
    pub const CLEAR_METADATA: ClearFlags = ClearFlags(1 << 3);
    pub const ANY: ClearFlags = ClearFlags(0b1111);

    pub fn contains(&self, other: ClearFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: ClearFlags) -> ClearFlags {
        ClearFlags(self.0 & !other.0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for ClearFlags {
    type Output = ClearFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ClearFlags(self.0 | rhs.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanState {
    pub is_orphan: bool,
    pub message: String,
}

/// Changes a single existing pin in place
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialPinUpdate {
    pub pin_id: Uuid,
    /// New redirect target, for portal pins
    pub source_id: Option<Uuid>,
    pub orphan_state: Option<OrphanState>,
}

impl PartialPinUpdate {
    pub fn orphan(pin_id: Uuid, message: &str) -> Self {
        Self {
            pin_id,
            source_id: None,
            orphan_state: Some(OrphanState {
                is_orphan: true,
                message: message.to_string(),
            }),
        }
    }

    pub fn restored(pin_id: Uuid, source_id: Option<Uuid>) -> Self {
        Self {
            pin_id,
            source_id,
            orphan_state: Some(OrphanState {
                is_orphan: false,
                message: String::new(),
            }),
        }
    }
}

/// The delta message: everything that changes about one node at once
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartialNodeUpdate {
    pub node_id: Uuid,
    pub clear_flags: ClearFlags,
    pub pins_to_add: Vec<PinMessage>,
    pub pins_to_delete: Vec<Uuid>,
    pub pin_updates: Vec<PartialPinUpdate>,
    pub nodes_to_add: Vec<NodeMessage>,
    pub nodes_to_delete: Vec<Uuid>,
    pub functions_to_add: Vec<NodeMessage>,
    pub metadata: BTreeMap<String, String>,
}

impl PartialNodeUpdate {
    pub fn new(node_id: Uuid) -> Self {
        Self {
            node_id,
            clear_flags: ClearFlags::NONE,
            pins_to_add: Vec::new(),
            pins_to_delete: Vec::new(),
            pin_updates: Vec::new(),
            nodes_to_add: Vec::new(),
            nodes_to_delete: Vec::new(),
            functions_to_add: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_clear_flags(mut self, clear_flags: ClearFlags) -> Self {
        self.clear_flags = clear_flags;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clear_flags == ClearFlags::NONE
            && self.pins_to_add.is_empty()
            && self.pins_to_delete.is_empty()
            && self.pin_updates.is_empty()
            && self.nodes_to_add.is_empty()
            && self.nodes_to_delete.is_empty()
            && self.functions_to_add.is_empty()
            && self.metadata.is_empty()
    }
}

/// Publishes a named list of strings for combo boxes on the remote UI
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringListUpdate {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuItem {
    pub display_name: String,
    pub command: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextMenuRequest {
    pub item_id: Uuid,
    pub position: (f32, f32),
    pub instigator: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextMenuUpdate {
    pub item_id: Uuid,
    pub position: (f32, f32),
    pub instigator: u32,
    pub items: Vec<ContextMenuItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuAction {
    pub item_id: Uuid,
    pub command: u32,
}

/// Everything the bridge sends to the remote graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OutgoingMessage {
    PartialNodeUpdate(PartialNodeUpdate),
    PinValueChanged { pin_id: Uuid, data: Vec<u8> },
    PinShowAsChanged { pin_id: Uuid, show_as: ShowAs },
    StringListUpdate(StringListUpdate),
    ContextMenuUpdate(ContextMenuUpdate),
}
