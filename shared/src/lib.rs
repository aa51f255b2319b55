//! # Scenebridge Shared
//! Property proxies, the tree mirror, stable references, portals and the
//! pending input queue used by the scenebridge client.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod constants;
mod function;
mod id_generator;
mod input_queue;
mod messages;
mod portal;
mod property;
mod reference;
mod tree;
mod types;
mod world;

pub use function::{
    error::FunctionError,
    function_manager::{FunctionBinding, FunctionManager},
};
pub use id_generator::IdGenerator;
pub use input_queue::{
    error::QueueError,
    pending_input_queue::{InputQueueConfig, PendingInputQueue},
};
pub use messages::{
    node::{NodeContents, NodeMessage},
    pin::{PinContents, PinMessage, Visualizer, VisualizerKind},
    update::{
        ClearFlags, ContextMenuAction, ContextMenuItem, ContextMenuRequest, ContextMenuUpdate,
        OrphanState, OutgoingMessage, PartialNodeUpdate, PartialPinUpdate, StringListUpdate,
    },
};
pub use portal::{error::PortalError, portal::Portal, portal_manager::PortalManager};
pub use property::{
    error::PropertyError, factory::PropertyFactory, location::PropertyLocation,
    property::Property, property_kind::PropertyKind, property_manager::PropertyManager,
    track::Track,
};
pub use reference::{
    actor_reference::ActorReference, component_reference::ComponentReference,
    error::ReferenceError,
};
pub use tree::{
    error::TreeError,
    scene_tree::{split_folder_path, Insertion, SceneTree, TreeDiff},
    tree_node::{TreeNode, TreeNodeKind},
};
pub use types::{CanShowAs, FrameNumber, ObjectKey, ShowAs};
pub use world::{
    container::{resolve_container_path, Container, ParameterBlock},
    error::SceneError,
    reflection::{
        FieldDescriptor, FieldFlags, FieldKind, FunctionDescriptor, FunctionFlags, ObjectKind,
    },
    world_type::{SceneMutType, SceneRefType},
};
