//! # Scenebridge Client
//! Connects a live reflectable scene to a remote node-graph tool as a
//! client: mirrors the scene hierarchy outward, applies remote edits and
//! streamed values inward, and keeps portals bound across world reloads.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use scenebridge_shared::{
        constants, ClearFlags, Container, FrameNumber, NodeMessage, ObjectKey, OutgoingMessage,
        PartialNodeUpdate, PartialPinUpdate, PinContents, PinMessage, SceneMutType, SceneRefType,
        ShowAs,
    };
}

mod actor_manager;
mod custom_functions;
mod engine;
mod error;
mod events;
mod input_sender;
mod session;
mod transport;

pub use actor_manager::{SpawnedActor, SpawnedActorManager};
pub use custom_functions::{
    CustomFunction, CustomFunctionKind, CustomFunctions, ACTOR_LIST_PIN, ALWAYS_UPDATE_PIN,
    RELOAD_LEVEL, REFRESH_SCENE_OUTLINER, SPAWN_ACTOR,
};
pub use engine::{
    bridge_config::BridgeConfig,
    context_menu::{ACTOR_MENU, PORTAL_MENU},
    SyncEngine, BINDING_IN_PROGRESS, OBJECT_NOT_FOUND_IN_SCENE, OBJECT_NOT_FOUND_IN_WORLD,
};
pub use error::BridgeError;
pub use events::InboundEvent;
pub use input_sender::InputSender;
pub use session::{ExecutionState, SessionControl, SessionState};
pub use transport::Transport;
