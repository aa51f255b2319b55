use std::{collections::HashMap, sync::Arc};

use log::{error, warn};
use uuid::Uuid;

use scenebridge_shared::{
    FrameNumber, FunctionManager, IdGenerator, Insertion, NodeMessage, ObjectKey,
    OutgoingMessage, PartialNodeUpdate, PartialPinUpdate, PendingInputQueue, PortalManager,
    PropertyManager, SceneMutType, SceneTree, ShowAs,
};

use crate::{
    actor_manager::SpawnedActorManager,
    custom_functions::CustomFunctions,
    events::InboundEvent,
    input_sender::InputSender,
    session::{SessionControl, SessionState},
    transport::Transport,
};

pub mod bridge_config;
pub mod context_menu;
mod connection;
mod frame;
mod functions;
mod import;
mod pins;
mod scan;
mod selection;
mod world_change;

use bridge_config::BridgeConfig;

pub const BINDING_IN_PROGRESS: &str = "Binding in progress";
pub const OBJECT_NOT_FOUND_IN_SCENE: &str = "Object not found in the scene";
pub const OBJECT_NOT_FOUND_IN_WORLD: &str = "Object not found in the world";

/// Keeps a live scene and one remote node graph in sync.
///
/// Every method runs on the simulation context. The network context only
/// reaches the engine through an [`InputSender`], which feeds the pending
/// input queue and the session state.
pub struct SyncEngine {
    config: BridgeConfig,
    ids: IdGenerator,
    transport: Box<dyn Transport>,
    session: SessionControl,
    inputs: Arc<PendingInputQueue>,
    // Mirror
    tree: SceneTree,
    properties: PropertyManager,
    functions: FunctionManager,
    portals: PortalManager,
    // Bridge-owned
    custom_functions: CustomFunctions,
    actors: SpawnedActorManager,
    deferred_actors: Vec<ObjectKey>,
    always_update_on_actor_spawn: bool,
    /// root pins currently reported orphaned, with the reason sent
    orphaned_pins: HashMap<Uuid, String>,
    frame: FrameNumber,
}

impl SyncEngine {
    /// Create a new SyncEngine
    pub fn new<T: Transport + 'static>(config: BridgeConfig, transport: T) -> Self {
        let ids = IdGenerator::new(&config.app_key);
        let inputs = Arc::new(PendingInputQueue::new(config.input_queue()));
        Self {
            tree: SceneTree::new(&config.app_key, ids.clone()),
            custom_functions: CustomFunctions::new(&ids, &config),
            actors: SpawnedActorManager::new(&config),
            always_update_on_actor_spawn: config.always_update_on_actor_spawn,
            transport: Box::new(transport),
            session: SessionControl::new(),
            inputs,
            properties: PropertyManager::new(),
            functions: FunctionManager::new(),
            portals: PortalManager::new(),
            deferred_actors: Vec::new(),
            orphaned_pins: HashMap::new(),
            frame: 0,
            ids,
            config,
        }
    }

    /// Handle for the network context
    pub fn input_sender(&self) -> InputSender {
        InputSender::new(self.inputs.clone(), self.session.clone())
    }

    pub fn session_control(&self) -> SessionControl {
        self.session.clone()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn root_id(&self) -> Uuid {
        self.tree.root_id()
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn properties(&self) -> &PropertyManager {
        &self.properties
    }

    pub fn functions(&self) -> &FunctionManager {
        &self.functions
    }

    pub fn portals(&self) -> &PortalManager {
        &self.portals
    }

    pub fn custom_functions(&self) -> &CustomFunctions {
        &self.custom_functions
    }

    pub fn spawned_actors(&self) -> &SpawnedActorManager {
        &self.actors
    }

    pub fn inputs(&self) -> &PendingInputQueue {
        &self.inputs
    }

    pub fn orphaned_pins(&self) -> &HashMap<Uuid, String> {
        &self.orphaned_pins
    }

    pub fn orphan_reason(&self, pin_id: &Uuid) -> Option<&str> {
        self.orphaned_pins.get(pin_id).map(String::as_str)
    }

    pub fn always_update_on_actor_spawn(&self) -> bool {
        self.always_update_on_actor_spawn
    }

    pub fn deferred_actor_count(&self) -> usize {
        self.deferred_actors.len()
    }

    pub fn frame(&self) -> FrameNumber {
        self.frame
    }

    /// Routes one inbound event to its handler
    pub fn handle_event<W: SceneMutType>(&mut self, world: &mut W, event: InboundEvent) {
        match event {
            InboundEvent::Connected { app_node } => self.on_connected(world, &app_node),
            InboundEvent::Disconnected => self.on_disconnected(),
            InboundEvent::NodeSelected { node_id } => self.on_node_selected(&*world, node_id),
            InboundEvent::NodeValueChanged {
                pin_id,
                data,
                reset,
                frame,
            } => {
                if let Err(err) = self
                    .input_sender()
                    .on_node_value_changed(pin_id, data, reset, frame)
                {
                    error!("Dropping value for pin {}: {}", pin_id, err);
                }
            }
            InboundEvent::PinShowAsChanged { pin_id, show_as } => {
                self.on_pin_show_as_changed(&*world, pin_id, show_as)
            }
            InboundEvent::FunctionCalled { node_id, function } => {
                self.on_function_called(world, node_id, &function)
            }
            InboundEvent::ContextMenuRequested(request) => self.on_context_menu_requested(&request),
            InboundEvent::ContextMenuCommand(action) => self.on_context_menu_command(world, &action),
            InboundEvent::NodeImported { app_node } => self.on_node_imported(world, &app_node),
            InboundEvent::NodeRemoved => self.on_node_removed(world),
            InboundEvent::StateChanged(state) => self.session.on_state_changed(state),
            InboundEvent::LoadNodesOnPaths { paths } => {
                self.on_load_nodes_on_paths(&*world, &paths)
            }
        }
    }

    // Outbound

    fn send(&mut self, message: OutgoingMessage) {
        if !self.is_connected() {
            return;
        }
        self.transport.send(message);
    }

    fn send_node_update_message(&mut self, update: PartialNodeUpdate) {
        if update.is_empty() {
            return;
        }
        self.send(OutgoingMessage::PartialNodeUpdate(update));
    }

    fn send_pin_value_changed(&mut self, pin_id: Uuid, data: Vec<u8>) {
        if data.is_empty() {
            return;
        }
        self.send(OutgoingMessage::PinValueChanged { pin_id, data });
    }

    fn send_pin_show_as_changed(&mut self, pin_id: Uuid, show_as: ShowAs) {
        self.send(OutgoingMessage::PinShowAsChanged { pin_id, show_as });
    }

    fn send_root_pin_updates(&mut self, pin_updates: Vec<PartialPinUpdate>) {
        let mut update = PartialNodeUpdate::new(self.tree.root_id());
        update.pin_updates = pin_updates;
        self.send_node_update_message(update);
    }

    /// Marks root pins orphaned, locally and on the remote side
    fn orphan_root_pins(&mut self, pin_ids: &[Uuid], reason: &str) {
        let mut updates = Vec::new();
        for pin_id in pin_ids {
            self.orphaned_pins.insert(*pin_id, reason.to_string());
            updates.push(PartialPinUpdate::orphan(*pin_id, reason));
        }
        self.send_root_pin_updates(updates);
    }

    /// Sends freshly inserted subtrees to their parents. An insertion nested
    /// inside one sent earlier in the same batch is already part of it.
    fn send_insertions(&mut self, insertions: &[Insertion]) {
        let mut sent: Vec<Uuid> = Vec::new();
        for insertion in insertions {
            if self.is_inside_any(&insertion.subtree_root, &sent) {
                continue;
            }
            let Some(parent) = self
                .tree
                .get_node(&insertion.subtree_root)
                .and_then(|node| node.parent)
            else {
                warn!("Inserted node {} has no parent", insertion.subtree_root);
                continue;
            };
            let Some(message) = self.serialize_node(&insertion.subtree_root) else {
                continue;
            };
            let mut update = PartialNodeUpdate::new(parent);
            update.nodes_to_add.push(message);
            self.send_node_update_message(update);
            sent.push(insertion.subtree_root);
        }
    }

    fn is_inside_any(&self, id: &Uuid, roots: &[Uuid]) -> bool {
        let mut next = Some(*id);
        while let Some(current) = next {
            if roots.contains(&current) {
                return true;
            }
            next = self.tree.get_node(&current).and_then(|node| node.parent);
        }
        false
    }

    fn serialize_node(&self, id: &Uuid) -> Option<NodeMessage> {
        self.tree.serialize_node(id, &self.properties, &self.functions)
    }
}
