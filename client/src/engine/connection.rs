use log::{error, info};
use uuid::Uuid;

use scenebridge_shared::{
    NodeMessage, OutgoingMessage, SceneMutType, SceneRefType, StringListUpdate,
};

use crate::engine::{SyncEngine, BINDING_IN_PROGRESS};

impl SyncEngine {
    /// Handshake finished: adopt the remote node's id as the tree root, send
    /// the whole tree, and adopt the remote graph if it already has content
    pub fn on_connected<W: SceneMutType>(&mut self, world: &mut W, app_node: &NodeMessage) {
        info!("Connected to remote graph {} ({})", app_node.name, app_node.id);
        self.tree.set_root_id(app_node.id);
        self.session.connect();

        if !app_node.pins.is_empty() {
            let pins: Vec<Uuid> = app_node.pins.iter().map(|pin| pin.id).collect();
            self.orphan_root_pins(&pins, BINDING_IN_PROGRESS);
        }

        self.rescan(&*world, false);
        let root = self.tree.root_id();
        self.send_node_update(&root, false);
        self.publish_catalogs(&*world);

        if app_node.has_content() {
            self.on_node_imported(world, app_node);
        }
    }

    /// Local state survives; queued input does not
    pub fn on_disconnected(&mut self) {
        self.session.disconnect();
        match self.inputs.reset() {
            Ok(dropped) => info!("Disconnected, dropped {} queued values", dropped),
            Err(err) => error!("Disconnected, could not drain input queue: {}", err),
        }
    }

    /// The bridge's node was deleted remotely: spawned actors go away and the
    /// world is reloaded
    pub fn on_node_removed<W: SceneMutType>(&mut self, world: &mut W) {
        info!("Remote node removed, clearing spawned actors");
        self.actors.clear_actors(world, &mut self.tree);
        self.deferred_actors.clear();
        world.request_world_reload();
    }

    /// Publishes the spawnable-actor and widget catalogs as string lists
    pub fn publish_catalogs<W: SceneRefType>(&mut self, world: &W) {
        let mut actors = world.spawn_tags();
        actors.push(self.actors.parent_transform_tag().to_string());
        actors.sort();
        actors.dedup();
        let actor_list = StringListUpdate {
            name: self.config.actor_list_name.clone(),
            values: actors,
        };
        self.send(OutgoingMessage::StringListUpdate(actor_list));

        let mut widgets = world.widget_names();
        widgets.sort();
        let widget_list = StringListUpdate {
            name: self.config.widget_list_name.clone(),
            values: widgets,
        };
        self.send(OutgoingMessage::StringListUpdate(widget_list));
    }
}
