use std::collections::BTreeMap;

use log::{info, warn};
use uuid::Uuid;

use scenebridge_shared::{
    ClearFlags, ObjectKey, OutgoingMessage, PartialNodeUpdate, SceneMutType, SceneRefType, TreeNodeKind,
};

use crate::{engine::SyncEngine, error::BridgeError};

impl SyncEngine {
    /// Mirrors every actor of the live model's current scope. Without
    /// `reset`, nodes of actors that are gone are removed and the rest kept;
    /// with it, the tree, properties, functions, portals and deferred adds
    /// are dropped first.
    pub fn rescan<W: SceneRefType>(&mut self, world: &W, reset: bool) {
        if reset {
            self.reset_mirror();
        } else {
            for gone in self.tree.diff_actors(world).removed {
                self.send_actor_deleted(&gone);
            }
        }
        self.actors.re_add_to_tree(world, &mut self.tree);

        for actor in world.actors() {
            let parent_guid = world
                .outliner_parent(actor)
                .and_then(|parent| world.guid(parent));
            if let Some(parent_guid) = parent_guid {
                self.tree.add_pending_child(parent_guid, actor);
                continue;
            }
            if let Err(err) = self.tree.add_actor(world, actor) {
                warn!("Cannot mirror actor: {}", err);
            }
        }
        info!("Scene rescanned, {} nodes mirrored", self.tree.len());
    }

    pub(crate) fn reset_mirror(&mut self) {
        self.deferred_actors.clear();
        self.tree.clear();
        self.properties.clear();
        self.functions.clear();
        self.portals.clear();
    }

    /// Sends a node's full current state. For the root, `reset_pins` also
    /// replaces the portal pins on the remote side.
    pub fn send_node_update(&mut self, id: &Uuid, reset_pins: bool) {
        let root = self.tree.root_id();
        let Some(message) = self.serialize_node(id) else {
            warn!("Cannot send update for unknown node {}", id);
            return;
        };

        if *id == root {
            let mut update = PartialNodeUpdate::new(root);
            if reset_pins {
                update.clear_flags = ClearFlags::ANY.without(ClearFlags::CLEAR_METADATA);
                update.pins_to_add = self
                    .portals
                    .ids()
                    .iter()
                    .filter_map(|portal| self.portals.serialize(portal, &self.properties))
                    .collect();
            } else {
                update.clear_flags = ClearFlags::CLEAR_FUNCTIONS | ClearFlags::CLEAR_NODES;
            }
            update.functions_to_add = self
                .custom_functions
                .serialize(self.always_update_on_actor_spawn);
            update.nodes_to_add = message.children;
            update.metadata = message.metadata;
            self.send_node_update_message(update);
            return;
        }

        self.publish_string_lists(id);
        let update = PartialNodeUpdate {
            clear_flags: ClearFlags::CLEAR_PINS
                | ClearFlags::CLEAR_FUNCTIONS
                | ClearFlags::CLEAR_NODES
                | ClearFlags::CLEAR_METADATA,
            pins_to_add: message.pins,
            functions_to_add: message.functions,
            nodes_to_add: message.children,
            metadata: message.metadata,
            ..PartialNodeUpdate::new(*id)
        };
        self.send_node_update_message(update);
    }

    /// Live-model spawn notification. Deferred until the next outliner
    /// refresh unless always-update is on.
    pub fn on_actor_spawned<W: SceneRefType>(&mut self, world: &W, actor: ObjectKey) {
        let Some(guid) = world.guid(actor) else {
            return;
        };
        if self.tree.contains(&guid) {
            return;
        }
        if self.always_update_on_actor_spawn {
            self.send_actor_added(world, actor);
        } else if !self.deferred_actors.contains(&actor) {
            self.deferred_actors.push(actor);
        }
    }

    /// Live-model destroy notification, applied immediately
    pub fn on_actor_destroyed(&mut self, actor: ObjectKey) {
        self.deferred_actors.retain(|deferred| *deferred != actor);
        if let Some(node) = self.tree.node_of_object(actor) {
            self.send_actor_deleted(&node);
        }
    }

    /// Adds every deferred spawn that is still alive to the tree
    pub fn flush_deferred_actors<W: SceneRefType>(&mut self, world: &W) {
        let deferred = std::mem::take(&mut self.deferred_actors);
        for actor in deferred {
            if !world.is_alive(actor) {
                continue;
            }
            let known = world
                .guid(actor)
                .map(|guid| self.tree.contains(&guid))
                .unwrap_or(true);
            if !known {
                self.send_actor_added(world, actor);
            }
        }
    }

    /// Mirrors a new actor and announces it to its parent node
    pub(crate) fn send_actor_added<W: SceneRefType>(&mut self, world: &W, actor: ObjectKey) -> Option<Uuid> {
        let parent_guid = world
            .outliner_parent(actor)
            .and_then(|parent| world.guid(parent))
            .filter(|guid| self.tree.contains(guid));

        if let Some(parent_guid) = parent_guid {
            let parent_unpopulated = self
                .tree
                .get_node(&parent_guid)
                .map(|parent| parent.needs_reload)
                .unwrap_or(true);
            if parent_unpopulated {
                // spliced in when the parent is populated
                self.tree.add_pending_child(parent_guid, actor);
                return None;
            }
            let node = match self.tree.add_actor_under(world, &parent_guid, actor) {
                Ok(node) => node,
                Err(err) => {
                    warn!("Cannot add actor under {}: {}", parent_guid, err);
                    return None;
                }
            };
            let message = self.serialize_node(&node)?;
            let mut update = PartialNodeUpdate::new(parent_guid);
            update.nodes_to_add.push(message);
            self.send_node_update_message(update);
            return Some(node);
        }

        match self.tree.add_actor(world, actor) {
            Ok(insertion) => {
                self.send_insertions(&[insertion]);
                Some(insertion.node)
            }
            Err(err) => {
                warn!("Cannot add actor: {}", err);
                None
            }
        }
    }

    /// Drops a node's subtree together with its properties, functions and
    /// every portal sourced from them
    pub(crate) fn send_actor_deleted(&mut self, id: &Uuid) {
        let Some(parent) = self.tree.get_node(id).and_then(|node| node.parent) else {
            return;
        };
        let removed = self.tree.remove_node(id);

        let mut doomed = Vec::new();
        for node in &removed {
            for property in &node.properties {
                doomed.extend(self.properties.remove(property));
            }
            for function in &node.functions {
                doomed.extend(self.functions.remove(function, &mut self.properties));
            }
        }
        let portals = self.portals.remove_for_sources(&doomed);
        let mut root_update = PartialNodeUpdate::new(self.tree.root_id());
        for portal in &portals {
            self.orphaned_pins.remove(&portal.id());
            root_update.pins_to_delete.push(portal.id());
        }
        self.send_node_update_message(root_update);

        let mut parent_update = PartialNodeUpdate::new(parent);
        parent_update.nodes_to_delete.push(*id);
        self.send_node_update_message(parent_update);
        info!(
            "Removed node {} ({} nodes, {} properties, {} portals)",
            id,
            removed.len(),
            doomed.len(),
            portals.len()
        );
    }

    /// Spawns an actor for the remote side and announces it
    pub fn spawn_actor<W: SceneMutType>(
        &mut self,
        world: &mut W,
        tag: &str,
        world_coordinates: bool,
        metadata: BTreeMap<String, String>,
    ) -> Result<ObjectKey, BridgeError> {
        let spawned =
            self.actors
                .spawn_actor(world, &mut self.tree, tag, world_coordinates, metadata)?;
        self.send_insertions(&spawned.insertions);
        Ok(spawned.actor)
    }

    pub fn spawn_widget<W: SceneMutType>(
        &mut self,
        world: &mut W,
        name: &str,
    ) -> Result<ObjectKey, BridgeError> {
        let spawned = self.actors.spawn_widget(world, &mut self.tree, name)?;
        self.send_insertions(&spawned.insertions);
        Ok(spawned.actor)
    }

    /// Sends the enum variant lists used by a node's pins
    fn publish_string_lists(&mut self, id: &Uuid) {
        let Some(node) = self.tree.get_node(id) else {
            return;
        };
        if matches!(node.kind, TreeNodeKind::Folder) {
            return;
        }
        let lists: Vec<_> = node
            .properties
            .iter()
            .filter_map(|property| self.properties.get(property))
            .filter_map(|property| property.string_list())
            .collect();
        for list in lists {
            self.send(OutgoingMessage::StringListUpdate(list));
        }
    }
}
