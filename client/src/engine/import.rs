use std::collections::{BTreeMap, HashMap};

use log::{info, warn};
use uuid::Uuid;

use scenebridge_shared::{
    constants::{META_ACTOR_GUID, META_DO_NOT_ATTACH_TO_REALITY_PARENT, META_SPAWN_TAG, META_UMG_TAG},
    NodeMessage, ObjectKey, PartialPinUpdate, PinMessage, PropertyLocation, ReferenceError,
    SceneMutType,
};

use crate::{
    engine::{SyncEngine, OBJECT_NOT_FOUND_IN_SCENE},
    error::BridgeError,
};

/// A pin of the saved graph, with the location of the property it showed
struct SavedPin {
    actor_id: Uuid,
    location: PropertyLocation,
    pin: PinMessage,
}

struct SavedSpawn {
    old_guid: Uuid,
    tag: String,
    world_coordinates: bool,
    metadata: BTreeMap<String, String>,
}

struct SavedWidget {
    old_guid: Uuid,
    name: String,
}

/// Everything reconciliation needs from a saved graph, gathered depth-first
#[derive(Default)]
struct SavedGraph {
    pins: Vec<SavedPin>,
    spawns: Vec<SavedSpawn>,
    widgets: Vec<SavedWidget>,
}

impl SavedGraph {
    fn collect(app_node: &NodeMessage) -> Self {
        let mut saved = SavedGraph::default();
        let mut stack = vec![app_node];
        while let Some(node) = stack.pop() {
            let old_guid = node
                .metadata(META_ACTOR_GUID)
                .and_then(|guid| Uuid::parse_str(guid).ok());
            if let Some(old_guid) = old_guid {
                if let Some(tag) = node.metadata(META_SPAWN_TAG) {
                    saved.spawns.push(SavedSpawn {
                        old_guid,
                        tag: tag.to_string(),
                        world_coordinates: node.metadata(META_DO_NOT_ATTACH_TO_REALITY_PARENT)
                            == Some("true"),
                        metadata: node.metadata.clone(),
                    });
                } else if let Some(name) = node.metadata(META_UMG_TAG) {
                    saved.widgets.push(SavedWidget {
                        old_guid,
                        name: name.to_string(),
                    });
                }
            }

            for pin in &node.pins {
                let Some(location) = PropertyLocation::from_metadata(&pin.metadata) else {
                    continue;
                };
                saved.pins.push(SavedPin {
                    actor_id: location.actor_id.unwrap_or(node.id),
                    location,
                    pin: pin.clone(),
                });
            }
            stack.extend(node.children.iter().rev());
        }
        saved
    }
}

impl SyncEngine {
    /// Adopts a saved graph pushed by the remote side.
    ///
    /// Runs once, start to end: root pins are marked orphaned, remotely
    /// spawned actors are respawned (the anchor first), saved values are
    /// written back, the tree is rescanned and sent, and saved portals are
    /// rebuilt with their old ids. Pins that cannot be resolved stay
    /// orphaned with the reason attached.
    pub fn on_node_imported<W: SceneMutType>(&mut self, world: &mut W, app_node: &NodeMessage) {
        info!("Importing graph {} ({})", app_node.name, app_node.id);
        self.tree.set_root_id(app_node.id);
        let root = self.tree.root_id();

        let root_pins: Vec<Uuid> = app_node.pins.iter().map(|pin| pin.id).collect();
        self.orphan_root_pins(&root_pins, OBJECT_NOT_FOUND_IN_SCENE);

        let saved = SavedGraph::collect(app_node);
        self.reset_mirror();
        self.actors.re_add_to_tree(&*world, &mut self.tree);

        let actor_map = self.respawn_actors(world, &saved);

        for saved_pin in &saved.pins {
            let Some(actor) = actor_map.get(&saved_pin.actor_id).copied() else {
                continue;
            };
            match saved_pin
                .location
                .find_or_create(&*world, &self.ids, &mut self.properties, actor)
            {
                Ok(property_id) => self.restore_property(world, property_id, &saved_pin.pin),
                Err(err) => warn!("Cannot restore pin {}: {}", saved_pin.pin.display_name, err),
            }
        }

        self.rescan(&*world, false);
        self.send_node_update(&root, false);

        let mut pin_updates = Vec::new();
        let mut restored = 0;
        for saved_pin in saved.pins.iter().filter(|saved_pin| saved_pin.pin.is_portal()) {
            let portal_id = saved_pin.pin.id;
            match self.restore_portal(world, &actor_map, saved_pin) {
                Ok(property_id) => {
                    self.orphaned_pins.remove(&portal_id);
                    pin_updates.push(PartialPinUpdate::restored(portal_id, Some(property_id)));
                    restored += 1;
                }
                Err(err) => {
                    let reason = format!("{}: {}", OBJECT_NOT_FOUND_IN_SCENE, err);
                    warn!("Portal {} stays orphaned: {}", saved_pin.pin.display_name, reason);
                    pin_updates.push(PartialPinUpdate::orphan(portal_id, &reason));
                    self.orphaned_pins.insert(portal_id, reason);
                }
            }
        }
        self.send_root_pin_updates(pin_updates);
        info!(
            "Imported graph {}: {} portals restored, {} pins orphaned",
            app_node.name,
            restored,
            self.orphaned_pins.len()
        );
    }

    /// Maps every saved actor id to a live actor: already-live ones by guid,
    /// the rest by spawning them again
    fn respawn_actors<W: SceneMutType>(&mut self, world: &mut W, saved: &SavedGraph) -> HashMap<Uuid, ObjectKey> {
        let mut actor_map: HashMap<Uuid, ObjectKey> = world
            .actors()
            .into_iter()
            .filter_map(|actor| world.guid(actor).map(|guid| (guid, actor)))
            .collect();

        let anchor_tag = self.config.parent_transform_tag.clone();
        let (anchors, others): (Vec<&SavedSpawn>, Vec<&SavedSpawn>) = saved
            .spawns
            .iter()
            .partition(|spawn| spawn.tag == anchor_tag);

        for spawn in anchors.into_iter().chain(others) {
            if actor_map.contains_key(&spawn.old_guid) {
                continue;
            }
            let world_coordinates = spawn.world_coordinates || spawn.tag == anchor_tag;
            match self.spawn_actor(world, &spawn.tag, world_coordinates, spawn.metadata.clone()) {
                Ok(actor) => {
                    actor_map.insert(spawn.old_guid, actor);
                }
                Err(err) => warn!("Cannot respawn {}: {}", spawn.tag, err),
            }
        }

        for widget in &saved.widgets {
            if actor_map.contains_key(&widget.old_guid) {
                continue;
            }
            match self.spawn_widget(world, &widget.name) {
                Ok(actor) => {
                    actor_map.insert(widget.old_guid, actor);
                }
                Err(err) => warn!("Cannot respawn widget {}: {}", widget.name, err),
            }
        }
        actor_map
    }

    /// Writes back a saved value, display name and default
    fn restore_property<W: SceneMutType>(&mut self, world: &mut W, property_id: Uuid, saved: &PinMessage) {
        let Some(property) = self.properties.get_mut(&property_id) else {
            return;
        };
        if !saved.data.is_empty() {
            if let Err(err) = property.write_value(world, &saved.data) {
                warn!("Cannot restore value of {}: {}", property.display_name, err);
            }
        }
        if !saved.is_portal() && !saved.display_name.is_empty() {
            property.display_name = saved.display_name.clone();
        }
        if let Err(err) = property.update_pin_value(&*world).map(|_| ()) {
            warn!("Cannot re-read {}: {}", property.display_name, err);
        }
        if property.can_show_as().allows(saved.show_as) {
            property.show_as = saved.show_as;
        }
        if !saved.default_value.is_empty() {
            property.set_default_value(saved.default_value.clone());
        }
    }

    fn restore_portal<W: SceneMutType>(
        &mut self,
        world: &mut W,
        actor_map: &HashMap<Uuid, ObjectKey>,
        saved: &SavedPin,
    ) -> Result<Uuid, BridgeError> {
        let actor = actor_map
            .get(&saved.actor_id)
            .copied()
            .ok_or_else(|| ReferenceError::NotFound {
                id: saved.actor_id.to_string(),
            })?;
        if let Some(guid) = world.guid(actor) {
            if self.tree.contains(&guid) {
                self.populate_all_children(&*world, &guid);
            }
        }
        let property_id =
            saved
                .location
                .find_or_create(&*world, &self.ids, &mut self.properties, actor)?;
        self.portals.create_portal_with_id(
            &*world,
            &self.properties,
            &property_id,
            saved.pin.show_as,
            saved.pin.id,
        )?;
        if let Some(property) = self.properties.get_mut(&property_id) {
            property.show_as = saved.pin.show_as;
        }
        self.send_pin_show_as_changed(property_id, saved.pin.show_as);
        Ok(property_id)
    }
}
