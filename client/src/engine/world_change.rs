use std::collections::BTreeSet;

use log::{info, warn};
use uuid::Uuid;

use scenebridge_shared::{ActorReference, PartialPinUpdate, PropertyLocation, SceneRefType};

use crate::{
    engine::{SyncEngine, OBJECT_NOT_FOUND_IN_WORLD},
    error::BridgeError,
};

impl SyncEngine {
    /// The live model swapped its whole world. Every property is rebuilt
    /// from scratch; portals keep their ids and are pointed at the new
    /// properties found at their recorded locations, or left orphaned.
    pub fn on_world_changed<W: SceneRefType>(&mut self, world: &W) {
        info!("World changed, rebinding {} portals", self.portals.len());
        self.tree.clear();
        self.deferred_actors.clear();

        let mut tracked: Vec<(Uuid, Option<PropertyLocation>)> = self
            .portals
            .iter()
            .map(|portal| (portal.id(), portal.location().cloned()))
            .collect();
        tracked.sort_by_key(|(portal, _)| *portal);

        let portal_ids: Vec<Uuid> = tracked.iter().map(|(portal, _)| *portal).collect();
        for portal in &portal_ids {
            if let Err(err) = self.portals.orphan(portal, OBJECT_NOT_FOUND_IN_WORLD) {
                warn!("Cannot orphan portal {}: {}", portal, err);
            }
        }
        self.orphan_root_pins(&portal_ids, OBJECT_NOT_FOUND_IN_WORLD);

        self.properties.clear();
        self.functions.clear();
        self.rescan(world, false);
        let root = self.tree.root_id();
        self.send_node_update(&root, false);

        let actors: BTreeSet<Uuid> = tracked
            .iter()
            .filter_map(|(_, location)| location.as_ref()?.actor_id)
            .collect();
        for actor in &actors {
            if self.tree.contains(actor) {
                self.populate_all_children(world, actor);
            }
        }

        let mut pin_updates = Vec::new();
        for (portal_id, location) in tracked {
            let rebound = match location {
                Some(location) => self.rebind_portal(world, &portal_id, &location),
                None => Err(BridgeError::UnknownPin {
                    id: portal_id.to_string(),
                }),
            };
            match rebound {
                Ok(property_id) => {
                    self.orphaned_pins.remove(&portal_id);
                    pin_updates.push(PartialPinUpdate::restored(portal_id, Some(property_id)));
                }
                Err(err) => {
                    let reason = format!("{}: {}", OBJECT_NOT_FOUND_IN_WORLD, err);
                    warn!("Portal {} stays orphaned: {}", portal_id, reason);
                    if let Err(err) = self.portals.orphan(&portal_id, &reason) {
                        warn!("Cannot orphan portal {}: {}", portal_id, err);
                    }
                    pin_updates.push(PartialPinUpdate::orphan(portal_id, &reason));
                    self.orphaned_pins.insert(portal_id, reason);
                }
            }
        }
        self.send_root_pin_updates(pin_updates);
        info!(
            "World change handled, {} portals orphaned",
            self.orphaned_pins.len()
        );
    }

    fn rebind_portal<W: SceneRefType>(
        &mut self,
        world: &W,
        portal_id: &Uuid,
        location: &PropertyLocation,
    ) -> Result<Uuid, BridgeError> {
        let guid = location.actor_id.ok_or_else(|| BridgeError::UnknownPin {
            id: portal_id.to_string(),
        })?;
        let actor = ActorReference::from_guid(guid).resolve(world)?;
        let property_id = location.find_or_create(world, &self.ids, &mut self.properties, actor)?;
        self.portals.rebind(portal_id, &self.properties, &property_id)?;

        let show_as = self
            .portals
            .get(portal_id)
            .map(|portal| portal.show_as)
            .ok_or_else(|| BridgeError::UnknownPin {
                id: portal_id.to_string(),
            })?;
        if let Some(property) = self.properties.get_mut(&property_id) {
            property.show_as = show_as;
        }
        self.send_pin_show_as_changed(property_id, show_as);
        Ok(property_id)
    }
}
