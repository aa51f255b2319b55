use std::collections::{HashMap, HashSet};

use log::{info, warn};
use uuid::Uuid;

use crate::{
    id_generator::IdGenerator,
    messages::pin::{PinContents, PinMessage},
    portal::{error::PortalError, portal::Portal},
    property::{property::Property, property_manager::PropertyManager},
    types::{ObjectKey, ShowAs},
    world::world_type::SceneRefType,
};

/// Owns every portal, indexed by portal id and by source property id.
/// A property has at most one portal.
#[derive(Default)]
pub struct PortalManager {
    by_id: HashMap<Uuid, Portal>,
    by_property: HashMap<Uuid, Uuid>,
}

impl PortalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a portal for a property, with an id derived from the
    /// property's id
    pub fn create_portal<W: SceneRefType>(
        &mut self,
        world: &W,
        properties: &PropertyManager,
        ids: &IdGenerator,
        property_id: &Uuid,
        show_as: ShowAs,
    ) -> Result<Uuid, PortalError> {
        let portal_id = ids.deterministic(&property_id.to_string());
        self.create_portal_with_id(world, properties, property_id, show_as, portal_id)
    }

    /// Creates a portal that keeps an id chosen by the caller, e.g. one
    /// restored from a saved graph
    pub fn create_portal_with_id<W: SceneRefType>(
        &mut self,
        world: &W,
        properties: &PropertyManager,
        property_id: &Uuid,
        show_as: ShowAs,
        portal_id: Uuid,
    ) -> Result<Uuid, PortalError> {
        let property = properties
            .get(property_id)
            .ok_or_else(|| PortalError::PropertyNotFound {
                id: property_id.to_string(),
            })?;
        if !property.can_show_as().allows(show_as) {
            warn!(
                "Property {} cannot be shown as {:?} (allowed: {:?})",
                property.display_name,
                show_as,
                property.can_show_as()
            );
            return Err(PortalError::IllegalShowAs {
                requested: format!("{:?}", show_as),
                allowed: format!("{:?}", property.can_show_as()),
            });
        }
        if let Some(existing) = self.by_property.get(property_id) {
            return Err(PortalError::AlreadyExists {
                property: property_id.to_string(),
                portal: existing.to_string(),
            });
        }

        let display_name = portal_display_name(world, property);
        let portal = Portal::new(portal_id, property, display_name, show_as);
        info!("Portal {} created for {}", portal.display_name, property_id);
        self.by_property.insert(*property_id, portal_id);
        self.by_id.insert(portal_id, portal);
        Ok(portal_id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Portal> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Portal> {
        self.by_id.get_mut(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.by_id.contains_key(id)
    }

    /// Portal currently pointing at `property_id`
    pub fn portal_of(&self, property_id: &Uuid) -> Option<Uuid> {
        self.by_property.get(property_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.by_id.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> {
        self.by_id.values()
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Portal, PortalError> {
        let portal = self
            .by_id
            .remove(id)
            .ok_or_else(|| PortalError::PortalNotFound { id: id.to_string() })?;
        if self.by_property.get(&portal.source_id()) == Some(id) {
            self.by_property.remove(&portal.source_id());
        }
        info!("Portal {} removed", portal.display_name);
        Ok(portal)
    }

    /// Drops every portal whose source is among `property_ids`
    pub fn remove_for_sources(&mut self, property_ids: &[Uuid]) -> Vec<Portal> {
        let doomed: Vec<Uuid> = property_ids
            .iter()
            .filter_map(|property| self.by_property.get(property).copied())
            .collect();
        doomed
            .iter()
            .filter_map(|portal| self.remove(portal).ok())
            .collect()
    }

    /// Marks a portal as pointing nowhere, keeping its identity
    pub fn orphan(&mut self, id: &Uuid, reason: &str) -> Result<(), PortalError> {
        let portal = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| PortalError::PortalNotFound { id: id.to_string() })?;
        self.by_property.remove(&portal.source_id());
        portal.set_orphan(reason);
        Ok(())
    }

    /// Points an existing portal at a freshly built property of the same type
    pub fn rebind(
        &mut self,
        id: &Uuid,
        properties: &PropertyManager,
        property_id: &Uuid,
    ) -> Result<(), PortalError> {
        let property = properties
            .get(property_id)
            .ok_or_else(|| PortalError::PropertyNotFound {
                id: property_id.to_string(),
            })?;
        if let Some(existing) = self.by_property.get(property_id) {
            if existing != id {
                return Err(PortalError::AlreadyExists {
                    property: property_id.to_string(),
                    portal: existing.to_string(),
                });
            }
        }
        let portal = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| PortalError::PortalNotFound { id: id.to_string() })?;
        if portal.type_name() != property.type_name() {
            return Err(PortalError::TypeMismatch {
                portal: id.to_string(),
                expected: portal.type_name().to_string(),
                actual: property.type_name().to_string(),
            });
        }
        if self.by_property.get(&portal.source_id()) == Some(id) {
            self.by_property.remove(&portal.source_id());
        }
        portal.bind(property);
        self.by_property.insert(*property_id, *id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_property.clear();
    }

    /// Wire form of a portal, carrying the source's current value when the
    /// source is bound
    pub fn serialize(&self, id: &Uuid, properties: &PropertyManager) -> Option<PinMessage> {
        let portal = self.by_id.get(id)?;
        let mut pin = PinMessage::new(portal.id(), &portal.display_name, portal.type_name());
        pin.show_as = portal.show_as;
        pin.can_show_as = portal.can_show_as();
        pin.category = portal.category.clone();
        pin.contents = PinContents::Portal {
            source_id: portal.source_id(),
        };
        if let Some(source) = properties.get(&portal.source_id()).filter(|_| !portal.is_orphan()) {
            pin.data = source.data().to_vec();
            pin.default_value = source.default_value().to_vec();
            pin.min = source.min().to_vec();
            pin.max = source.max().to_vec();
            pin.read_only = source.is_read_only();
            pin.metadata = source.metadata_map().clone();
        }
        Some(pin)
    }
}

/// Owner names from the outermost object in, followed by the property's own
/// display name, joined with `.`
fn portal_display_name<W: SceneRefType>(world: &W, property: &Property) -> String {
    let mut names = Vec::new();
    let mut visited = HashSet::new();
    let mut next: Option<ObjectKey> = property.container().owner();
    // owner chains can loop in a broken scene
    while let Some(object) = next.filter(|object| visited.insert(*object)) {
        if let Some(name) = world.name(object) {
            names.push(name);
        }
        next = world.owner(object);
    }
    names.reverse();
    names.push(property.display_name.clone());
    names.join(".")
}
