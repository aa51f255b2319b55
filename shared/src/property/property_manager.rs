use std::collections::{HashMap, HashSet};

use log::info;
use uuid::Uuid;

use crate::{
    constants::META_EDIT_CONDITION_PROPERTY_ID,
    property::property::Property,
    types::ObjectKey,
    world::container::Container,
};

/// Owns every live property proxy and keeps the secondary indexes in step:
/// by id, and by (field path, container)
pub struct PropertyManager {
    properties: HashMap<Uuid, Property>,
    by_field_and_container: HashMap<(String, Container), Uuid>,
}

impl Default for PropertyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyManager {
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
            by_field_and_container: HashMap::new(),
        }
    }

    /// Registers a flattened property tree (as built by the factory) and
    /// returns the id of its root. A property already registered for the
    /// same field and container is replaced.
    pub fn insert(&mut self, properties: Vec<Property>) -> Option<Uuid> {
        let root = properties.first().map(|property| property.id())?;
        for property in properties {
            let key = (property.field_path().to_string(), property.container().clone());
            if let Some(previous) = self.by_field_and_container.get(&key).copied() {
                if previous != property.id() {
                    self.properties.remove(&previous);
                }
            }
            self.by_field_and_container.insert(key, property.id());
            self.properties.insert(property.id(), property);
        }
        Some(root)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Property> {
        self.properties.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Property> {
        self.properties.get_mut(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.properties.contains_key(id)
    }

    pub fn find(&self, field_path: &str, container: &Container) -> Option<Uuid> {
        self.by_field_and_container
            .get(&(field_path.to_string(), container.clone()))
            .copied()
    }

    /// Flattened children of a registered property
    pub fn descendants(&self, id: &Uuid) -> Vec<Uuid> {
        self.properties
            .get(id)
            .map(|property| {
                property
                    .children()
                    .iter()
                    .filter(|child| self.properties.contains_key(child))
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Uuid> {
        self.properties.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Removes a property and its flattened children from every index,
    /// returning the removed ids
    pub fn remove(&mut self, id: &Uuid) -> Vec<Uuid> {
        let Some(property) = self.properties.remove(id) else {
            return Vec::new();
        };
        let mut removed = vec![property.id()];
        self.unindex(&property);
        for child in property.children() {
            if let Some(child) = self.properties.remove(child) {
                self.unindex(&child);
                removed.push(child.id());
            }
        }
        removed
    }

    /// Removes every property held by one of `objects`
    pub fn remove_owned_by(&mut self, objects: &HashSet<ObjectKey>) -> Vec<Uuid> {
        let doomed: Vec<Uuid> = self
            .properties
            .values()
            .filter(|property| {
                property
                    .container()
                    .owner()
                    .map(|owner| objects.contains(&owner))
                    .unwrap_or(false)
            })
            .map(|property| property.id())
            .collect();
        let mut removed = Vec::new();
        for id in doomed {
            removed.extend(self.remove(&id));
        }
        if !removed.is_empty() {
            info!("Removed {} properties of destroyed objects", removed.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.properties.clear();
        self.by_field_and_container.clear();
    }

    /// Records, on every property among `ids` whose visibility depends on a
    /// sibling, the sibling's pin id
    pub fn resolve_edit_conditions(&mut self, ids: &[Uuid]) {
        let mut resolved = Vec::new();
        for id in ids {
            let Some(property) = self.properties.get(id) else {
                continue;
            };
            let Some(condition) = property.field().edit_condition() else {
                continue;
            };
            let sibling = ids.iter().find(|other| {
                self.properties
                    .get(other)
                    .map(|other| {
                        other.field().name == condition && other.container() == property.container()
                    })
                    .unwrap_or(false)
            });
            if let Some(sibling) = sibling {
                resolved.push((*id, *sibling));
            }
        }
        for (id, sibling) in resolved {
            if let Some(property) = self.properties.get_mut(&id) {
                property.set_metadata(META_EDIT_CONDITION_PROPERTY_ID, &sibling.to_string());
            }
        }
    }

    fn unindex(&mut self, property: &Property) {
        let key = (property.field_path().to_string(), property.container().clone());
        if self.by_field_and_container.get(&key) == Some(&property.id()) {
            self.by_field_and_container.remove(&key);
        }
    }
}
