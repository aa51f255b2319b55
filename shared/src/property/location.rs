use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    constants::{META_ACTOR_ID, META_COMPONENT, META_CONTAINER_PATH, META_PROPERTY, META_PROPERTY_PATH},
    id_generator::IdGenerator,
    property::{error::PropertyError, factory::PropertyFactory, property::Property, property_manager::PropertyManager},
    types::ObjectKey,
    world::{
        container::{resolve_container_path, Container},
        error::SceneError,
        world_type::SceneRefType,
    },
};

/// Where a property lives, expressed in stable terms: owning entity guid,
/// component name, field path and nested container path. Survives the
/// destruction of every handle it was computed from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyLocation {
    pub actor_id: Option<Uuid>,
    pub component: Option<String>,
    pub property_path: String,
    pub container_path: Option<String>,
}

impl PropertyLocation {
    /// Reads a location back from pin metadata. Needs at least a field path.
    pub fn from_metadata(metadata: &BTreeMap<String, String>) -> Option<Self> {
        let property_path = metadata
            .get(META_PROPERTY_PATH)
            .or_else(|| metadata.get(META_PROPERTY))?
            .clone();
        Some(Self {
            actor_id: metadata
                .get(META_ACTOR_ID)
                .and_then(|id| Uuid::parse_str(id).ok()),
            component: metadata
                .get(META_COMPONENT)
                .filter(|component| !component.is_empty())
                .cloned(),
            property_path,
            container_path: metadata
                .get(META_CONTAINER_PATH)
                .filter(|path| !path.is_empty())
                .cloned(),
        })
    }

    pub fn from_property(property: &Property) -> Option<Self> {
        Self::from_metadata(property.metadata_map())
    }

    /// Finds the container the location points at, starting from `actor`
    pub fn resolve_container<W: SceneRefType>(&self, world: &W, actor: ObjectKey) -> Option<Container> {
        let root = match &self.component {
            Some(component) => world.find_component(actor, component)?,
            None => actor,
        };
        match &self.container_path {
            Some(path) => resolve_container_path(world, root, path),
            None => Some(Container::Object(root)),
        }
    }

    /// Returns the registered property at this location under `actor`,
    /// creating and registering it when none exists yet
    pub fn find_or_create<W: SceneRefType>(
        &self,
        world: &W,
        ids: &IdGenerator,
        properties: &mut PropertyManager,
        actor: ObjectKey,
    ) -> Result<Uuid, PropertyError> {
        let container =
            self.resolve_container(world, actor)
                .ok_or_else(|| PropertyError::ContainerUnavailable {
                    property: self.property_path.clone(),
                    container: self.describe_container(),
                })?;
        if let Some(existing) = properties.find(&self.property_path, &container) {
            return Ok(existing);
        }
        let field = world
            .fields(&container)
            .into_iter()
            .find(|field| field.path == self.property_path)
            .ok_or_else(|| SceneError::FieldNotFound {
                container: container.to_string(),
                field: self.property_path.clone(),
            })?;
        let created = PropertyFactory::new(world, ids)
            .create(&container, &field)
            .ok_or_else(|| PropertyError::Unsupported {
                property: self.property_path.clone(),
            })?;
        properties
            .insert(created)
            .ok_or_else(|| PropertyError::Unsupported {
                property: self.property_path.clone(),
            })
    }

    fn describe_container(&self) -> String {
        let mut parts = Vec::new();
        if let Some(actor) = self.actor_id {
            parts.push(actor.to_string());
        }
        if let Some(component) = &self.component {
            parts.push(component.clone());
        }
        if let Some(path) = &self.container_path {
            parts.push(path.clone());
        }
        parts.join("/")
    }
}
