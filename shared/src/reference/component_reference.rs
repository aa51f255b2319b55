use uuid::Uuid;

use crate::{
    reference::{actor_reference::ActorReference, error::ReferenceError},
    types::ObjectKey,
    world::world_type::SceneRefType,
};

/// Handle to a component, resolved relative to its owning entity.
///
/// A component cannot resolve until its owner does; the owner's failure
/// invalidates the component reference as well.
#[derive(Clone, Debug)]
pub struct ComponentReference {
    owner: ActorReference,
    path: String,
    cached: Option<ObjectKey>,
    invalid: bool,
}

impl ComponentReference {
    pub fn new<W: SceneRefType>(world: &W, component: ObjectKey) -> Option<Self> {
        let actor = world.owner(component)?;
        let owner = ActorReference::new(world, actor)?;
        let path = world.name(component)?;
        Some(Self {
            owner,
            invalid: path.is_empty(),
            path,
            cached: Some(component),
        })
    }

    pub fn from_path(owner: Uuid, path: &str) -> Self {
        Self {
            owner: ActorReference::from_guid(owner),
            path: path.to_string(),
            cached: None,
            invalid: path.is_empty(),
        }
    }

    pub fn owner_guid(&self) -> Uuid {
        self.owner.guid()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_invalid_reference(&self) -> bool {
        self.invalid
    }

    pub fn cached(&self) -> Option<ObjectKey> {
        self.cached
    }

    pub fn resolve<W: SceneRefType>(&mut self, world: &W) -> Result<ObjectKey, ReferenceError> {
        if self.invalid {
            if self.path.is_empty() {
                return Err(ReferenceError::EmptyComponentPath {
                    owner: self.owner.guid().to_string(),
                });
            }
            return Err(ReferenceError::Invalidated {
                id: format!("{}/{}", self.owner.guid(), self.path),
            });
        }

        let actor = match self.owner.resolve(world) {
            Ok(actor) => actor,
            Err(_) => {
                self.cached = None;
                self.invalid = true;
                return Err(ReferenceError::OwnerUnresolved {
                    owner: self.owner.guid().to_string(),
                    component: self.path.clone(),
                });
            }
        };

        if let Some(cached) = self.cached {
            if world.is_alive(cached) && world.owner(cached) == Some(actor) {
                return Ok(cached);
            }
        }

        match world.find_component(actor, &self.path) {
            Some(component) => {
                self.cached = Some(component);
                Ok(component)
            }
            None => {
                self.cached = None;
                self.invalid = true;
                Err(ReferenceError::NotFound {
                    id: format!("{}/{}", self.owner.guid(), self.path),
                })
            }
        }
    }

    pub fn is_valid<W: SceneRefType>(&mut self, world: &W) -> bool {
        self.resolve(world).is_ok()
    }

    /// Points the reference at a live component, provided it has the
    /// recorded name and its owner carries the recorded guid. The owner
    /// reference is repaired along with it.
    pub fn reconstruct<W: SceneRefType>(&mut self, world: &W, component: ObjectKey) -> bool {
        if self.path.is_empty() || world.name(component).as_deref() != Some(self.path.as_str()) {
            return false;
        }
        let Some(actor) = world.owner(component) else {
            return false;
        };
        if !self.owner.reconstruct(world, actor) {
            return false;
        }
        self.cached = Some(component);
        self.invalid = false;
        true
    }
}
