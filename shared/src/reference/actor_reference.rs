use log::info;
use uuid::Uuid;

use crate::{reference::error::ReferenceError, types::ObjectKey, world::world_type::SceneRefType};

/// Handle to a top-level entity that survives destruction and recreation.
///
/// Holds the entity's stable guid plus a cached slot. The cached slot is
/// trusted only while the live model still reports it alive under the same
/// guid; otherwise the current scope is scanned once for the guid. A failed
/// scan invalidates the reference permanently.
#[derive(Clone, Debug)]
pub struct ActorReference {
    guid: Uuid,
    cached: Option<ObjectKey>,
    invalid: bool,
}

impl ActorReference {
    /// Builds a reference from a live handle, `None` if the object has no guid
    pub fn new<W: SceneRefType>(world: &W, actor: ObjectKey) -> Option<Self> {
        let guid = world.guid(actor)?;
        Some(Self {
            guid,
            cached: Some(actor),
            invalid: false,
        })
    }

    /// Builds an unresolved reference from a stable id alone
    pub fn from_guid(guid: Uuid) -> Self {
        Self {
            guid,
            cached: None,
            invalid: false,
        }
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }

    pub fn is_invalid_reference(&self) -> bool {
        self.invalid
    }

    /// The cached handle, without revalidation
    pub fn cached(&self) -> Option<ObjectKey> {
        self.cached
    }

    pub fn resolve<W: SceneRefType>(&mut self, world: &W) -> Result<ObjectKey, ReferenceError> {
        if self.invalid {
            return Err(ReferenceError::Invalidated {
                id: self.guid.to_string(),
            });
        }
        if let Some(cached) = self.cached {
            if world.is_alive(cached) && world.guid(cached) == Some(self.guid) {
                return Ok(cached);
            }
        }

        // cache miss, full scan of the current scope
        let found = world
            .actors()
            .into_iter()
            .find(|actor| world.guid(*actor) == Some(self.guid));
        match found {
            Some(actor) => {
                if self.cached.is_some() {
                    info!("Actor {} re-resolved after invalidation", self.guid);
                }
                self.cached = Some(actor);
                Ok(actor)
            }
            None => {
                self.cached = None;
                self.invalid = true;
                Err(ReferenceError::NotFound {
                    id: self.guid.to_string(),
                })
            }
        }
    }

    /// Attempts one lazy re-resolution before reporting invalid
    pub fn is_valid<W: SceneRefType>(&mut self, world: &W) -> bool {
        self.resolve(world).is_ok()
    }

    /// Points the reference at a handle known to be live, clearing the
    /// invalid flag
    pub fn reconstruct<W: SceneRefType>(&mut self, world: &W, actor: ObjectKey) -> bool {
        if world.guid(actor) != Some(self.guid) {
            return false;
        }
        self.cached = Some(actor);
        self.invalid = false;
        true
    }
}
