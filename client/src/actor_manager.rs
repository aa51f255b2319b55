use std::collections::BTreeMap;

use log::{info, warn};
use uuid::Uuid;

use scenebridge_shared::{
    constants::{
        META_ACTOR_GUID, META_DO_NOT_ATTACH_TO_REALITY_PARENT, META_NODE_COLOR, META_SPAWN_TAG,
        META_UMG_TAG,
    },
    ActorReference, Insertion, ObjectKey, SceneMutType, SceneRefType, SceneTree, TreeError,
};

use crate::{engine::bridge_config::BridgeConfig, error::BridgeError};

struct TrackedActor {
    reference: ActorReference,
    metadata: BTreeMap<String, String>,
}

/// Result of a spawn: the new actor, and every tree insertion made for it
/// (the anchor's first, when the anchor had to be spawned as well)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnedActor {
    pub actor: ObjectKey,
    pub guid: Uuid,
    pub insertions: Vec<Insertion>,
}

/// Tracks the actors the bridge spawned on behalf of the remote side
pub struct SpawnedActorManager {
    folder: String,
    color: String,
    parent_transform_tag: String,
    parent_transform: Option<ActorReference>,
    tracked: Vec<TrackedActor>,
}

impl SpawnedActorManager {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            folder: config.reality_actors_folder.clone(),
            color: config.reality_actors_color.clone(),
            parent_transform_tag: config.parent_transform_tag.clone(),
            parent_transform: None,
            tracked: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn guids(&self) -> Vec<Uuid> {
        self.tracked
            .iter()
            .map(|tracked| tracked.reference.guid())
            .collect()
    }

    pub fn is_managed(&self, guid: &Uuid) -> bool {
        self.tracked
            .iter()
            .any(|tracked| tracked.reference.guid() == *guid)
    }

    pub fn metadata_of(&self, guid: &Uuid) -> Option<&BTreeMap<String, String>> {
        self.tracked
            .iter()
            .find(|tracked| tracked.reference.guid() == *guid)
            .map(|tracked| &tracked.metadata)
    }

    pub fn parent_transform_tag(&self) -> &str {
        &self.parent_transform_tag
    }

    pub fn parent_transform_guid(&self) -> Option<Uuid> {
        self.parent_transform.as_ref().map(ActorReference::guid)
    }

    /// Spawns `tag`, attaches it under the anchor unless it keeps world
    /// coordinates, and lists it under the bridge's folder
    pub fn spawn_actor<W: SceneMutType>(
        &mut self,
        world: &mut W,
        tree: &mut SceneTree,
        tag: &str,
        world_coordinates: bool,
        metadata: BTreeMap<String, String>,
    ) -> Result<SpawnedActor, BridgeError> {
        let is_anchor = tag == self.parent_transform_tag;
        let mut insertions = Vec::new();
        let anchor = if is_anchor || world_coordinates {
            None
        } else {
            Some(self.parent_transform(world, tree, &mut insertions)?)
        };

        let actor = world.spawn_actor(tag)?;
        if let Some(anchor) = anchor {
            world.attach_to(actor, anchor)?;
        }
        let guid = guid_of(&*world, actor)?;
        if is_anchor {
            self.parent_transform = ActorReference::new(&*world, actor);
        }

        let mut metadata = metadata;
        metadata.insert(META_SPAWN_TAG.to_string(), tag.to_string());
        metadata.insert(META_NODE_COLOR.to_string(), self.color.clone());
        metadata.insert(META_ACTOR_GUID.to_string(), guid.to_string());
        metadata.insert(
            META_DO_NOT_ATTACH_TO_REALITY_PARENT.to_string(),
            world_coordinates.to_string(),
        );
        insertions.push(self.track(&*world, tree, actor, metadata)?);
        info!("Spawned {} as {}", tag, guid);
        Ok(SpawnedActor {
            actor,
            guid,
            insertions,
        })
    }

    /// Spawns a UI widget host under the anchor
    pub fn spawn_widget<W: SceneMutType>(
        &mut self,
        world: &mut W,
        tree: &mut SceneTree,
        name: &str,
    ) -> Result<SpawnedActor, BridgeError> {
        let mut insertions = Vec::new();
        let anchor = self.parent_transform(world, tree, &mut insertions)?;
        let actor = world.spawn_widget(name)?;
        world.attach_to(actor, anchor)?;
        let guid = guid_of(&*world, actor)?;

        let mut metadata = BTreeMap::new();
        metadata.insert(META_UMG_TAG.to_string(), name.to_string());
        metadata.insert(META_NODE_COLOR.to_string(), self.color.clone());
        metadata.insert(META_ACTOR_GUID.to_string(), guid.to_string());
        insertions.push(self.track(&*world, tree, actor, metadata)?);
        info!("Spawned widget {} as {}", name, guid);
        Ok(SpawnedActor {
            actor,
            guid,
            insertions,
        })
    }

    /// Lists every still-alive spawned actor again after the tree was
    /// cleared, forgetting the ones that are gone
    pub fn re_add_to_tree<W: SceneRefType>(&mut self, world: &W, tree: &mut SceneTree) {
        let folder = self.folder.clone();
        self.tracked.retain_mut(|tracked| {
            let Ok(actor) = tracked.reference.resolve(world) else {
                info!("Spawned actor {} is gone", tracked.reference.guid());
                return false;
            };
            match tree.add_actor_in_folder(world, &folder, actor) {
                Ok(insertion) => {
                    if let Some(node) = tree.get_node_mut(&insertion.node) {
                        node.metadata.extend(tracked.metadata.clone());
                    }
                    true
                }
                Err(err) => {
                    warn!("Cannot list spawned actor {}: {}", tracked.reference.guid(), err);
                    true
                }
            }
        });
        if let Some(anchor) = &mut self.parent_transform {
            if anchor.resolve(world).is_err() {
                self.parent_transform = None;
            }
        }
    }

    /// Destroys the anchor and every spawned actor, then empties the tree
    pub fn clear_actors<W: SceneMutType>(&mut self, world: &mut W, tree: &mut SceneTree) {
        if let Some(mut anchor) = self.parent_transform.take() {
            if let Ok(actor) = anchor.resolve(&*world) {
                world.destroy_actor(actor);
            }
        }
        for mut tracked in self.tracked.drain(..) {
            if let Ok(actor) = tracked.reference.resolve(&*world) {
                world.destroy_actor(actor);
            }
        }
        tree.clear();
        info!("Cleared spawned actors");
    }

    fn parent_transform<W: SceneMutType>(
        &mut self,
        world: &mut W,
        tree: &mut SceneTree,
        insertions: &mut Vec<Insertion>,
    ) -> Result<ObjectKey, BridgeError> {
        if let Some(anchor) = &mut self.parent_transform {
            if let Ok(actor) = anchor.resolve(&*world) {
                return Ok(actor);
            }
        }
        let tag = self.parent_transform_tag.clone();
        let spawned = self.spawn_actor(world, tree, &tag, true, BTreeMap::new())?;
        insertions.extend(spawned.insertions);
        Ok(spawned.actor)
    }

    fn track<W: SceneRefType>(
        &mut self,
        world: &W,
        tree: &mut SceneTree,
        actor: ObjectKey,
        metadata: BTreeMap<String, String>,
    ) -> Result<Insertion, BridgeError> {
        let reference = ActorReference::new(world, actor).ok_or_else(|| TreeError::MissingGuid {
            object: actor.to_u64().to_string(),
        })?;
        let insertion = tree.add_actor_in_folder(world, &self.folder, actor)?;
        if let Some(node) = tree.get_node_mut(&insertion.node) {
            node.metadata.extend(metadata.clone());
        }
        self.tracked.push(TrackedActor {
            reference,
            metadata,
        });
        Ok(insertion)
    }
}

fn guid_of<W: SceneRefType>(world: &W, actor: ObjectKey) -> Result<Uuid, BridgeError> {
    world.guid(actor).ok_or_else(|| {
        TreeError::MissingGuid {
            object: actor.to_u64().to_string(),
        }
        .into()
    })
}
