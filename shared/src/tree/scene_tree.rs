use std::collections::{BTreeSet, HashMap, HashSet};

use log::warn;
use uuid::Uuid;

use crate::{
    constants::LOADING_NODE_NAME,
    function::function_manager::FunctionManager,
    id_generator::IdGenerator,
    messages::node::NodeMessage,
    property::property_manager::PropertyManager,
    reference::{actor_reference::ActorReference, component_reference::ComponentReference},
    tree::{
        error::TreeError,
        tree_node::{TreeNode, TreeNodeKind},
    },
    types::ObjectKey,
    world::world_type::SceneRefType,
};

/// Difference between the mirrored entities and the live model's
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// live entities with no node yet
    pub added: Vec<ObjectKey>,
    /// nodes whose entity no longer exists
    pub removed: Vec<Uuid>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Where an added entity landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
    /// the entity's own node
    pub node: Uuid,
    /// highest node created by the insertion; the entity node itself when
    /// every folder on the way already existed
    pub subtree_root: Uuid,
}

/// Lazily-populated mirror of the live hierarchy: folders, entities and
/// their components, keyed by stable id.
///
/// Every node but the root has exactly one parent, and the id index always
/// matches the tree shape.
pub struct SceneTree {
    pub(crate) root: Uuid,
    pub(crate) nodes: HashMap<Uuid, TreeNode>,
    /// entities known to the live model under a parent entity that has not
    /// been populated yet, keyed by the parent's guid
    pub(crate) child_map: HashMap<Uuid, BTreeSet<ObjectKey>>,
    pub(crate) ids: IdGenerator,
}

impl SceneTree {
    pub fn new(root_name: &str, ids: IdGenerator) -> Self {
        let root = ids.random();
        let mut nodes = HashMap::new();
        nodes.insert(root, TreeNode::folder(root, root_name, None));
        Self {
            root,
            nodes,
            child_map: HashMap::new(),
            ids,
        }
    }

    pub fn root_id(&self) -> Uuid {
        self.root
    }

    /// Re-keys the root, e.g. to the remote graph's node id after a handshake
    pub fn set_root_id(&mut self, id: Uuid) {
        if id == self.root {
            return;
        }
        let Some(mut root) = self.nodes.remove(&self.root) else {
            return;
        };
        root.id = id;
        for child in &root.children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parent = Some(id);
            }
        }
        self.nodes.insert(id, root);
        self.root = id;
    }

    pub fn get_node(&self, id: &Uuid) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &Uuid) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn find_child_by_name(&self, parent: &Uuid, name: &str) -> Option<Uuid> {
        let parent = self.nodes.get(parent)?;
        parent
            .children
            .iter()
            .find(|child| {
                self.nodes
                    .get(child)
                    .map(|child| child.name == name)
                    .unwrap_or(false)
            })
            .copied()
    }

    /// Finds the folder named `name` under `parent`, creating it if missing
    pub fn find_or_add_child_folder(&mut self, parent: &Uuid, name: &str) -> Result<Uuid, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::NodeNotFound {
                id: parent.to_string(),
            });
        }
        let existing = self.nodes[parent].children.iter().find(|child| {
            self.nodes
                .get(child)
                .map(|child| child.is_folder() && child.name == name)
                .unwrap_or(false)
        });
        if let Some(existing) = existing {
            return Ok(*existing);
        }
        let id = self.ids.random();
        self.attach(*parent, TreeNode::folder(id, name, Some(*parent)));
        Ok(id)
    }

    /// Adds an entity under its outliner folder path
    pub fn add_actor<W: SceneRefType>(
        &mut self,
        world: &W,
        actor: ObjectKey,
    ) -> Result<Insertion, TreeError> {
        let folder_path = world.folder_path(actor).unwrap_or_default();
        self.add_actor_in_folder(world, &folder_path, actor)
    }

    /// Adds an entity under the folder chain spelled by `folder_path`
    pub fn add_actor_in_folder<W: SceneRefType>(
        &mut self,
        world: &W,
        folder_path: &str,
        actor: ObjectKey,
    ) -> Result<Insertion, TreeError> {
        let mut parent = self.root;
        let mut first_created = None;
        for segment in split_folder_path(folder_path) {
            let existed = self.find_child_by_name(&parent, segment).is_some();
            parent = self.find_or_add_child_folder(&parent, segment)?;
            if !existed && first_created.is_none() {
                first_created = Some(parent);
            }
        }
        let node = self.add_actor_under(world, &parent, actor)?;
        Ok(Insertion {
            node,
            subtree_root: first_created.unwrap_or(node),
        })
    }

    /// Adds an entity directly under an existing node
    pub fn add_actor_under<W: SceneRefType>(
        &mut self,
        world: &W,
        parent: &Uuid,
        actor: ObjectKey,
    ) -> Result<Uuid, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::NodeNotFound {
                id: parent.to_string(),
            });
        }
        let reference = ActorReference::new(world, actor).ok_or_else(|| TreeError::MissingGuid {
            object: actor.to_u64().to_string(),
        })?;
        let id = reference.guid();
        if self.nodes.contains_key(&id) {
            return Ok(id);
        }

        let name = world.name(actor).unwrap_or_default();
        let class_name = world.class_name(actor).unwrap_or_else(|| "Actor".to_string());
        let mut node = TreeNode::new(id, &name, &class_name, Some(*parent), TreeNodeKind::Actor(reference));
        let has_root_component = world.root_component(actor).is_some();
        node.needs_reload = has_root_component;
        self.attach(*parent, node);
        if has_root_component {
            self.add_placeholder(&id);
        }
        Ok(id)
    }

    /// Adds a component node, unpopulated, under `parent`
    pub fn add_component<W: SceneRefType>(
        &mut self,
        world: &W,
        parent: &Uuid,
        component: ObjectKey,
    ) -> Result<Uuid, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::NodeNotFound {
                id: parent.to_string(),
            });
        }
        let reference =
            ComponentReference::new(world, component).ok_or_else(|| TreeError::MissingGuid {
                object: component.to_u64().to_string(),
            })?;
        let id = self.ids.random();
        let name = world.name(component).unwrap_or_default();
        let class_name = world
            .class_name(component)
            .unwrap_or_else(|| "SceneComponent".to_string());
        let mut node = TreeNode::new(
            id,
            &name,
            &class_name,
            Some(*parent),
            TreeNodeKind::Component(reference),
        );
        node.needs_reload = true;
        self.attach(*parent, node);
        self.add_placeholder(&id);
        Ok(id)
    }

    /// Removes a node and its whole subtree, returning the removed nodes
    pub fn remove_node(&mut self, id: &Uuid) -> Vec<TreeNode> {
        if *id == self.root {
            warn!("Refusing to remove the scene tree root");
            return Vec::new();
        }
        let Some(parent) = self.nodes.get(id).and_then(|node| node.parent) else {
            return Vec::new();
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| child != id);
        }
        self.take_subtree(*id)
    }

    /// Removes every child subtree of a node, keeping the node itself
    pub fn remove_children(&mut self, id: &Uuid) -> Vec<TreeNode> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut node.children);
        let mut removed = Vec::new();
        for child in children {
            removed.extend(self.take_subtree(child));
        }
        removed
    }

    /// Empties the tree down to its root
    pub fn clear(&mut self) {
        let root = self.root;
        self.nodes.retain(|id, _| *id == root);
        if let Some(root) = self.nodes.get_mut(&root) {
            root.children.clear();
        }
        self.child_map.clear();
    }

    pub fn add_pending_child(&mut self, parent_guid: Uuid, child: ObjectKey) {
        self.child_map.entry(parent_guid).or_default().insert(child);
    }

    pub fn take_pending_children(&mut self, parent_guid: &Uuid) -> Vec<ObjectKey> {
        self.child_map
            .remove(parent_guid)
            .map(|children| children.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn pending_children(&self, parent_guid: &Uuid) -> Vec<ObjectKey> {
        self.child_map
            .get(parent_guid)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Ids of every entity node currently mirrored
    pub fn actor_node_ids(&self) -> Vec<Uuid> {
        self.nodes
            .values()
            .filter(|node| node.as_actor().is_some())
            .map(|node| node.id)
            .collect()
    }

    /// Node holding the given object, for entity and component nodes
    pub fn node_of_object(&self, object: ObjectKey) -> Option<Uuid> {
        self.nodes
            .values()
            .find(|node| match &node.kind {
                TreeNodeKind::Actor(actor) => actor.cached() == Some(object),
                TreeNodeKind::Component(component) => component.cached() == Some(object),
                TreeNodeKind::Folder => false,
            })
            .map(|node| node.id)
    }

    /// Compares mirrored entities against the live model's current scope
    pub fn diff_actors<W: SceneRefType>(&self, world: &W) -> TreeDiff {
        let pending: HashSet<ObjectKey> = self.child_map.values().flatten().copied().collect();
        let mut live = HashSet::new();
        let mut diff = TreeDiff::default();
        for actor in world.actors() {
            let Some(guid) = world.guid(actor) else {
                continue;
            };
            live.insert(guid);
            if !self.nodes.contains_key(&guid) && !pending.contains(&actor) {
                diff.added.push(actor);
            }
        }
        let mut removed: Vec<Uuid> = self
            .nodes
            .values()
            .filter(|node| node.as_actor().is_some() && !live.contains(&node.id))
            .map(|node| node.id)
            .collect();
        removed.sort();
        diff.removed = removed;
        diff
    }

    /// Serializes a node and everything below it
    pub fn serialize_node(
        &self,
        id: &Uuid,
        properties: &PropertyManager,
        functions: &FunctionManager,
    ) -> Option<NodeMessage> {
        let node = self.nodes.get(id)?;
        let mut message = NodeMessage::new(node.id, &node.name, &node.class_name);
        message.metadata = node.metadata.clone();
        message.pins = node
            .properties
            .iter()
            .filter_map(|id| properties.get(id))
            .map(|property| property.serialize())
            .collect();
        message.functions = node
            .functions
            .iter()
            .filter_map(|id| functions.get(id))
            .map(|function| function.serialize(properties, &node.class_name))
            .collect();
        message.children = self.serialize_children(id, properties, functions);
        Some(message)
    }

    pub fn serialize_children(
        &self,
        id: &Uuid,
        properties: &PropertyManager,
        functions: &FunctionManager,
    ) -> Vec<NodeMessage> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|child| self.serialize_node(child, properties, functions))
            .collect()
    }

    pub(crate) fn attach(&mut self, parent: Uuid, node: TreeNode) {
        let id = node.id;
        self.nodes.insert(id, node);
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }
    }

    pub(crate) fn add_placeholder(&mut self, parent: &Uuid) {
        let id = self.ids.random();
        self.attach(*parent, TreeNode::folder(id, LOADING_NODE_NAME, Some(*parent)));
    }

    fn take_subtree(&mut self, id: Uuid) -> Vec<TreeNode> {
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().copied());
                removed.push(node);
            }
        }
        removed
    }
}

/// Splits an outliner folder path into its segments, ignoring the `None`
/// marker the live model uses for "no folder"
pub fn split_folder_path(folder_path: &str) -> impl Iterator<Item = &str> {
    folder_path
        .split('/')
        .enumerate()
        .filter(|(index, segment)| !segment.is_empty() && !(*index == 0 && *segment == "None"))
        .map(|(_, segment)| segment)
}
