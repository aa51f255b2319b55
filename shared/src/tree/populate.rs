use log::{info, warn};
use uuid::Uuid;

use crate::{
    constants::META_NODE_COLOR,
    function::function_manager::FunctionManager,
    id_generator::IdGenerator,
    property::{factory::PropertyFactory, property_manager::PropertyManager},
    tree::{scene_tree::SceneTree, tree_node::TreeNodeKind},
    types::ObjectKey,
    world::{container::Container, world_type::SceneRefType},
};

impl SceneTree {
    /// Builds the property, function and child lists of a node on first
    /// access. Returns whether the node was populated by this call; a node
    /// that is already populated, or whose object cannot be resolved, is
    /// left untouched.
    pub fn populate_node<W: SceneRefType>(
        &mut self,
        world: &W,
        ids: &IdGenerator,
        properties: &mut PropertyManager,
        functions: &mut FunctionManager,
        id: &Uuid,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if !node.needs_reload {
            return false;
        }
        let object = match &mut node.kind {
            TreeNodeKind::Folder => return false,
            TreeNodeKind::Actor(actor) => actor.resolve(world),
            TreeNodeKind::Component(component) => component.resolve(world),
        };
        let object = match object {
            Ok(object) => object,
            Err(err) => {
                warn!("Cannot populate node {}: {}", id, err);
                return false;
            }
        };
        let is_actor = node.as_actor().is_some();

        let pins = create_properties(world, ids, properties, object);
        let mut bound = Vec::new();
        if is_actor {
            for descriptor in world.functions(object) {
                if let Some(function) = functions.register(world, ids, properties, object, &descriptor) {
                    bound.push(function);
                }
            }
        }

        // placeholder and any stale children go away before the real ones
        self.remove_children(id);

        if is_actor {
            let guid = *id;
            for child in self.take_pending_children(&guid) {
                if !world.is_alive(child) {
                    continue;
                }
                if let Err(err) = self.add_actor_under(world, id, child) {
                    warn!("Skipping child entity of {}: {}", id, err);
                }
            }
            if let Some(root) = world.root_component(object) {
                if let Err(err) = self.add_component(world, id, root) {
                    warn!("Skipping root component of {}: {}", id, err);
                }
            }
        } else {
            for attached in world.attached_components(object) {
                if let Err(err) = self.add_component(world, id, attached) {
                    warn!("Skipping attached component of {}: {}", id, err);
                }
            }
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.properties = pins;
        node.functions = bound;
        node.needs_reload = false;
        let color = node.metadata(META_NODE_COLOR).map(str::to_string);
        let children = node.children.clone();
        if let Some(color) = color {
            for child in children {
                if let Some(child) = self.nodes.get_mut(&child) {
                    child.metadata.insert(META_NODE_COLOR.to_string(), color.clone());
                }
            }
        }
        info!("Populated node {}", id);
        true
    }

    /// Populates an entity node, its components and the entities nested
    /// under it, returning the ids populated by this call in visiting order
    pub fn populate_all<W: SceneRefType>(
        &mut self,
        world: &W,
        ids: &IdGenerator,
        properties: &mut PropertyManager,
        functions: &mut FunctionManager,
        id: &Uuid,
    ) -> Vec<Uuid> {
        let mut populated = Vec::new();
        let mut worklist = vec![*id];
        while let Some(next) = worklist.pop() {
            if self.populate_node(world, ids, properties, functions, &next) {
                populated.push(next);
            }
            let Some(node) = self.nodes.get(&next) else {
                continue;
            };
            for child in node.children.iter().rev() {
                let descend = self
                    .nodes
                    .get(child)
                    .map(|child| !child.is_folder())
                    .unwrap_or(false);
                if descend {
                    worklist.push(*child);
                }
            }
        }
        populated
    }
}

fn create_properties<W: SceneRefType>(
    world: &W,
    ids: &IdGenerator,
    properties: &mut PropertyManager,
    object: ObjectKey,
) -> Vec<Uuid> {
    let container = Container::Object(object);
    let factory = PropertyFactory::new(world, ids);
    let mut pins = Vec::new();
    for field in world.fields(&container) {
        if !field.flags.is_visible() {
            continue;
        }
        if let Some(existing) = properties.find(&field.path, &container) {
            pins.push(existing);
            pins.extend(properties.descendants(&existing));
            continue;
        }
        let Some(created) = factory.create(&container, &field) else {
            continue;
        };
        pins.extend(created.iter().map(|property| property.id()));
        properties.insert(created);
    }
    properties.resolve_edit_conditions(&pins);
    pins
}
