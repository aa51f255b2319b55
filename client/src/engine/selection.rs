use log::warn;
use uuid::Uuid;

use scenebridge_shared::SceneRefType;

use crate::engine::SyncEngine;

impl SyncEngine {
    /// Actor nodes populate their whole component subtree; any other node
    /// only populates itself
    pub fn on_node_selected<W: SceneRefType>(&mut self, world: &W, id: Uuid) {
        let Some(node) = self.tree.get_node(&id) else {
            warn!("Selected node {} is not mirrored", id);
            return;
        };
        if node.as_actor().is_some() {
            self.populate_all_children(world, &id);
        } else {
            self.populate_and_send(world, &id);
        }
    }

    /// Walks each `/`-separated name path down from the root, populating
    /// every node on the way so the next segment can be found
    pub fn on_load_nodes_on_paths<W: SceneRefType>(&mut self, world: &W, paths: &[String]) {
        for path in paths {
            let mut current = self.tree.root_id();
            for segment in path.split('/').filter(|segment| !segment.is_empty()) {
                let Some(child) = self.tree.find_child_by_name(&current, segment) else {
                    warn!("No node named {} on path {}", segment, path);
                    break;
                };
                current = child;
                let is_actor = self
                    .tree
                    .get_node(&current)
                    .map(|node| node.as_actor().is_some())
                    .unwrap_or(false);
                if is_actor {
                    self.populate_all_children(world, &current);
                } else {
                    self.populate_and_send(world, &current);
                }
            }
        }
    }

    /// Populates an actor node, its components and nested actors, sending
    /// every node that changed. Returns whether anything was populated.
    pub fn populate_all_children<W: SceneRefType>(&mut self, world: &W, id: &Uuid) -> bool {
        let populated = self.tree.populate_all(
            world,
            &self.ids,
            &mut self.properties,
            &mut self.functions,
            id,
        );
        for node in &populated {
            self.send_node_update(node, false);
        }
        !populated.is_empty()
    }

    fn populate_and_send<W: SceneRefType>(&mut self, world: &W, id: &Uuid) {
        let populated = self.tree.populate_node(
            world,
            &self.ids,
            &mut self.properties,
            &mut self.functions,
            id,
        );
        if populated {
            self.send_node_update(id, false);
        }
    }
}
