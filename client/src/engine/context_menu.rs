use log::warn;
use uuid::Uuid;

use scenebridge_shared::{
    ContextMenuAction, ContextMenuItem, ContextMenuRequest, ContextMenuUpdate, OutgoingMessage,
    SceneMutType,
};

use crate::engine::SyncEngine;

/// Items offered on actor nodes, command index = position
pub const ACTOR_MENU: [&str; 1] = ["Delete Actor"];
/// Items offered on portal pins
pub const PORTAL_MENU: [&str; 1] = ["Delete Bookmark"];

impl SyncEngine {
    pub fn on_context_menu_requested(&mut self, request: &ContextMenuRequest) {
        if !self.is_connected() {
            return;
        }
        let labels: &[&str] = if self.is_actor_node(&request.item_id) {
            &ACTOR_MENU
        } else if self.portals.contains(&request.item_id) {
            &PORTAL_MENU
        } else {
            return;
        };
        let items = labels
            .iter()
            .zip(0u32..)
            .map(|(label, command)| ContextMenuItem {
                display_name: label.to_string(),
                command,
            })
            .collect();
        self.send(OutgoingMessage::ContextMenuUpdate(ContextMenuUpdate {
            item_id: request.item_id,
            position: request.position,
            instigator: request.instigator,
            items,
        }));
    }

    pub fn on_context_menu_command<W: SceneMutType>(&mut self, world: &mut W, action: &ContextMenuAction) {
        if self.is_actor_node(&action.item_id) {
            if action.command as usize >= ACTOR_MENU.len() {
                return;
            }
            self.delete_actor(world, &action.item_id);
            return;
        }
        if self.portals.contains(&action.item_id) {
            if action.command as usize >= PORTAL_MENU.len() {
                return;
            }
            if let Err(err) = self.remove_portal(&action.item_id) {
                warn!("Cannot delete bookmark {}: {}", action.item_id, err);
            }
        }
    }

    fn delete_actor<W: SceneMutType>(&mut self, world: &mut W, id: &Uuid) {
        let Some(reference) = self.tree.get_node_mut(id).and_then(|node| node.as_actor_mut()) else {
            return;
        };
        match reference.resolve(&*world) {
            Ok(actor) => {
                if !world.destroy_actor(actor) {
                    warn!("Live model refused to destroy actor {}", id);
                    return;
                }
                self.deferred_actors.retain(|deferred| *deferred != actor);
                self.send_actor_deleted(id);
            }
            Err(err) => warn!("Cannot delete actor {}: {}", id, err),
        }
    }

    fn is_actor_node(&self, id: &Uuid) -> bool {
        self.tree
            .get_node(id)
            .map(|node| node.as_actor().is_some())
            .unwrap_or(false)
    }
}
