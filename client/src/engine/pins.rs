use log::{info, warn};
use uuid::Uuid;

use scenebridge_shared::{
    constants::TYPE_VOID, CanShowAs, Container, PartialNodeUpdate, PortalError, SceneRefType,
    ShowAs,
};

use crate::{engine::SyncEngine, error::BridgeError};

impl SyncEngine {
    pub fn on_pin_show_as_changed<W: SceneRefType>(&mut self, world: &W, pin_id: Uuid, show_as: ShowAs) {
        if let Err(err) = self.try_change_show_as(world, pin_id, show_as) {
            warn!("Show-as change of pin {} rejected: {}", pin_id, err);
        }
    }

    /// Changes how a pin is presented. A plain property gets a portal on
    /// first change; a portal or an already-portaled property is updated in
    /// place. Nothing changes when the mode is outside the pin's capability.
    pub fn try_change_show_as<W: SceneRefType>(
        &mut self,
        world: &W,
        pin_id: Uuid,
        show_as: ShowAs,
    ) -> Result<(), BridgeError> {
        if self.custom_functions.owns_pin(&pin_id) {
            warn!("Built-in pin {} keeps its show-as", pin_id);
            return Ok(());
        }

        if let Some(portal) = self.portals.get_mut(&pin_id) {
            check_show_as(portal.can_show_as(), show_as)?;
            portal.show_as = show_as;
            let source = portal.source_id();
            if let Some(property) = self.properties.get_mut(&source) {
                property.show_as = show_as;
            }
            self.send_pin_show_as_changed(source, show_as);
            return Ok(());
        }

        let Some(property) = self.properties.get_mut(&pin_id) else {
            return Err(BridgeError::UnknownPin {
                id: pin_id.to_string(),
            });
        };
        let Some(portal_id) = self.portals.portal_of(&pin_id) else {
            self.create_portal(world, pin_id, show_as)?;
            return Ok(());
        };
        check_show_as(property.can_show_as(), show_as)?;
        property.show_as = show_as;
        if let Some(portal) = self.portals.get_mut(&portal_id) {
            portal.show_as = show_as;
        }
        self.send_pin_show_as_changed(portal_id, show_as);
        Ok(())
    }

    /// Creates a portal for a property and publishes it on the root node
    pub fn create_portal<W: SceneRefType>(
        &mut self,
        world: &W,
        property_id: Uuid,
        show_as: ShowAs,
    ) -> Result<Uuid, BridgeError> {
        let portal_id =
            self.portals
                .create_portal(world, &self.properties, &self.ids, &property_id, show_as)?;
        if let Some(property) = self.properties.get_mut(&property_id) {
            property.show_as = show_as;
        }
        self.send_pin_show_as_changed(property_id, show_as);
        if let Some(pin) = self.portals.serialize(&portal_id, &self.properties) {
            let mut update = PartialNodeUpdate::new(self.tree.root_id());
            update.pins_to_add.push(pin);
            self.send_node_update_message(update);
        }
        Ok(portal_id)
    }

    /// Explicit removal, the only path besides entity deletion that
    /// deletes a portal
    pub fn remove_portal(&mut self, portal_id: &Uuid) -> Result<(), BridgeError> {
        let portal = self.portals.remove(portal_id)?;
        self.orphaned_pins.remove(portal_id);
        if let Err(err) = self.inputs.remove(portal_id) {
            warn!("Cannot drop queued values of portal {}: {}", portal_id, err);
        }
        let mut update = PartialNodeUpdate::new(self.tree.root_id());
        update.pins_to_delete.push(portal.id());
        self.send_node_update_message(update);
        Ok(())
    }

    /// A field changed inside the live model: re-read it and tell the
    /// remote side
    pub fn on_property_changed<W: SceneRefType>(&mut self, world: &W, container: &Container, field_path: &str) {
        let Some(id) = self.properties.find(field_path, container) else {
            return;
        };
        let Some(property) = self.properties.get_mut(&id) else {
            return;
        };
        if property.type_name() == TYPE_VOID {
            return;
        }
        let data = match property.update_pin_value(world).map(<[u8]>::to_vec) {
            Ok(data) => data,
            Err(err) => {
                warn!("Cannot re-read {}: {}", property.display_name, err);
                return;
            }
        };
        info!("Property {} changed in the scene", property.display_name);
        self.send_pin_value_changed(id, data);
    }
}

fn check_show_as(allowed: CanShowAs, requested: ShowAs) -> Result<(), PortalError> {
    if allowed.allows(requested) {
        return Ok(());
    }
    Err(PortalError::IllegalShowAs {
        requested: format!("{:?}", requested),
        allowed: format!("{:?}", allowed),
    })
}
