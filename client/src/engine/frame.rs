use log::{error, info, warn};
use uuid::Uuid;

use scenebridge_shared::{
    constants::TYPE_TEXTURE, FrameNumber, QueueError, SceneMutType, SceneRefType, ShowAs,
};

use crate::engine::SyncEngine;

impl SyncEngine {
    /// Start-of-frame work on the simulation context: applies a latched
    /// `Synced` request, then drains queued remote values into the live model
    pub fn begin_frame<W: SceneMutType>(&mut self, world: &mut W, frame: FrameNumber) {
        self.frame = frame;
        if self.session.apply_pending_sync() {
            info!("Session synced at frame {}", frame);
        }
        if let Err(err) = self.adopt_property_inputs(&*world) {
            error!("Cannot read pending inputs: {}", err);
            return;
        }
        if let Err(err) = self.apply_portal_inputs(world, frame) {
            error!("Cannot apply pending inputs: {}", err);
        }
    }

    /// Values addressed to a property without a portal give it one, shown
    /// as a property, so the value flows through the portal path below.
    /// Values for pins nobody knows are dropped.
    fn adopt_property_inputs<W: SceneRefType>(
        &mut self,
        world: &W,
    ) -> Result<(), QueueError> {
        for pin in self.inputs.pending_pins()? {
            if self.portals.contains(&pin) || self.portals.portal_of(&pin).is_some() {
                continue;
            }
            let can_show_as_property = self
                .properties
                .get(&pin)
                .map(|property| property.can_show_as().allows(ShowAs::Property));
            match can_show_as_property {
                Some(true) => {
                    if let Err(err) = self.create_portal(world, pin, ShowAs::Property) {
                        warn!("Dropping value for pin {}: {}", pin, err);
                        self.inputs.take_latest(&pin)?;
                    }
                }
                _ => {
                    warn!("Dropping value for pin {} with no writable target", pin);
                    self.inputs.take_latest(&pin)?;
                }
            }
        }
        Ok(())
    }

    fn apply_portal_inputs<W: SceneMutType>(
        &mut self,
        world: &mut W,
        frame: FrameNumber,
    ) -> Result<(), QueueError> {
        let mut portal_ids = self.portals.ids();
        portal_ids.sort();
        for portal_id in portal_ids {
            let Some(portal) = self.portals.get(&portal_id) else {
                continue;
            };
            let source = portal.source_id();
            if portal.show_as == ShowAs::OutputPin || portal.type_name() == TYPE_TEXTURE {
                // nothing to write, but the queues must not grow
                self.inputs.take_latest(&portal_id)?;
                self.inputs.take_latest(&source)?;
                continue;
            }
            if portal.is_orphan() || !self.properties.contains(&source) {
                self.inputs.take_latest(&portal_id)?;
                continue;
            }
            let should_wait = portal.show_as == ShowAs::InputPin
                && self.config.is_streamed_type(portal.type_name());

            // the remote side may address either the portal or its source
            let key: Uuid = if self.inputs.len(&portal_id)? > 0 {
                portal_id
            } else {
                source
            };
            let Some((data, _)) = self.inputs.pop(&key, should_wait, frame)? else {
                continue;
            };
            if data.is_empty() {
                continue;
            }
            let Some(property) = self.properties.get_mut(&source) else {
                continue;
            };
            if let Err(err) = property.write_value(world, &data) {
                error!("Cannot apply remote value to {}: {}", property.display_name, err);
            }
        }
        Ok(())
    }
}
