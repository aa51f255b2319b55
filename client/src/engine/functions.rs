use std::collections::{BTreeMap, HashMap};

use log::{error, info};
use uuid::Uuid;

use scenebridge_shared::{NodeMessage, SceneMutType};

use crate::{
    custom_functions::{decode_string, CustomFunctionKind, ACTOR_LIST_PIN, ALWAYS_UPDATE_PIN},
    engine::SyncEngine,
    error::BridgeError,
};

impl SyncEngine {
    pub fn on_function_called<W: SceneMutType>(&mut self, world: &mut W, node_id: Uuid, function: &NodeMessage) {
        if let Err(err) = self.try_call_function(world, function) {
            error!(
                "Function {} called on node {} failed: {}",
                function.name, node_id, err
            );
        }
    }

    /// Runs a built-in or registered function with the parameter values
    /// carried by the call. Out parameters are sent back in one batch after
    /// the call.
    pub fn try_call_function<W: SceneMutType>(
        &mut self,
        world: &mut W,
        function: &NodeMessage,
    ) -> Result<(), BridgeError> {
        let values: HashMap<Uuid, Vec<u8>> = function
            .pins
            .iter()
            .map(|pin| (pin.id, pin.data.clone()))
            .collect();

        if let Some(kind) = self.custom_functions.get(&function.id).map(|custom| custom.kind()) {
            return self.call_custom_function(world, kind, &values);
        }
        if !self.functions.contains(&function.id) {
            return Err(BridgeError::UnknownFunction {
                id: function.id.to_string(),
            });
        }

        let outputs = self
            .functions
            .invoke(world, &mut self.properties, &function.id, &values)?;
        for (pin, data) in outputs {
            self.send_pin_value_changed(pin, data);
        }
        Ok(())
    }

    fn call_custom_function<W: SceneMutType>(
        &mut self,
        world: &mut W,
        kind: CustomFunctionKind,
        values: &HashMap<Uuid, Vec<u8>>,
    ) -> Result<(), BridgeError> {
        let pin_value = |pin_name: &str| {
            self.custom_functions
                .by_kind(kind)
                .and_then(|custom| custom.pin_id(pin_name))
                .and_then(|pin| values.get(&pin))
                .cloned()
        };
        let always_update = pin_value(ALWAYS_UPDATE_PIN);
        let actor_list = pin_value(ACTOR_LIST_PIN);

        match kind {
            CustomFunctionKind::RefreshSceneOutliner => {
                self.flush_deferred_actors(&*world);
                if let Some(flag) = always_update.and_then(|data| data.first().copied()) {
                    self.always_update_on_actor_spawn = flag != 0;
                }
                info!(
                    "Scene outliner refreshed, always update: {}",
                    self.always_update_on_actor_spawn
                );
            }
            CustomFunctionKind::SpawnActor => {
                let data = actor_list.unwrap_or_default();
                let tag = decode_string(&data).ok_or_else(|| BridgeError::InvalidParameter {
                    name: ACTOR_LIST_PIN.to_string(),
                    reason: "not valid UTF-8".to_string(),
                })?;
                if tag.is_empty() {
                    return Err(BridgeError::InvalidParameter {
                        name: ACTOR_LIST_PIN.to_string(),
                        reason: "no actor selected".to_string(),
                    });
                }
                self.spawn_actor(world, &tag, false, BTreeMap::new())?;
            }
            CustomFunctionKind::ReloadLevel => {
                info!("Reloading level on request");
                world.request_world_reload();
            }
        }
        Ok(())
    }
}
