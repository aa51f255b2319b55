use std::{default::Default, time::Duration};

use serde::{Deserialize, Serialize};

use scenebridge_shared::{constants::TYPE_TRACK, InputQueueConfig};

use crate::error::BridgeError;

/// Contains Config properties which will be used by the SyncEngine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Namespace hashed into deterministic ids, also the tree root's name
    pub app_key: String,
    /// Folder bridge-spawned actors are listed under
    pub reality_actors_folder: String,
    /// Node color given to bridge-spawned actors and their children
    pub reality_actors_color: String,
    /// Spawn tag of the anchor every other spawn attaches to
    pub parent_transform_tag: String,
    /// String list feeding the "Spawn Actor" combo box
    pub actor_list_name: String,
    pub widget_list_name: String,
    /// Whether spawn notifications reach the tree right away instead of
    /// waiting for "Refresh Scene Outliner"
    pub always_update_on_actor_spawn: bool,
    /// Bounded wait of the frame-bounded pop, in number of waits
    pub input_wait_retries: u32,
    pub input_wait_interval_micros: u64,
    /// Type tags whose input portals block briefly for the requested frame
    pub streamed_pin_types: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_key: "UE5".to_string(),
            reality_actors_folder: "Reality Actors".to_string(),
            reality_actors_color: "0xFE5000".to_string(),
            parent_transform_tag: "RealityParentTransform".to_string(),
            actor_list_name: "UE5_ACTOR_LIST".to_string(),
            widget_list_name: "UE5_UMG_LIST".to_string(),
            always_update_on_actor_spawn: false,
            input_wait_retries: 5,
            input_wait_interval_micros: 500,
            streamed_pin_types: vec![TYPE_TRACK.to_string()],
        }
    }
}

impl BridgeConfig {
    /// Reads a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|err| BridgeError::ConfigParse {
            reason: err.to_string(),
        })
    }

    pub fn input_queue(&self) -> InputQueueConfig {
        InputQueueConfig {
            wait_retries: self.input_wait_retries,
            wait_interval: Duration::from_micros(self.input_wait_interval_micros),
        }
    }

    pub fn is_streamed_type(&self, type_name: &str) -> bool {
        self.streamed_pin_types.iter().any(|streamed| streamed == type_name)
    }
}
