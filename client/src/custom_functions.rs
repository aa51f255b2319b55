use uuid::Uuid;

use scenebridge_shared::{
    constants::{TYPE_BOOL, TYPE_STRING},
    CanShowAs, IdGenerator, NodeMessage, PinContents, PinMessage, ShowAs, Visualizer,
};

use crate::engine::bridge_config::BridgeConfig;

pub const REFRESH_SCENE_OUTLINER: &str = "Refresh Scene Outliner";
pub const ALWAYS_UPDATE_PIN: &str = "Always Update Scene Outliner";
pub const SPAWN_ACTOR: &str = "Spawn Actor";
pub const ACTOR_LIST_PIN: &str = "Actor List";
pub const RELOAD_LEVEL: &str = "Reload Level";

const CUSTOM_FUNCTION_CATEGORY: &str = "Control";
const CUSTOM_PIN_CATEGORY: &str = "UE PROPERTY";
const NO_ACTOR: &[u8] = b"None\0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomFunctionKind {
    RefreshSceneOutliner,
    SpawnActor,
    ReloadLevel,
}

/// An engine-defined function published on the root node
#[derive(Clone, Debug)]
pub struct CustomFunction {
    id: Uuid,
    kind: CustomFunctionKind,
    name: &'static str,
    class_name: String,
    pins: Vec<PinMessage>,
}

impl CustomFunction {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> CustomFunctionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn pin_id(&self, pin_name: &str) -> Option<Uuid> {
        self.pins
            .iter()
            .find(|pin| pin.display_name == pin_name)
            .map(|pin| pin.id)
    }

    pub fn has_pin(&self, pin_id: &Uuid) -> bool {
        self.pins.iter().any(|pin| pin.id == *pin_id)
    }

    pub fn serialize(&self, always_update: bool) -> NodeMessage {
        let mut node = NodeMessage::function(self.id, self.name, &self.class_name);
        node.category = CUSTOM_FUNCTION_CATEGORY.to_string();
        node.pins = self.pins.clone();
        if self.kind == CustomFunctionKind::RefreshSceneOutliner {
            for pin in &mut node.pins {
                pin.data = vec![u8::from(always_update)];
            }
        }
        node
    }
}

/// The built-in functions, with ids derived from their names so they stay
/// the same across sessions
pub struct CustomFunctions {
    functions: Vec<CustomFunction>,
}

impl CustomFunctions {
    pub fn new(ids: &IdGenerator, config: &BridgeConfig) -> Self {
        let class_name = config.app_key.clone();

        let mut always_update = PinMessage::new(
            ids.deterministic(&format!("{}{}", REFRESH_SCENE_OUTLINER, ALWAYS_UPDATE_PIN)),
            ALWAYS_UPDATE_PIN,
            TYPE_BOOL,
        );
        always_update.show_as = ShowAs::Property;
        always_update.can_show_as = CanShowAs::PropertyOnly;
        always_update.category = CUSTOM_PIN_CATEGORY.to_string();
        always_update.contents = PinContents::FunctionJob;
        always_update.data = vec![u8::from(config.always_update_on_actor_spawn)];

        let mut actor_list = PinMessage::new(
            ids.deterministic(&format!("{}{}", SPAWN_ACTOR, ACTOR_LIST_PIN)),
            ACTOR_LIST_PIN,
            TYPE_STRING,
        );
        actor_list.show_as = ShowAs::Property;
        actor_list.can_show_as = CanShowAs::PropertyOnly;
        actor_list.category = CUSTOM_PIN_CATEGORY.to_string();
        actor_list.contents = PinContents::FunctionJob;
        actor_list.visualizer = Some(Visualizer::combo_box(&config.actor_list_name));
        actor_list.data = NO_ACTOR.to_vec();
        actor_list.default_value = NO_ACTOR.to_vec();

        let functions = vec![
            CustomFunction {
                id: ids.deterministic(REFRESH_SCENE_OUTLINER),
                kind: CustomFunctionKind::RefreshSceneOutliner,
                name: REFRESH_SCENE_OUTLINER,
                class_name: class_name.clone(),
                pins: vec![always_update],
            },
            CustomFunction {
                id: ids.deterministic(SPAWN_ACTOR),
                kind: CustomFunctionKind::SpawnActor,
                name: SPAWN_ACTOR,
                class_name: class_name.clone(),
                pins: vec![actor_list],
            },
            CustomFunction {
                id: ids.deterministic(RELOAD_LEVEL),
                kind: CustomFunctionKind::ReloadLevel,
                name: RELOAD_LEVEL,
                class_name,
                pins: Vec::new(),
            },
        ];
        Self { functions }
    }

    pub fn get(&self, id: &Uuid) -> Option<&CustomFunction> {
        self.functions.iter().find(|function| function.id == *id)
    }

    pub fn by_kind(&self, kind: CustomFunctionKind) -> Option<&CustomFunction> {
        self.functions.iter().find(|function| function.kind == kind)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Whether `pin_id` belongs to one of the built-in functions
    pub fn owns_pin(&self, pin_id: &Uuid) -> bool {
        self.functions.iter().any(|function| function.has_pin(pin_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomFunction> {
        self.functions.iter()
    }

    pub fn serialize(&self, always_update: bool) -> Vec<NodeMessage> {
        self.functions
            .iter()
            .map(|function| function.serialize(always_update))
            .collect()
    }
}

/// Reads a null-terminated string payload
pub(crate) fn decode_string(data: &[u8]) -> Option<String> {
    let end = data.iter().position(|byte| *byte == 0).unwrap_or(data.len());
    std::str::from_utf8(&data[..end]).ok().map(str::to_string)
}
