// Metadata keys attached to pins and nodes

pub const META_PROPERTY: &str = "property";
pub const META_COMPONENT: &str = "component";
pub const META_ACTOR_ID: &str = "actorId";
pub const META_PROPERTY_PATH: &str = "PropertyPath";
pub const META_CONTAINER_PATH: &str = "ContainerPath";
pub const META_EDIT_CONDITION_PROPERTY_ID: &str = "EditConditionPropertyId";
pub const META_OBJECT_PROPERTY: &str = "objectProp";
pub const META_SPAWN_TAG: &str = "spawnTag";
pub const META_ACTOR_GUID: &str = "ActorGuid";
pub const META_UMG_TAG: &str = "umgTag";
pub const META_DO_NOT_ATTACH_TO_REALITY_PARENT: &str = "DoNotAttachToRealityParent";
pub const META_NODE_COLOR: &str = "NodeColor";

// Reflected field metadata keys

pub const FIELD_DISPLAY_NAME: &str = "DisplayName";
pub const FIELD_CATEGORY: &str = "Category";
pub const FIELD_UI_MIN: &str = "UIMin";
pub const FIELD_UI_MAX: &str = "UIMax";
pub const FIELD_EDIT_CONDITION: &str = "EditCondition";

pub const DEFAULT_CATEGORY: &str = "Default";
pub const LOADING_NODE_NAME: &str = "Loading...";

// Pin type tags

pub const TYPE_BOOL: &str = "bool";
pub const TYPE_FLOAT: &str = "float";
pub const TYPE_DOUBLE: &str = "double";
pub const TYPE_INT8: &str = "byte";
pub const TYPE_INT16: &str = "short";
pub const TYPE_INT32: &str = "int";
pub const TYPE_INT64: &str = "long";
pub const TYPE_UINT8: &str = "ubyte";
pub const TYPE_UINT16: &str = "ushort";
pub const TYPE_UINT32: &str = "uint";
pub const TYPE_UINT64: &str = "ulong";
pub const TYPE_STRING: &str = "string";
pub const TYPE_VEC2D: &str = "mz.fb.vec2d";
pub const TYPE_VEC3D: &str = "mz.fb.vec3d";
pub const TYPE_VEC4D: &str = "mz.fb.vec4d";
pub const TYPE_VEC4F: &str = "mz.fb.vec4";
pub const TYPE_TRANSFORM: &str = "mz.fb.Transform";
pub const TYPE_TRACK: &str = "mz.fb.Track";
pub const TYPE_TEXTURE: &str = "mz.fb.Texture";
pub const TYPE_VOID: &str = "mz.fb.Void";

pub const ROTATOR_MIN: f64 = 0.0;
pub const ROTATOR_MAX: f64 = 359.999;
