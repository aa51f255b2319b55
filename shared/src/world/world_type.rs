use uuid::Uuid;

use crate::{
    types::ObjectKey,
    world::{
        container::{Container, ParameterBlock},
        error::SceneError,
        reflection::{FieldDescriptor, FunctionDescriptor, ObjectKind},
    },
};

/// Structures that implement the SceneRefType trait expose read access to
/// the live object model the bridge mirrors
pub trait SceneRefType {
    /// whether the handle still refers to a live object
    fn is_alive(&self, object: ObjectKey) -> bool;
    /// every top-level entity in the current scope, in scan order
    fn actors(&self) -> Vec<ObjectKey>;
    fn object_kind(&self, object: ObjectKey) -> Option<ObjectKind>;
    /// stable identifier of an entity, unchanged across destruction/recreation
    fn guid(&self, object: ObjectKey) -> Option<Uuid>;
    fn name(&self, object: ObjectKey) -> Option<String>;
    fn class_name(&self, object: ObjectKey) -> Option<String>;
    /// `/`-separated outliner folder of an entity
    fn folder_path(&self, actor: ObjectKey) -> Option<String>;
    /// structural parent entity, when the entity is nested under another one
    fn outliner_parent(&self, actor: ObjectKey) -> Option<ObjectKey>;
    fn root_component(&self, actor: ObjectKey) -> Option<ObjectKey>;
    fn attached_components(&self, component: ObjectKey) -> Vec<ObjectKey>;
    /// the next object out in the ownership chain (component → entity)
    fn owner(&self, object: ObjectKey) -> Option<ObjectKey>;
    fn find_component(&self, actor: ObjectKey, name: &str) -> Option<ObjectKey>;
    fn fields(&self, container: &Container) -> Vec<FieldDescriptor>;
    fn functions(&self, object: ObjectKey) -> Vec<FunctionDescriptor>;
    /// raw storage bytes of a field; UTF-8 bytes for string-like fields
    fn read_field(&self, container: &Container, field_path: &str) -> Option<Vec<u8>>;
    /// target of an object-reference field
    fn object_field(&self, container: &Container, field_path: &str) -> Option<ObjectKey>;
    /// catalog of tags `spawn_actor` accepts
    fn spawn_tags(&self) -> Vec<String>;
    /// catalog of names `spawn_widget` accepts
    fn widget_names(&self) -> Vec<String>;
}

/// Structures that implement the SceneMutType trait can be mutated by the
/// bridge on the simulation context
pub trait SceneMutType: SceneRefType {
    fn write_field(
        &mut self,
        container: &Container,
        field_path: &str,
        value: &[u8],
    ) -> Result<(), SceneError>;
    /// invalidates render and transform state so an edit becomes visible
    fn mark_render_state_dirty(&mut self, object: ObjectKey);
    fn invoke_function(
        &mut self,
        object: ObjectKey,
        function: &str,
        params: &mut ParameterBlock,
    ) -> Result<(), SceneError>;
    fn spawn_actor(&mut self, tag: &str) -> Result<ObjectKey, SceneError>;
    fn spawn_widget(&mut self, name: &str) -> Result<ObjectKey, SceneError>;
    fn attach_to(&mut self, child: ObjectKey, parent: ObjectKey) -> Result<(), SceneError>;
    fn destroy_actor(&mut self, actor: ObjectKey) -> bool;
    fn request_world_reload(&mut self);
}
