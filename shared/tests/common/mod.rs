// Minimal live model shared by the error-handling tests

#![allow(dead_code)]

use std::collections::HashMap;

use uuid::Uuid;

use scenebridge_shared::{
    Container, FieldDescriptor, FunctionDescriptor, ObjectKey, ObjectKind, ParameterBlock,
    SceneError, SceneMutType, SceneRefType,
};

pub struct MiniObject {
    pub guid: Option<Uuid>,
    pub name: String,
    pub owner: Option<ObjectKey>,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Default)]
pub struct MiniScene {
    objects: HashMap<ObjectKey, MiniObject>,
    actors: Vec<ObjectKey>,
    values: HashMap<(Container, String), Vec<u8>>,
    next_key: u64,
    pub scans: std::cell::Cell<usize>,
}

impl MiniScene {
    pub fn new() -> Self {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
        Self {
            next_key: 1,
            ..Self::default()
        }
    }

    pub fn add_actor(&mut self, name: &str) -> (ObjectKey, Uuid) {
        let guid = Uuid::new_v4();
        let key = self.insert(MiniObject {
            guid: Some(guid),
            name: name.to_string(),
            owner: None,
            fields: Vec::new(),
        });
        self.actors.push(key);
        (key, guid)
    }

    pub fn add_component(&mut self, actor: ObjectKey, name: &str) -> ObjectKey {
        self.insert(MiniObject {
            guid: None,
            name: name.to_string(),
            owner: Some(actor),
            fields: Vec::new(),
        })
    }

    pub fn add_field(&mut self, object: ObjectKey, field: FieldDescriptor, storage: Vec<u8>) {
        self.values
            .insert((Container::Object(object), field.path.clone()), storage);
        if let Some(object) = self.objects.get_mut(&object) {
            object.fields.push(field);
        }
    }

    pub fn set_owner(&mut self, object: ObjectKey, owner: ObjectKey) {
        if let Some(object) = self.objects.get_mut(&object) {
            object.owner = Some(owner);
        }
    }

    pub fn value(&self, object: ObjectKey, field_path: &str) -> Option<&Vec<u8>> {
        self.values
            .get(&(Container::Object(object), field_path.to_string()))
    }

    pub fn remove(&mut self, object: ObjectKey) {
        self.objects.remove(&object);
        self.actors.retain(|actor| *actor != object);
    }

    fn insert(&mut self, object: MiniObject) -> ObjectKey {
        let key = ObjectKey::new(self.next_key);
        self.next_key += 1;
        self.objects.insert(key, object);
        key
    }
}

impl SceneRefType for MiniScene {
    fn is_alive(&self, object: ObjectKey) -> bool {
        self.objects.contains_key(&object)
    }

    fn actors(&self) -> Vec<ObjectKey> {
        self.scans.set(self.scans.get() + 1);
        self.actors.clone()
    }

    fn object_kind(&self, object: ObjectKey) -> Option<ObjectKind> {
        let object = self.objects.get(&object)?;
        Some(if object.owner.is_some() {
            ObjectKind::Component
        } else {
            ObjectKind::Actor
        })
    }

    fn guid(&self, object: ObjectKey) -> Option<Uuid> {
        self.objects.get(&object)?.guid
    }

    fn name(&self, object: ObjectKey) -> Option<String> {
        self.objects.get(&object).map(|object| object.name.clone())
    }

    fn class_name(&self, object: ObjectKey) -> Option<String> {
        self.name(object)
    }

    fn folder_path(&self, _actor: ObjectKey) -> Option<String> {
        None
    }

    fn outliner_parent(&self, _actor: ObjectKey) -> Option<ObjectKey> {
        None
    }

    fn root_component(&self, _actor: ObjectKey) -> Option<ObjectKey> {
        None
    }

    fn attached_components(&self, _component: ObjectKey) -> Vec<ObjectKey> {
        Vec::new()
    }

    fn owner(&self, object: ObjectKey) -> Option<ObjectKey> {
        self.objects.get(&object)?.owner
    }

    fn find_component(&self, actor: ObjectKey, name: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, object)| object.owner == Some(actor) && object.name == name)
            .map(|(key, _)| *key)
    }

    fn fields(&self, container: &Container) -> Vec<FieldDescriptor> {
        match container {
            Container::Object(object) => self
                .objects
                .get(object)
                .map(|object| object.fields.clone())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn functions(&self, _object: ObjectKey) -> Vec<FunctionDescriptor> {
        Vec::new()
    }

    fn read_field(&self, container: &Container, field_path: &str) -> Option<Vec<u8>> {
        if !self.is_alive(container.owner()?) {
            return None;
        }
        self.values
            .get(&(container.clone(), field_path.to_string()))
            .cloned()
    }

    fn object_field(&self, _container: &Container, _field_path: &str) -> Option<ObjectKey> {
        None
    }

    fn spawn_tags(&self) -> Vec<String> {
        Vec::new()
    }

    fn widget_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl SceneMutType for MiniScene {
    fn write_field(
        &mut self,
        container: &Container,
        field_path: &str,
        value: &[u8],
    ) -> Result<(), SceneError> {
        let field = self
            .fields(container)
            .into_iter()
            .find(|field| field.path == field_path)
            .ok_or_else(|| SceneError::FieldNotFound {
                container: container.to_string(),
                field: field_path.to_string(),
            })?;
        if field.flags.read_only {
            return Err(SceneError::ReadOnly {
                field: field_path.to_string(),
            });
        }
        self.values
            .insert((container.clone(), field_path.to_string()), value.to_vec());
        Ok(())
    }

    fn mark_render_state_dirty(&mut self, _object: ObjectKey) {}

    fn invoke_function(
        &mut self,
        object: ObjectKey,
        function: &str,
        _params: &mut ParameterBlock,
    ) -> Result<(), SceneError> {
        Err(SceneError::FunctionNotFound {
            object: object.to_u64().to_string(),
            function: function.to_string(),
        })
    }

    fn spawn_actor(&mut self, tag: &str) -> Result<ObjectKey, SceneError> {
        Err(SceneError::SpawnFailed {
            tag: tag.to_string(),
            reason: "nothing is spawnable".to_string(),
        })
    }

    fn spawn_widget(&mut self, name: &str) -> Result<ObjectKey, SceneError> {
        self.spawn_actor(name)
    }

    fn attach_to(&mut self, child: ObjectKey, _parent: ObjectKey) -> Result<(), SceneError> {
        Err(SceneError::ObjectNotFound {
            object: child.to_u64().to_string(),
        })
    }

    fn destroy_actor(&mut self, actor: ObjectKey) -> bool {
        let alive = self.is_alive(actor);
        self.remove(actor);
        alive
    }

    fn request_world_reload(&mut self) {}
}
