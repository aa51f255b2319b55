use std::collections::{HashMap, HashSet};

use log::info;
use uuid::Uuid;

use crate::{
    function::error::FunctionError,
    id_generator::IdGenerator,
    messages::node::NodeMessage,
    property::{factory::PropertyFactory, property_manager::PropertyManager},
    types::ObjectKey,
    world::{
        container::{Container, ParameterBlock},
        reflection::FunctionDescriptor,
        world_type::{SceneMutType, SceneRefType},
    },
};

/// An exposed function of a live object, with one pin per parameter
#[derive(Clone, Debug)]
pub struct FunctionBinding {
    id: Uuid,
    name: String,
    object: ObjectKey,
    params: Vec<Uuid>,
    out_params: Vec<Uuid>,
}

impl FunctionBinding {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> ObjectKey {
        self.object
    }

    pub fn params(&self) -> &[Uuid] {
        &self.params
    }

    pub fn out_params(&self) -> &[Uuid] {
        &self.out_params
    }

    pub fn serialize(&self, properties: &PropertyManager, class_name: &str) -> NodeMessage {
        let mut node = NodeMessage::function(self.id, &self.name, class_name);
        node.pins = self
            .params
            .iter()
            .filter_map(|id| properties.get(id))
            .map(|property| property.serialize())
            .collect();
        node
    }
}

/// Registry of exposed functions across every populated node
#[derive(Default)]
pub struct FunctionManager {
    functions: HashMap<Uuid, FunctionBinding>,
}

impl FunctionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a function and its parameter pins. Functions with any
    /// unsupported parameter are skipped entirely.
    pub fn register<W: SceneRefType>(
        &mut self,
        world: &W,
        ids: &IdGenerator,
        properties: &mut PropertyManager,
        object: ObjectKey,
        descriptor: &FunctionDescriptor,
    ) -> Option<Uuid> {
        if !descriptor.is_exposed() {
            return None;
        }
        let id = ids.random();
        let container = Container::Parameters(id);
        let factory = PropertyFactory::new(world, ids);

        let mut params = Vec::new();
        for param in &descriptor.params {
            params.push(factory.create_parameter(&container, param)?);
        }

        let mut binding = FunctionBinding {
            id,
            name: descriptor.name.clone(),
            object,
            params: Vec::new(),
            out_params: Vec::new(),
        };
        for param in params {
            if param.field().flags.out_param {
                binding.out_params.push(param.id());
            }
            binding.params.push(param.id());
            properties.insert(vec![param]);
        }
        self.functions.insert(id, binding);
        Some(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&FunctionBinding> {
        self.functions.get(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.functions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Drops a binding and its parameter pins
    pub fn remove(&mut self, id: &Uuid, properties: &mut PropertyManager) -> Vec<Uuid> {
        let Some(binding) = self.functions.remove(id) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        for param in &binding.params {
            removed.extend(properties.remove(param));
        }
        removed
    }

    pub fn remove_owned_by(
        &mut self,
        objects: &HashSet<ObjectKey>,
        properties: &mut PropertyManager,
    ) -> Vec<Uuid> {
        let doomed: Vec<Uuid> = self
            .functions
            .values()
            .filter(|binding| objects.contains(&binding.object))
            .map(|binding| binding.id)
            .collect();
        let mut removed = Vec::new();
        for id in doomed {
            removed.extend(self.remove(&id, properties));
        }
        removed
    }

    pub fn clear(&mut self) {
        self.functions.clear();
    }

    /// Copies incoming parameter values in, invokes the function through the
    /// live model, and returns the refreshed value of every out parameter
    pub fn invoke<W: SceneMutType>(
        &self,
        world: &mut W,
        properties: &mut PropertyManager,
        id: &Uuid,
        values: &HashMap<Uuid, Vec<u8>>,
    ) -> Result<Vec<(Uuid, Vec<u8>)>, FunctionError> {
        let binding = self
            .functions
            .get(id)
            .ok_or_else(|| FunctionError::FunctionNotFound { id: id.to_string() })?;
        if !world.is_alive(binding.object) {
            return Err(FunctionError::ObjectGone {
                function: binding.name.clone(),
            });
        }

        let mut block = ParameterBlock::new();
        for param_id in &binding.params {
            let Some(param) = properties.get_mut(param_id) else {
                continue;
            };
            if let Some(value) = values.get(param_id).filter(|value| !value.is_empty()) {
                param.write_value(world, value)?;
            }
            let storage = param.kind().to_storage(&param.display_name, param.data())?;
            block.set(&param.field().name, storage);
        }

        world.invoke_function(binding.object, &binding.name, &mut block)?;
        info!("Function {} executed", binding.name);

        let mut outputs = Vec::new();
        for param_id in &binding.out_params {
            let Some(param) = properties.get_mut(param_id) else {
                continue;
            };
            if let Some(storage) = block.get(&param.field().name) {
                let value = param.kind().to_wire(storage);
                param.set_parameter_value(value.clone());
                outputs.push((*param_id, value));
            }
        }
        Ok(outputs)
    }
}
