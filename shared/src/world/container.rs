use std::{collections::HashMap, fmt};

use uuid::Uuid;

use crate::{
    types::ObjectKey,
    world::{reflection::FieldKind, world_type::SceneRefType},
};

/// Where a property's value lives
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// A field declared directly on a live object
    Object(ObjectKey),
    /// A field of a struct nested inside a live object, `path` being the
    /// chain of struct field names from the object down
    Struct { owner: ObjectKey, path: Vec<String> },
    /// A parameter of an exposed function, stored by the bridge itself
    Parameters(Uuid),
}

impl Container {
    /// The live object that ultimately holds the value, if any
    pub fn owner(&self) -> Option<ObjectKey> {
        match self {
            Container::Object(object) => Some(*object),
            Container::Struct { owner, .. } => Some(*owner),
            Container::Parameters(_) => None,
        }
    }

    pub fn nested(&self, field_name: &str) -> Option<Container> {
        match self {
            Container::Object(object) => Some(Container::Struct {
                owner: *object,
                path: vec![field_name.to_string()],
            }),
            Container::Struct { owner, path } => {
                let mut path = path.clone();
                path.push(field_name.to_string());
                Some(Container::Struct {
                    owner: *owner,
                    path,
                })
            }
            Container::Parameters(_) => None,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Object(object) => write!(f, "object#{}", object.to_u64()),
            Container::Struct { owner, path } => {
                write!(f, "object#{}/{}", owner.to_u64(), path.join("/"))
            }
            Container::Parameters(function) => write!(f, "parameters#{}", function),
        }
    }
}

/// Walks a `/`-separated nested-container path starting at `root`.
///
/// Object-reference fields step into the referenced object, struct fields
/// step into the nested struct. Any other field kind ends the walk.
pub fn resolve_container_path<W: SceneRefType>(
    world: &W,
    root: ObjectKey,
    container_path: &str,
) -> Option<Container> {
    let mut current = Container::Object(root);
    for segment in container_path.split('/').filter(|segment| !segment.is_empty()) {
        let field = world
            .fields(&current)
            .into_iter()
            .find(|field| field.name == segment)?;
        current = match field.kind {
            FieldKind::Object => Container::Object(world.object_field(&current, &field.path)?),
            FieldKind::Struct { .. } => current.nested(&field.name)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Parameter values handed to the live model when invoking a function,
/// keyed by parameter name. Out parameters are written back in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterBlock {
    values: HashMap<String, Vec<u8>>,
}

impl ParameterBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn set(&mut self, name: &str, value: Vec<u8>) {
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
