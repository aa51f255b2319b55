use crate::{
    constants::{
        META_ACTOR_ID, META_COMPONENT, META_CONTAINER_PATH, META_OBJECT_PROPERTY, META_PROPERTY,
        META_PROPERTY_PATH,
    },
    id_generator::IdGenerator,
    property::{property::Property, property_kind::PropertyKind},
    world::{
        container::Container,
        reflection::{FieldDescriptor, FieldKind, ObjectKind},
        world_type::SceneRefType,
    },
};

/// What a nested field inherits from the aggregate it was found in
struct ParentScope {
    category: String,
    display_name: String,
    struct_name: Option<String>,
    /// Object field the scope was reached through, set for widget scopes
    object_property: Option<String>,
}

/// Identity of the entity/component a property tree hangs off
#[derive(Default)]
struct OwnerInfo {
    actor_id: Option<String>,
    component: Option<String>,
}

/// Builds property proxies for reflected fields.
///
/// Aggregates recurse into every visible sub-field and flatten the whole
/// subtree into one list, parent first. Fields of unsupported kinds yield
/// nothing at all.
pub struct PropertyFactory<'a, W: SceneRefType> {
    world: &'a W,
    ids: &'a IdGenerator,
}

impl<'a, W: SceneRefType> PropertyFactory<'a, W> {
    pub fn new(world: &'a W, ids: &'a IdGenerator) -> Self {
        Self { world, ids }
    }

    /// Returns the proxy for `field` followed by all of its flattened
    /// descendants, or `None` when the field kind is unsupported
    pub fn create(&self, container: &Container, field: &FieldDescriptor) -> Option<Vec<Property>> {
        let owner = self.owner_info(container);
        let container_path = match container {
            Container::Struct { path, .. } => path.join("/"),
            _ => String::new(),
        };
        let mut out = Vec::new();
        self.build(container, field, None, &owner, &container_path, &mut out)?;
        Some(out)
    }

    /// Proxy for a function parameter, backed by a bridge-owned value
    /// initialised to zero
    pub fn create_parameter(&self, container: &Container, field: &FieldDescriptor) -> Option<Property> {
        let kind = PropertyKind::from_field_kind(&field.kind)?;
        if kind.is_void() {
            return None;
        }
        let mut property = Property::new(self.ids.random(), field.clone(), container.clone(), kind);
        property.set_metadata(META_PROPERTY, &field.name);
        let initial = match property.kind().wire_size() {
            Some(size) => vec![0u8; size],
            None => property.kind().to_wire(&[]),
        };
        property.set_parameter_value(initial.clone());
        property.set_default_value(initial);
        Some(property)
    }

    fn build(
        &self,
        container: &Container,
        field: &FieldDescriptor,
        parent: Option<&ParentScope>,
        owner: &OwnerInfo,
        container_path: &str,
        out: &mut Vec<Property>,
    ) -> Option<usize> {
        let mut nested: Option<(Container, String, Option<String>)> = None;
        let kind = match &field.kind {
            FieldKind::Unsupported(_) => return None,
            FieldKind::Object => {
                let target = self.world.object_field(container, &field.path);
                match target.and_then(|target| Some((target, self.world.object_kind(target)?))) {
                    Some((_, ObjectKind::RenderTarget)) => PropertyKind::Texture,
                    Some((widget, ObjectKind::Widget)) => {
                        let widget_name = self.world.name(widget).unwrap_or_default();
                        nested = Some((Container::Object(widget), widget_name, None));
                        PropertyKind::Void
                    }
                    _ => PropertyKind::Void,
                }
            }
            FieldKind::Struct { name, .. } => {
                let inner = container.nested(&field.name)?;
                nested = Some((inner, String::new(), Some(name.clone())));
                PropertyKind::Void
            }
            other => PropertyKind::from_field_kind(other)?,
        };

        let mut property =
            Property::new(self.ids.random(), field.clone(), container.clone(), kind);
        if let Some(ParentScope { category, object_property: Some(object_property), .. }) = parent {
            // widget fields keep their own names under the widget's category
            property.category = format!("{}|{}", category, field.category());
            property.set_metadata(META_OBJECT_PROPERTY, object_property);
        } else if let Some(parent) = parent {
            let same_as_struct = parent
                .struct_name
                .as_deref()
                .map(|struct_name| struct_name == field.category())
                .unwrap_or(false);
            property.category = if same_as_struct {
                parent.category.clone()
            } else {
                format!("{}|{}", parent.category, parent.display_name)
            };
            property.display_name = format!("{}_{}", parent.display_name, field.display_name());
        }

        property.set_metadata(META_PROPERTY, &field.name);
        property.set_metadata(META_PROPERTY_PATH, &field.path);
        if !container_path.is_empty() {
            property.set_metadata(META_CONTAINER_PATH, container_path);
        }
        if let Some(actor_id) = &owner.actor_id {
            property.set_metadata(META_ACTOR_ID, actor_id);
        }
        if let Some(component) = &owner.component {
            property.set_metadata(META_COMPONENT, component);
        }
        property.initialize_value(self.world);

        let index = out.len();
        out.push(property);

        if let Some((inner, widget_name, struct_name)) = nested {
            let scope = if struct_name.is_some() {
                ParentScope {
                    category: out[index].category.clone(),
                    display_name: out[index].display_name.clone(),
                    struct_name,
                    object_property: None,
                }
            } else {
                ParentScope {
                    category: format!("{}|{}", out[index].category, widget_name),
                    display_name: out[index].display_name.clone(),
                    struct_name: None,
                    object_property: Some(field.name.clone()),
                }
            };
            let inner_path = if container_path.is_empty() {
                field.name.clone()
            } else {
                format!("{}/{}", container_path, field.name)
            };

            let mut descendants = Vec::new();
            for child in self.world.fields(&inner) {
                if !child.flags.is_visible() {
                    continue;
                }
                let start = out.len();
                if self
                    .build(&inner, &child, Some(&scope), owner, &inner_path, out)
                    .is_some()
                {
                    descendants.extend(out[start..].iter().map(|p| p.id()));
                }
            }
            out[index].push_children(&descendants);
        }

        Some(index)
    }

    fn owner_info(&self, container: &Container) -> OwnerInfo {
        let Some(object) = container.owner() else {
            return OwnerInfo::default();
        };
        match self.world.object_kind(object) {
            Some(ObjectKind::Component) => {
                let actor = self.world.owner(object);
                OwnerInfo {
                    actor_id: actor
                        .and_then(|actor| self.world.guid(actor))
                        .map(|guid| guid.to_string()),
                    component: self.world.name(object),
                }
            }
            _ => OwnerInfo {
                actor_id: self.world.guid(object).map(|guid| guid.to_string()),
                component: None,
            },
        }
    }
}
