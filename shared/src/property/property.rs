use std::collections::BTreeMap;

use log::error;
use uuid::Uuid;

use crate::{
    constants::FIELD_UI_MAX,
    constants::FIELD_UI_MIN,
    messages::{
        pin::{PinContents, PinMessage, Visualizer},
        update::StringListUpdate,
    },
    property::{error::PropertyError, property_kind::PropertyKind},
    types::{CanShowAs, ShowAs},
    world::{
        container::Container,
        reflection::FieldDescriptor,
        world_type::{SceneMutType, SceneRefType},
    },
};

/// A typed adapter over one reflected field of the live model.
///
/// Reads and writes go through the live model every time; `data` only holds
/// the last value seen, which is what gets serialized.
#[derive(Clone, Debug)]
pub struct Property {
    id: Uuid,
    field: FieldDescriptor,
    container: Container,
    kind: PropertyKind,
    pub display_name: String,
    pub category: String,
    data: Vec<u8>,
    default_value: Vec<u8>,
    min: Vec<u8>,
    max: Vec<u8>,
    pub show_as: ShowAs,
    can_show_as: CanShowAs,
    read_only: bool,
    advanced: bool,
    transient: bool,
    metadata: BTreeMap<String, String>,
    children: Vec<Uuid>,
    visualizer: Option<Visualizer>,
}

impl Property {
    pub fn new(id: Uuid, field: FieldDescriptor, container: Container, kind: PropertyKind) -> Self {
        // render targets are published, never written
        let read_only = field.flags.read_only
            || field.flags.out_param
            || matches!(kind, PropertyKind::Texture);
        let can_show_as = if kind.is_void() {
            CanShowAs::PropertyOnly
        } else if read_only {
            CanShowAs::OutputPinOrProperty
        } else {
            CanShowAs::InputOutputProperty
        };
        let show_as = if kind.is_void() {
            ShowAs::None
        } else {
            ShowAs::Property
        };

        let (min, max) = match kind.fixed_limits() {
            Some(limits) => limits,
            None => (
                field
                    .metadata
                    .get(FIELD_UI_MIN)
                    .and_then(|text| kind.parse_limit(text))
                    .unwrap_or_default(),
                field
                    .metadata
                    .get(FIELD_UI_MAX)
                    .and_then(|text| kind.parse_limit(text))
                    .unwrap_or_default(),
            ),
        };

        let visualizer = match &kind {
            PropertyKind::Enum { name, .. } => Some(Visualizer::combo_box(name)),
            _ => None,
        };

        Self {
            id,
            display_name: field.display_name().to_string(),
            category: field.category().to_string(),
            advanced: field.flags.advanced,
            transient: field.flags.transient,
            field,
            container,
            kind,
            data: Vec::new(),
            default_value: Vec::new(),
            min,
            max,
            show_as,
            can_show_as,
            read_only,
            metadata: BTreeMap::new(),
            children: Vec::new(),
            visualizer,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn field_path(&self) -> &str {
        &self.field.path
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn default_value(&self) -> &[u8] {
        &self.default_value
    }

    pub fn set_default_value(&mut self, value: Vec<u8>) {
        self.default_value = value;
    }

    pub fn min(&self) -> &[u8] {
        &self.min
    }

    pub fn max(&self) -> &[u8] {
        &self.max
    }

    pub fn can_show_as(&self) -> CanShowAs {
        self.can_show_as
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    pub fn children(&self) -> &[Uuid] {
        &self.children
    }

    pub(crate) fn push_children(&mut self, ids: &[Uuid]) {
        self.children.extend_from_slice(ids);
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn metadata_map(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Fetches the current value from the live model, as a pin payload
    pub fn read_current_value<W: SceneRefType>(&self, world: &W) -> Result<Vec<u8>, PropertyError> {
        match (&self.kind, &self.container) {
            (PropertyKind::Void, _) | (PropertyKind::Texture, _) | (_, Container::Parameters(_)) => {
                return Ok(self.data.clone());
            }
            _ => {}
        }
        if !self.container_alive(world) {
            return Err(self.container_unavailable());
        }
        let storage = world
            .read_field(&self.container, &self.field.path)
            .ok_or_else(|| self.container_unavailable())?;
        Ok(self.kind.to_wire(&storage))
    }

    /// Refreshes the cached pin payload from the live model
    pub fn update_pin_value<W: SceneRefType>(&mut self, world: &W) -> Result<&[u8], PropertyError> {
        self.data = self.read_current_value(world)?;
        Ok(&self.data)
    }

    /// Writes a pin payload into the live field.
    ///
    /// Payloads must match the field's fixed size exactly; mismatches are
    /// rejected before anything is touched. A successful write marks the
    /// owning object's render state dirty.
    pub fn write_value<W: SceneMutType>(&mut self, world: &mut W, value: &[u8]) -> Result<(), PropertyError> {
        if let Some(expected) = self.kind.wire_size() {
            if value.len() != expected {
                error!(
                    "Size mismatch on {}: expected {} bytes, got {}",
                    self.display_name,
                    expected,
                    value.len()
                );
                return Err(PropertyError::SizeMismatch {
                    property: self.display_name.clone(),
                    expected,
                    actual: value.len(),
                });
            }
        }

        let storage = self.kind.to_storage(&self.display_name, value)?;
        if matches!(self.kind, PropertyKind::Texture) {
            return Err(PropertyError::NotWritable {
                property: self.display_name.clone(),
                type_name: self.type_name().to_string(),
            });
        }

        let Some(owner) = self.container.owner() else {
            // parameter blocks live in the bridge
            self.data = value.to_vec();
            return Ok(());
        };
        if !world.is_alive(owner) {
            return Err(self.container_unavailable());
        }
        world.write_field(&self.container, &self.field.path, &storage)?;
        world.mark_render_state_dirty(owner);
        self.data = value.to_vec();
        Ok(())
    }

    /// Enum variants, published so combo boxes on the remote side can list them
    pub fn string_list(&self) -> Option<StringListUpdate> {
        match &self.kind {
            PropertyKind::Enum { name, variants, .. } => Some(StringListUpdate {
                name: name.clone(),
                values: variants.clone(),
            }),
            _ => None,
        }
    }

    pub fn serialize(&self) -> PinMessage {
        let mut pin = PinMessage::new(self.id, &self.display_name, self.type_name());
        pin.show_as = self.show_as;
        pin.can_show_as = self.can_show_as;
        pin.category = self.category.clone();
        pin.visualizer = self.visualizer.clone();
        pin.data = self.data.clone();
        pin.default_value = self.default_value.clone();
        pin.min = self.min.clone();
        pin.max = self.max.clone();
        pin.read_only = self.read_only;
        pin.advanced = self.advanced;
        pin.transient = self.transient;
        pin.metadata = self.metadata.clone();
        pin.contents = match self.container {
            Container::Parameters(_) => PinContents::FunctionJob,
            _ => PinContents::Job,
        };
        pin
    }

    pub(crate) fn initialize_value<W: SceneRefType>(&mut self, world: &W) {
        if let Ok(value) = self.read_current_value(world) {
            self.data = value;
        }
        if self.kind.is_void() {
            self.data.clear();
        }
        self.default_value = self.data.clone();
    }

    pub(crate) fn set_parameter_value(&mut self, value: Vec<u8>) {
        self.data = value;
    }

    fn container_alive<W: SceneRefType>(&self, world: &W) -> bool {
        self.container
            .owner()
            .map(|owner| world.is_alive(owner))
            .unwrap_or(true)
    }

    fn container_unavailable(&self) -> PropertyError {
        PropertyError::ContainerUnavailable {
            property: self.display_name.clone(),
            container: self.container.to_string(),
        }
    }
}
