use std::collections::HashMap;

use crate::constants::{DEFAULT_CATEGORY, FIELD_CATEGORY, FIELD_DISPLAY_NAME, FIELD_EDIT_CONDITION};

/// Reflected kind of a live-model field
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Name,
    Text,
    Enum {
        name: String,
        variants: Vec<String>,
        width: usize,
    },
    Vec2,
    Vec3,
    Vec4,
    Vec4f,
    Quat,
    Rotator,
    Transform,
    Track,
    Struct {
        name: String,
        fields: Vec<FieldDescriptor>,
    },
    Object,
    Unsupported(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldFlags {
    pub editable: bool,
    pub deprecated: bool,
    pub public: bool,
    pub disable_edit_on_instance: bool,
    pub advanced: bool,
    pub read_only: bool,
    pub out_param: bool,
    pub transient: bool,
}

impl FieldFlags {
    pub fn editable() -> Self {
        Self {
            editable: true,
            public: true,
            ..Default::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.editable && !self.deprecated && self.public && !self.disable_edit_on_instance
    }
}

/// Description of a single reflected field, as surfaced by the live model
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Unique within the owning class, used to find the field again after reloads
    pub path: String,
    pub kind: FieldKind,
    pub flags: FieldFlags,
    pub metadata: HashMap<String, String>,
}

impl FieldDescriptor {
    pub fn new(name: &str, path: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind,
            flags: FieldFlags::editable(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn display_name(&self) -> &str {
        self.metadata
            .get(FIELD_DISPLAY_NAME)
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    pub fn category(&self) -> &str {
        self.metadata
            .get(FIELD_CATEGORY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Name of the sibling field this one's visibility depends on, with any
    /// leading negation stripped
    pub fn edit_condition(&self) -> Option<&str> {
        let condition = self.metadata.get(FIELD_EDIT_CONDITION)?;
        let condition = condition.trim().trim_start_matches('!').trim();
        if condition.is_empty() {
            None
        } else {
            Some(condition)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FunctionFlags {
    pub blueprint_callable: bool,
    pub public: bool,
    pub event: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDescriptor {
    pub name: String,
    pub flags: FunctionFlags,
    pub params: Vec<FieldDescriptor>,
}

impl FunctionDescriptor {
    pub fn new(name: &str, params: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            flags: FunctionFlags {
                blueprint_callable: true,
                public: true,
                event: false,
            },
            params,
        }
    }

    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Helper and changed-handler operations never reach the remote side
    pub fn is_exposed(&self) -> bool {
        if !self.flags.blueprint_callable || !self.flags.public || self.flags.event {
            return false;
        }
        !(self.name.starts_with("OnChanged_") || self.name.starts_with("OnLengthChanged_"))
    }
}

/// Broad classification of live objects, only as fine as the bridge needs it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Actor,
    Component,
    Widget,
    RenderTarget,
    Other,
}
