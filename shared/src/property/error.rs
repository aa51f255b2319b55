use thiserror::Error;

use crate::world::error::SceneError;

/// Errors that can occur during Property operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// Incoming payload length differs from the field's fixed storage size
    #[error("Property {property} expects {expected} bytes, got {actual}")]
    SizeMismatch {
        property: String,
        expected: usize,
        actual: usize,
    },

    /// The object holding the property is gone or cannot be resolved
    #[error("Container {container} of property {property} is not available")]
    ContainerUnavailable { property: String, container: String },

    /// Enum payload names no variant of the enum
    #[error("'{variant}' is not a variant of enum {enum_name}")]
    UnknownEnumVariant { enum_name: String, variant: String },

    /// String payload is not valid UTF-8
    #[error("Property {property} received a string that is not valid UTF-8")]
    InvalidUtf8 { property: String },

    /// Void pins carry no value
    #[error("Property {property} of type {type_name} cannot hold a value")]
    NotWritable { property: String, type_name: String },

    /// The field kind has no proxy
    #[error("Property {property} has an unsupported type")]
    Unsupported { property: String },

    /// The live model rejected the write
    #[error(transparent)]
    Scene(#[from] SceneError),
}
