use thiserror::Error;

/// Errors reported by the live model when the bridge reads or mutates it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The object handle no longer refers to a live object
    #[error("Object {object} not found in the scene")]
    ObjectNotFound { object: String },

    /// The container has no field at the given path
    #[error("Field {field} not found on {container}")]
    FieldNotFound { container: String, field: String },

    /// The object exposes no function with the given name
    #[error("Function {function} not found on {object}")]
    FunctionNotFound { object: String, function: String },

    /// A write payload does not match the field's storage size
    #[error("Field {field} expects {expected} bytes, got {actual}")]
    SizeMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// The field rejects writes
    #[error("Field {field} is read-only")]
    ReadOnly { field: String },

    /// The live model failed while running a function
    #[error("Invoking {function} failed: {reason}")]
    InvocationFailed { function: String, reason: String },

    /// Nothing could be spawned for the given tag
    #[error("Cannot spawn {tag}: {reason}")]
    SpawnFailed { tag: String, reason: String },
}
