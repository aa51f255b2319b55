use thiserror::Error;

use scenebridge_shared::{
    FunctionError, PortalError, PropertyError, QueueError, ReferenceError, SceneError, TreeError,
};

/// Errors surfaced by the sync engine's `try_*` operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No registered or built-in function has the given id
    #[error("Function {id} is not known to the bridge")]
    UnknownFunction { id: String },

    /// No property, portal or built-in pin has the given id
    #[error("Pin {id} is not known to the bridge")]
    UnknownPin { id: String },

    /// A function parameter carried an unusable value
    #[error("Invalid value for parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The JSON configuration could not be read
    #[error("Cannot parse bridge configuration: {reason}")]
    ConfigParse { reason: String },

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Portal(#[from] PortalError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Function(#[from] FunctionError),
}
