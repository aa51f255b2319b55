use thiserror::Error;

/// Errors that can occur during Tree Mirror operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No node with the given id exists in the mirror
    #[error("Node {id} not found in the scene tree")]
    NodeNotFound { id: String },

    /// The object handed in carries no stable identifier
    #[error("Object {object} has no stable identifier")]
    MissingGuid { object: String },
}
