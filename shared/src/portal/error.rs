use thiserror::Error;

/// Errors that can occur during Portal operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// The source property is not registered
    #[error("Property {id} not found, cannot create a portal for it")]
    PropertyNotFound { id: String },

    /// The requested show-as mode is outside the property's capability set
    #[error("Property cannot be shown as {requested}, allowed: {allowed}")]
    IllegalShowAs { requested: String, allowed: String },

    /// The property already has a portal
    #[error("Property {property} already has portal {portal}")]
    AlreadyExists { property: String, portal: String },

    /// No portal with the given id exists
    #[error("Portal {id} not found")]
    PortalNotFound { id: String },

    /// A rebind target has a different type than the portal
    #[error("Portal {portal} carries {expected}, cannot point it at a {actual}")]
    TypeMismatch {
        portal: String,
        expected: String,
        actual: String,
    },
}
