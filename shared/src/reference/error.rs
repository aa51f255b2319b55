use thiserror::Error;

/// Errors that can occur while resolving a stable-id reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Resolution failed earlier and the reference was marked invalid for good
    #[error("Reference {id} was invalidated and must be reconstructed")]
    Invalidated { id: String },

    /// A component reference cannot resolve until its owning entity does
    #[error("Owner {owner} of component {component} could not be resolved")]
    OwnerUnresolved { owner: String, component: String },

    /// A component reference was built without a path to the component
    #[error("Component reference under {owner} has an empty path")]
    EmptyComponentPath { owner: String },

    /// No live object currently carries the stable identifier
    #[error("No live object found for {id}")]
    NotFound { id: String },
}
