use thiserror::Error;

use crate::{property::error::PropertyError, world::error::SceneError};

/// Errors that can occur while invoking an exposed function
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// No function is registered under the id
    #[error("Function {id} is not registered")]
    FunctionNotFound { id: String },

    /// The object exposing the function is gone
    #[error("Object owning function {function} is no longer alive")]
    ObjectGone { function: String },

    /// A parameter value was rejected
    #[error(transparent)]
    Parameter(#[from] PropertyError),

    /// The live model failed the call
    #[error(transparent)]
    Scene(#[from] SceneError),
}
