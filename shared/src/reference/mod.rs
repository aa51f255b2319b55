pub mod actor_reference;
pub mod component_reference;
pub mod error;
