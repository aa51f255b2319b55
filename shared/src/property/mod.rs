pub mod error;
pub mod factory;
pub mod location;
pub mod property;
pub mod property_kind;
pub mod property_manager;
pub mod track;
