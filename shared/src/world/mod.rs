pub mod container;
pub mod error;
pub mod reflection;
pub mod world_type;
