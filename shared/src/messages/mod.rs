pub mod node;
pub mod pin;
pub mod update;
