pub mod error;
pub mod portal;
pub mod portal_manager;
