pub mod error;
pub mod function_manager;
