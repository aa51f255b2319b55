pub mod error;
pub mod pending_input_queue;
