use thiserror::Error;

/// Errors that can occur while accessing the pending input queue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A thread panicked while holding the queue lock
    #[error("Pending input queue lock is poisoned")]
    LockPoisoned,
}
