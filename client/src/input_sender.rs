use std::sync::Arc;

use log::info;
use uuid::Uuid;

use scenebridge_shared::{FrameNumber, PendingInputQueue, QueueError};

use crate::session::{ExecutionState, SessionControl};

/// Cloneable handle the network context uses to feed the engine.
///
/// Values only land in the pending input queue here; they reach the live
/// model at the next begin-frame.
#[derive(Clone)]
pub struct InputSender {
    queue: Arc<PendingInputQueue>,
    session: SessionControl,
}

impl InputSender {
    pub(crate) fn new(queue: Arc<PendingInputQueue>, session: SessionControl) -> Self {
        Self { queue, session }
    }

    /// Queues a remote value for `pin`. A reset drains every queue first.
    pub fn on_node_value_changed(
        &self,
        pin: Uuid,
        data: Vec<u8>,
        reset: bool,
        frame: FrameNumber,
    ) -> Result<(), QueueError> {
        if reset {
            let dropped = self.queue.reset()?;
            if dropped > 0 {
                info!("Input reset dropped {} queued values", dropped);
            }
        }
        self.queue.push(pin, data, frame)
    }

    pub fn on_state_changed(&self, state: ExecutionState) {
        self.session.on_state_changed(state);
    }

    pub fn session(&self) -> &SessionControl {
        &self.session
    }
}
