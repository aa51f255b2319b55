use std::{
    collections::{HashMap, VecDeque},
    sync::{Condvar, Mutex, MutexGuard},
    time::Duration,
};

use log::{error, warn};
use uuid::Uuid;

use crate::{input_queue::error::QueueError, types::FrameNumber};

/// Bounded wait applied by [`PendingInputQueue::pop`] while a pin is live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputQueueConfig {
    /// Number of waits before giving up on the requested frame
    pub wait_retries: u32,
    /// Length of one wait
    pub wait_interval: Duration,
}

impl Default for InputQueueConfig {
    fn default() -> Self {
        Self {
            wait_retries: 5,
            wait_interval: Duration::from_micros(500),
        }
    }
}

#[derive(Default)]
struct PinQueue {
    entries: VecDeque<(Vec<u8>, FrameNumber)>,
    live: bool,
}

/// Per-pin queues of inbound `(payload, frame)` pairs.
///
/// Filled from the network context, drained by the simulation context at
/// the start of each frame. The lock only ever guards queue access.
pub struct PendingInputQueue {
    pins: Mutex<HashMap<Uuid, PinQueue>>,
    arrived: Condvar,
    config: InputQueueConfig,
}

impl Default for PendingInputQueue {
    fn default() -> Self {
        Self::new(InputQueueConfig::default())
    }
}

impl PendingInputQueue {
    pub fn new(config: InputQueueConfig) -> Self {
        Self {
            pins: Mutex::new(HashMap::new()),
            arrived: Condvar::new(),
            config,
        }
    }

    pub fn config(&self) -> &InputQueueConfig {
        &self.config
    }

    /// Appends a payload and marks the pin live
    pub fn push(&self, pin: Uuid, data: Vec<u8>, frame: FrameNumber) -> Result<(), QueueError> {
        let mut pins = self.lock()?;
        let queue = pins.entry(pin).or_default();
        queue.entries.push_back((data, frame));
        queue.live = true;
        drop(pins);
        self.arrived.notify_all();
        Ok(())
    }

    /// Takes the newest-arrived entry whose frame is at least `frame`.
    ///
    /// Everything that arrived before the returned entry is discarded; later
    /// arrivals stay queued. When `should_wait` is set and the pin is live,
    /// waits up to the configured number of intervals for a qualifying
    /// entry. If none shows up, stale entries are dropped and the pin is
    /// marked not live until the next push.
    pub fn pop(
        &self,
        pin: &Uuid,
        should_wait: bool,
        frame: FrameNumber,
    ) -> Result<Option<(Vec<u8>, FrameNumber)>, QueueError> {
        let mut pins = self.lock()?;
        let mut retries = 0;
        loop {
            if let Some(queue) = pins.get_mut(pin) {
                if let Some(index) = queue.entries.iter().rposition(|(_, queued)| *queued >= frame) {
                    let entry = queue.entries.remove(index);
                    queue.entries.drain(..index);
                    if let Some((_, popped)) = &entry {
                        if *popped != frame {
                            warn!(
                                "Frame mismatch on pin {}: requested {}, popped {}",
                                pin, frame, popped
                            );
                        }
                    }
                    return Ok(entry);
                }
            }

            let live = pins.get(pin).map(|queue| queue.live).unwrap_or(false);
            if !should_wait || !live || retries >= self.config.wait_retries {
                break;
            }
            retries += 1;
            let Ok((guard, _)) = self.arrived.wait_timeout(pins, self.config.wait_interval) else {
                error!("Pending input queue lock poisoned while waiting on pin {}", pin);
                return Err(QueueError::LockPoisoned);
            };
            pins = guard;
        }

        if let Some(queue) = pins.get_mut(pin) {
            queue.entries.retain(|(_, queued)| *queued >= frame);
            queue.live = false;
        }
        Ok(None)
    }

    /// Takes the most recent payload of a pin, discarding the rest
    pub fn take_latest(&self, pin: &Uuid) -> Result<Option<(Vec<u8>, FrameNumber)>, QueueError> {
        let mut pins = self.lock()?;
        let Some(queue) = pins.get_mut(pin) else {
            return Ok(None);
        };
        let latest = queue.entries.pop_back();
        queue.entries.clear();
        Ok(latest)
    }

    /// Pins with at least one queued payload, in no particular order
    pub fn pending_pins(&self) -> Result<Vec<Uuid>, QueueError> {
        let pins = self.lock()?;
        Ok(pins
            .iter()
            .filter(|(_, queue)| !queue.entries.is_empty())
            .map(|(pin, _)| *pin)
            .collect())
    }

    pub fn is_live(&self, pin: &Uuid) -> Result<bool, QueueError> {
        let pins = self.lock()?;
        Ok(pins.get(pin).map(|queue| queue.live).unwrap_or(false))
    }

    pub fn len(&self, pin: &Uuid) -> Result<usize, QueueError> {
        let pins = self.lock()?;
        Ok(pins.get(pin).map(|queue| queue.entries.len()).unwrap_or(0))
    }

    /// Empties every queue under a single lock, returning how many payloads
    /// were dropped
    pub fn reset(&self) -> Result<usize, QueueError> {
        let mut pins = self.lock()?;
        let dropped = pins.values().map(|queue| queue.entries.len()).sum();
        pins.clear();
        Ok(dropped)
    }

    pub fn remove(&self, pin: &Uuid) -> Result<(), QueueError> {
        let mut pins = self.lock()?;
        pins.remove(pin);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, PinQueue>>, QueueError> {
        let Ok(guard) = self.pins.lock() else {
            error!("Pending input queue lock poisoned");
            return Err(QueueError::LockPoisoned);
        };
        Ok(guard)
    }
}
