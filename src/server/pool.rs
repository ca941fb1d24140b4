//! Fixed-capacity worker slots.
//!
//! A connection is only served if a slot can be claimed without waiting. The
//! claim is a semaphore permit paired with a slot number from a free list; both
//! are given back when the [`WorkerSlot`] is dropped, which happens when the task
//! serving the connection finishes, whatever the outcome.

use std::sync::{Arc, Mutex, MutexGuard};

use log::error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug)]
struct Slots {
    semaphore: Arc<Semaphore>,
    free: Mutex<Vec<usize>>,
    capacity: usize,
}

impl Slots {
    fn free_list(&self) -> MutexGuard<'_, Vec<usize>> {
        // The list is only pushed to and popped from, so a poisoned lock still holds valid data.
        self.free.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A bounded set of worker slots shared between the accept loop and its tasks.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    slots: Arc<Slots>,
}

impl WorkerPool {
    /// Create a pool with `capacity` slots, all idle.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Arc::new(Slots {
                semaphore: Arc::new(Semaphore::new(capacity)),
                // Reversed so slot 0 is handed out first.
                free: Mutex::new((0..capacity).rev().collect()),
                capacity,
            }),
        }
    }

    /// Claim an idle slot, or `None` if every slot is busy.
    ///
    /// Never waits: excess load is meant to be rejected, not queued.
    pub fn try_acquire(&self) -> Option<WorkerSlot> {
        let permit = self.slots.semaphore.clone().try_acquire_owned().ok()?;
        // Holding a permit guarantees a free slot number.
        let Some(index) = self.slots.free_list().pop() else {
            error!(
                "Worker pool out of slot numbers with {} permits held; rejecting",
                self.busy()
            );
            return None;
        };
        Some(WorkerSlot {
            index,
            slots: self.slots.clone(),
            _permit: permit,
        })
    }

    /// Empty the free list while leaving the permits alone.
    #[cfg(test)]
    pub(crate) fn forget_slot_numbers(&self) {
        self.slots.free_list().clear();
    }

    /// The total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.capacity
    }

    /// The number of slots currently serving a connection.
    pub fn busy(&self) -> usize {
        self.slots.capacity - self.slots.semaphore.available_permits()
    }

    /// The number of idle slots.
    pub fn idle(&self) -> usize {
        self.slots.semaphore.available_permits()
    }
}

/// A claimed slot. Dropping it marks the slot idle again.
#[derive(Debug)]
pub struct WorkerSlot {
    index: usize,
    slots: Arc<Slots>,
    _permit: OwnedSemaphorePermit,
}

impl WorkerSlot {
    /// The slot number, in `0..capacity`.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        // The number goes back before the permit is released by the field drop.
        self.slots.free_list().push(self.index);
    }
}
