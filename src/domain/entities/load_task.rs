//! Units of work for the loading pipeline.

use std::num::NonZeroUsize;

use super::{ResolvedImage, SlotId};

/// One image to load into one slot.
///
/// Deliberately not `Clone`: a task is moved into exactly one loader, so no two
/// attempt sequences can target the same slot.
#[derive(Debug)]
pub struct LoadTask {
    /// Slot owned by this task.
    pub slot: SlotId,
    /// Image to load.
    pub image: ResolvedImage,
    /// Position in the provider's list.
    pub index: usize,
}

impl LoadTask {
    /// Creates a new task.
    #[must_use]
    pub const fn new(slot: SlotId, image: ResolvedImage, index: usize) -> Self {
        Self { slot, image, index }
    }
}

/// Ordered partition of work into fixed-size batches.
#[derive(Debug)]
pub struct BatchPlan<T> {
    batches: Vec<Vec<T>>,
    batch_size: NonZeroUsize,
}

impl<T> BatchPlan<T> {
    /// Splits `items` into consecutive groups of `batch_size`; the last may be shorter.
    #[must_use]
    pub fn new(items: Vec<T>, batch_size: NonZeroUsize) -> Self {
        let size = batch_size.get();
        let mut batches = Vec::with_capacity(items.len().div_ceil(size));
        let mut current = Vec::with_capacity(size);

        for item in items {
            current.push(item);
            if current.len() == size {
                batches.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
            }
        }
        if !current.is_empty() {
            batches.push(current);
        }

        Self {
            batches,
            batch_size,
        }
    }

    /// Batch that the item at `position` lands in.
    #[must_use]
    pub const fn batch_index_of(&self, position: usize) -> usize {
        position / self.batch_size.get()
    }

    /// Number of batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns true if there is nothing to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Sizes of each batch, in order.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Vec::len).collect()
    }

    /// Consumes the plan, yielding batches in order.
    pub fn into_batches(self) -> impl Iterator<Item = Vec<T>> {
        self.batches.into_iter()
    }
}
