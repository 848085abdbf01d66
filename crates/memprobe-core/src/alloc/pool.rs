//! Fixed-capacity pool of outstanding blocks.

use super::Block;

/// Slots reserved up front. Larger pools grow on demand so a 2^30-slot
/// logical capacity does not commit its handle storage at construction.
const INITIAL_RESERVE_SLOTS: usize = 1 << 16;

/// Ordered, fixed-capacity sequence of live blocks.
///
/// Blocks are written sequentially at the cursor. The only removal is a
/// full drain, after which the cursor is back at zero.
#[derive(Debug)]
pub struct AllocationPool {
    blocks: Vec<Block>,
    capacity: usize,
}

impl AllocationPool {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity.min(INITIAL_RESERVE_SLOTS)),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Next write offset. Always equal to the live count.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn live(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.blocks.len() >= self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Store `block` at the cursor. A full pool hands the block back.
    pub fn push(&mut self, block: Block) -> Result<(), Block> {
        if self.is_full() {
            return Err(block);
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Remove every held block and reset the cursor. Backing storage is
    /// kept for the next fill.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Block> {
        self.blocks.drain(..)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}
