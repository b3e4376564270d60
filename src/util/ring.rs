//! Index arithmetic for fixed-capacity, overwrite-oldest ring buffers.

/// Maps a monotonically growing logical position onto a fixed set of slots.
///
/// The index owns no storage. Callers keep a parallel slot array and write
/// into whatever slot [`RingBufferIndex::add`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBufferIndex {
    capacity: usize,
    total_added: u64,
}

impl RingBufferIndex {
    /// Create an index over `capacity` slots. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            total_added: 0,
        }
    }

    /// Claim the next slot, evicting the oldest entry once full.
    pub fn add(&mut self) -> usize {
        let slot = self.physical(self.total_added);
        self.total_added += 1;
        slot
    }

    /// Number of entries currently retained.
    pub fn size(&self) -> usize {
        usize::try_from(self.total_added).map_or(self.capacity, |n| n.min(self.capacity))
    }

    /// Physical slot of the `offset`-th retained entry, 0 being the oldest.
    pub fn index_of(&self, offset: usize) -> usize {
        let oldest = self.total_added.saturating_sub(self.size() as u64);
        self.physical(oldest + offset as u64)
    }

    /// Slot count.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries ever added, including evicted ones.
    pub const fn total_added(&self) -> u64 {
        self.total_added
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.total_added = 0;
    }

    #[allow(clippy::cast_possible_truncation)]
    fn physical(&self, logical: u64) -> usize {
        // capacity is a usize, so the remainder always fits back into one
        (logical % self.capacity as u64) as usize
    }
}
