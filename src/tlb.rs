use log::trace;

use crate::constants::*;
use crate::translation::{FrameNumber, PageNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: PageNumber,
    pub frame: FrameNumber,
}

/// Translation lookaside buffer
///
/// A small fully associative cache of page to frame mappings. Empty slots are
/// filled lowest index first; once every slot is taken, inserts overwrite the
/// slot under a rotating cursor (`inserts % capacity`), which evicts in FIFO
/// order without any recency bookkeeping. Entries are never invalidated.
pub struct Tlb {
    slots: Vec<Option<TlbEntry>>,
    inserts: usize,
}

impl Tlb {
    pub fn new() -> Self {
        Self::with_capacity(TLB_SIZE)
    }

    /// # Panics
    /// If `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "TLB capacity must be non-zero");
        Tlb {
            slots: vec![None; capacity],
            inserts: 0,
        }
    }

    /// Linear scan, first match wins
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.slots
            .iter()
            .flatten()
            .find(|e| e.page == page)
            .map(|e| e.frame)
    }

    /// Cache a mapping, evicting the oldest entry if the buffer is full
    ///
    /// Returns the evicted entry, if any. A page that is already cached has
    /// its frame updated in place and does not count as an insert.
    pub fn insert(&mut self, page: PageNumber, frame: FrameNumber) -> Option<TlbEntry> {
        let entry = TlbEntry { page, frame };

        if let Some(slot) = self.slots.iter_mut().flatten().find(|e| e.page == page) {
            slot.frame = frame;
            return None;
        }

        let idx = match self.slots.iter().position(Option::is_none) {
            Some(empty) => empty,
            None => self.inserts % self.slots.len(),
        };
        self.inserts += 1;

        let evicted = self.slots[idx].replace(entry);
        if let Some(old) = evicted {
            trace!(
                "tlb: slot {idx} evicts page {} (frame {}) for page {page}",
                old.page, old.frame
            );
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Cached entries, oldest insert first
    pub fn entries(&self) -> Vec<TlbEntry> {
        let cap = self.slots.len();
        // the cursor points at the oldest slot once the buffer has wrapped
        let start = if self.inserts > cap { self.inserts % cap } else { 0 };
        (0..cap)
            .filter_map(|i| self.slots[(start + i) % cap])
            .collect()
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tlb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TLB ({}/{}):", self.len(), self.capacity())?;
        for (idx, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(e) => writeln!(f, "\t{:2}: page {:3} -> frame {:3}", idx, e.page, e.frame)?,
                None => writeln!(f, "\t{:2}: -", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let tlb = Tlb::new();
        assert_eq!(tlb.capacity(), TLB_SIZE);
        assert_eq!(tlb.len(), 0);
        assert!(tlb.is_empty());
        assert_eq!(tlb.lookup(0), None);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tlb = Tlb::new();
        assert_eq!(tlb.insert(5, 5), None);
        assert_eq!(tlb.insert(0, 0), None);

        assert_eq!(tlb.lookup(5), Some(5));
        assert_eq!(tlb.lookup(0), Some(0));
        assert_eq!(tlb.lookup(6), None);
        assert_eq!(tlb.len(), 2);
    }

    #[test]
    fn test_fills_lowest_empty_slot() {
        let mut tlb = Tlb::with_capacity(4);
        for p in 0..4 {
            tlb.insert(p, p);
        }
        assert!(tlb.is_full());
        let pages: Vec<_> = tlb.entries().iter().map(|e| e.page).collect();
        assert_eq!(pages, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut tlb = Tlb::new();
        for p in 0..16 {
            tlb.insert(p, p);
        }

        // 17th distinct page replaces the first one inserted
        let evicted = tlb.insert(16, 16);
        assert_eq!(evicted, Some(TlbEntry { page: 0, frame: 0 }));
        assert_eq!(tlb.lookup(0), None);
        assert_eq!(tlb.lookup(16), Some(16));
        assert_eq!(tlb.len(), 16);

        // then the second
        let evicted = tlb.insert(17, 17);
        assert_eq!(evicted, Some(TlbEntry { page: 1, frame: 1 }));
    }

    #[test]
    fn test_lookup_does_not_refresh() {
        // FIFO, not LRU: touching page 0 does not save it
        let mut tlb = Tlb::with_capacity(2);
        tlb.insert(0, 0);
        tlb.insert(1, 1);
        assert_eq!(tlb.lookup(0), Some(0));

        tlb.insert(2, 2);
        assert_eq!(tlb.lookup(0), None);
        assert_eq!(tlb.lookup(1), Some(1));
    }

    #[test]
    fn test_entries_in_insert_order_after_wrap() {
        let mut tlb = Tlb::with_capacity(3);
        for p in 10..15 {
            tlb.insert(p, p);
        }
        let pages: Vec<_> = tlb.entries().iter().map(|e| e.page).collect();
        assert_eq!(pages, vec![12, 13, 14]);
    }

    #[test]
    fn test_reinsert_updates_in_place() {
        let mut tlb = Tlb::with_capacity(2);
        tlb.insert(7, 7);
        assert_eq!(tlb.insert(7, 7), None);
        assert_eq!(tlb.len(), 1);

        tlb.insert(8, 8);
        // only two real inserts, nothing evicted yet
        assert!(tlb.is_full());
        assert_eq!(tlb.lookup(7), Some(7));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut tlb = Tlb::new();
        for p in 0..=255u8 {
            tlb.insert(p, p);
            assert!(tlb.len() <= TLB_SIZE);
        }
        assert_eq!(tlb.len(), TLB_SIZE);
        // survivors are the last 16 pages touched
        let pages: Vec<_> = tlb.entries().iter().map(|e| e.page).collect();
        assert_eq!(pages, (240..=255).collect::<Vec<u8>>());
    }
}
