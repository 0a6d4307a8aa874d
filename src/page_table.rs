use crate::constants::*;
use crate::error::{Error, Result};
use crate::translation::{FrameNumber, PageNumber};

/// One slot of the page table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTableEntry {
    #[default]
    Unmapped,
    Mapped(FrameNumber),
}

impl PageTableEntry {
    pub fn frame(&self) -> Option<FrameNumber> {
        match self {
            PageTableEntry::Mapped(frame) => Some(*frame),
            PageTableEntry::Unmapped => None,
        }
    }
}

/// Maps every page number to the frame holding it
pub struct PageTable {
    entries: Box<[PageTableEntry; NUM_PAGES]>,
}

impl PageTable {
    /// Create a page table with every page unmapped
    pub fn new() -> Self {
        PageTable {
            entries: Box::new([PageTableEntry::Unmapped; NUM_PAGES]),
        }
    }

    #[inline]
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.entries[page as usize].frame()
    }

    #[inline]
    pub fn entry(&self, page: PageNumber) -> PageTableEntry {
        self.entries[page as usize]
    }

    /// Record that `page` lives in `frame`
    ///
    /// A page is mapped once. Mapping it again to the same frame is a no-op;
    /// mapping it to a different frame is rejected.
    pub fn map(&mut self, page: PageNumber, frame: FrameNumber) -> Result<()> {
        let slot = &mut self.entries[page as usize];
        match *slot {
            PageTableEntry::Unmapped => {
                *slot = PageTableEntry::Mapped(frame);
                Ok(())
            }
            PageTableEntry::Mapped(current) if current == frame => Ok(()),
            PageTableEntry::Mapped(current) => Err(Error::Remap {
                page,
                current,
                requested: frame,
            }),
        }
    }

    /// Number of mapped pages
    pub fn mapped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, PageTableEntry::Mapped(_)))
            .count()
    }

    /// All slots in page-number order
    pub fn entries(&self) -> &[PageTableEntry; NUM_PAGES] {
        &self.entries
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}
