use crate::constants::*;

pub type PageNumber = u8;
pub type FrameNumber = u8;

/// Represents the decomposed components of a logical address
///
/// Only the low 16 bits carry meaning: an 8-bit page number followed by an
/// 8-bit offset. Higher bits are kept in `raw` for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: i32,
    pub page: PageNumber,
    pub offset: u8,
}

impl LogicalAddress {
    /// Decompose a raw address into its page number and offset
    pub fn from_raw(raw: i32) -> Self {
        let bits = raw as u32;
        let page = ((bits >> PAGE_SHIFT) & PAGE_MASK) as PageNumber;
        let offset = (bits & OFFSET_MASK) as u8;

        LogicalAddress { raw, page, offset }
    }

    /// The meaningful 16-bit part of the address (page and offset recombined)
    #[inline]
    pub fn page_offset(&self) -> u32 {
        (self.page as u32) << PAGE_SHIFT | self.offset as u32
    }

    /// All 32 bits of the raw address, most significant first
    pub fn binary(&self) -> String {
        format!("{:032b}", self.raw as u32)
    }
}

impl std::fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LA({}) = (page={}, offset={})",
            self.raw, self.page, self.offset
        )
    }
}

/// Where the frame number for a request was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    TlbHit,
    PageTableHit,
    PageFault,
}

impl Lookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::TlbHit => "tlb hit",
            Lookup::PageTableHit => "page table hit",
            Lookup::PageFault => "page fault",
        }
    }
}

/// A fully resolved request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: LogicalAddress,
    pub frame: FrameNumber,
    pub physical: u32,
    pub byte: i8,
    pub lookup: Lookup,
}

impl Translation {
    /// Physical address of `offset` within `frame`
    #[inline]
    pub fn physical_address(frame: FrameNumber, offset: u8) -> u32 {
        frame as u32 * FRAME_SIZE as u32 + offset as u32
    }
}
