pub const OFFSET_BITS: u32 = 8;
pub const PAGE_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const FRAME_SIZE: usize = PAGE_SIZE;
pub const NUM_PAGES: usize = 1 << PAGE_BITS;

// physical memory covers the whole logical space, so frames are never reclaimed
pub const NUM_FRAMES: usize = NUM_PAGES;

pub const TLB_SIZE: usize = 16;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = (1 << PAGE_BITS) - 1;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
