pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod tlb;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::{Error, FaultReason, ParseWarning, Result};
pub use memory::{BackingStore, FileBackingStore, Page, PhysicalMemory};
pub use page_table::{PageTable, PageTableEntry};
pub use tlb::{Tlb, TlbEntry};
pub use translation::{FrameNumber, LogicalAddress, Lookup, PageNumber, Translation};
pub use vm_manager::{Stats, VmManager};
