use log::{debug, info};

use crate::error::Result;
use crate::memory::{BackingStore, PhysicalMemory};
use crate::page_table::PageTable;
use crate::tlb::Tlb;
use crate::translation::{FrameNumber, LogicalAddress, Lookup, PageNumber, Translation};

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub translations: u64,
    pub tlb_hits: u64,
    pub page_table_hits: u64,
    /// Equal to the number of backing-store reads
    pub page_faults: u64,
}

impl Stats {
    pub fn page_fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.translations)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        ratio(self.tlb_hits, self.translations)
    }

    fn record(&mut self, lookup: Lookup) {
        self.translations += 1;
        match lookup {
            Lookup::TlbHit => self.tlb_hits += 1,
            Lookup::PageTableHit => self.page_table_hits += 1,
            Lookup::PageFault => self.page_faults += 1,
        }
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}

/// The translator: owns the page table, TLB and physical memory of one
/// address space and pulls pages from `S` on demand.
pub struct VmManager<S> {
    store: S,
    pm: PhysicalMemory,
    pt: PageTable,
    tlb: Tlb,
    stats: Stats,
}

impl<S: BackingStore> VmManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_parts(store, PhysicalMemory::new(), PageTable::new(), Tlb::new())
    }

    pub fn with_tlb_capacity(store: S, capacity: usize) -> Self {
        Self::with_parts(
            store,
            PhysicalMemory::new(),
            PageTable::new(),
            Tlb::with_capacity(capacity),
        )
    }

    /// Assemble a translator from explicitly constructed components
    pub fn with_parts(store: S, pm: PhysicalMemory, pt: PageTable, tlb: Tlb) -> Self {
        VmManager {
            store,
            pm,
            pt,
            tlb,
            stats: Stats::default(),
        }
    }

    /// Translate one logical address
    ///
    /// TLB first, then the page table, then a fault that loads the page from
    /// the backing store. A failed load is returned as an error and leaves
    /// the page unmapped.
    pub fn translate(&mut self, raw: i32) -> Result<Translation> {
        let la = LogicalAddress::from_raw(raw);

        let (frame, lookup) = match self.tlb.lookup(la.page) {
            Some(frame) => (frame, Lookup::TlbHit),
            None => match self.pt.lookup(la.page) {
                Some(frame) => {
                    self.tlb.insert(la.page, frame);
                    (frame, Lookup::PageTableHit)
                }
                None => (self.page_fault(la.page)?, Lookup::PageFault),
            },
        };
        self.stats.record(lookup);

        let physical = Translation::physical_address(frame, la.offset);
        let byte = self.pm.read_byte(frame, la.offset);

        debug!(
            "{} [{}] -> PA {} byte {} ({})",
            la,
            la.binary(),
            physical,
            byte,
            lookup.as_str()
        );

        Ok(Translation {
            logical: la,
            frame,
            physical,
            byte,
            lookup,
        })
    }

    /// Translate a batch of addresses, stopping at the first fault that
    /// cannot be resolved
    pub fn translate_batch(&mut self, addrs: &[i32]) -> Result<Vec<Translation>> {
        addrs.iter().map(|&raw| self.translate(raw)).collect()
    }

    fn page_fault(&mut self, page: PageNumber) -> Result<FrameNumber> {
        // direct mapping: page p always lands in frame p
        let frame: FrameNumber = page;

        let bytes = self.store.read_page(page)?;
        self.pm.write_page(frame, &bytes);
        self.pt.map(page, frame)?;
        self.tlb.insert(page, frame);

        info!("page fault: loaded page {page} into frame {frame}");
        Ok(frame)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn page_table(&self) -> &PageTable {
        &self.pt
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.pm
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
