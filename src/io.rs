use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::warn;

use crate::error::{Error, ParseWarning, Result};
use crate::page_table::{PageTable, PageTableEntry};
use crate::translation::Translation;
use crate::vm_manager::Stats;

const RULE: &str = "---------------------------";

/// Parse one line of an address file (`line` is 1-based, for diagnostics)
pub fn parse_address(line: usize, text: &str) -> std::result::Result<i32, ParseWarning> {
    text.trim().parse::<i32>().map_err(|_| ParseWarning {
        line,
        text: text.to_string(),
    })
}

/// Read addresses, one decimal integer per line
///
/// Lines that do not parse, including ones that are not UTF-8, become
/// address 0 and are logged as warnings.
pub fn read_addresses_from<R: BufRead>(reader: R) -> Result<Vec<i32>> {
    let mut addresses = Vec::new();
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let parsed = match std::str::from_utf8(&line) {
            Ok(text) => parse_address(idx + 1, text),
            Err(_) => Err(ParseWarning {
                line: idx + 1,
                text: String::from_utf8_lossy(&line).into_owned(),
            }),
        };
        let addr = parsed.unwrap_or_else(|w| {
            warn!("{w}");
            0
        });
        addresses.push(addr);
    }
    Ok(addresses)
}

pub fn read_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<i32>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_addresses_from(BufReader::new(file))
}

/// Write the report block for one translation
pub fn write_translation<W: Write>(out: &mut W, t: &Translation) -> Result<()> {
    writeln!(out, "{RULE}\n")?;
    writeln!(out, "Logical Address: {}", t.logical.raw)?;
    writeln!(out, "Physical Address: {}", t.physical)?;
    writeln!(out, "Signed Byte: {}", t.byte)?;
    writeln!(out, "page: {}", t.logical.page)?;
    writeln!(out, "offset: {}", t.logical.offset)?;
    writeln!(out, "{RULE}\n")?;
    Ok(())
}

/// One `"<page> <frame>"` line per slot, `-1` for unmapped pages
pub fn write_page_table<W: Write>(out: &mut W, pt: &PageTable) -> Result<()> {
    for (page, entry) in pt.entries().iter().enumerate() {
        match entry {
            PageTableEntry::Mapped(frame) => writeln!(out, "{page} {frame}")?,
            PageTableEntry::Unmapped => writeln!(out, "{page} -1")?,
        }
    }
    Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &Stats) -> Result<()> {
    writeln!(out, "Translations: {}", stats.translations)?;
    writeln!(out, "TLB hits: {}", stats.tlb_hits)?;
    writeln!(out, "Page table hits: {}", stats.page_table_hits)?;
    writeln!(out, "Page faults: {}", stats.page_faults)?;
    writeln!(out, "Page fault rate: {:.3}", stats.page_fault_rate())?;
    writeln!(out, "TLB hit rate: {:.3}", stats.tlb_hit_rate())?;
    Ok(())
}
