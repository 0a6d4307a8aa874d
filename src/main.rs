//! vmmgr - demand-paged virtual memory manager
//!
//! Usage: vmmgr [OPTIONS] <ADDRESS_FILE>
//!
//! Translates every logical address in ADDRESS_FILE (one decimal integer per
//! line) to a physical address, faulting pages in from the backing store on
//! first touch, and prints one report block per address.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};
use log::info;

use vm_manager::io::{read_addresses, write_page_table, write_stats, write_translation};
use vm_manager::{DEFAULT_BACKING_STORE, Error, FileBackingStore, Result, TLB_SIZE, VmManager};

/// Exit status for a bad command line
const USAGE_EXIT: i32 = -1;

#[derive(Parser, Debug)]
#[command(name = "vmmgr", version)]
#[command(about = "Translate logical addresses through a TLB and demand-paged page table")]
struct Cli {
    /// File of logical addresses, one decimal integer per line
    address_file: PathBuf,

    /// Backing-store file of consecutive 256-byte pages
    #[arg(short, long, default_value = DEFAULT_BACKING_STORE)]
    backing_store: PathBuf,

    /// Number of TLB entries
    #[arg(short, long, default_value_t = TLB_SIZE as u16,
          value_parser = clap::value_parser!(u16).range(1..=256))]
    tlb_entries: u16,

    /// Log every translation and page fault
    #[arg(short, long)]
    verbose: bool,

    /// Print hit and fault counters after the report
    #[arg(short, long)]
    stats: bool,

    /// Print the final page table
    #[arg(long)]
    dump_page_table: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            _ => {
                println!("{}", Cli::command().render_usage());
                let detail = match e.get(ContextKind::InvalidArg) {
                    Some(arg) => format!("{}: {arg}", e.kind()),
                    None => e.kind().to_string(),
                };
                eprintln!("{}", Error::Usage(detail));
                process::exit(USAGE_EXIT);
            }
        },
    };

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let addresses = read_addresses(&cli.address_file)?;
    let store = FileBackingStore::open(&cli.backing_store)?;
    let mut vm = VmManager::with_tlb_capacity(store, usize::from(cli.tlb_entries));

    info!(
        "{} addresses from {}, backing store {}, {} TLB entries",
        addresses.len(),
        cli.address_file.display(),
        cli.backing_store.display(),
        cli.tlb_entries
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for &raw in &addresses {
        match vm.translate(raw) {
            Ok(t) => write_translation(&mut out, &t)?,
            Err(e) => {
                // keep what was already translated
                out.flush()?;
                return Err(e);
            }
        }
    }

    if cli.dump_page_table {
        write_page_table(&mut out, vm.page_table())?;
    }
    if cli.stats {
        write_stats(&mut out, &vm.stats())?;
    }
    out.flush()?;

    let stats = vm.stats();
    info!(
        "done: {} translations, {} page faults, {} TLB hits",
        stats.translations, stats.page_faults, stats.tlb_hits
    );
    Ok(())
}
