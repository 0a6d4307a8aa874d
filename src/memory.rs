use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::*;
use crate::error::{Error, FaultReason, Result};
use crate::translation::{FrameNumber, PageNumber};

pub type Page = [u8; PAGE_SIZE];

/// Physical memory - a fixed array of 256-byte frames
pub struct PhysicalMemory {
    /// 2D array: PM[frame][offset]
    frames: Box<[[u8; FRAME_SIZE]; NUM_FRAMES]>,
}

impl PhysicalMemory {
    /// Create a new physical memory initialized to all zeros
    pub fn new() -> Self {
        PhysicalMemory {
            frames: Box::new([[0u8; FRAME_SIZE]; NUM_FRAMES]),
        }
    }

    /// Read the byte at `offset` in `frame` as a signed value
    #[inline]
    pub fn read_byte(&self, frame: FrameNumber, offset: u8) -> i8 {
        self.frames[frame as usize][offset as usize] as i8
    }

    /// Copy a whole page into a frame
    pub fn write_page(&mut self, frame: FrameNumber, page: &Page) {
        self.frames[frame as usize].copy_from_slice(page);
    }

    /// Read-only view of a frame
    pub fn frame(&self, frame: FrameNumber) -> &[u8; FRAME_SIZE] {
        &self.frames[frame as usize]
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// Secondary storage that pages are faulted in from
pub trait BackingStore {
    /// Load the 256 bytes of `page`. Anything short of a full page is an
    /// [`Error::IoFault`].
    fn read_page(&mut self, page: PageNumber) -> Result<Page>;
}

/// Backing store over any seekable byte source, normally `BACKING_STORE.bin`
///
/// Page `p` starts at byte `p * PAGE_SIZE`.
pub struct FileBackingStore<R> {
    inner: R,
}

impl FileBackingStore<BufReader<File>> {
    /// Open a backing-store file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> FileBackingStore<R> {
    pub fn new(inner: R) -> Self {
        FileBackingStore { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> BackingStore for FileBackingStore<R> {
    fn read_page(&mut self, page: PageNumber) -> Result<Page> {
        let fault = |reason| Error::IoFault { page, reason };

        let pos = page as u64 * PAGE_SIZE as u64;
        self.inner
            .seek(SeekFrom::Start(pos))
            .map_err(|e| fault(FaultReason::Seek(e)))?;

        let mut buf = [0u8; PAGE_SIZE];
        let mut got = 0;
        while got < PAGE_SIZE {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(fault(FaultReason::Read(e))),
            }
        }

        if got < PAGE_SIZE {
            return Err(fault(FaultReason::ShortRead {
                got,
                expected: PAGE_SIZE,
            }));
        }
        Ok(buf)
    }
}
