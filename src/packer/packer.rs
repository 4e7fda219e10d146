//! The packing pipeline.
//!
//! Mirrors the cartridge layout: one raw program page, then one bank page per
//! 8064-byte slice of each data file, then filler pages up to the next power
//! of two. The bank counter tracks the bank-select address of each page: on
//! the TI-99/4A a write to >6000 + 2n switches in bank n, so the first data
//! page answers to >6002.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use ansi_term::Colour::Yellow;

use crate::error::PackError;
use crate::packer::page::{HEADER_SIZE, PAGE_SIZE, Page};

/// Bank-select address of the first data page.
pub const FIRST_DATA_BANK: u32 = 0x6002;

/// Largest cartridge board manufactured so far.
pub const BOARD_LIMIT: u64 = 2 * 1024 * 1024;
/// Largest image the current bank-switch scheme can address.
pub const BANK_SWITCH_LIMIT: u64 = 32 * 1024 * 1024;

/// Read until `buf` is full or the source is exhausted. Returns the number of
/// bytes placed in `buf`; a short count only happens at end of input.
fn read_full<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// The program's first page, plus whether the source file held more than that.
pub struct ProgramImage {
    page: Page,
    truncated: bool,
}

impl ProgramImage {
    /// Load the program page from `path`.
    pub fn load(path: &Path) -> Result<Self, PackError> {
        let mut file = File::open(path).map_err(|source| PackError::ProgramOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(&mut file)?)
    }

    /// Read up to one page over a filler-initialized buffer; a shorter file
    /// leaves the cyclic filler in the tail.
    fn from_reader<R: Read>(src: &mut R) -> io::Result<Self> {
        let mut page = Page::filler();
        let read = read_full(src, page.all_mut())?;

        // One-byte probe for content past the first page.
        let mut probe = [0u8];
        let truncated = read == PAGE_SIZE && read_full(src, &mut probe)? > 0;

        Ok(ProgramImage { page, truncated })
    }

    /// True when the program file held more than one page.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Boot header: the first 128 bytes of the program page.
    pub fn header(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&self.page.as_bytes()[..HEADER_SIZE]);
        header
    }
}

/// Streams pages into `out`, tracking the address and bank-select counters.
///
/// Generic over the sink so tests can pack into a `Vec<u8>`.
pub struct Packer<W: Write> {
    out: W,
    header: [u8; HEADER_SIZE],
    address: u64,
    bank: u32,
}

impl<W: Write> Packer<W> {
    /// Write the raw program page and point the counters at the first bank.
    pub fn new(mut out: W, program: &ProgramImage) -> Result<Self, PackError> {
        out.write_all(program.page.as_bytes())?;
        Ok(Packer {
            out,
            header: program.header(),
            address: PAGE_SIZE as u64,
            bank: FIRST_DATA_BANK,
        })
    }

    /// Total bytes written so far.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// Bank-select address of the next page to be written.
    pub fn bank(&self) -> u32 {
        self.bank
    }

    /// Append `path` as a run of bank pages, reporting the address/bank range
    /// it occupies. The file handle is released before returning.
    pub fn add_data_file(&mut self, path: &Path) -> Result<(), PackError> {
        let mut file = File::open(path).map_err(|source| PackError::DataOpen {
            path: path.to_path_buf(),
            source,
        })?;

        println!("Opened data file '{}'", path.display());
        println!(
            "- starting address {:X} (page >{:04X})",
            self.address, self.bank
        );
        self.add_data(&mut file)?;
        println!(
            "- ending address {:X} (page >{:04X})",
            self.address, self.bank
        );

        Ok(())
    }

    /// Append one bank page per slice of `src`, returning the page count.
    ///
    /// A zero-byte read ends the run before a page is emitted, so a source
    /// whose size is an exact multiple of the page payload adds no trailing
    /// filler page; a short read at end of input still completes its page,
    /// with the filler left in the unread tail.
    fn add_data<R: Read>(&mut self, src: &mut R) -> Result<usize, PackError> {
        let mut pages = 0;
        loop {
            let mut page = Page::with_header(&self.header);
            if read_full(src, page.body_mut())? == 0 {
                break;
            }
            self.write_page(&page)?;
            pages += 1;
        }
        Ok(pages)
    }

    /// Append filler pages until the image size is a power of two (minimum
    /// one page, already guaranteed by the program page).
    pub fn pad_to_power_of_two(&mut self) -> Result<(), PackError> {
        let mut target = PAGE_SIZE as u64;
        while target < self.address {
            target *= 2;
        }

        if target > self.address {
            println!("Padding to {}k", target / 1024);
            if target > BOARD_LIMIT {
                println!(
                    "* {} - 2MB is max cartridge board so far.",
                    Yellow.bold().paint("Warning")
                );
            }
            if target > BANK_SWITCH_LIMIT {
                println!(
                    "* {} - 32MB is max possible with current bank switch.",
                    Yellow.bold().paint("Warning")
                );
            }

            let page = Page::with_header(&self.header);
            while self.address < target {
                self.write_page(&page)?;
            }
        }

        Ok(())
    }

    /// Flush the sink and hand it back; the cartridge image is complete.
    pub fn finish(mut self) -> Result<W, PackError> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_page(&mut self, page: &Page) -> Result<(), PackError> {
        self.out.write_all(page.as_bytes())?;
        self.address += PAGE_SIZE as u64;
        self.bank += 1;
        Ok(())
    }
}
