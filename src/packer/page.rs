//! Page layout and filler.
//!
//! A cartridge image is a sequence of 8 KiB pages. Page 0 is the raw program
//! image; every later page carries a copy of the program's first 128 bytes
//! (the boot header) followed by up to 8064 bytes of payload. Any byte no
//! real data reaches keeps the cyclic credit filler the buffer was built
//! with.

/// Size of one cartridge page.
pub const PAGE_SIZE: usize = 8192;
/// Boot header copied from the program image into every bank page.
pub const HEADER_SIZE: usize = 128;
/// Payload capacity of a bank page after the header.
pub const DATA_PER_PAGE: usize = PAGE_SIZE - HEADER_SIZE;

/// Credit string cycled through every byte real data does not overwrite.
pub const CREDITS: &[u8] = b"Packed with packcart - ";

/// Fill `dst` by cycling through `pattern`, restarting from its first byte.
/// `pattern` must be non-empty.
pub fn fill_cyclic(dst: &mut [u8], pattern: &[u8]) {
    for (dst_byte, pattern_byte) in dst.iter_mut().zip(pattern.iter().cycle()) {
        *dst_byte = *pattern_byte;
    }
}

/// One page-sized buffer, born filled with the credit pattern.
pub struct Page {
    bytes: [u8; PAGE_SIZE],
}

impl Page {
    /// A page holding nothing but the cyclic filler.
    pub fn filler() -> Self {
        let mut bytes = [0u8; PAGE_SIZE];
        fill_cyclic(&mut bytes, CREDITS);
        Page { bytes }
    }

    /// A filler page with `header` patched over bytes [0, 128).
    pub fn with_header(header: &[u8; HEADER_SIZE]) -> Self {
        let mut page = Page::filler();
        page.bytes[..HEADER_SIZE].copy_from_slice(header);
        page
    }

    /// Payload region of a bank page: everything after the header.
    pub fn body_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[HEADER_SIZE..]
    }

    /// The whole page, used when loading the raw program image.
    pub fn all_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.bytes
    }
}
