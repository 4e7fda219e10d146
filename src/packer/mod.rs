//! Cartridge packing: 8 KiB pages with a replicated boot header.
//!
//! - **page**: page layout constants, the cyclic filler, and `Page` buffers.
//! - **packer**: `ProgramImage` loading and the `Packer` pipeline that
//!   appends data banks and pads the image to a power of two.

pub mod packer;
pub mod page;
