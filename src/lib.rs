//! Packcart: a bank-switched data cartridge packer for the TI-99/4A.
//!
//! Concatenates an 8 KiB program image with any number of data files into a
//! single cartridge image made of 8 KiB pages. The first 128 bytes of the
//! program are replicated into every page, so whichever bank the console has
//! switched in at startup still contains the boot code. After the last data
//! file the image is padded to the next power of two with filler pages.
//!
//! ## Modules
//!
//! - **error** – fatal error taxonomy; one distinct exit code per condition
//! - **packer** – page construction and the packing pipeline

pub mod error;
pub mod packer;
