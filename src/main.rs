//! Cartridge packer entry point.
//!
//! Usage: packcart <outfile> <program> <data1> [<data2> ...]
//!
//! Builds the image as it goes: the raw program page first, then the data
//! banks, then power-of-two padding. Every fatal condition exits with its own
//! status code (see `error`); an aborted run can leave a truncated image on
//! disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use ansi_term::Colour::{Red, Yellow};
use clap::Parser;

use packcart::error::PackError;
use packcart::packer::packer::{Packer, ProgramImage};
use packcart::packer::page::PAGE_SIZE;

/// Pack a program image and data files into a bank-switched cartridge.
///
/// The program is padded to 8 KiB, then one 8 KiB bank is appended per
/// 8064 bytes of each data file. The first 128 bytes of the program are
/// copied into every bank to handle startup.
#[derive(Parser)]
#[command(name = "packcart", version)]
struct Args {
    /// Cartridge image to create
    outfile: PathBuf,
    /// Program image; only the first 8 KiB is used
    program: PathBuf,
    /// Data files, appended in order as 8 KiB banks
    #[arg(required = true)]
    data: Vec<PathBuf>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{} {}", Red.bold().paint("ERROR"), e);
        process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> Result<(), PackError> {
    // The output is created before the program is opened, so an early failure
    // can leave an empty image on disk.
    let out = File::create(&args.outfile).map_err(|source| PackError::OutputOpen {
        path: args.outfile.clone(),
        source,
    })?;

    let program = ProgramImage::load(&args.program)?;
    if program.truncated() {
        println!(
            "{} - program file may be too large - only {} bytes read!",
            Yellow.bold().paint("Warning"),
            PAGE_SIZE
        );
    }

    let mut packer = Packer::new(BufWriter::new(out), &program)?;
    for path in &args.data {
        packer.add_data_file(path)?;
    }
    packer.pad_to_power_of_two()?;
    packer.finish()?;

    println!("Finished writing '{}'.", args.outfile.display());
    Ok(())
}
