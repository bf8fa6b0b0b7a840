//! Emu-8
//!
//! Runs a Chip-8 ROM in an SDL window, or headless with the final frame printed as text.
//!
//! ```bash
//! chip8 roms/PONG --ips 700 --scale 10
//! chip8 roms/IBM --headless --cycles 200
//! ```
//!
//! Hold Space to fast-forward and Escape to rewind.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use emu8::constants::DEFAULT_CYCLES_PER_SECOND;
use emu8::Chip8;

mod headless;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 emulator", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = DEFAULT_CYCLES_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and print the final frame
    #[arg(long)]
    headless: bool,

    /// Number of cycles to run when headless
    #[arg(long, default_value_t = 1000)]
    cycles: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let len = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} bytes from {}", len, args.rom.display());

    if args.headless {
        headless::headless(&mut chip8, args.ips, args.cycles)
    } else {
        run::run(&mut chip8, args.ips, args.scale)
    }
}
