use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

pub const DEFAULT_CYCLES_PER_FRAME: u32 = 10;
pub const DEFAULT_SCALE: u32 = 16;

#[derive(Parser, Debug)]
#[command(version, about = "Execute a CHIP-8 ROM file.", long_about = None)]
pub struct Args {
    /// Path to the ROM file to run
    pub rom: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME, help = "Instructions executed per 60 Hz frame")]
    pub cycles_per_frame: u32,

    #[arg(short, long, default_value_t = DEFAULT_SCALE, help = "Window pixel scale (1, 2, 4, 8, 16 or 32)")]
    pub scale: u32,

    #[arg(long, value_name = "STEPS", help = "Run STEPS cycles without a window and dump the machine state")]
    pub headless: Option<u32>,

    #[arg(short, long, default_value = "info", help = "Log filter used when RUST_LOG is not set")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Window { cycles_per_frame: u32, scale: u32 },
    Headless { steps: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rom_path: PathBuf,
    pub mode: Mode,
}

impl Settings {
    pub fn new(args: &Args) -> Result<Self> {
        let mode = match args.headless {
            Some(steps) => Mode::Headless { steps },
            None => {
                ensure!(args.cycles_per_frame > 0, "cycles per frame must be positive");
                ensure!(
                    [1, 2, 4, 8, 16, 32].contains(&args.scale),
                    "unsupported scale {}",
                    args.scale
                );
                Mode::Window {
                    cycles_per_frame: args.cycles_per_frame,
                    scale: args.scale,
                }
            }
        };
        Ok(Self {
            rom_path: args.rom.clone(),
            mode,
        })
    }
}
