// Host for the chip8vm core:
//  - headless: step N times and dump machine state before and after
//  - window: ~60 frames per second, a fixed number of cycles per frame,
//    redraw only when a cycle touched the display

use anyhow::{Context, Result};
use chip8vm::{Machine, DEFAULT_FONT};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Args, Mode, Settings};
use window::Screen;

mod config;
mod window;

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::new(&args)?;
    let rom = std::fs::read(&settings.rom_path)
        .with_context(|| format!("failed to read {}", settings.rom_path.display()))?;
    tracing::info!("loaded {} ({} bytes)", settings.rom_path.display(), rom.len());

    let mut machine = Machine::new();
    machine.load_font(&DEFAULT_FONT)?;
    machine.load(&rom)?;

    match settings.mode {
        Mode::Headless { steps } => run_headless(&mut machine, steps),
        Mode::Window {
            cycles_per_frame,
            scale,
        } => run_window(&mut machine, cycles_per_frame, scale),
    }
}

fn run_headless(machine: &mut Machine, steps: u32) -> Result<()> {
    println!("Initial:");
    println!("{machine}");

    for cycle in 0..steps {
        if let Err(err) = machine.step() {
            tracing::error!("cycle {cycle} failed: {err}");
            println!("Halted after {cycle} cycles:");
            println!("{machine}");
            return Err(err.into());
        }
    }

    println!("After {steps} cycles:");
    println!("{machine}");
    Ok(())
}

fn run_window(machine: &mut Machine, cycles_per_frame: u32, scale: u32) -> Result<()> {
    let mut screen = Screen::new(scale)?;
    screen.redraw(&machine.fb);

    while screen.is_open() {
        let mut dirty = false;
        for _ in 0..cycles_per_frame {
            machine.step().map_err(|err| {
                tracing::error!("halting at pc {:#05x}: {err}", machine.mem.pc.0);
                err
            })?;
            dirty |= machine.display_updated();
        }
        if dirty {
            screen.redraw(&machine.fb);
        }
        screen.sync()?;
    }
    tracing::info!("window closed");
    Ok(())
}
