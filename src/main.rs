//! Chiptone - note-sequencer circuit cosimulator
//!
//! Renders the demo score through the simulated output stage and writes the
//! result as a mono 16-bit WAV file.
//!
//! # Usage
//!
//! ```bash
//! chiptone --output music.wav --duration-ms 30000
//! ```

use std::path::PathBuf;

use chiptone_core::{
    error::Result,
    hooks::ProgressSink,
    sim::{DEFAULT_CLOCK_HZ, DEFAULT_DURATION_MS, DEFAULT_SAMPLE_RATE},
    Driver, RomSequencer, SimConfig, NOTE_NAMES,
};
use clap::Parser;
use tracing::info;

/// Note-sequencer circuit cosimulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the WAV file to write
    #[arg(short, long, default_value = "chiptone.wav")]
    output: PathBuf,

    /// Total simulation duration in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION_MS)]
    duration_ms: u64,

    /// Output sample rate in Hz
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Virtual clock frequency in Hz
    #[arg(long, default_value_t = DEFAULT_CLOCK_HZ)]
    clock_hz: u64,

    /// Duration of one sequencer step in milliseconds
    #[arg(long, default_value_t = 400)]
    step_ms: u64,
}

/// Logs each note transition the way the board's serial console did.
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn progress(&mut self, elapsed_ms: u64, total_ms: u64, note: u8, rest: bool, freq_hz: f64) {
        if elapsed_ms >= total_ms {
            info!("[{elapsed_ms}ms] done");
        } else if rest {
            info!("[{elapsed_ms}ms] rest");
        } else {
            let name = NOTE_NAMES[(note & 0x7) as usize];
            info!("[{elapsed_ms}ms] {name} ({:.0}Hz)", freq_hz);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = SimConfig::new()
        .with_clock_hz(args.clock_hz)
        .with_duration_ms(args.duration_ms)
        .with_sample_rate(args.sample_rate);

    let cycles_per_step = args.step_ms * config.cycles_per_ms();
    let device = RomSequencer::new(RomSequencer::demo_score(), cycles_per_step.max(1));

    let driver = Driver::new(device, config)?.with_progress(Box::new(ConsoleProgress));
    let report = driver.run_to_wav(&args.output)?;

    info!(
        "wrote {} ({} samples, {}ms simulated)",
        args.output.display(),
        report.samples.len(),
        report.elapsed_ms
    );

    Ok(())
}
