//! MESH LED block command encoder
//!
//! Builds the bytes to write to an LED block's write characteristic and
//! prints them as hex, for use with any BLE tool.
//!
//! Usage:
//!   led-command --preset on
//!   led-command --red 127 --green 0 --blue 0 --duration-ms 3000 --pattern firefly

use clap::{Parser, ValueEnum};
use mesh_jump_detector::led::LED_COMMAND_LEN;
use mesh_jump_detector::protocol::{ACTIVATE_COMMAND, CORE_WRITE_UUID, LED_BLOCK_NAME_PREFIX};
use mesh_jump_detector::{LedCommand, LedPattern};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    Blink,
    Firefly,
}

#[derive(Parser, Debug)]
#[command(name = "led-command")]
#[command(about = "Encode MESH LED block commands as hex", long_about = None)]
struct Args {
    /// Start from a preset (flags below override its fields)
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Red intensity
    #[arg(long)]
    red: Option<u8>,

    /// Green intensity
    #[arg(long)]
    green: Option<u8>,

    /// Blue intensity
    #[arg(long)]
    blue: Option<u8>,

    /// Total run time in milliseconds
    #[arg(long)]
    duration_ms: Option<u16>,

    /// Lit time per cycle in milliseconds
    #[arg(long)]
    on_ms: Option<u16>,

    /// Dark time per cycle in milliseconds
    #[arg(long)]
    off_ms: Option<u16>,

    /// Lighting pattern
    #[arg(long, value_enum)]
    pattern: Option<PatternArg>,

    /// Print only the command hex
    #[arg(short, long)]
    quiet: bool,
}

fn build_command(args: &Args) -> LedCommand {
    let base = match args.preset {
        Some(Preset::On) => LedCommand::on(),
        Some(Preset::Off) | None => LedCommand::off(),
    };

    LedCommand {
        red: args.red.unwrap_or(base.red),
        green: args.green.unwrap_or(base.green),
        blue: args.blue.unwrap_or(base.blue),
        duration_ms: args.duration_ms.unwrap_or(base.duration_ms),
        on_ms: args.on_ms.unwrap_or(base.on_ms),
        off_ms: args.off_ms.unwrap_or(base.off_ms),
        pattern: match args.pattern {
            Some(PatternArg::Blink) => LedPattern::Blink,
            Some(PatternArg::Firefly) => LedPattern::Firefly,
            None => base.pattern,
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let command = build_command(&args);
    debug!(?command, "encoding LED command");

    let bytes = command.encode();
    if args.quiet {
        println!("{}", hex::encode(bytes));
        return Ok(());
    }

    println!("MESH LED Command");
    println!("================");
    println!("Target: {}* via {}", LED_BLOCK_NAME_PREFIX, CORE_WRITE_UUID);
    println!(
        "Color: R={} G={} B={}  Pattern: {:?}",
        command.red, command.green, command.blue, command.pattern
    );
    println!(
        "Timing: {} ms total, {} ms on / {} ms off",
        command.duration_ms, command.on_ms, command.off_ms
    );
    println!();
    println!("Activate ({} bytes): {}", ACTIVATE_COMMAND.len(), hex::encode(ACTIVATE_COMMAND));
    println!("Command  ({} bytes): {}", LED_COMMAND_LEN, hex::encode(bytes));

    Ok(())
}
