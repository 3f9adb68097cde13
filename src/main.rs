//! MESH motion block jump detector
//!
//! Replays motion block notification payloads through the jump detector and
//! prints jump events as they happen. Payloads come one per line, hex
//! encoded, optionally preceded by a timestamp in seconds:
//!
//! ```text
//! # comment
//! 01000000000000000004
//! 0.250 01000000000000000006
//! ```
//!
//! Usage:
//!   jump-detector capture.txt
//!   ble-bridge | jump-detector --live --echo
//!
//! Ctrl+C on a file replay stops after the current line and prints the
//! run tally. When reading stdin the process exits immediately instead,
//! since the reader may be blocked waiting for the next line.

use clap::Parser;
use mesh_jump_detector::{
    g_gauge, EventSink, JumpDetectorError, JumpEvent, JumpPhase, SensorFrame, SharedDetector,
    TimeKeeper,
};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "jump-detector")]
#[command(about = "Detect jumps in MESH motion block notifications", long_about = None)]
struct Args {
    /// Payload dump, one hex notification per line (reads stdin if omitted)
    input: Option<PathBuf>,

    /// Spacing of payloads without a timestamp, in milliseconds
    #[arg(short, long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Stamp untimestamped payloads with their arrival time instead
    #[arg(short, long)]
    live: bool,

    /// Print every decoded frame
    #[arg(short, long)]
    echo: bool,
}

/// Messages from the transport thread to the console
enum Report {
    Jump(JumpEvent),
    Frame {
        frame: SensorFrame,
        timestamp: f64,
        phase: JumpPhase,
    },
}

/// Forwards detector events to the console thread
struct ReportSink(Sender<Report>);

impl EventSink for ReportSink {
    fn on_event(&mut self, event: JumpEvent) {
        if self.0.send(Report::Jump(event)).is_err() {
            warn!("Console gone, dropping jump event");
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    frames: u64,
    skipped: u64,
    jumps: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let reader: Box<dyn BufRead + Send> = match &args.input {
        None => Box::new(BufReader::new(io::stdin())),
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    println!("MESH Jump Detector");
    println!("==================");
    match &args.input {
        Some(path) => println!("Input: {}", path.display()),
        None => println!("Input: stdin"),
    }
    if args.live {
        println!("Timing: arrival time");
    } else {
        println!("Timing: {} ms spacing", args.interval_ms);
    }
    println!("Press Ctrl+C to stop\n");

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    let exit_now = exits_on_interrupt(&args);
    ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, stopping...");
        r.store(false, Ordering::SeqCst);
        if exit_now {
            std::process::exit(130);
        }
    })?;

    let (tx, rx) = mpsc::channel::<Report>();
    let detector = SharedDetector::new(ReportSink(tx.clone()));

    let transport = thread::spawn(move || run_transport(reader, detector, tx, args, running));

    for report in rx {
        match report {
            Report::Jump(event) => print_event(&event),
            Report::Frame {
                frame,
                timestamp,
                phase,
            } => print_frame(&frame, timestamp, phase),
        }
    }

    let tally = match transport.join() {
        Ok(result) => result.map_err(|e| e as Box<dyn Error>)?,
        Err(_) => return Err("transport thread panicked".into()),
    };

    println!();
    println!(
        "Processed {} frames ({} skipped), {} jumps detected",
        tally.frames, tally.skipped, tally.jumps
    );

    Ok(())
}

/// A read blocked on stdin cannot see the stop flag, so stdin runs end at once
fn exits_on_interrupt(args: &Args) -> bool {
    args.input.is_none()
}

/// Stand-in for the BLE transport: pushes each payload into the detector
fn run_transport(
    reader: Box<dyn BufRead + Send>,
    detector: SharedDetector<ReportSink>,
    reports: Sender<Report>,
    args: Args,
    running: Arc<AtomicBool>,
) -> Result<Tally, BoxError> {
    let clock = TimeKeeper::new();
    let mut tally = Tally::default();
    let mut index = 0u64;

    for (line_no, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = line?;
        let (stamp, payload) = match parse_line(&line) {
            None => continue,
            Some(Ok(parsed)) => parsed,
            Some(Err(e)) => {
                warn!("Line {}: {}", line_no + 1, e);
                tally.skipped += 1;
                continue;
            }
        };

        let timestamp = match stamp {
            Some(t) => t,
            None if args.live => clock.elapsed_secs(),
            None => index as f64 * args.interval_ms as f64 / 1000.0,
        };
        index += 1;
        tally.frames += 1;

        match detector.handle_notification(&payload, timestamp) {
            Ok(phase) => {
                if args.echo {
                    if let Ok(frame) = SensorFrame::decode(&payload) {
                        let _ = reports.send(Report::Frame {
                            frame,
                            timestamp,
                            phase,
                        });
                    }
                }
            }
            Err(JumpDetectorError::Decode(e)) => {
                debug!("Skipping frame {}: {} ({})", index, e, hex::encode(&payload));
                tally.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tally.jumps = detector.with_detector(|d| d.completed_jumps())?;
    Ok(tally)
}

/// Parse `<hex>` or `<seconds> <hex>`; `None` for blank and comment lines
fn parse_line(line: &str) -> Option<Result<(Option<f64>, Vec<u8>), String>> {
    let content = line.split('#').next().unwrap_or("").trim();
    if content.is_empty() {
        return None;
    }

    let mut fields = content.split_whitespace();
    let first = fields.next()?;
    let (stamp, hex_field) = match fields.next() {
        Some(second) => match first.parse::<f64>() {
            Ok(t) if t.is_finite() => (Some(t), second),
            _ => return Some(Err(format!("invalid timestamp `{}`", first))),
        },
        None => (None, first),
    };

    if fields.next().is_some() {
        return Some(Err("expected `<hex>` or `<seconds> <hex>`".to_string()));
    }

    let hex_field = hex_field.trim_start_matches("0x");
    Some(
        hex::decode(hex_field)
            .map(|payload| (stamp, payload))
            .map_err(|e| format!("invalid hex payload: {}", e)),
    )
}

fn wall_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn print_event(event: &JumpEvent) {
    match event {
        JumpEvent::Start {
            time,
            start_g,
            axes: (x, y, z),
        } => {
            println!("\n[{}] Jump started at {:.2}s", wall_clock(), time);
            println!("   Start acceleration: {:.3}G", start_g);
            println!("   Axes: X={:.3}G, Y={:.3}G, Z={:.3}G", x, y, z);
        }
        JumpEvent::Complete {
            time,
            duration,
            height_cm,
            power_score,
            max_g,
            min_g,
            ending_phase,
            timed_out,
            axes: (x, y, z),
        } => {
            if *timed_out {
                println!("\n[{}] Jump force-completed (timeout) at {:.2}s", wall_clock(), time);
            } else {
                println!("\n[{}] Jump completed at {:.2}s", wall_clock(), time);
            }
            println!("   Duration: {:.2}s", duration);
            println!("   Estimated height: {:.1}cm", height_cm);
            println!("   Power: {:.1}", power_score);
            println!("   Max acceleration: {:.3}G", max_g);
            println!("   Min acceleration: {:.3}G", min_g);
            println!("   Landing axes: X={:.3}G, Y={:.3}G, Z={:.3}G", x, y, z);
            println!("   Phase: {}", ending_phase.as_str());
            println!("{}", "─".repeat(50));
        }
    }
}

fn print_frame(frame: &SensorFrame, timestamp: f64, phase: JumpPhase) {
    let sample = frame.to_sample(timestamp);
    println!(
        "{:8.3}s [{:<11}] X:{:+.3}G Y:{:+.3}G Z:{:+.3}G total:{:.3}G [{}] {}",
        timestamp,
        frame.event_type.as_str(),
        sample.x_g(),
        sample.y_g(),
        sample.z_g(),
        sample.composite_g(),
        g_gauge(sample.composite_g(), 3.0, 30),
        phase.as_str()
    );
}
