//! Jump detection for the MESH motion block (MESH-100AC)
//!
//! This library turns the block's BLE accelerometer notifications into jump
//! events. It does not talk to the radio itself: whatever BLE stack you use
//! hands each notification payload to the detector, and the detector reports
//! `Start` / `Complete` events to a sink you provide.
//!
//! # Quick Start
//!
//! ## Decoding a notification
//! ```
//! use mesh_jump_detector::AccelerationSample;
//!
//! // type, event tag, 2 unused bytes, then X/Y/Z as u16 little-endian
//! let payload = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04];
//! let sample = AccelerationSample::decode(&payload, 0.0)?;
//!
//! assert_eq!(sample.z_g(), 1.0);
//! assert_eq!(sample.composite_g(), 1.0);
//! # Ok::<(), mesh_jump_detector::DecodeError>(())
//! ```
//!
//! ## Detecting jumps
//! ```
//! use mesh_jump_detector::{AccelerationSample, JumpDetector, JumpEvent};
//!
//! let mut detector = JumpDetector::new(Vec::<JumpEvent>::new());
//!
//! // Standing, push-off, free fall, then settled on the ground
//! let trace = [1.0, 1.0, 1.5, 1.6, 0.4, 0.3, 0.9, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
//! for (i, g) in trace.iter().enumerate() {
//!     let sample = AccelerationSample::new(i as f64 * 0.1, 0.0, 0.0, *g);
//!     detector.process_sample(sample);
//! }
//!
//! let events = detector.into_sink();
//! assert_eq!(events.len(), 2);
//! if let JumpEvent::Complete { height_cm, power_score, .. } = events[1] {
//!     println!("Height: {:.1} cm, power: {:.1}", height_cm, power_score);
//! }
//! ```
//!
//! ## Feeding from a BLE callback thread
//! ```
//! use mesh_jump_detector::{JumpEvent, SharedDetector, TimeKeeper};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel::<JumpEvent>();
//! let detector = SharedDetector::new(tx);
//! let clock = TimeKeeper::new();
//!
//! // Inside the notification callback:
//! let on_notify = move |payload: &[u8]| {
//!     // Malformed or foreign frames are simply skipped
//!     let _ = detector.handle_notification(payload, clock.elapsed_secs());
//! };
//! on_notify(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04]);
//!
//! // Elsewhere: consume events
//! assert!(rx.try_recv().is_err());
//! ```

pub mod common;
pub mod detector;
pub mod error;
pub mod frame;
pub mod history;
pub mod led;
pub mod metrics;
pub mod protocol;
pub mod shared;
pub mod sink;

// Re-export public API
pub use common::{g_gauge, TimeKeeper};
pub use detector::{JumpDetector, JumpDetectorConfig, JumpEvent, JumpPhase, JumpSession};
pub use error::{DecodeError, JumpDetectorError, Result};
pub use frame::{decode_to_g, AccelerationSample, SensorFrame};
pub use history::HistoryWindow;
pub use led::{LedCommand, LedPattern};
pub use metrics::JumpMetrics;
pub use protocol::MotionEventType;
pub use shared::SharedDetector;
pub use sink::{EventSink, LogSink};
