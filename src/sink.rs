//! Event sinks for jump lifecycle events
//!
//! The detector reports to whatever implements [`EventSink`]. It calls the
//! sink synchronously, once when a jump starts and once when it completes,
//! and never inspects what the sink does with the event.

use crate::detector::JumpEvent;
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// Consumer of jump lifecycle events
pub trait EventSink {
    fn on_event(&mut self, event: JumpEvent);
}

/// Collects every event, mostly for tests and offline replays
impl EventSink for Vec<JumpEvent> {
    fn on_event(&mut self, event: JumpEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: JumpEvent) {
        (**self).on_event(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_event(&mut self, event: JumpEvent) {
        (**self).on_event(event);
    }
}

/// Hands events to another thread
///
/// If the receiver is gone the event is dropped with a warning; the
/// detector keeps running either way.
impl EventSink for Sender<JumpEvent> {
    fn on_event(&mut self, event: JumpEvent) {
        if let Err(err) = self.send(event) {
            warn!("Jump event receiver disconnected, dropping {:?}", err.0);
        }
    }
}

/// Writes each event as a `tracing` record
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: JumpEvent) {
        match event {
            JumpEvent::Start { time, start_g, .. } => {
                info!(time, start_g, "jump started");
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
                ..
            } => {
                info!(
                    time,
                    duration,
                    height_cm,
                    power_score,
                    max_g,
                    min_g,
                    phase = ending_phase.as_str(),
                    timed_out,
                    "jump completed"
                );
            }
        }
    }
}
