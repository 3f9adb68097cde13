//! Thread-safe detector handle for transport callbacks
//!
//! BLE stacks deliver notifications on their own threads. `SharedDetector`
//! puts one detector behind one mutex so exactly one notification is
//! processed at a time, whichever thread it arrives on. There is no queue:
//! a caller that arrives while another notification is being processed
//! blocks on the lock for the few microseconds a tick takes.

use crate::detector::{JumpDetector, JumpDetectorConfig, JumpPhase};
use crate::error::{JumpDetectorError, Result};
use crate::frame::AccelerationSample;
use crate::sink::EventSink;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a mutex-guarded [`JumpDetector`]
pub struct SharedDetector<S: EventSink> {
    inner: Arc<Mutex<JumpDetector<S>>>,
}

impl<S: EventSink> Clone for SharedDetector<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventSink> SharedDetector<S> {
    /// Wrap a detector with the default thresholds
    pub fn new(sink: S) -> Self {
        Self::from_detector(JumpDetector::new(sink))
    }

    pub fn with_config(config: JumpDetectorConfig, sink: S) -> Result<Self> {
        Ok(Self::from_detector(JumpDetector::with_config(config, sink)?))
    }

    pub fn from_detector(detector: JumpDetector<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(detector)),
        }
    }

    /// Entry point for the transport's notification callback
    ///
    /// # Returns
    /// * `Ok(JumpPhase)` - Phase after the frame was processed
    /// * `Err(JumpDetectorError::Decode)` - Frame dropped, state untouched
    /// * `Err(JumpDetectorError::LockPoisoned)` - A sink panicked earlier
    pub fn handle_notification(&self, payload: &[u8], timestamp: f64) -> Result<JumpPhase> {
        let mut detector = self.lock()?;
        Ok(detector.process_frame(payload, timestamp)?)
    }

    pub fn process_sample(&self, sample: AccelerationSample) -> Result<JumpPhase> {
        Ok(self.lock()?.process_sample(sample))
    }

    pub fn phase(&self) -> Result<JumpPhase> {
        Ok(self.lock()?.phase())
    }

    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset();
        Ok(())
    }

    /// Run a closure with exclusive access to the detector
    pub fn with_detector<R>(&self, f: impl FnOnce(&mut JumpDetector<S>) -> R) -> Result<R> {
        let mut detector = self.lock()?;
        Ok(f(&mut detector))
    }

    fn lock(&self) -> Result<MutexGuard<'_, JumpDetector<S>>> {
        self.inner.lock().map_err(|_| JumpDetectorError::LockPoisoned)
    }
}
