//! Jump gesture state machine
//!
//! The detector consumes one [`AccelerationSample`] at a time and walks a
//! jump through `Idle -> Takeoff -> Airborne -> Landing -> Idle`. It opens a
//! session when a sharp rise above 1.3 G is seen and closes it either when
//! the signal settles back around 1 G or after a hard 3 second timeout, so
//! a session can never be left open.
//!
//! Each tick runs in a fixed order:
//! 1. the sample is appended to the history window
//! 2. an idle detector checks for takeoff
//! 3. an open session that is older than the timeout is force-closed
//! 4. otherwise the session advances its phase, updates extrema, then
//!    checks for landing

use crate::error::{DecodeError, JumpDetectorError, Result};
use crate::frame::AccelerationSample;
use crate::history::{HistoryWindow, HISTORY_CAPACITY};
use crate::metrics::JumpMetrics;
use crate::sink::EventSink;
use tracing::{debug, info, warn};

/// Stage of the tracked jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpPhase {
    /// No jump in progress
    #[default]
    Idle,
    /// Push-off detected
    Takeoff,
    /// Free fall (composite well below 1 G)
    Airborne,
    /// Impact after free fall
    Landing,
}

impl JumpPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Takeoff => "takeoff",
            Self::Airborne => "airborne",
            Self::Landing => "landing",
        }
    }

    /// Numeric code for plotting (0 = idle .. 3 = landing)
    pub fn code(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Takeoff => 1,
            Self::Airborne => 2,
            Self::Landing => 3,
        }
    }
}

/// Lifecycle event reported to the [`EventSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpEvent {
    /// A jump session was opened
    Start {
        time: f64,
        /// Composite G of the triggering sample
        start_g: f64,
        /// Axes of the triggering sample (g)
        axes: (f64, f64, f64),
    },
    /// A jump session was closed, by landing or by timeout
    Complete {
        time: f64,
        /// Seconds since the matching `Start`
        duration: f64,
        height_cm: f64,
        power_score: f64,
        max_g: f64,
        min_g: f64,
        /// Phase the session was in when it closed
        ending_phase: JumpPhase,
        /// Closed by the timeout rather than a detected landing
        timed_out: bool,
        /// Axes of the closing sample (g)
        axes: (f64, f64, f64),
    },
}

impl JumpEvent {
    pub fn time(&self) -> f64 {
        match self {
            Self::Start { time, .. } | Self::Complete { time, .. } => *time,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

/// Bookkeeping for the jump in progress
#[derive(Debug, Clone, PartialEq)]
pub struct JumpSession {
    pub start_time: f64,
    pub start_composite_g: f64,
    pub max_composite_g: f64,
    pub min_composite_g: f64,
    pub phase: JumpPhase,
    pub phase_change_time: f64,
}

impl JumpSession {
    fn open(sample: &AccelerationSample) -> Self {
        let composite = sample.composite_g();
        Self {
            start_time: sample.timestamp(),
            start_composite_g: composite,
            max_composite_g: composite,
            min_composite_g: composite,
            phase: JumpPhase::Takeoff,
            phase_change_time: sample.timestamp(),
        }
    }

    /// Seconds since takeoff
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    fn advance_phase(&mut self, composite: f64, now: f64, config: &JumpDetectorConfig) {
        let next = match self.phase {
            JumpPhase::Takeoff if composite < config.airborne_threshold_g => JumpPhase::Airborne,
            JumpPhase::Airborne if composite > config.landing_threshold_g => JumpPhase::Landing,
            _ => return,
        };
        debug!(from = self.phase.as_str(), to = next.as_str(), composite, "jump phase change");
        self.phase = next;
        self.phase_change_time = now;
    }

    fn record(&mut self, composite: f64) {
        if composite > self.max_composite_g {
            self.max_composite_g = composite;
        }
        if composite < self.min_composite_g {
            self.min_composite_g = composite;
        }
    }
}

/// Thresholds for jump detection
#[derive(Debug, Clone, PartialEq)]
pub struct JumpDetectorConfig {
    /// Number of recent samples kept for trend checks
    pub history_capacity: usize,
    /// Composite G that can trigger a takeoff
    pub start_threshold_g: f64,
    /// Samples inspected for the takeoff spread check
    pub start_spread_window: usize,
    /// Peak-to-peak G required over that window (rejects slow drift)
    pub start_min_spread_g: f64,
    /// Below this, takeoff becomes airborne
    pub airborne_threshold_g: f64,
    /// Above this, airborne becomes landing
    pub landing_threshold_g: f64,
    /// Shortest plausible jump (s)
    pub min_jump_secs: f64,
    /// Without a landing phase, no landing is accepted before this (s)
    pub min_unlanded_secs: f64,
    /// Samples inspected for the settled-signal check
    pub stable_window: usize,
    /// Accepted range of the settled mean
    pub stable_mean_min_g: f64,
    pub stable_mean_max_g: f64,
    /// Largest deviation from the mean that still counts as settled
    pub stable_max_deviation_g: f64,
    /// After this, any in-range sample closes the jump (s)
    pub fallback_after_secs: f64,
    pub fallback_min_g: f64,
    pub fallback_max_g: f64,
    /// Sessions are force-closed after this (s)
    pub max_jump_secs: f64,
}

impl Default for JumpDetectorConfig {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            start_threshold_g: 1.3,
            start_spread_window: 3,
            start_min_spread_g: 0.3,
            airborne_threshold_g: 0.7,
            landing_threshold_g: 1.1,
            min_jump_secs: 0.3,
            min_unlanded_secs: 1.0,
            stable_window: 5,
            stable_mean_min_g: 0.8,
            stable_mean_max_g: 1.2,
            stable_max_deviation_g: 0.15,
            fallback_after_secs: 1.5,
            fallback_min_g: 0.7,
            fallback_max_g: 1.3,
            max_jump_secs: 3.0,
        }
    }
}

impl JumpDetectorConfig {
    /// Check that the windows fit in the history and the timeout is positive
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(JumpDetectorError::InvalidParameter(
                "history capacity must be at least 1".to_string(),
            ));
        }

        for (name, window) in [
            ("start spread window", self.start_spread_window),
            ("stable window", self.stable_window),
        ] {
            if window == 0 || window > self.history_capacity {
                return Err(JumpDetectorError::InvalidParameter(format!(
                    "{} must be 1-{} samples, got {}",
                    name, self.history_capacity, window
                )));
            }
        }

        if !(self.max_jump_secs > 0.0) {
            return Err(JumpDetectorError::InvalidParameter(format!(
                "max jump duration must be positive, got {}",
                self.max_jump_secs
            )));
        }

        Ok(())
    }
}

/// Jump detector for one motion block
///
/// # Example
/// ```
/// use mesh_jump_detector::{AccelerationSample, JumpDetector, JumpEvent};
///
/// let mut detector = JumpDetector::new(Vec::<JumpEvent>::new());
/// for (i, g) in [1.0, 1.0, 1.5].iter().enumerate() {
///     detector.process_sample(AccelerationSample::new(i as f64 * 0.1, 0.0, 0.0, *g));
/// }
/// assert!(detector.sink()[0].is_start());
/// ```
pub struct JumpDetector<S: EventSink> {
    config: JumpDetectorConfig,
    history: HistoryWindow,
    session: Option<JumpSession>,
    sink: S,
    completed_jumps: u64,
}

impl<S: EventSink> JumpDetector<S> {
    /// Create a detector with the default thresholds
    pub fn new(sink: S) -> Self {
        let config = JumpDetectorConfig::default();
        Self {
            history: HistoryWindow::new(config.history_capacity),
            config,
            session: None,
            sink,
            completed_jumps: 0,
        }
    }

    /// Create a detector with custom thresholds
    ///
    /// # Returns
    /// * `Err(JumpDetectorError::InvalidParameter)` - If the config is unusable
    pub fn with_config(config: JumpDetectorConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: HistoryWindow::new(config.history_capacity),
            config,
            session: None,
            sink,
            completed_jumps: 0,
        })
    }

    /// Feed one sample and return the phase after it was processed
    pub fn process_sample(&mut self, sample: AccelerationSample) -> JumpPhase {
        self.history.push(sample);

        let composite = sample.composite_g();
        let now = sample.timestamp();

        let session = match self.session.as_mut() {
            Some(session) => session,
            None => {
                if self.detect_start(composite) {
                    self.start_jump(&sample);
                }
                return self.phase();
            }
        };

        if session.elapsed(now) > self.config.max_jump_secs {
            warn!(
                elapsed = session.elapsed(now),
                phase = session.phase.as_str(),
                "jump timed out, forcing completion"
            );
            self.complete_jump(&sample, true);
            return JumpPhase::Idle;
        }

        session.advance_phase(composite, now, &self.config);
        session.record(composite);
        let elapsed = session.elapsed(now);
        let phase = session.phase;

        if self.detect_landing(composite, elapsed, phase) {
            self.complete_jump(&sample, false);
        }

        self.phase()
    }

    /// Decode a notification payload and feed it
    ///
    /// A payload that fails to decode is returned as an error and leaves the
    /// detector untouched.
    pub fn process_frame(&mut self, payload: &[u8], timestamp: f64) -> std::result::Result<JumpPhase, DecodeError> {
        let sample = AccelerationSample::decode(payload, timestamp)?;
        Ok(self.process_sample(sample))
    }

    /// Drop any open session and forget the history; no event is emitted
    pub fn reset(&mut self) {
        self.session = None;
        self.history.clear();
    }

    pub fn phase(&self) -> JumpPhase {
        self.session.as_ref().map_or(JumpPhase::Idle, |s| s.phase)
    }

    pub fn session(&self) -> Option<&JumpSession> {
        self.session.as_ref()
    }

    pub fn history(&self) -> &HistoryWindow {
        &self.history
    }

    pub fn config(&self) -> &JumpDetectorConfig {
        &self.config
    }

    /// Number of sessions closed so far, including timeouts
    pub fn completed_jumps(&self) -> u64 {
        self.completed_jumps
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn detect_start(&self, composite: f64) -> bool {
        if composite <= self.config.start_threshold_g {
            return false;
        }
        self.history
            .spread(self.config.start_spread_window)
            .is_some_and(|spread| spread > self.config.start_min_spread_g)
    }

    fn detect_landing(&self, composite: f64, elapsed: f64, phase: JumpPhase) -> bool {
        let config = &self.config;

        if elapsed < config.min_jump_secs {
            return false;
        }

        if phase != JumpPhase::Landing && elapsed < config.min_unlanded_secs {
            return false;
        }

        if let Some((mean, max_deviation)) = self.history.mean_and_max_deviation(config.stable_window) {
            if (config.stable_mean_min_g..=config.stable_mean_max_g).contains(&mean)
                && max_deviation < config.stable_max_deviation_g
            {
                return true;
            }
        }

        elapsed > config.fallback_after_secs
            && (config.fallback_min_g..=config.fallback_max_g).contains(&composite)
    }

    fn start_jump(&mut self, sample: &AccelerationSample) {
        let session = JumpSession::open(sample);
        info!(
            time = session.start_time,
            start_g = session.start_composite_g,
            "jump start detected"
        );

        self.sink.on_event(JumpEvent::Start {
            time: session.start_time,
            start_g: session.start_composite_g,
            axes: sample.axes(),
        });
        self.session = Some(session);
    }

    fn complete_jump(&mut self, sample: &AccelerationSample, timed_out: bool) {
        let Some(session) = self.session.take() else {
            return;
        };

        let duration = session.elapsed(sample.timestamp());
        let metrics = JumpMetrics::compute(
            session.max_composite_g,
            session.min_composite_g,
            session.phase,
        );

        info!(
            duration,
            height_cm = metrics.height_cm,
            power_score = metrics.power_score,
            max_g = session.max_composite_g,
            min_g = session.min_composite_g,
            phase = session.phase.as_str(),
            timed_out,
            "jump completed"
        );

        self.completed_jumps += 1;
        self.sink.on_event(JumpEvent::Complete {
            time: sample.timestamp(),
            duration,
            height_cm: metrics.height_cm,
            power_score: metrics.power_score,
            max_g: session.max_composite_g,
            min_g: session.min_composite_g,
            ending_phase: session.phase,
            timed_out,
            axes: sample.axes(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::SensorFrame;
    use crate::metrics::{jump_height_cm, power_score};
    use crate::protocol::MotionEventType;

    const DT: f64 = 0.1;

    fn sample(i: usize, g: f64) -> AccelerationSample {
        AccelerationSample::new(i as f64 * DT, 0.0, 0.0, g)
    }

    fn detector() -> JumpDetector<Vec<JumpEvent>> {
        JumpDetector::new(Vec::new())
    }

    /// Feed composites at 100 ms spacing starting at tick `first`
    fn feed(detector: &mut JumpDetector<Vec<JumpEvent>>, first: usize, values: &[f64]) {
        for (offset, g) in values.iter().enumerate() {
            detector.process_sample(sample(first + offset, *g));
        }
    }

    #[test]
    fn test_end_to_end_jump() {
        let mut detector = detector();
        let sequence = [1.0, 1.0, 1.5, 1.6, 0.4, 0.3, 0.9, 1.0, 1.0, 1.0, 1.0, 1.0];

        feed(&mut detector, 0, &sequence[..2]);
        assert!(detector.sink().is_empty());

        detector.process_sample(sample(2, 1.5));
        assert_eq!(detector.phase(), JumpPhase::Takeoff);
        assert_eq!(
            detector.sink()[0],
            JumpEvent::Start {
                time: 2.0 * DT,
                start_g: 1.5,
                axes: (0.0, 0.0, 1.5),
            }
        );

        feed(&mut detector, 3, &sequence[3..]);
        assert_eq!(detector.sink().len(), 1);
        assert_eq!(detector.phase(), JumpPhase::Airborne);
        let session = detector.session().unwrap();
        assert_eq!(session.max_composite_g, 1.6);
        assert_eq!(session.min_composite_g, 0.3);

        // One more settled sample passes the 1 s mark and closes the jump
        let phase = detector.process_sample(sample(12, 1.0));
        assert_eq!(phase, JumpPhase::Idle);
        assert_eq!(detector.sink().len(), 2);

        match detector.sink()[1] {
            JumpEvent::Complete {
                time,
                duration,
                height_cm,
                power_score: score,
                max_g,
                min_g,
                ending_phase,
                timed_out,
                ..
            } => {
                assert_eq!(time, 12.0 * DT);
                assert!((duration - 1.0).abs() < 1e-9);
                assert_eq!(max_g, 1.6);
                assert_eq!(min_g, 0.3);
                assert_eq!(ending_phase, JumpPhase::Airborne);
                assert!(!timed_out);
                assert_eq!(height_cm, jump_height_cm(1.6, 0.3));
                assert_eq!(score, power_score(1.6, 0.3, JumpPhase::Airborne));
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(detector.completed_jumps(), 1);
        assert!(detector.session().is_none());
    }

    #[test]
    fn test_landing_phase_allows_early_landing() {
        let mut detector = detector();
        feed(
            &mut detector,
            0,
            &[1.0, 1.0, 1.5, 0.5, 0.4, 1.4, 1.0, 1.0, 1.0, 1.0],
        );
        assert_eq!(detector.phase(), JumpPhase::Landing);
        assert_eq!(detector.sink().len(), 1);

        detector.process_sample(sample(10, 1.0));
        match detector.sink()[1] {
            JumpEvent::Complete {
                duration,
                ending_phase,
                ..
            } => {
                assert!((duration - 0.8).abs() < 1e-9);
                assert_eq!(ending_phase, JumpPhase::Landing);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_landing_on_noisy_signal() {
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5, 0.3]);

        // Mean near 1 G but never settled enough for the stability check
        let mut i = 4;
        while detector.sink().len() < 2 {
            let g = if i % 2 == 0 { 0.75 } else { 1.25 };
            detector.process_sample(sample(i, g));
            i += 1;
            assert!(i < 40, "fallback landing never fired");
        }

        match detector.sink()[1] {
            JumpEvent::Complete {
                duration,
                ending_phase,
                timed_out,
                ..
            } => {
                assert!(duration > 1.5 && duration < 1.6 + 1e-9);
                assert_eq!(ending_phase, JumpPhase::Landing);
                assert!(!timed_out);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    /// Feed composites at `dt` spacing starting at tick `first`
    fn feed_spaced(
        detector: &mut JumpDetector<Vec<JumpEvent>>,
        dt: f64,
        first: usize,
        values: &[f64],
    ) {
        for (offset, g) in values.iter().enumerate() {
            let i = first + offset;
            detector.process_sample(AccelerationSample::new(i as f64 * dt, 0.0, 0.0, *g));
        }
    }

    #[test]
    fn test_no_landing_before_min_duration() {
        // At 20 ms spacing the window settles 0.14 s after takeoff
        let dt = 0.02;
        let mut detector = detector();
        feed_spaced(&mut detector, dt, 0, &[1.0, 1.0, 1.5, 0.5, 1.12]);
        assert_eq!(detector.phase(), JumpPhase::Landing);

        feed_spaced(&mut detector, dt, 5, &[1.0; 12]);
        assert_eq!(detector.sink().len(), 1);

        feed_spaced(&mut detector, dt, 17, &[1.0; 4]);
        assert_eq!(detector.sink().len(), 2);
        match detector.sink()[1] {
            JumpEvent::Complete {
                duration,
                ending_phase,
                timed_out,
                ..
            } => {
                assert!(duration >= 0.3);
                assert!(duration < 0.3 + dt);
                assert_eq!(ending_phase, JumpPhase::Landing);
                assert!(!timed_out);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_stable_mean_range_is_inclusive() {
        // Window of five 1.2 G samples: mean exactly at the upper bound
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5, 0.5]);
        feed(&mut detector, 4, &[1.2; 4]);
        assert_eq!(detector.sink().len(), 1);
        detector.process_sample(sample(8, 1.2));
        assert_eq!(detector.sink().len(), 2);

        // Window of five 0.8 G samples: mean exactly at the lower bound
        let mut detector = self::detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5, 0.5, 1.2]);
        feed(&mut detector, 5, &[0.8; 4]);
        assert_eq!(detector.sink().len(), 1);
        detector.process_sample(sample(9, 0.8));
        assert_eq!(detector.sink().len(), 2);
    }

    #[test]
    fn test_fallback_range_is_inclusive() {
        for edge in [0.7, 1.3] {
            let mut detector = detector();
            feed(&mut detector, 0, &[1.0, 1.0, 1.5]);

            // 0.5 / 1.5 alternation is outside the fallback range and never settles
            for i in 3..18 {
                let g = if i % 2 == 1 { 0.5 } else { 1.5 };
                detector.process_sample(sample(i, g));
            }
            assert_eq!(detector.sink().len(), 1, "closed early before {}", edge);

            detector.process_sample(sample(18, edge));
            assert_eq!(detector.sink().len(), 2, "{} G did not close the jump", edge);
            match detector.sink()[1] {
                JumpEvent::Complete {
                    duration, timed_out, ..
                } => {
                    assert!(duration > 1.5);
                    assert!(!timed_out);
                }
                other => panic!("expected completion, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_timeout_forces_single_completion() {
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5]);
        let start = 2.0 * DT;

        // 0.5 G never satisfies either landing rule
        for i in 3..60 {
            detector.process_sample(sample(i, 0.5));
        }

        let completions: Vec<&JumpEvent> =
            detector.sink().iter().filter(|e| e.is_complete()).collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(detector.sink().len(), 2);

        match *completions[0] {
            JumpEvent::Complete {
                time,
                max_g,
                min_g,
                ending_phase,
                timed_out,
                ..
            } => {
                assert!(timed_out);
                assert!(time - start > 3.0);
                assert!(time - start <= 3.0 + DT + 1e-9);
                assert_eq!(max_g, 1.5);
                assert_eq!(min_g, 0.5);
                assert_eq!(ending_phase, JumpPhase::Airborne);
            }
            _ => unreachable!(),
        }
        assert_eq!(detector.phase(), JumpPhase::Idle);
    }

    #[test]
    fn test_start_requires_spread() {
        let mut detector = detector();

        // Above threshold but flat
        feed(&mut detector, 0, &[1.4; 10]);
        assert!(detector.sink().is_empty());

        // Spike before three samples exist
        let mut fresh = JumpDetector::new(Vec::new());
        fresh.process_sample(sample(0, 1.0));
        fresh.process_sample(sample(1, 2.0));
        assert_eq!(fresh.phase(), JumpPhase::Idle);
        assert!(fresh.sink().is_empty());
    }

    #[test]
    fn test_no_overlapping_sessions() {
        let mut detector = detector();
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;

        for i in 0..5000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let g = (state % 2500) as f64 / 1000.0;

            let sample = AccelerationSample::new(i as f64 * 0.05, 0.0, g, 0.0);
            detector.process_sample(sample);

            if let Some(session) = detector.session() {
                assert!(session.min_composite_g <= sample.composite_g());
                assert!(sample.composite_g() <= session.max_composite_g);
                assert_ne!(session.phase, JumpPhase::Idle);
            }
        }

        let events = detector.sink();
        assert!(events.iter().any(|e| e.is_complete()));
        let mut pending = 0;
        for event in events {
            match event {
                JumpEvent::Start { .. } => pending += 1,
                JumpEvent::Complete { max_g, min_g, .. } => {
                    pending -= 1;
                    assert!(min_g <= max_g);
                }
            }
            assert!(pending == 0 || pending == 1);
        }
    }

    #[test]
    fn test_malformed_frames_leave_state_untouched() {
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5, 0.4]);
        let phase = detector.phase();
        let history_len = detector.history().len();
        let session = detector.session().cloned();

        let err = detector.process_frame(&[0x01, 0x00, 0x00, 0x00, 0x00], 0.5);
        assert_eq!(err, Err(DecodeError::Truncated { len: 5, expected: 10 }));

        let mut wrong = SensorFrame {
            event_type: MotionEventType::Tap,
            raw_x: 0,
            raw_y: 0,
            raw_z: 1024,
        }
        .encode();
        wrong[0] = 0x00;
        assert_eq!(
            detector.process_frame(&wrong, 0.5),
            Err(DecodeError::WrongMessageType(0x00))
        );

        assert_eq!(detector.phase(), phase);
        assert_eq!(detector.history().len(), history_len);
        assert_eq!(detector.session().cloned(), session);
        assert_eq!(detector.sink().len(), 1);
    }

    #[test]
    fn test_process_frame_feeds_sample() {
        let mut detector = detector();
        let frame = SensorFrame {
            event_type: MotionEventType::Shake,
            raw_x: 0,
            raw_y: 0,
            raw_z: 1536,
        };
        let phase = detector.process_frame(&frame.encode(), 0.0).unwrap();
        assert_eq!(phase, JumpPhase::Idle);
        assert_eq!(detector.history().latest().unwrap().composite_g(), 1.5);
    }

    #[test]
    fn test_history_bounded_in_detector() {
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0; 40]);
        assert_eq!(detector.history().len(), HISTORY_CAPACITY);
        assert_eq!(detector.history().latest().unwrap().timestamp(), 39.0 * DT);
    }

    #[test]
    fn test_reset() {
        let mut detector = detector();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5]);
        assert!(detector.session().is_some());

        detector.reset();
        assert_eq!(detector.phase(), JumpPhase::Idle);
        assert!(detector.history().is_empty());
        assert_eq!(detector.into_sink().len(), 1);
    }

    #[test]
    fn test_config_validation() {
        let config = JumpDetectorConfig {
            stable_window: 20,
            ..Default::default()
        };
        assert!(matches!(
            JumpDetector::with_config(config, Vec::new()),
            Err(JumpDetectorError::InvalidParameter(_))
        ));

        let config = JumpDetectorConfig {
            start_spread_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JumpDetectorConfig {
            max_jump_secs: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(JumpDetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_custom_timeout() {
        let config = JumpDetectorConfig {
            max_jump_secs: 1.0,
            ..Default::default()
        };
        let mut detector = JumpDetector::with_config(config, Vec::new()).unwrap();
        feed(&mut detector, 0, &[1.0, 1.0, 1.5]);
        feed(&mut detector, 3, &[0.5; 12]);
        assert_eq!(detector.completed_jumps(), 1);
    }

    #[test]
    fn test_phase_codes() {
        assert_eq!(JumpPhase::default(), JumpPhase::Idle);
        assert_eq!(JumpPhase::Landing.code(), 3);
        assert_eq!(JumpPhase::Airborne.as_str(), "airborne");
    }
}
