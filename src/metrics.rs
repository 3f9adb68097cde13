//! Jump height and power scoring
//!
//! Both numbers are heuristics computed from the extrema of a single jump.
//! The height estimate takes one velocity guess from the peak excess
//! acceleration instead of integrating the waveform, so treat it as a
//! relative score rather than a measured height. The formulas are kept
//! exactly as shipped so scores stay comparable across versions.

use crate::detector::JumpPhase;

/// Standard gravity (m/s²)
const GRAVITY: f64 = 9.81;

/// Effective push-off time used to turn excess acceleration into velocity (s)
const PUSH_OFF_SECS: f64 = 0.1;

/// Velocity boost applied when the minimum shows real free fall
const AIRBORNE_FACTOR: f64 = 1.3;

/// Minimum composite G that counts as real free fall
const AIRBORNE_MIN_G: f64 = 0.5;

pub const MAX_HEIGHT_CM: f64 = 150.0;
pub const MAX_POWER_SCORE: f64 = 100.0;

/// Derived scores for a completed jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpMetrics {
    pub height_cm: f64,
    pub power_score: f64,
}

impl JumpMetrics {
    pub fn compute(max_g: f64, min_g: f64, ending_phase: JumpPhase) -> Self {
        Self {
            height_cm: jump_height_cm(max_g, min_g),
            power_score: power_score(max_g, min_g, ending_phase),
        }
    }
}

/// Estimated jump height in centimetres, within `[0, 150]`
///
/// ```
/// use mesh_jump_detector::metrics::jump_height_cm;
///
/// assert_eq!(jump_height_cm(1.0, 0.2), 0.0);
/// assert!(jump_height_cm(2.0, 0.2) > jump_height_cm(2.0, 0.8));
/// ```
pub fn jump_height_cm(max_g: f64, min_g: f64) -> f64 {
    // Also catches NaN
    if !(max_g > 1.0) {
        return 0.0;
    }

    let excess_acceleration = (max_g - 1.0) * GRAVITY;

    let airborne_factor = if min_g < AIRBORNE_MIN_G {
        AIRBORNE_FACTOR
    } else {
        1.0
    };

    let estimated_velocity = excess_acceleration * PUSH_OFF_SECS * airborne_factor;
    let height_m = estimated_velocity.powi(2) / (2.0 * GRAVITY);
    let height_cm = height_m * 100.0;

    height_cm.max(0.0).min(MAX_HEIGHT_CM)
}

/// Weighted jump score within `[0, 100]`
///
/// Height contributes up to 50 points and peak acceleration up to 30. A
/// minimum below 0.6 G adds 15, and ending in the airborne or landing phase
/// adds 5.
pub fn power_score(max_g: f64, min_g: f64, ending_phase: JumpPhase) -> f64 {
    let height_score = (jump_height_cm(max_g, min_g) * 0.6).min(50.0);
    let acceleration_score = ((max_g - 1.0) * 20.0).min(30.0);

    let airborne_bonus = if min_g < 0.6 { 15.0 } else { 0.0 };

    let phase_bonus = match ending_phase {
        JumpPhase::Airborne | JumpPhase::Landing => 5.0,
        JumpPhase::Idle | JumpPhase::Takeoff => 0.0,
    };

    let total = height_score + acceleration_score + airborne_bonus + phase_bonus;
    total.max(0.0).min(MAX_POWER_SCORE)
}
