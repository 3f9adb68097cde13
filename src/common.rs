//! Clock and console helpers shared by the library and the binaries

use std::time::Instant;

/// Resting composite acceleration, marked on every gauge
const REST_G: f64 = 1.0;

/// Monotonic clock for stamping notifications as they arrive
///
/// Sample timestamps are seconds since the keeper was created, so jump
/// durations are immune to wall-clock adjustments.
#[derive(Debug, Clone, Copy)]
pub struct TimeKeeper {
    start: Instant,
}

impl TimeKeeper {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the keeper was created
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for TimeKeeper {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a composite acceleration gauge `width` cells wide
///
/// The bar fills from 0 G towards `full_scale_g`. The cell holding the
/// 1 G rest level shows `|` while the bar has not reached it, so free fall
/// and impact are easy to tell apart at a glance.
///
/// # Example
/// ```
/// use mesh_jump_detector::g_gauge;
///
/// // 1.5 G on a 3 G scale fills half of a 30-cell gauge
/// let gauge = g_gauge(1.5, 3.0, 30);
/// assert_eq!(gauge.chars().count(), 30);
/// assert_eq!(gauge.chars().filter(|c| *c == '█').count(), 15);
/// ```
pub fn g_gauge(value_g: f64, full_scale_g: f64, width: usize) -> String {
    if !(full_scale_g > 0.0) {
        return " ".repeat(width);
    }

    let fraction = (value_g / full_scale_g).clamp(0.0, 1.0);
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let rest_cell = (REST_G / full_scale_g * width as f64).round() as usize;

    (0..width)
        .map(|cell| {
            if cell < filled {
                '█'
            } else if cell == rest_cell {
                '|'
            } else {
                ' '
            }
        })
        .collect()
}
