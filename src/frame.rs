//! Motion block notification decoding
//!
//! A sensor notification is at least 10 bytes:
//!
//! ```text
//! [0]    message type (0x01)
//! [1]    event tag (tap / shake / flip / orientation)
//! [2..4] unused here
//! [4..6] X axis, u16 little-endian
//! [6..8] Y axis, u16 little-endian
//! [8..10] Z axis, u16 little-endian
//! ```

use crate::error::DecodeError;
use crate::protocol::{MotionEventType, SENSOR_MESSAGE_TYPE};

/// Minimum length of a sensor notification
pub const SENSOR_FRAME_LEN: usize = 10;

/// LSB per g of the raw axis readings
const ACCEL_SCALE: f64 = 1024.0;

/// Largest raw value read as a positive acceleration
const RAW_POSITIVE_MAX: u16 = 2047;

/// Convert a raw axis reading to g
///
/// The block packs a signed 12-bit-range value into an unsigned 16-bit
/// field. Readings above 2047 are negative and wrap around 65536.
///
/// ```
/// use mesh_jump_detector::frame::decode_to_g;
///
/// assert_eq!(decode_to_g(1024), 1.0);
/// assert_eq!(decode_to_g(65535), -1.0 / 1024.0);
/// ```
pub fn decode_to_g(raw: u16) -> f64 {
    if raw <= RAW_POSITIVE_MAX {
        raw as f64 / ACCEL_SCALE
    } else {
        (raw as f64 - 65536.0) / ACCEL_SCALE
    }
}

/// A decoded motion notification, before it is placed on the time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFrame {
    /// Auxiliary event tag (informational)
    pub event_type: MotionEventType,
    /// X axis (raw value)
    pub raw_x: u16,
    /// Y axis (raw value)
    pub raw_y: u16,
    /// Z axis (raw value)
    pub raw_z: u16,
}

impl SensorFrame {
    /// Decode a notification payload
    ///
    /// # Returns
    /// * `Ok(SensorFrame)` - Payload is a sensor message
    /// * `Err(DecodeError::Truncated)` - Fewer than 10 bytes
    /// * `Err(DecodeError::WrongMessageType)` - First byte is not 0x01
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() < SENSOR_FRAME_LEN {
            return Err(DecodeError::Truncated {
                len: payload.len(),
                expected: SENSOR_FRAME_LEN,
            });
        }

        if payload[0] != SENSOR_MESSAGE_TYPE {
            return Err(DecodeError::WrongMessageType(payload[0]));
        }

        Ok(SensorFrame {
            event_type: MotionEventType::from_tag(payload[1]),
            raw_x: u16::from_le_bytes([payload[4], payload[5]]),
            raw_y: u16::from_le_bytes([payload[6], payload[7]]),
            raw_z: u16::from_le_bytes([payload[8], payload[9]]),
        })
    }

    /// Convert raw axis values to g
    pub fn accel_to_g(&self) -> (f64, f64, f64) {
        (
            decode_to_g(self.raw_x),
            decode_to_g(self.raw_y),
            decode_to_g(self.raw_z),
        )
    }

    /// Stamp the frame with its arrival time
    pub fn to_sample(&self, timestamp: f64) -> AccelerationSample {
        let (x_g, y_g, z_g) = self.accel_to_g();
        AccelerationSample::new(timestamp, x_g, y_g, z_g)
    }

    /// Encode back into a 10-byte notification
    ///
    /// Used to build replay dumps and test traffic; bytes 2 and 3 are zero.
    pub fn encode(&self) -> [u8; SENSOR_FRAME_LEN] {
        let mut payload = [0u8; SENSOR_FRAME_LEN];
        payload[0] = SENSOR_MESSAGE_TYPE;
        payload[1] = self.event_type.tag();
        payload[4..6].copy_from_slice(&self.raw_x.to_le_bytes());
        payload[6..8].copy_from_slice(&self.raw_y.to_le_bytes());
        payload[8..10].copy_from_slice(&self.raw_z.to_le_bytes());
        payload
    }
}

/// One 3-axis acceleration reading in g
///
/// `timestamp` is seconds on a monotonic clock (see [`crate::TimeKeeper`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationSample {
    timestamp: f64,
    x_g: f64,
    y_g: f64,
    z_g: f64,
    composite_g: f64,
}

impl AccelerationSample {
    pub fn new(timestamp: f64, x_g: f64, y_g: f64, z_g: f64) -> Self {
        Self {
            timestamp,
            x_g,
            y_g,
            z_g,
            composite_g: (x_g * x_g + y_g * y_g + z_g * z_g).sqrt(),
        }
    }

    /// Decode a notification payload straight into a sample
    pub fn decode(payload: &[u8], timestamp: f64) -> Result<Self, DecodeError> {
        SensorFrame::decode(payload).map(|frame| frame.to_sample(timestamp))
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn x_g(&self) -> f64 {
        self.x_g
    }

    pub fn y_g(&self) -> f64 {
        self.y_g
    }

    pub fn z_g(&self) -> f64 {
        self.z_g
    }

    /// Euclidean norm of the three axes
    pub fn composite_g(&self) -> f64 {
        self.composite_g
    }

    pub fn axes(&self) -> (f64, f64, f64) {
        (self.x_g, self.y_g, self.z_g)
    }
}
