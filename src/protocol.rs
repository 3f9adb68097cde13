//! MESH block BLE protocol constants
//!
//! Every MESH block exposes the same three GATT characteristics. Sensor
//! data arrives on the notify characteristic, commands go to the write
//! characteristic.

/// Characteristic that carries sensor notifications
pub const CORE_NOTIFY_UUID: &str = "72c90003-57a9-4d40-b746-534e22ec9f9e";

/// Characteristic that accepts commands (activation, LED output)
pub const CORE_WRITE_UUID: &str = "72c90004-57a9-4d40-b746-534e22ec9f9e";

/// Characteristic used for indications (block status)
pub const CORE_INDICATE_UUID: &str = "72c90005-57a9-4d40-b746-534e22ec9f9e";

/// Advertised name prefix of the motion (accelerometer) block
pub const MOTION_BLOCK_NAME_PREFIX: &str = "MESH-100AC";

/// Advertised name prefix of the LED block
pub const LED_BLOCK_NAME_PREFIX: &str = "MESH-100LE";

/// First byte of every sensor message and LED command
pub const SENSOR_MESSAGE_TYPE: u8 = 0x01;

/// Command written once after connecting; the block stays silent until it
/// receives this.
pub const ACTIVATE_COMMAND: [u8; 4] = [0x00, 0x02, 0x01, 0x03];

/// Auxiliary event tag carried in byte 1 of a motion notification
///
/// Informational only; jump detection works on the raw axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionEventType {
    Tap,
    Shake,
    Flip,
    Orientation,
    Unknown(u8),
}

impl MotionEventType {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0x00 => Self::Tap,
            0x01 => Self::Shake,
            0x02 => Self::Flip,
            0x03 => Self::Orientation,
            other => Self::Unknown(other),
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            Self::Tap => 0x00,
            Self::Shake => 0x01,
            Self::Flip => 0x02,
            Self::Orientation => 0x03,
            Self::Unknown(tag) => *tag,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Shake => "shake",
            Self::Flip => "flip",
            Self::Orientation => "orientation",
            Self::Unknown(_) => "unknown",
        }
    }
}
