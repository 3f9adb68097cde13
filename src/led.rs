//! LED block command encoding
//!
//! The LED block shares the motion block's write characteristic and
//! message-type convention. A command is 15 bytes, multi-byte fields
//! little-endian:
//!
//! ```text
//! [0]      message type (0x01)
//! [1]      reserved (0)
//! [2]      red
//! [3]      0
//! [4]      green
//! [5]      0
//! [6]      blue
//! [7..9]   total duration (ms)
//! [9..11]  on time per cycle (ms)
//! [11..13] off time per cycle (ms)
//! [13]     pattern
//! [14]     checksum: sum of bytes 0..14 mod 256
//! ```

use crate::protocol::SENSOR_MESSAGE_TYPE;

/// Encoded command length including the checksum byte
pub const LED_COMMAND_LEN: usize = 15;

/// Lighting pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedPattern {
    /// Hard on/off
    #[default]
    Blink,
    /// Fade in and out
    Firefly,
}

impl LedPattern {
    pub fn code(&self) -> u8 {
        match self {
            Self::Blink => 1,
            Self::Firefly => 2,
        }
    }
}

/// Additive 8-bit checksum
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// One LED output command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedCommand {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// How long the pattern runs in total
    pub duration_ms: u16,
    /// Lit time per cycle
    pub on_ms: u16,
    /// Dark time per cycle
    pub off_ms: u16,
    pub pattern: LedPattern,
}

impl LedCommand {
    /// Blue-ish blink for 5 s, 1 s on / 0.5 s off
    pub fn on() -> Self {
        Self {
            red: 2,
            green: 8,
            blue: 32,
            duration_ms: 5000,
            on_ms: 1000,
            off_ms: 500,
            pattern: LedPattern::Blink,
        }
    }

    /// All channels dark
    pub fn off() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            duration_ms: 0,
            on_ms: 0,
            off_ms: 0,
            pattern: LedPattern::Blink,
        }
    }

    /// Encode for the write characteristic
    ///
    /// ```
    /// use mesh_jump_detector::led::LedCommand;
    ///
    /// let bytes = LedCommand::off().encode();
    /// assert_eq!(bytes, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2]);
    /// ```
    pub fn encode(&self) -> [u8; LED_COMMAND_LEN] {
        let mut bytes = [0u8; LED_COMMAND_LEN];
        bytes[0] = SENSOR_MESSAGE_TYPE;
        bytes[2] = self.red;
        bytes[4] = self.green;
        bytes[6] = self.blue;
        bytes[7..9].copy_from_slice(&self.duration_ms.to_le_bytes());
        bytes[9..11].copy_from_slice(&self.on_ms.to_le_bytes());
        bytes[11..13].copy_from_slice(&self.off_ms.to_le_bytes());
        bytes[13] = self.pattern.code();
        bytes[14] = checksum(&bytes[..14]);
        bytes
    }
}
