//! Session and serial port configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Behaviour of a session on top of its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Diagnostic level: 2 logs every frame as hex, 3 also logs each
    /// resync step.
    pub verbosity: u8,
    /// Bytes scanned for the expected response header before timing out.
    pub resync_attempts: u32,
    /// Pause before each header read, in milliseconds.
    pub resync_delay_ms: u64,
    /// Largest accepted response payload, checked before it is read.
    pub max_response_payload: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            verbosity: 0,
            resync_attempts: DEFAULT_RESYNC_ATTEMPTS,
            resync_delay_ms: DEFAULT_RESYNC_DELAY_MS,
            max_response_payload: DEFAULT_MAX_RESPONSE_PAYLOAD,
        }
    }
}

impl SessionConfig {
    /// Pause before each header read.
    pub fn resync_delay(&self) -> Duration {
        Duration::from_millis(self.resync_delay_ms)
    }
}

/// Serial device settings. The display always uses 8 data bits, no parity,
/// one stop bit and no flow control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM3`.
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Timeout of a single blocking read, in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: "/dev/ttyACM0".to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: 1000,
        }
    }
}

impl SerialConfig {
    /// Settings for `port` with default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        SerialConfig {
            port: port.into(),
            ..SerialConfig::default()
        }
    }

    /// Timeout of a single blocking read.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
