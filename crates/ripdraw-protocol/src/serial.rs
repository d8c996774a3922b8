//! Serial port channel.

use std::fmt;
use std::io::{self, Read, Write};

use log::{debug, info};
use tokio_serial::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::config::{SerialConfig, SessionConfig};
use crate::error::{ProtocolError, Result};
use crate::session::Session;

/// A serial device configured for the display: 8 data bits, no parity, one
/// stop bit, no flow control.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    name: String,
}

impl fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialChannel")
            .field("port", &self.name)
            .finish()
    }
}

impl SerialChannel {
    /// Open and configure the device named in `config`.
    ///
    /// Input already buffered by the driver is discarded.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let open_error = |e: tokio_serial::Error| ProtocolError::Open {
            port: config.port.clone(),
            reason: e.to_string(),
        };

        let port = tokio_serial::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout())
            .open()
            .map_err(open_error)?;
        port.clear(ClearBuffer::All).map_err(open_error)?;

        debug!(
            "opened {} at {} baud, read timeout {:?}",
            config.port,
            config.baud_rate,
            config.read_timeout()
        );
        Ok(SerialChannel {
            port,
            name: config.port.clone(),
        })
    }

    /// Device path.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for SerialChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl Session<SerialChannel> {
    /// Open a serial device and start a session on it.
    pub fn open(serial: &SerialConfig, config: SessionConfig) -> Result<Self> {
        let channel = SerialChannel::open(serial)?;
        info!("session open on {}", channel.name());
        Ok(Session::with_channel(channel, config))
    }
}
