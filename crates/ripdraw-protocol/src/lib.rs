//! RipDraw Display Serial Protocol
//!
//! Host-side client for RipDraw smart displays. The display is driven over a
//! serial link with a request/response protocol: every request frame is
//! answered by exactly one response frame carrying the same command id and
//! sequence number.
//!
//! # Protocol Overview
//!
//! All fields are little-endian 16-bit words:
//!
//! - **Request**: `CMD SEQ LEN PAYLOAD CHECKSUM`
//! - **Response**: `CMD SEQ LEN STATUS PAYLOAD CHECKSUM`
//!
//! The checksum is the 16-bit sum of all preceding bytes. A nonzero status
//! means the device rejected the command.
//!
//! # Example
//!
//! ```rust,no_run
//! use ripdraw_protocol::{Position, SerialConfig, Session, SessionConfig, VersionType};
//!
//! # fn main() -> ripdraw_protocol::Result<()> {
//! let mut session = Session::open(&SerialConfig::new("/dev/ttyACM0"), SessionConfig::default())?;
//! println!("hardware {}", session.system_info(VersionType::Hardware)?);
//!
//! session.set_layer_enable(1, true)?;
//! let image = session.image_load("logo")?;
//! session.image_write(1, image, Position::new(10, 20))?;
//! session.compose_layers_to_page(1)?;
//! session.close()
//! # }
//! ```

mod buffer;
mod channel;
mod commands;
mod config;
mod constants;
mod decoder;
mod encoder;
mod error;
mod frame;
mod layers;
#[cfg(feature = "serial")]
mod serial;
mod session;
mod types;

pub use buffer::*;
pub use channel::*;
pub use config::*;
pub use constants::*;
pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use frame::*;
pub use layers::*;
#[cfg(feature = "serial")]
pub use serial::*;
pub use session::*;
pub use types::*;
