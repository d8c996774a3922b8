//! Information, backlight and housekeeping commands.

use log::debug;

use super::POS_BLOB;
use crate::channel::Channel;
use crate::constants::{CommandId, POS_DATA};
use crate::error::Result;
use crate::session::Session;
use crate::types::{Event, VersionType};

impl<C: Channel> Session<C> {
    /// Query a version string.
    pub fn system_info(&mut self, kind: VersionType) -> Result<String> {
        self.begin_request(CommandId::SystemInfo)
            .word(kind.into())
            .call()?
            .read_text(POS_BLOB)
    }

    /// Restart the display. Loaded resources are dropped.
    pub fn reset(&mut self) -> Result<()> {
        self.begin_request(CommandId::Reset).execute()
    }

    /// Send text and return what the device echoes back.
    pub fn test_echo(&mut self, text: &str) -> Result<String> {
        self.begin_request(CommandId::TestEcho)
            .string(text)
            .call()?
            .read_text(POS_BLOB)
    }

    /// Fetch the next batch of pending events.
    ///
    /// An empty batch means nothing is pending. When the returned events
    /// carry `has_more`, call again to drain the queue.
    pub fn event_message(&mut self) -> Result<Vec<Event>> {
        let (events, _) = self
            .begin_request(CommandId::EventMessage)
            .call()?
            .read_event_batch(POS_DATA)?;
        debug!("event batch of {} events", events.len());
        Ok(events)
    }

    pub fn get_max_backlight_brightness(&mut self) -> Result<u16> {
        self.begin_request(CommandId::GetMaxBackLightBrightness)
            .call()?
            .read_word(POS_DATA)
    }

    pub fn get_backlight_brightness(&mut self) -> Result<u16> {
        self.begin_request(CommandId::GetBackLightBrightness)
            .call()?
            .read_word(POS_DATA)
    }

    pub fn set_backlight_brightness(&mut self, brightness: u16) -> Result<()> {
        self.begin_request(CommandId::SetBackLightBrightness)
            .word(brightness)
            .execute()
    }
}
