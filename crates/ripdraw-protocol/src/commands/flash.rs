//! Flash storage commands.
//!
//! Writing a file to flash is a three step affair: enable writes, announce
//! the file with [`Session::flash_image`] to get a transfer id, then stream
//! its content in chunks with [`Session::flash_data`].

use super::returned_id;
use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::Result;
use crate::session::Session;
use crate::types::ResourceId;

impl<C: Channel> Session<C> {
    /// Allow or forbid writes to flash.
    pub fn flash_write_enable(&mut self, enable: bool) -> Result<()> {
        self.begin_request(CommandId::FlashWriteEnable)
            .flag(enable)
            .execute()
    }

    /// Announce a file of `length` bytes. Returns the transfer id.
    pub fn flash_image(
        &mut self,
        file_type: u16,
        filename: &str,
        length: u16,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::FlashImage)
                .word(file_type)
                .string(filename)
                .word(length)
                .call()?,
        )
    }

    /// Send one chunk of an announced file.
    pub fn flash_data(&mut self, transfer: ResourceId, file_type: u16, data: &[u8]) -> Result<()> {
        self.begin_request(CommandId::FlashData)
            .word(transfer)
            .word(file_type)
            .blob(data)
            .execute()
    }

    pub fn flash_delete(&mut self, file_type: u16, filename: &str) -> Result<()> {
        self.begin_request(CommandId::FlashDelete)
            .word(file_type)
            .string(filename)
            .execute()
    }

    /// Erase every file in flash.
    pub fn flash_delete_all(&mut self) -> Result<()> {
        self.begin_request(CommandId::FlashDeleteAll).execute()
    }
}
