//! Font, string, character and text window commands.

use super::returned_id;
use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::Result;
use crate::session::Session;
use crate::types::{Color, HDirection, Position, ResourceId, Size};

impl<C: Channel> Session<C> {
    /// Load a stored font by label. Returns the font id.
    pub fn font_load(&mut self, label: &str) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::FontLoad)
                .string(label)
                .call()?,
        )
    }

    pub fn font_release(&mut self, font: ResourceId) -> Result<()> {
        self.begin_request(CommandId::FontRelease)
            .word(font)
            .execute()
    }

    /// Set the spacing between glyphs of a font.
    pub fn set_font_padding(&mut self, font: ResourceId, padding: u8) -> Result<()> {
        self.begin_request(CommandId::SetFontPadding)
            .word(font)
            .byte(padding)
            .execute()
    }

    /// Draw a string. Returns the id of the drawn string.
    pub fn string_write(
        &mut self,
        layer: ResourceId,
        position: Position,
        font: ResourceId,
        color: Color,
        direction: HDirection,
        text: &str,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::StringWrite)
                .word(layer)
                .position(position)
                .word(font)
                .color(color)
                .hdirection(direction)
                .string(text)
                .call()?,
        )
    }

    pub fn string_replace(&mut self, string: ResourceId, text: &str) -> Result<()> {
        self.begin_request(CommandId::StringReplace)
            .word(string)
            .string(text)
            .execute()
    }

    pub fn string_delete(&mut self, string: ResourceId) -> Result<()> {
        self.begin_request(CommandId::StringDelete)
            .word(string)
            .execute()
    }

    /// Draw a single character. Returns the id of the drawn character.
    pub fn character_write(
        &mut self,
        layer: ResourceId,
        position: Position,
        font: ResourceId,
        color: Color,
        character: u8,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::CharacterWrite)
                .word(layer)
                .position(position)
                .word(font)
                .color(color)
                .byte(character)
                .call()?,
        )
    }

    pub fn character_replace(&mut self, character_id: ResourceId, character: u8) -> Result<()> {
        self.begin_request(CommandId::CharacterReplace)
            .word(character_id)
            .byte(character)
            .execute()
    }

    pub fn character_delete(&mut self, character_id: ResourceId) -> Result<()> {
        self.begin_request(CommandId::CharacterDelete)
            .word(character_id)
            .execute()
    }

    /// Create a scrolling text window. Returns the window id.
    pub fn text_window_create(
        &mut self,
        layer: ResourceId,
        position: Position,
        size: Size,
        font: ResourceId,
        color: Color,
        scroll: HDirection,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::TextWindowCreate)
                .word(layer)
                .position(position)
                .size(size)
                .word(font)
                .color(color)
                .hdirection(scroll)
                .call()?,
        )
    }

    /// Move the cursor of a text window.
    pub fn text_window_set_insertion_point(
        &mut self,
        window: ResourceId,
        position: Position,
    ) -> Result<()> {
        self.begin_request(CommandId::TextWindowSetInsertionPoint)
            .word(window)
            .position(position)
            .execute()
    }

    /// Insert text at the cursor of a text window.
    pub fn text_window_insert_text(&mut self, window: ResourceId, text: &str) -> Result<()> {
        self.begin_request(CommandId::TextWindowInsertText)
            .word(window)
            .string(text)
            .execute()
    }

    pub fn text_window_delete(&mut self, window: ResourceId) -> Result<()> {
        self.begin_request(CommandId::TextWindowDelete)
            .word(window)
            .execute()
    }
}
