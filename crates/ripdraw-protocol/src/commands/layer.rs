//! Layer and page commands.

use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::{ProtocolError, Result};
use crate::session::Session;
use crate::types::{Color, Position, ResourceId, Size};

impl<C: Channel> Session<C> {
    /// Show or hide a layer.
    pub fn set_layer_enable(&mut self, layer: ResourceId, enable: bool) -> Result<()> {
        self.begin_request(CommandId::SetLayerEnable)
            .word(layer)
            .flag(enable)
            .execute()
    }

    /// Place and size a layer.
    pub fn set_layer_origin_and_size(
        &mut self,
        layer: ResourceId,
        origin: Position,
        size: Size,
    ) -> Result<()> {
        self.begin_request(CommandId::SetLayerOriginAndSize)
            .word(layer)
            .position(origin)
            .size(size)
            .execute()
    }

    pub fn set_layer_back_color(&mut self, layer: ResourceId, color: Color) -> Result<()> {
        self.begin_request(CommandId::SetLayerBackColor)
            .word(layer)
            .color(color)
            .execute()
    }

    /// Set layer transparency, in percent.
    pub fn set_layer_transparency(&mut self, layer: ResourceId, percent: u8) -> Result<()> {
        self.begin_request(CommandId::SetLayerTransparency)
            .word(layer)
            .byte(percent)
            .execute()
    }

    pub fn layer_clear(&mut self, layer: ResourceId) -> Result<()> {
        self.begin_request(CommandId::LayerClear)
            .word(layer)
            .execute()
    }

    /// Move a layer's edges by the given amounts.
    pub fn layer_move(
        &mut self,
        layer: ResourceId,
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
    ) -> Result<()> {
        self.begin_request(CommandId::LayerMove)
            .word(layer)
            .word(left)
            .word(top)
            .word(right)
            .word(bottom)
            .execute()
    }

    /// Write a rectangle of raw pixels, row by row.
    ///
    /// `pixels` must hold exactly `size.width * size.height` colors, and that
    /// count must fit in 16 bits.
    pub fn layer_write_raw_pixels(
        &mut self,
        layer: ResourceId,
        origin: Position,
        size: Size,
        pixels: &[Color],
    ) -> Result<()> {
        if pixels.len() != size.area() {
            return Err(ProtocolError::invalid_argument(format!(
                "{} pixels given for a {}x{} rectangle",
                pixels.len(),
                size.width,
                size.height
            )));
        }
        let count = u16::try_from(pixels.len()).map_err(|_| {
            ProtocolError::invalid_argument(format!(
                "{} pixels exceed one request",
                pixels.len()
            ))
        })?;
        let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        self.begin_request(CommandId::LayerWriteRawPixels)
            .word(layer)
            .position(origin)
            .size(size)
            .word(count)
            .raw(&bytes)
            .execute()
    }

    /// Compose all enabled layers into a page.
    pub fn compose_layers_to_page(&mut self, page: ResourceId) -> Result<()> {
        self.begin_request(CommandId::ComposeLayersToPage)
            .word(page)
            .execute()
    }

    /// Show a composed page.
    pub fn page_to_screen(&mut self, page: ResourceId) -> Result<()> {
        self.begin_request(CommandId::PageToScreen)
            .word(page)
            .execute()
    }

    pub fn partial_compose_layers_to_screen(&mut self, layer: ResourceId) -> Result<()> {
        self.begin_request(CommandId::PartialComposeLayersToScreen)
            .word(layer)
            .execute()
    }
}
