//! Touch map commands.

use super::returned_id;
use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::Result;
use crate::session::Session;
use crate::types::{Position, ResourceId, Size};

impl<C: Channel> Session<C> {
    /// Register a rectangular touch region. Returns the region id.
    pub fn touch_map_rectangle(
        &mut self,
        position: Position,
        size: Size,
        label: &str,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::TouchMapRectangle)
                .position(position)
                .size(size)
                .string(label)
                .call()?,
        )
    }

    /// Register a ring-shaped touch region centred on `center`. Returns the
    /// region id.
    pub fn touch_map_circle(
        &mut self,
        center: Position,
        outer_radius: u16,
        inner_radius: u16,
        label: &str,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::TouchMapCircle)
                .position(center)
                .word(outer_radius)
                .word(inner_radius)
                .string(label)
                .call()?,
        )
    }

    pub fn touch_map_delete(&mut self, region: ResourceId) -> Result<()> {
        self.begin_request(CommandId::TouchMapDelete)
            .word(region)
            .execute()
    }

    /// Remove every touch region.
    pub fn touch_map_clear(&mut self) -> Result<()> {
        self.begin_request(CommandId::TouchMapClear).execute()
    }
}
