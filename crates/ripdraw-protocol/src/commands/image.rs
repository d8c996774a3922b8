//! Image, image list and animation commands.

use super::returned_id;
use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::Result;
use crate::session::Session;
use crate::types::{Position, ResourceId};

impl<C: Channel> Session<C> {
    /// Load a stored image by label. Returns the image id.
    pub fn image_load(&mut self, label: &str) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::ImageLoad)
                .string(label)
                .call()?,
        )
    }

    pub fn image_release(&mut self, image: ResourceId) -> Result<()> {
        self.begin_request(CommandId::ImageRelease)
            .word(image)
            .execute()
    }

    /// Draw a loaded image onto a layer. Returns the id of the drawn instance.
    pub fn image_write(
        &mut self,
        layer: ResourceId,
        image: ResourceId,
        position: Position,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::ImageWrite)
                .word(layer)
                .word(image)
                .position(position)
                .call()?,
        )
    }

    pub fn image_delete(&mut self, write_id: ResourceId) -> Result<()> {
        self.begin_request(CommandId::ImageDelete)
            .word(write_id)
            .execute()
    }

    pub fn image_move(&mut self, write_id: ResourceId, position: Position) -> Result<()> {
        self.begin_request(CommandId::ImageMove)
            .word(write_id)
            .position(position)
            .execute()
    }

    /// Load `count` images named `prefix` followed by an index, starting at
    /// `start` and advancing by `step`. Returns the list id.
    pub fn image_list_load(
        &mut self,
        prefix: &str,
        start: u16,
        step: u16,
        count: u16,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::ImageListLoad)
                .string(prefix)
                .word(start)
                .word(step)
                .word(count)
                .call()?,
        )
    }

    pub fn image_list_release(&mut self, list: ResourceId) -> Result<()> {
        self.begin_request(CommandId::ImageListRelease)
            .word(list)
            .execute()
    }

    /// Draw one image of a list. Returns the id of the drawn instance.
    pub fn image_list_write(
        &mut self,
        layer: ResourceId,
        position: Position,
        list: ResourceId,
        index: u16,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::ImageListWrite)
                .word(layer)
                .position(position)
                .word(list)
                .word(index)
                .call()?,
        )
    }

    /// Swap a drawn list image for another index of the same list.
    pub fn image_list_replace(&mut self, write_id: ResourceId, index: u16) -> Result<()> {
        self.begin_request(CommandId::ImageListReplace)
            .word(write_id)
            .word(index)
            .execute()
    }

    pub fn image_list_delete(&mut self, write_id: ResourceId) -> Result<()> {
        self.begin_request(CommandId::ImageListDelete)
            .word(write_id)
            .execute()
    }

    /// Play an image list as an animation. Returns the animation id.
    pub fn animation_play(
        &mut self,
        layer: ResourceId,
        position: Position,
        list: ResourceId,
        frequency: u16,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::AnimationPlay)
                .word(layer)
                .position(position)
                .word(list)
                .word(frequency)
                .call()?,
        )
    }

    /// Stop an animation on the frame at `stop_index`.
    pub fn animation_stop(&mut self, animation: ResourceId, stop_index: u16) -> Result<()> {
        self.begin_request(CommandId::AnimationStop)
            .word(animation)
            .word(stop_index)
            .execute()
    }

    pub fn animation_continue(&mut self, animation: ResourceId) -> Result<()> {
        self.begin_request(CommandId::AnimationContinue)
            .word(animation)
            .execute()
    }

    pub fn animation_delete(&mut self, animation: ResourceId) -> Result<()> {
        self.begin_request(CommandId::AnimationDelete)
            .word(animation)
            .execute()
    }
}
