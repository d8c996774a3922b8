//! Line graph and bar graph commands.

use super::returned_id;
use crate::channel::Channel;
use crate::constants::CommandId;
use crate::error::{ProtocolError, Result};
use crate::session::Session;
use crate::types::{Color, Direction, Position, ResourceId, Size};

impl<C: Channel> Session<C> {
    /// Create a line graph window. Returns the graph id.
    pub fn line_graph_create_window(
        &mut self,
        layer: ResourceId,
        position: Position,
        size: Size,
        line_width: u8,
        glow_width: u8,
        autocompose: bool,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::LineGraphCreateWindow)
                .word(layer)
                .position(position)
                .size(size)
                .byte(line_width)
                .byte(glow_width)
                .flag(autocompose)
                .call()?,
        )
    }

    /// Append points to a line graph, drawn in `color`.
    pub fn line_graph_insert_points(
        &mut self,
        graph: ResourceId,
        color: Color,
        points: &[Position],
    ) -> Result<()> {
        let count = u16::try_from(points.len()).map_err(|_| {
            ProtocolError::invalid_argument(format!(
                "{} points exceed one request",
                points.len()
            ))
        })?;
        let bytes: Vec<u8> = points
            .iter()
            .flat_map(|p| {
                let [x0, x1] = p.x.to_le_bytes();
                let [y0, y1] = p.y.to_le_bytes();
                [x0, x1, y0, y1]
            })
            .collect();
        self.begin_request(CommandId::LineGraphInsertPoints)
            .word(graph)
            .color(color)
            .word(count)
            .raw(&bytes)
            .execute()
    }

    pub fn line_graph_move(
        &mut self,
        graph: ResourceId,
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
    ) -> Result<()> {
        self.begin_request(CommandId::LineGraphMove)
            .word(graph)
            .word(left)
            .word(top)
            .word(right)
            .word(bottom)
            .execute()
    }

    pub fn line_graph_delete_window(&mut self, graph: ResourceId) -> Result<()> {
        self.begin_request(CommandId::LineGraphDeleteWindow)
            .word(graph)
            .execute()
    }

    /// Create a bar graph window. Returns the graph id.
    pub fn bar_graph_create_window(
        &mut self,
        layer: ResourceId,
        position: Position,
        size: Size,
        stack_size: u8,
        direction: Direction,
        autocompose: bool,
    ) -> Result<ResourceId> {
        returned_id(
            self.begin_request(CommandId::BarGraphCreateWindow)
                .word(layer)
                .position(position)
                .size(size)
                .byte(stack_size)
                .direction(direction)
                .flag(autocompose)
                .call()?,
        )
    }

    /// Push `count` stacks drawn with `image` onto a bar graph.
    pub fn bar_graph_insert_stacks(
        &mut self,
        graph: ResourceId,
        count: u8,
        image: ResourceId,
    ) -> Result<()> {
        self.begin_request(CommandId::BarGraphInsertStacks)
            .word(graph)
            .byte(count)
            .word(image)
            .execute()
    }

    pub fn bar_graph_remove_stacks(&mut self, graph: ResourceId, count: u8) -> Result<()> {
        self.begin_request(CommandId::BarGraphRemoveStacks)
            .word(graph)
            .byte(count)
            .execute()
    }

    pub fn bar_graph_delete_window(&mut self, graph: ResourceId) -> Result<()> {
        self.begin_request(CommandId::BarGraphDeleteWindow)
            .word(graph)
            .execute()
    }
}
