//! Device commands.
//!
//! Every command is a method on [`Session`](crate::Session): the arguments
//! are appended in wire order, the request is sent and the response is
//! checked. Commands that create something return the device-assigned
//! [`ResourceId`](crate::ResourceId) found at the start of the response
//! data.

mod flash;
mod graph;
mod image;
mod layer;
mod system;
mod text;
mod touch;

use crate::constants::POS_DATA;
use crate::decoder::Response;
use crate::error::Result;
use crate::types::ResourceId;

/// Offset of a length-prefixed blob in a response.
pub(crate) const POS_BLOB: usize = POS_DATA + 2;

/// The id returned by a creating command.
pub(crate) fn returned_id(response: Response<'_>) -> Result<ResourceId> {
    response.read_word(POS_DATA)
}
