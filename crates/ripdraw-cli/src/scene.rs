//! YAML configuration and scene files.
//!
//! One file format serves both purposes:
//!
//! ```yaml
//! serial:
//!   port: /dev/ttyACM0
//!   baud_rate: 115200
//! session:
//!   verbosity: 1
//! images:
//!   - label: background
//!     layer: 1
//!   - label: logo
//!     layer: 2
//!     x: 40
//!     y: 16
//! ```
//!
//! Every section is optional.

use std::fs;
use std::path::Path;

use ripdraw_protocol::{
    Channel, LayerStates, Position, ResourceId, SerialConfig, Session, SessionConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Page the loader composes onto.
pub const SCENE_PAGE: ResourceId = 1;

/// Contents of a configuration or scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub serial: SerialConfig,
    pub session: SessionConfig,
    pub images: Vec<ImageEntry>,
}

/// One stored image placed on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Label the image is stored under on the device.
    pub label: String,
    /// Layer to draw on.
    pub layer: ResourceId,
    #[serde(default)]
    pub x: u16,
    #[serde(default)]
    pub y: u16,
}

impl ImageEntry {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl SceneFile {
    /// Parse a scene from YAML text. `origin` names the source in errors.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| CliError::Yaml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }
}

/// Draw a scene from scratch.
///
/// Resets the display, then for each image enables its layer (once per
/// layer), loads the image and writes it. Finally composes every layer onto
/// [`SCENE_PAGE`]. Returns the number of images drawn.
pub fn load_scene<C: Channel>(session: &mut Session<C>, images: &[ImageEntry]) -> Result<usize> {
    session.reset()?;
    let mut layers = LayerStates::new();

    for entry in images {
        if layers.enable(session, entry.layer)? {
            debug!(layer = entry.layer, "layer enabled");
        }
        let image = session.image_load(&entry.label)?;
        let placed = session.image_write(entry.layer, image, entry.position())?;
        debug!(
            label = %entry.label,
            image,
            placed,
            "image written"
        );
    }

    session.compose_layers_to_page(SCENE_PAGE)?;
    info!(images = images.len(), page = SCENE_PAGE, "scene loaded");
    Ok(images.len())
}
