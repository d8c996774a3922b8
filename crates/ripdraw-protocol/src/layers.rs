//! Caller-side tracking of which layers are enabled.

use std::collections::HashMap;

use crate::channel::Channel;
use crate::error::Result;
use crate::session::Session;
use crate::types::ResourceId;

/// Enabled state of each layer, as last set through this tracker.
///
/// The device does not report layer state, so loaders that draw onto many
/// layers keep one of these to enable each layer only once.
#[derive(Debug, Clone, Default)]
pub struct LayerStates {
    enabled: HashMap<ResourceId, bool>,
}

impl LayerStates {
    /// Create a tracker with every layer unknown (treated as disabled).
    pub fn new() -> Self {
        LayerStates::default()
    }

    /// Whether `layer` was last marked enabled.
    pub fn is_enabled(&self, layer: ResourceId) -> bool {
        self.enabled.get(&layer).copied().unwrap_or(false)
    }

    /// Record the state of `layer` without talking to the device.
    pub fn mark(&mut self, layer: ResourceId, enabled: bool) {
        self.enabled.insert(layer, enabled);
    }

    /// Enable `layer` on the device unless it is already enabled.
    ///
    /// Returns whether a command was sent.
    pub fn enable<C: Channel>(
        &mut self,
        session: &mut Session<C>,
        layer: ResourceId,
    ) -> Result<bool> {
        if self.is_enabled(layer) {
            return Ok(false);
        }
        session.set_layer_enable(layer, true)?;
        self.mark(layer, true);
        Ok(true)
    }

    /// Disable `layer` on the device unless it is already disabled.
    ///
    /// Returns whether a command was sent.
    pub fn disable<C: Channel>(
        &mut self,
        session: &mut Session<C>,
        layer: ResourceId,
    ) -> Result<bool> {
        if self.enabled.get(&layer) == Some(&false) {
            return Ok(false);
        }
        session.set_layer_enable(layer, false)?;
        self.mark(layer, false);
        Ok(true)
    }

    /// Forget all recorded state.
    pub fn clear(&mut self) {
        self.enabled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_layers_are_disabled() {
        let states = LayerStates::new();
        assert!(!states.is_enabled(4));
    }

    #[test]
    fn test_mark_and_clear() {
        let mut states = LayerStates::new();
        states.mark(2, true);
        assert!(states.is_enabled(2));
        states.mark(2, false);
        assert!(!states.is_enabled(2));
        states.mark(5, true);
        states.clear();
        assert!(!states.is_enabled(5));
    }
}
