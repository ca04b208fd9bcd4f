use std::fmt;

use crate::{
    audio::frame::AudioFrame,
    foundation::error::{BinError, BinResult},
    plugin::InputPlugin,
};

/// An [`InputPlugin`] plus the most recent audio frame it produced.
pub struct Input {
    name: String,
    plugin: Box<dyn InputPlugin>,
    audio: AudioFrame,
    realized: bool,
}

impl Input {
    /// Wrap `plugin`, registered under `name`.
    pub fn new(name: impl Into<String>, plugin: Box<dyn InputPlugin>) -> Self {
        Self {
            name: name.into(),
            plugin,
            audio: AudioFrame::default(),
            realized: false,
        }
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the plugin's one-time setup if it has not run yet.
    pub fn realize(&mut self) -> BinResult<()> {
        if self.realized {
            return Ok(());
        }
        self.plugin.init().map_err(|e| {
            BinError::plugin(format!("input '{}' failed to initialize: {e}", self.name))
        })?;
        self.realized = true;
        Ok(())
    }

    /// Whether [`Input::realize`] has succeeded.
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Pull the newest audio block. Keeps the previous frame when nothing new arrived.
    pub fn advance(&mut self) -> BinResult<()> {
        self.realize()?;
        if !self.plugin.upload(&mut self.audio) {
            tracing::trace!(input = %self.name, "no new audio");
        }
        Ok(())
    }

    /// The most recent audio frame.
    pub fn audio_frame(&self) -> &AudioFrame {
        &self.audio
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("name", &self.name)
            .field("realized", &self.realized)
            .field("samples", &self.audio.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/input.rs"]
mod tests;
