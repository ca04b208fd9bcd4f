//! Plugin capability traits and the managed wrappers the bin drives.
//!
//! Plugin authors implement [`ActorPlugin`], [`MorphPlugin`] or [`InputPlugin`]. The bin never
//! talks to those traits directly: it owns [`Actor`], [`Morph`] and [`Input`] wrappers that add
//! realization state, surface binding and negotiation on top.

pub(crate) mod actor;
pub(crate) mod builtin;
pub(crate) mod input;
pub(crate) mod morph;
pub(crate) mod registry;

#[cfg(test)]
pub(crate) mod probe;

pub use actor::Actor;
pub use input::Input;
pub use morph::{Morph, MorphMode};
pub use registry::PluginRegistry;

use crate::{
    audio::frame::AudioFrame,
    foundation::error::BinResult,
    video::{depth::DepthMask, palette::Palette, surface::VideoSurface},
};

/// A renderer producing one frame per call from the current audio frame.
pub trait ActorPlugin {
    /// Depths this actor can render into.
    fn supported_depths(&self) -> DepthMask;

    /// One-time setup, run when the actor is realized.
    fn init(&mut self) -> BinResult<()> {
        Ok(())
    }

    /// Negotiation event: the target surface now has this size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Draw into `target`, whose depth is one of [`ActorPlugin::supported_depths`].
    fn render(&mut self, target: &mut VideoSurface, audio: &AudioFrame);

    /// Palette for `indexed8` output.
    fn palette(&self) -> Option<&Palette> {
        None
    }
}

/// Blends two actors' frames into one over the course of a transition.
pub trait MorphPlugin {
    /// Depths this morph can blend in.
    fn supported_depths(&self) -> DepthMask {
        DepthMask::SOFTWARE
    }

    /// One-time setup, run when the morph is realized.
    fn init(&mut self) -> BinResult<()> {
        Ok(())
    }

    /// Write the blend of `a` (outgoing) and `b` (incoming) at `progress` in `[0, 1]` into `dest`.
    fn apply(
        &mut self,
        progress: f32,
        audio: &AudioFrame,
        dest: &mut VideoSurface,
        a: &VideoSurface,
        b: &VideoSurface,
    ) -> BinResult<()>;
}

/// Audio source feeding the actors.
pub trait InputPlugin {
    /// One-time setup, run when the input is realized.
    fn init(&mut self) -> BinResult<()> {
        Ok(())
    }

    /// Refill `audio` with the newest block. Returns `false` when nothing new was available,
    /// in which case `audio` must be left untouched.
    fn upload(&mut self, audio: &mut AudioFrame) -> bool;
}
