use std::fmt;

use crate::{
    audio::frame::AudioFrame,
    foundation::error::{BinError, BinResult},
    plugin::ActorPlugin,
    video::{
        depth::{Depth, DepthMask},
        palette::Palette,
        surface::SharedSurface,
    },
};

/// An [`ActorPlugin`] plus the state the bin needs to drive it.
pub struct Actor {
    name: String,
    plugin: Box<dyn ActorPlugin>,
    surface: Option<SharedSurface>,
    realized: bool,
}

impl Actor {
    /// Wrap `plugin`, registered under `name`.
    pub fn new(name: impl Into<String>, plugin: Box<dyn ActorPlugin>) -> Self {
        Self {
            name: name.into(),
            plugin,
            surface: None,
            realized: false,
        }
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depths the plugin can render into.
    pub fn supported_depths(&self) -> DepthMask {
        self.plugin.supported_depths()
    }

    /// Run the plugin's one-time setup if it has not run yet.
    pub fn realize(&mut self) -> BinResult<()> {
        if self.realized {
            return Ok(());
        }
        self.plugin.init().map_err(|e| {
            BinError::plugin(format!("actor '{}' failed to initialize: {e}", self.name))
        })?;
        self.realized = true;
        tracing::debug!(actor = %self.name, "actor realized");
        Ok(())
    }

    /// Whether [`Actor::realize`] has succeeded.
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Make `surface` the render target.
    pub fn bind_surface(&mut self, surface: SharedSurface) {
        self.surface = Some(surface);
    }

    /// Current render target.
    pub fn bound_surface(&self) -> Option<&SharedSurface> {
        self.surface.as_ref()
    }

    /// Depth of the bound surface, `None` when nothing is bound.
    pub fn surface_depth(&self) -> Option<Depth> {
        self.surface.as_ref().map(|s| s.borrow().depth())
    }

    /// Tell the actor which depth it must render at, and (unless suppressed) the target size.
    ///
    /// `forced` of [`Depth::None`] keeps the surface's current depth. When the depth changes the
    /// pitch is reset to `width * bpp` if `allow_pitch_override` is set, and storage is resized
    /// to match. Returns `false` when there is no bound surface or the plugin cannot render at
    /// the requested depth; the surface is left untouched in that case.
    pub fn negotiate(
        &mut self,
        forced: Depth,
        suppress_event: bool,
        allow_pitch_override: bool,
    ) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            tracing::warn!(actor = %self.name, "negotiate without a bound surface");
            return false;
        };
        let supported = self.plugin.supported_depths();

        let (width, height) = {
            let mut s = surface.borrow_mut();
            let target = if forced == Depth::None {
                s.depth()
            } else {
                forced
            };
            if !supported.supports(target) {
                tracing::debug!(
                    actor = %self.name,
                    %target,
                    ?supported,
                    "actor cannot render at negotiated depth"
                );
                return false;
            }

            if target.is_gpu() {
                s.set_depth(target);
                s.free();
            } else {
                if s.depth() != target {
                    s.set_depth(target);
                    if allow_pitch_override {
                        let pitch = s.width() as usize * target.bytes_per_pixel();
                        s.set_pitch(pitch);
                    }
                }
                let stale = s.pixels().map(<[u8]>::len) != Some(s.size_bytes());
                if stale {
                    s.allocate();
                }
            }
            (s.width(), s.height())
        };

        if !suppress_event {
            self.plugin.resize(width, height);
        }
        tracing::trace!(actor = %self.name, %forced, suppress_event, "actor negotiated");
        true
    }

    /// Render one frame into the bound surface.
    ///
    /// A surface whose depth the plugin does not support is skipped rather than drawn into.
    pub fn run(&mut self, audio: &AudioFrame) -> BinResult<()> {
        let Some(surface) = self.surface.as_ref() else {
            return Err(BinError::missing_surface(format!(
                "actor '{}' has no bound surface",
                self.name
            )));
        };
        let mut s = surface.borrow_mut();
        if !self.plugin.supported_depths().supports(s.depth()) {
            tracing::trace!(actor = %self.name, depth = %s.depth(), "skipping unsupported depth");
            return Ok(());
        }
        self.plugin.render(&mut s, audio);
        Ok(())
    }

    /// Palette for `indexed8` output.
    pub fn palette(&self) -> Option<&Palette> {
        self.plugin.palette()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("realized", &self.realized)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/actor.rs"]
mod tests;
