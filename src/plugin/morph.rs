use std::{fmt, rc::Rc, time::Duration};

use crate::{
    audio::frame::AudioFrame,
    foundation::{
        error::{BinError, BinResult},
        time::Clock,
    },
    plugin::{MorphPlugin, actor::Actor},
    video::{
        depth::{Depth, DepthMask},
        palette::Palette,
        surface::SharedSurface,
    },
};

/// How a morph's progress advances between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphMode {
    /// Progress only changes through [`Morph::set_progress`].
    Set,
    /// Progress grows by `1 / n` per frame.
    Steps(u32),
    /// Progress is elapsed time over [`Morph::duration`], measured from the first frame.
    Time,
}

/// A [`MorphPlugin`] plus its progress bookkeeping and target surface.
pub struct Morph {
    name: String,
    plugin: Box<dyn MorphPlugin>,
    clock: Rc<dyn Clock>,
    surface: Option<SharedSurface>,
    mode: MorphMode,
    duration: Duration,
    progress: f32,
    started_at: Option<Duration>,
    realized: bool,
    palette: Option<Palette>,
}

impl Morph {
    /// Wrap `plugin`, registered under `name`. Time-based progress reads `clock`.
    pub fn new(name: impl Into<String>, plugin: Box<dyn MorphPlugin>, clock: Rc<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            plugin,
            clock,
            surface: None,
            mode: MorphMode::Time,
            duration: Duration::from_secs(4),
            progress: 0.0,
            started_at: None,
            realized: false,
            palette: None,
        }
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depths the plugin can blend in.
    pub fn supported_depths(&self) -> DepthMask {
        self.plugin.supported_depths()
    }

    /// Surface the blend is written into.
    pub fn set_surface(&mut self, surface: SharedSurface) {
        self.surface = Some(surface);
    }

    /// Current blend target.
    pub fn surface(&self) -> Option<&SharedSurface> {
        self.surface.as_ref()
    }

    /// Change how progress advances.
    pub fn set_mode(&mut self, mode: MorphMode) {
        self.mode = mode;
    }

    /// Current progress mode.
    pub fn mode(&self) -> MorphMode {
        self.mode
    }

    /// Length of a time-based morph.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Length of a time-based morph.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Jump to `progress` (clamped to `[0, 1]`) and restart the time base.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
        self.started_at = None;
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the morph has reached full progress.
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    /// Run the plugin's one-time setup if it has not run yet.
    pub fn realize(&mut self) -> BinResult<()> {
        if self.realized {
            return Ok(());
        }
        self.plugin.init().map_err(|e| {
            BinError::plugin(format!("morph '{}' failed to initialize: {e}", self.name))
        })?;
        self.realized = true;
        Ok(())
    }

    /// Whether [`Morph::realize`] has succeeded.
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Palette blended from both actors' palettes, set while morphing an `indexed8` target.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Advance progress and blend `a` (outgoing) with `b` (incoming) into the target surface.
    pub fn run(&mut self, audio: &AudioFrame, a: &Actor, b: &Actor) -> BinResult<()> {
        let dest = self
            .surface
            .clone()
            .ok_or_else(|| BinError::missing_surface(format!("morph '{}' has no target", self.name)))?;
        let sa = a.bound_surface().ok_or_else(|| {
            BinError::missing_surface(format!("actor '{}' has no bound surface", a.name()))
        })?;
        let sb = b.bound_surface().ok_or_else(|| {
            BinError::missing_surface(format!("actor '{}' has no bound surface", b.name()))
        })?;
        if Rc::ptr_eq(&dest, sa) || Rc::ptr_eq(&dest, sb) || Rc::ptr_eq(sa, sb) {
            return Err(BinError::consistency(format!(
                "morph '{}' sources alias each other or the target",
                self.name
            )));
        }

        self.advance();
        let progress = self.progress;

        let mut d = dest.borrow_mut();
        self.palette = match (d.depth(), a.palette(), b.palette()) {
            (Depth::Indexed8, Some(pa), Some(pb)) => Some(Palette::blend(pa, pb, progress)),
            _ => None,
        };
        self.plugin
            .apply(progress, audio, &mut d, &sa.borrow(), &sb.borrow())?;

        if self.is_done() {
            tracing::debug!(morph = %self.name, "morph complete");
        }
        Ok(())
    }

    fn advance(&mut self) {
        match self.mode {
            MorphMode::Set => {}
            MorphMode::Steps(n) => {
                self.progress = (self.progress + 1.0 / n.max(1) as f32).min(1.0);
            }
            MorphMode::Time => {
                let now = self.clock.now();
                let start = *self.started_at.get_or_insert(now);
                let elapsed = now.saturating_sub(start);
                self.progress = if self.duration.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
                };
            }
        }
    }
}

impl fmt::Debug for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morph")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("duration", &self.duration)
            .field("progress", &self.progress)
            .field("realized", &self.realized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/morph.rs"]
mod tests;
