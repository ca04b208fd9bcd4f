use crate::{
    audio::frame::AudioFrame,
    foundation::error::BinResult,
    plugin::MorphPlugin,
    video::{
        blend::{WipeDir, crossfade_into, wipe_into},
        surface::VideoSurface,
    },
};

/// Per-pixel crossfade.
#[derive(Debug, Default)]
pub struct AlphaBlend;

impl MorphPlugin for AlphaBlend {
    fn apply(
        &mut self,
        progress: f32,
        _audio: &AudioFrame,
        dest: &mut VideoSurface,
        a: &VideoSurface,
        b: &VideoSurface,
    ) -> BinResult<()> {
        crossfade_into(dest, a, b, progress)
    }
}

/// Hard-edged wipe.
#[derive(Debug)]
pub struct Wipe {
    dir: WipeDir,
}

impl Wipe {
    /// Wipe travelling in `dir`.
    pub fn new(dir: WipeDir) -> Self {
        Self { dir }
    }
}

impl Default for Wipe {
    fn default() -> Self {
        Self::new(WipeDir::LeftToRight)
    }
}

impl MorphPlugin for Wipe {
    fn apply(
        &mut self,
        progress: f32,
        _audio: &AudioFrame,
        dest: &mut VideoSurface,
        a: &VideoSurface,
        b: &VideoSurface,
    ) -> BinResult<()> {
        wipe_into(dest, a, b, progress, self.dir)
    }
}
