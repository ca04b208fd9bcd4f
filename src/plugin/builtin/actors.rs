use crate::{
    audio::frame::AudioFrame,
    plugin::ActorPlugin,
    video::{depth::DepthMask, palette::Palette, surface::VideoSurface},
};

const BACKGROUND: [u8; 3] = [8, 10, 18];

/// Draws the mono mix as a waveform trace across the surface.
#[derive(Debug)]
pub struct Oscilloscope {
    color: [u8; 3],
    palette: Palette,
}

impl Oscilloscope {
    /// Trace in `color` over a dark background.
    pub fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            palette: Palette::gradient(BACKGROUND, color),
        }
    }
}

impl Default for Oscilloscope {
    fn default() -> Self {
        Self::new([80, 220, 255])
    }
}

impl ActorPlugin for Oscilloscope {
    fn supported_depths(&self) -> DepthMask {
        DepthMask::SOFTWARE
    }

    fn render(&mut self, target: &mut VideoSurface, audio: &AudioFrame) {
        target.fill_rgb(BACKGROUND);
        let (w, h) = (target.width(), target.height());
        if w == 0 || h == 0 {
            return;
        }

        let mid = (h as f32 - 1.0) / 2.0;
        let row_for = |x: u32| -> u32 {
            let i = (x as usize * audio.len()) / w as usize;
            let v = audio.mono_at(i).clamp(-1.0, 1.0);
            (mid - v * mid * 0.9).round().clamp(0.0, h as f32 - 1.0) as u32
        };

        let mut prev = row_for(0);
        for x in 0..w {
            let y = row_for(x);
            let (lo, hi) = if prev <= y { (prev, y) } else { (y, prev) };
            for yy in lo..=hi {
                target.put_rgb(x, yy, self.color);
            }
            prev = y;
        }
    }

    fn palette(&self) -> Option<&Palette> {
        Some(&self.palette)
    }
}

/// Vertical level bars, one per equal slice of the audio frame.
#[derive(Debug)]
pub struct Bars {
    bands: usize,
    palette: Palette,
}

impl Bars {
    /// `bands` bars across the surface.
    pub fn new(bands: usize) -> Self {
        Self {
            bands: bands.max(1),
            palette: Palette::gradient(BACKGROUND, [255, 180, 60]),
        }
    }
}

impl Default for Bars {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ActorPlugin for Bars {
    fn supported_depths(&self) -> DepthMask {
        DepthMask::SOFTWARE
    }

    fn render(&mut self, target: &mut VideoSurface, audio: &AudioFrame) {
        target.fill_rgb(BACKGROUND);
        let (w, h) = (target.width(), target.height());
        if w == 0 || h == 0 {
            return;
        }

        let levels = audio.band_levels(self.bands);
        for (band, level) in levels.iter().enumerate() {
            let x0 = (band * w as usize / self.bands) as u32;
            let x1 = ((band + 1) * w as usize / self.bands) as u32;
            // rms of a full-scale sine is ~0.707; scale so that reads as a full bar
            let bar = ((level * 1.4).clamp(0.0, 1.0) * h as f32).round() as u32;
            let shade = (band * 255 / self.bands) as u8;
            let color = [255, 180u8.saturating_sub(shade / 3), 60u8.saturating_add(shade / 2)];
            let gap = u32::from(x1 - x0 > 2);
            for x in x0..x1 - gap {
                for y in h.saturating_sub(bar)..h {
                    target.put_rgb(x, y, color);
                }
            }
        }
    }

    fn palette(&self) -> Option<&Palette> {
        Some(&self.palette)
    }
}

/// Whole-surface fill whose brightness follows the frame's loudness.
#[derive(Debug)]
pub struct Flat {
    color: [u8; 3],
    palette: Palette,
}

impl Flat {
    /// Fill with `color` at full loudness.
    pub fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            palette: Palette::gradient([0, 0, 0], color),
        }
    }
}

impl Default for Flat {
    fn default() -> Self {
        Self::new([255, 64, 128])
    }
}

impl ActorPlugin for Flat {
    fn supported_depths(&self) -> DepthMask {
        DepthMask::SOFTWARE
    }

    fn render(&mut self, target: &mut VideoSurface, audio: &AudioFrame) {
        let gain = 0.2 + 0.8 * (audio.rms() * 2.0).min(1.0);
        let rgb = self.color.map(|c| (f32::from(c) * gain).round() as u8);
        target.fill_rgb(rgb);
    }

    fn palette(&self) -> Option<&Palette> {
        Some(&self.palette)
    }
}

/// Hardware-surface actor. Has no software storage to draw into; it only counts frames.
#[derive(Debug, Default)]
pub struct GpuStandIn {
    frames: u64,
}

impl GpuStandIn {
    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl ActorPlugin for GpuStandIn {
    fn supported_depths(&self) -> DepthMask {
        DepthMask::GPU_SURFACE
    }

    fn render(&mut self, _target: &mut VideoSurface, _audio: &AudioFrame) {
        self.frames += 1;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/plugin/builtin_actors.rs"]
mod tests;
