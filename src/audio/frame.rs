/// Sample rate assumed by the built-in inputs.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Number of samples per channel the built-in inputs upload per frame.
pub const FRAME_SAMPLES: usize = 512;

/// One block of stereo PCM handed to actors and morphs each frame.
///
/// Samples are `f32` in `[-1, 1]`, one `Vec` per channel, always of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFrame {
    sample_rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl AudioFrame {
    /// An empty frame at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            left: Vec::new(),
            right: Vec::new(),
        }
    }

    /// A frame of `len` zero samples per channel.
    pub fn silent(sample_rate: u32, len: usize) -> Self {
        Self {
            sample_rate,
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the frame holds no samples.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left channel.
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel.
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Replace the contents. The longer channel is truncated so both stay the same length.
    pub fn set_stereo(&mut self, sample_rate: u32, mut left: Vec<f32>, mut right: Vec<f32>) {
        let len = left.len().min(right.len());
        left.truncate(len);
        right.truncate(len);
        self.sample_rate = sample_rate;
        self.left = left;
        self.right = right;
    }

    /// Channel average at sample `i`, or silence past the end.
    pub fn mono_at(&self, i: usize) -> f32 {
        match (self.left.get(i), self.right.get(i)) {
            (Some(l), Some(r)) => 0.5 * (l + r),
            _ => 0.0,
        }
    }

    /// Root-mean-square level of the mono mix, `0.0` for an empty frame.
    pub fn rms(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let sum: f32 = (0..self.len()).map(|i| self.mono_at(i).powi(2)).sum();
        (sum / self.len() as f32).sqrt()
    }

    /// RMS level of `bands` equal slices of the mono mix.
    ///
    /// Always returns `bands` values; slices past the end of a short frame read as silence.
    pub fn band_levels(&self, bands: usize) -> Vec<f32> {
        if bands == 0 {
            return Vec::new();
        }
        let per_band = self.len().div_ceil(bands).max(1);
        (0..bands)
            .map(|b| {
                let start = b * per_band;
                let end = (start + per_band).min(self.len());
                if start >= end {
                    return 0.0;
                }
                let sum: f32 = (start..end).map(|i| self.mono_at(i).powi(2)).sum();
                (sum / (end - start) as f32).sqrt()
            })
            .collect()
    }
}

impl Default for AudioFrame {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/frame.rs"]
mod tests;
