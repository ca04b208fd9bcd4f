use std::f32::consts::TAU;

use crate::{
    audio::frame::{AudioFrame, DEFAULT_SAMPLE_RATE, FRAME_SAMPLES},
    plugin::InputPlugin,
};

/// Uploads one block of silence per frame.
#[derive(Debug, Default)]
pub struct Silence;

impl InputPlugin for Silence {
    fn upload(&mut self, audio: &mut AudioFrame) -> bool {
        *audio = AudioFrame::silent(DEFAULT_SAMPLE_RATE, FRAME_SAMPLES);
        true
    }
}

/// Continuous sine tone; the right channel lags the left by a quarter period.
#[derive(Debug)]
pub struct Sine {
    freq_hz: f32,
    amplitude: f32,
    phase: f32,
}

impl Sine {
    /// Tone at `freq_hz` with peak `amplitude` (clamped to `[0, 1]`).
    pub fn new(freq_hz: f32, amplitude: f32) -> Self {
        Self {
            freq_hz,
            amplitude: amplitude.clamp(0.0, 1.0),
            phase: 0.0,
        }
    }
}

impl Default for Sine {
    fn default() -> Self {
        Self::new(220.0, 0.8)
    }
}

impl InputPlugin for Sine {
    fn upload(&mut self, audio: &mut AudioFrame) -> bool {
        let step = TAU * self.freq_hz / DEFAULT_SAMPLE_RATE as f32;
        let mut left = Vec::with_capacity(FRAME_SAMPLES);
        let mut right = Vec::with_capacity(FRAME_SAMPLES);
        for _ in 0..FRAME_SAMPLES {
            left.push(self.amplitude * self.phase.sin());
            right.push(self.amplitude * (self.phase - TAU / 4.0).sin());
            self.phase = (self.phase + step) % TAU;
        }
        audio.set_stereo(DEFAULT_SAMPLE_RATE, left, right);
        true
    }
}
