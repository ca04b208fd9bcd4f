use super::*;
use crate::video::depth::Depth;

fn audio_at(level: f32, len: usize) -> AudioFrame {
    let mut audio = AudioFrame::default();
    audio.set_stereo(audio.sample_rate(), vec![level; len], vec![level; len]);
    audio
}

#[test]
fn oscilloscope_draws_silence_as_a_centre_line() {
    let mut actor = Oscilloscope::default();
    let mut s = VideoSurface::allocated(16, 9, Depth::Rgb24);
    actor.render(&mut s, &audio_at(0.0, 512));

    for x in 0..16 {
        assert_eq!(s.rgb_at(x, 4, None), Some([80, 220, 255]));
        assert_eq!(s.rgb_at(x, 0, None), Some(BACKGROUND));
        assert_eq!(s.rgb_at(x, 8, None), Some(BACKGROUND));
    }
}

#[test]
fn oscilloscope_trace_moves_up_for_positive_samples() {
    let mut actor = Oscilloscope::new([255, 255, 255]);
    let mut s = VideoSurface::allocated(4, 21, Depth::Rgb32);
    actor.render(&mut s, &audio_at(1.0, 64));
    assert_eq!(s.rgb_at(2, 1, None), Some([255, 255, 255]));
    assert_eq!(s.rgb_at(2, 10, None), Some(BACKGROUND));
}

#[test]
fn bars_rise_with_level() {
    let mut actor = Bars::new(16);
    let mut s = VideoSurface::allocated(32, 10, Depth::Rgb24);

    actor.render(&mut s, &audio_at(0.5, 512));
    assert_eq!(s.rgb_at(0, 9, None), Some([255, 180, 60]));
    assert_eq!(s.rgb_at(1, 3, None), Some([255, 180, 60]));
    assert_eq!(s.rgb_at(0, 2, None), Some(BACKGROUND));

    actor.render(&mut s, &audio_at(0.0, 512));
    assert_eq!(s.rgb_at(0, 9, None), Some(BACKGROUND));
}

#[test]
fn flat_brightness_follows_loudness() {
    let mut actor = Flat::default();
    let mut s = VideoSurface::allocated(2, 2, Depth::Rgb24);

    actor.render(&mut s, &audio_at(0.0, 64));
    assert_eq!(s.rgb_at(1, 1, None), Some([51, 13, 26]));

    actor.render(&mut s, &audio_at(0.9, 64));
    assert_eq!(s.rgb_at(1, 1, None), Some([255, 64, 128]));
}

#[test]
fn software_actors_cover_every_software_depth() {
    let audio = audio_at(0.3, 128);
    let mut actors: Vec<Box<dyn ActorPlugin>> = vec![
        Box::new(Oscilloscope::default()),
        Box::new(Bars::default()),
        Box::new(Flat::default()),
    ];
    for actor in &mut actors {
        assert_eq!(actor.supported_depths(), DepthMask::SOFTWARE);
        assert!(actor.palette().is_some());
        for depth in Depth::SOFTWARE {
            let mut s = VideoSurface::allocated(7, 5, depth);
            actor.render(&mut s, &audio);
            assert!(s.pixels().unwrap().iter().any(|b| *b != 0), "{depth}");
        }
    }
}

#[test]
fn gpu_stand_in_only_counts_frames() {
    let mut actor = GpuStandIn::default();
    assert_eq!(actor.supported_depths(), DepthMask::GPU_SURFACE);
    let mut s = VideoSurface::with_dimensions(4, 4, Depth::GpuSurface);
    actor.render(&mut s, &AudioFrame::default());
    actor.render(&mut s, &AudioFrame::default());
    assert_eq!(actor.frames(), 2);
    assert!(!s.has_pixels());
}
