use std::cell::Cell;

use super::*;
use crate::{
    foundation::time::ManualClock,
    plugin::probe::{Probe, ProbeActor, ProbeMorph},
    video::surface::VideoSurface,
};

fn morph_with(clock: &ManualClock) -> (Morph, Rc<Probe>, Rc<Cell<f32>>) {
    let probe = Probe::new();
    let last = Rc::new(Cell::new(-1.0));
    let plugin = ProbeMorph {
        depths: DepthMask::SOFTWARE,
        probe: probe.clone(),
        last_progress: last.clone(),
    };
    let m = Morph::new("probe", Box::new(plugin), Rc::new(clock.clone()));
    (m, probe, last)
}

fn actor_on(depth: Depth, color: [u8; 3], palette: Option<Palette>) -> Actor {
    let mut plugin = ProbeActor::new(DepthMask::SOFTWARE, color, Probe::new());
    plugin.palette = palette;
    let mut a = Actor::new("a", Box::new(plugin));
    let mut s = VideoSurface::allocated(2, 2, depth);
    s.fill_rgb(color);
    a.bind_surface(s.shared());
    a
}

#[test]
fn time_mode_tracks_clock_from_first_run() {
    let clock = ManualClock::new();
    clock.set(Duration::from_secs(100));
    let (mut m, _probe, last) = morph_with(&clock);
    m.set_duration(Duration::from_secs(2));
    m.set_surface(VideoSurface::allocated(2, 2, Depth::Rgb24).shared());
    let a = actor_on(Depth::Rgb24, [255, 0, 0], None);
    let b = actor_on(Depth::Rgb24, [0, 0, 255], None);
    let audio = AudioFrame::default();

    m.run(&audio, &a, &b).unwrap();
    assert_eq!(last.get(), 0.0);
    clock.advance(Duration::from_secs(1));
    m.run(&audio, &a, &b).unwrap();
    assert!((m.progress() - 0.5).abs() < 1e-6);
    assert!(!m.is_done());

    clock.advance(Duration::from_secs(5));
    m.run(&audio, &a, &b).unwrap();
    assert_eq!(m.progress(), 1.0);
    assert!(m.is_done());
    assert_eq!(
        m.surface().unwrap().borrow().rgb_at(0, 0, None),
        Some([0, 0, 255])
    );
}

#[test]
fn zero_duration_completes_on_first_frame() {
    let clock = ManualClock::new();
    let (mut m, _probe, _last) = morph_with(&clock);
    m.set_duration(Duration::ZERO);
    m.set_surface(VideoSurface::allocated(2, 2, Depth::Rgb24).shared());
    let a = actor_on(Depth::Rgb24, [1, 1, 1], None);
    let b = actor_on(Depth::Rgb24, [2, 2, 2], None);
    m.run(&AudioFrame::default(), &a, &b).unwrap();
    assert!(m.is_done());
}

#[test]
fn steps_and_set_modes() {
    let clock = ManualClock::new();
    let (mut m, _probe, _last) = morph_with(&clock);
    m.set_surface(VideoSurface::allocated(2, 2, Depth::Rgb24).shared());
    let a = actor_on(Depth::Rgb24, [1, 1, 1], None);
    let b = actor_on(Depth::Rgb24, [2, 2, 2], None);
    let audio = AudioFrame::default();

    m.set_mode(MorphMode::Steps(4));
    m.run(&audio, &a, &b).unwrap();
    m.run(&audio, &a, &b).unwrap();
    assert!((m.progress() - 0.5).abs() < 1e-6);

    m.set_mode(MorphMode::Set);
    m.set_progress(0.25);
    m.run(&audio, &a, &b).unwrap();
    assert_eq!(m.progress(), 0.25);
    m.set_progress(3.0);
    assert!(m.is_done());
}

#[test]
fn run_requires_target_and_distinct_surfaces() {
    let clock = ManualClock::new();
    let (mut m, probe, _last) = morph_with(&clock);
    let a = actor_on(Depth::Rgb24, [1, 1, 1], None);
    let b = actor_on(Depth::Rgb24, [2, 2, 2], None);
    let audio = AudioFrame::default();

    assert!(matches!(
        m.run(&audio, &a, &b),
        Err(BinError::MissingSurface(_))
    ));

    m.set_surface(a.bound_surface().unwrap().clone());
    assert!(matches!(
        m.run(&audio, &a, &b),
        Err(BinError::Consistency(_))
    ));
    assert_eq!(probe.renders.get(), 0);
}

#[test]
fn indexed8_target_blends_palettes() {
    let clock = ManualClock::new();
    let (mut m, _probe, _last) = morph_with(&clock);
    m.set_mode(MorphMode::Set);
    m.set_progress(0.5);
    m.set_surface(VideoSurface::allocated(2, 2, Depth::Indexed8).shared());
    let pa = Palette::from_colors(&[[0, 0, 0]]);
    let pb = Palette::from_colors(&[[200, 100, 50]]);
    let a = actor_on(Depth::Indexed8, [0, 0, 0], Some(pa));
    let b = actor_on(Depth::Indexed8, [0, 0, 0], Some(pb));

    assert!(m.palette().is_none());
    m.run(&AudioFrame::default(), &a, &b).unwrap();
    assert_eq!(m.palette().unwrap().color(0), [100, 50, 25]);
}
