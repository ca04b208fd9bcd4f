//! Counting plugins for unit tests.

use std::{cell::Cell, rc::Rc};

use crate::{
    audio::frame::AudioFrame,
    foundation::error::BinResult,
    plugin::{
        ActorPlugin, InputPlugin, MorphPlugin, actor::Actor, input::Input,
        registry::PluginRegistry,
    },
    video::{depth::DepthMask, palette::Palette, surface::VideoSurface},
};

#[derive(Debug, Default)]
pub(crate) struct Probe {
    pub(crate) inits: Cell<u32>,
    pub(crate) renders: Cell<u32>,
    pub(crate) resizes: Cell<u32>,
    pub(crate) dropped: Cell<bool>,
}

impl Probe {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

fn bump(c: &Cell<u32>) {
    c.set(c.get() + 1);
}

pub(crate) struct ProbeActor {
    pub(crate) depths: DepthMask,
    pub(crate) color: [u8; 3],
    pub(crate) palette: Option<Palette>,
    pub(crate) probe: Rc<Probe>,
}

impl ProbeActor {
    pub(crate) fn new(depths: DepthMask, color: [u8; 3], probe: Rc<Probe>) -> Self {
        Self {
            depths,
            color,
            palette: None,
            probe,
        }
    }
}

impl ActorPlugin for ProbeActor {
    fn supported_depths(&self) -> DepthMask {
        self.depths
    }

    fn init(&mut self) -> BinResult<()> {
        bump(&self.probe.inits);
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {
        bump(&self.probe.resizes);
    }

    fn render(&mut self, target: &mut VideoSurface, _audio: &AudioFrame) {
        bump(&self.probe.renders);
        target.fill_rgb(self.color);
    }

    fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }
}

impl Drop for ProbeActor {
    fn drop(&mut self) {
        self.probe.dropped.set(true);
    }
}

/// Morph that records its calls and copies `b` once progress passes one half.
pub(crate) struct ProbeMorph {
    pub(crate) depths: DepthMask,
    pub(crate) probe: Rc<Probe>,
    pub(crate) last_progress: Rc<Cell<f32>>,
}

impl MorphPlugin for ProbeMorph {
    fn supported_depths(&self) -> DepthMask {
        self.depths
    }

    fn init(&mut self) -> BinResult<()> {
        bump(&self.probe.inits);
        Ok(())
    }

    fn apply(
        &mut self,
        progress: f32,
        _audio: &AudioFrame,
        dest: &mut VideoSurface,
        a: &VideoSurface,
        b: &VideoSurface,
    ) -> BinResult<()> {
        bump(&self.probe.renders);
        self.last_progress.set(progress);
        dest.copy_pixels_from(if progress < 0.5 { a } else { b });
        Ok(())
    }
}

impl Drop for ProbeMorph {
    fn drop(&mut self) {
        self.probe.dropped.set(true);
    }
}

pub(crate) struct ProbeInput {
    pub(crate) probe: Rc<Probe>,
    pub(crate) level: f32,
}

impl InputPlugin for ProbeInput {
    fn init(&mut self) -> BinResult<()> {
        bump(&self.probe.inits);
        Ok(())
    }

    fn upload(&mut self, audio: &mut AudioFrame) -> bool {
        bump(&self.probe.renders);
        audio.set_stereo(audio.sample_rate(), vec![self.level; 16], vec![self.level; 16]);
        true
    }
}

pub(crate) fn probe_actor(name: &str, depths: DepthMask, color: [u8; 3]) -> (Actor, Rc<Probe>) {
    let probe = Probe::new();
    let plugin = ProbeActor::new(depths, color, probe.clone());
    (Actor::new(name, Box::new(plugin)), probe)
}

pub(crate) fn probe_input() -> (Input, Rc<Probe>) {
    let probe = Probe::new();
    let plugin = ProbeInput {
        probe: probe.clone(),
        level: 0.5,
    };
    (Input::new("probe", Box::new(plugin)), probe)
}

/// Registry holding the built-ins plus a `probe` morph that reports into the returned handles.
pub(crate) fn registry_with_probe_morph(
    depths: DepthMask,
) -> (PluginRegistry, Rc<Probe>, Rc<Cell<f32>>) {
    let probe = Probe::new();
    let last = Rc::new(Cell::new(-1.0));
    let mut registry = PluginRegistry::with_builtins();
    let (p, l) = (probe.clone(), last.clone());
    registry.register_morph("probe", move || {
        Box::new(ProbeMorph {
            depths,
            probe: p.clone(),
            last_progress: l.clone(),
        })
    });
    (registry, probe, last)
}
