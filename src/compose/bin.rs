use std::{fmt, rc::Rc, time::Duration};

use crate::{
    compose::opts::BinOpts,
    foundation::{
        error::{BinError, BinResult},
        time::{Clock, MonotonicClock},
    },
    plugin::{actor::Actor, input::Input, morph::Morph, registry::PluginRegistry},
    video::{
        depth::{Depth, DepthMask, DepthPreference},
        negotiate::choose,
        palette::Palette,
        surface::SharedSurface,
    },
};

/// What a call to [`Bin::run`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The active actor drew into the destination.
    Rendered,
    /// The morph wrote a blend of both actors into the destination.
    Blended {
        /// The morph reached full progress and the transition was finalized.
        finished: bool,
    },
    /// A pending transition was finalized without producing a displayable frame.
    ///
    /// The depth may have moved: check [`Bin::depth_changed`] and call [`Bin::sync`] before the
    /// next frame.
    Switched,
}

/// Composition context: one active actor, one input, and at most one transition in flight.
///
/// The bin owns its actors, input and morph. The destination surface is shared with the caller,
/// who must call [`Bin::sync`] after changing its attributes and before the next [`Bin::run`].
pub struct Bin {
    pub(super) registry: PluginRegistry,
    pub(super) clock: Rc<dyn Clock>,

    pub(super) actor: Option<Actor>,
    pub(super) pending: Option<Actor>,
    pub(super) input: Option<Input>,

    pub(super) morph_name: Option<String>,
    pub(super) morph: Option<Morph>,
    pub(super) use_morph: bool,
    pub(super) morph_duration: Duration,

    pub(super) preferred: DepthPreference,
    pub(super) supported: DepthMask,
    pub(super) depth: Depth,
    pub(super) depth_previous: Depth,
    pub(super) depth_changed: bool,
    pub(super) leaving_gpu: bool,
    pub(super) forced_active: Depth,
    pub(super) forced_pending: Depth,

    pub(super) main: Option<SharedSurface>,
    pub(super) private: Option<SharedSurface>,
    pub(super) pending_surface: Option<SharedSurface>,
}

impl Bin {
    /// Empty bin resolving plugin names through `registry`, configured with [`BinOpts::default`].
    pub fn new(registry: PluginRegistry) -> Self {
        let opts = BinOpts::default();
        Self {
            registry,
            clock: Rc::new(MonotonicClock::new()),
            actor: None,
            pending: None,
            input: None,
            morph_name: None,
            morph: None,
            use_morph: opts.use_morph,
            morph_duration: opts.morph_duration(),
            preferred: opts.preferred_depth,
            supported: opts.supported_depths,
            depth: Depth::None,
            depth_previous: Depth::None,
            depth_changed: false,
            leaving_gpu: false,
            forced_active: Depth::None,
            forced_pending: Depth::None,
            main: None,
            private: None,
            pending_surface: None,
        }
    }

    /// Empty bin configured from validated `opts`.
    pub fn with_opts(registry: PluginRegistry, opts: &BinOpts) -> BinResult<Self> {
        opts.validate()?;
        let mut bin = Self::new(registry);
        bin.preferred = opts.preferred_depth;
        bin.supported = opts.supported_depths;
        bin.use_morph = opts.use_morph;
        bin.morph_duration = opts.morph_duration();
        if let Some(name) = &opts.morph {
            if !bin.registry.morph_names().any(|n| n == name) {
                return Err(BinError::plugin(format!("unknown morph '{name}'")));
            }
            bin.morph_name = Some(name.clone());
        }
        Ok(bin)
    }

    /// Replace the time source used by morphs created from now on.
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Plugin factory used for by-name lookups.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Realize the active actor, the input and the active morph, where present.
    pub fn realize(&mut self) -> BinResult<()> {
        if let Some(actor) = self.actor.as_mut() {
            actor.realize()?;
        }
        if let Some(input) = self.input.as_mut() {
            input.realize()?;
        }
        if let Some(morph) = self.morph.as_mut() {
            morph.realize()?;
        }
        Ok(())
    }

    /// Bind the caller's destination surface.
    pub fn set_surface(&mut self, surface: SharedSurface) {
        self.main = Some(surface);
    }

    /// Destination surface.
    pub fn surface(&self) -> Option<&SharedSurface> {
        self.main.as_ref()
    }

    /// Depths the destination can display.
    pub fn set_supported_depths(&mut self, mask: DepthMask) {
        self.supported = mask;
    }

    /// Depths the destination can display.
    pub fn supported_depths(&self) -> DepthMask {
        self.supported
    }

    /// Extreme to pick when an actor supports several depths.
    pub fn set_preferred_depth(&mut self, preference: DepthPreference) {
        self.preferred = preference;
    }

    /// Extreme to pick when an actor supports several depths.
    pub fn preferred_depth(&self) -> DepthPreference {
        self.preferred
    }

    /// Blend transitions instead of hard-cutting. Takes effect from the next switch.
    pub fn set_use_morph(&mut self, use_morph: bool) {
        self.use_morph = use_morph;
    }

    /// Whether transitions blend.
    pub fn uses_morph(&self) -> bool {
        self.use_morph
    }

    /// Length of blended transitions started from now on.
    pub fn set_morph_duration(&mut self, duration: Duration) {
        self.morph_duration = duration;
    }

    /// Length of blended transitions.
    pub fn morph_duration(&self) -> Duration {
        self.morph_duration
    }

    /// Select the morph plugin for future blended transitions.
    ///
    /// Returns `Ok(false)` and leaves the bin unchanged when the morph cannot blend at the
    /// destination's current depth. Unknown names are an error.
    pub fn set_morph(&mut self, name: &str) -> BinResult<bool> {
        let morph = self.registry.create_morph(name, Rc::clone(&self.clock))?;
        let depth = self
            .main
            .as_ref()
            .map_or(self.depth, |s| s.borrow().depth());
        if depth != Depth::None && !morph.supported_depths().supports(depth) {
            tracing::debug!(morph = name, %depth, "morph cannot blend at destination depth");
            return Ok(false);
        }
        self.morph_name = Some(name.to_owned());
        Ok(true)
    }

    /// Name of the morph plugin used for blended transitions.
    pub fn morph_name(&self) -> Option<&str> {
        self.morph_name.as_deref()
    }

    /// Take ownership of `actor` and `input` and settle on a depth for the actor.
    ///
    /// Anything previously connected is released, including a transition in flight.
    #[tracing::instrument(skip_all, fields(actor = actor.name(), input = input.name()))]
    pub fn connect(&mut self, actor: Actor, input: Input) -> BinResult<()> {
        if self.pending.is_some() {
            tracing::debug!("connect cancels the transition in flight");
            self.pending = None;
            self.pending_surface = None;
            self.private = None;
            self.morph = None;
        }

        let depth = self.suitable_depth(actor.supported_depths());
        self.actor = Some(actor);
        self.input = Some(input);
        self.set_depth(depth);
        self.forced_active = self.depth;
        tracing::info!(depth = %self.depth, "connected");
        Ok(())
    }

    /// [`Bin::connect`] with both plugins resolved through the registry.
    pub fn connect_by_name(&mut self, actor: &str, input: &str) -> BinResult<()> {
        let actor = self.registry.create_actor(actor)?;
        let input = self.registry.create_input(input)?;
        self.connect(actor, input)
    }

    /// Move the bin to `depth` and propagate it to the destination surface.
    ///
    /// A depth outside [`Bin::supported_depths`] is ignored and the current depth kept.
    pub fn set_depth(&mut self, depth: Depth) {
        self.depth_previous = self.depth;
        if !self.supported.supports(depth) {
            tracing::debug!(%depth, supported = ?self.supported, "ignoring unsupported depth");
            return;
        }

        let changed = depth != self.depth_previous;
        if changed {
            self.depth_changed = true;
        }
        self.leaving_gpu = self.depth_previous == Depth::GpuSurface && changed;
        self.depth = depth;
        if let Some(main) = self.main.as_ref() {
            main.borrow_mut().set_depth(depth);
        }
        if changed {
            tracing::debug!(from = %self.depth_previous, to = %depth, "depth changed");
        }
    }

    /// Negotiated depth.
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Depth before the last [`Bin::set_depth`].
    pub fn previous_depth(&self) -> Depth {
        self.depth_previous
    }

    /// Whether the depth moved since the last call. Reading clears the flag.
    pub fn depth_changed(&mut self) -> bool {
        std::mem::take(&mut self.depth_changed)
    }

    /// Whether the last depth change moved away from `GpuSurface`.
    pub fn is_leaving_gpu(&self) -> bool {
        self.leaving_gpu
    }

    /// Depths the active and pending actors are negotiated at, in that order.
    pub fn forced_depths(&self) -> (Depth, Depth) {
        (self.forced_active, self.forced_pending)
    }

    /// Rebind surfaces after the destination's attributes changed, and renegotiate the actors.
    ///
    /// Events are always suppressed for the active actor when the previous depth was
    /// `GpuSurface`; otherwise `suppress_event` decides.
    #[tracing::instrument(skip(self))]
    pub fn sync(&mut self, suppress_event: bool) -> BinResult<()> {
        let main = self
            .main
            .clone()
            .ok_or_else(|| BinError::missing_surface("no surface bound"))?;
        if self.actor.is_none() {
            return Err(BinError::precondition("sync without an active actor"));
        }

        let main_depth = main.borrow().depth();
        let blending =
            self.is_transitioning() && self.use_morph && !main_depth.is_gpu() && !self.leaving_gpu;

        let working = if blending {
            let private = self
                .private
                .clone()
                .ok_or_else(|| BinError::missing_surface("private surface missing"))?;
            if let Some(morph) = self.morph.as_mut() {
                morph.set_surface(Rc::clone(&main));
            }
            let pending_on_gpu = self
                .pending
                .as_ref()
                .and_then(Actor::surface_depth)
                .is_some_and(Depth::is_gpu);
            {
                let mut p = private.borrow_mut();
                p.free();
                p.copy_attributes_from(&main.borrow());
                if !pending_on_gpu {
                    p.allocate();
                }
            }
            if pending_on_gpu { Rc::clone(&main) } else { private }
        } else {
            Rc::clone(&main)
        };

        let suppress = self.depth_previous == Depth::GpuSurface || suppress_event;
        let forced_active = self.forced_active;
        let active_on_gpu = match self.actor.as_mut() {
            Some(actor) => {
                actor.bind_surface(Rc::clone(&working));
                if !actor.negotiate(forced_active, suppress, true) {
                    tracing::warn!(actor = actor.name(), depth = %forced_active, "active actor negotiation failed");
                }
                actor.surface_depth().is_some_and(Depth::is_gpu)
            }
            None => false,
        };

        if self.is_transitioning() {
            let surface = self
                .pending_surface
                .clone()
                .ok_or_else(|| BinError::missing_surface("pending surface missing"))?;
            {
                let mut s = surface.borrow_mut();
                s.free();
                s.copy_attributes_from(&working.borrow());
                if !active_on_gpu {
                    s.allocate();
                }
            }
            let forced_pending = self.forced_pending;
            let pending = self
                .pending
                .as_mut()
                .ok_or_else(|| BinError::consistency("transitioning without a pending actor"))?;
            pending.realize()?;
            if !pending.negotiate(forced_pending, false, true) {
                tracing::warn!(actor = pending.name(), depth = %forced_pending, "pending actor negotiation failed");
            }
        }
        Ok(())
    }

    /// Produce one frame.
    ///
    /// Pulls audio, advances any transition and renders. A transition that cannot blend is
    /// finalized before anything is drawn and the frame reports [`FrameOutcome::Switched`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn run(&mut self) -> BinResult<FrameOutcome> {
        if self.actor.is_none() {
            return Err(BinError::precondition("run without an active actor"));
        }
        let Some(input) = self.input.as_mut() else {
            return Err(BinError::precondition("run without an input"));
        };
        input.advance()?;

        if self.is_transitioning() {
            let (forced_active, forced_pending) = (self.forced_active, self.forced_pending);
            if let Some(pending) = self.pending.as_mut()
                && !pending.is_realized()
            {
                pending.realize()?;
                pending.negotiate(forced_pending, false, true);
            }
            let mut active_on_gpu = false;
            if let Some(actor) = self.actor.as_mut() {
                if !actor.is_realized() {
                    actor.realize()?;
                    actor.negotiate(forced_active, false, true);
                }
                active_on_gpu = actor.surface_depth().is_some_and(Depth::is_gpu);
            }
            if !self.use_morph || active_on_gpu {
                self.finalize_transition()?;
                return Ok(FrameOutcome::Switched);
            }
        }

        let (Some(actor), Some(input)) = (self.actor.as_mut(), self.input.as_ref()) else {
            return Err(BinError::consistency("active actor vanished mid-frame"));
        };
        let audio = input.audio_frame();
        actor.realize()?;
        actor.run(audio)?;
        let active_depth = actor.surface_depth();

        if !self.use_morph {
            return Ok(FrameOutcome::Rendered);
        }
        let Some(pending) = self.pending.as_mut() else {
            return Ok(FrameOutcome::Rendered);
        };
        let pending_depth = pending.surface_depth();
        if active_depth.is_some_and(Depth::is_gpu) || pending_depth.is_some_and(Depth::is_gpu) {
            // nothing to blend across a hardware surface; the switch would otherwise never end
            self.finalize_transition()?;
            return Ok(FrameOutcome::Switched);
        }
        pending.run(audio)?;

        let Some(morph) = self.morph.as_mut() else {
            tracing::debug!("no morph available, finishing the switch");
            self.finalize_transition()?;
            return Ok(FrameOutcome::Switched);
        };
        if active_depth != pending_depth {
            tracing::trace!(?active_depth, ?pending_depth, "blending across depths");
        }

        morph.realize()?;
        let (Some(actor), Some(pending)) = (self.actor.as_ref(), self.pending.as_ref()) else {
            return Err(BinError::consistency("transition lost an actor mid-frame"));
        };
        morph.run(audio, actor, pending)?;
        let finished = morph.is_done();
        if finished {
            self.finalize_transition()?;
        }
        Ok(FrameOutcome::Blended { finished })
    }

    /// Palette for `indexed8` display: the morph's blend while morphing, else the active actor's.
    pub fn palette(&self) -> Option<&Palette> {
        if self.is_transitioning() && self.use_morph {
            self.morph.as_ref().and_then(Morph::palette)
        } else {
            self.actor.as_ref().and_then(Actor::palette)
        }
    }

    /// Active actor.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// Incoming actor while a transition is in flight.
    pub fn pending_actor(&self) -> Option<&Actor> {
        self.pending.as_ref()
    }

    /// Connected input.
    pub fn input(&self) -> Option<&Input> {
        self.input.as_ref()
    }

    /// Morph driving the transition in flight.
    pub fn morph(&self) -> Option<&Morph> {
        self.morph.as_ref()
    }

    /// Whether a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Surface the outgoing actor paints into while blending.
    pub fn private_surface(&self) -> Option<&SharedSurface> {
        self.private.as_ref()
    }

    /// Surface bound to the incoming actor.
    pub fn pending_surface(&self) -> Option<&SharedSurface> {
        self.pending_surface.as_ref()
    }

    /// Depth an actor supporting `supported` should run at.
    pub(super) fn suitable_depth(&self, supported: DepthMask) -> Depth {
        if supported.supports(Depth::GpuSurface) {
            return Depth::GpuSurface;
        }
        let usable = supported & self.supported;
        if usable.is_empty() {
            choose(supported, self.preferred)
        } else {
            choose(usable, self.preferred)
        }
    }
}

impl fmt::Debug for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bin")
            .field("actor", &self.actor.as_ref().map(Actor::name))
            .field("pending", &self.pending.as_ref().map(Actor::name))
            .field("input", &self.input.as_ref().map(Input::name))
            .field("morph", &self.morph_name)
            .field("use_morph", &self.use_morph)
            .field("depth", &self.depth)
            .field("depth_previous", &self.depth_previous)
            .field("forced_active", &self.forced_active)
            .field("forced_pending", &self.forced_pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/bin.rs"]
mod tests;
