//! Actor replacement: starting, superseding and finishing a transition.

use std::rc::Rc;

use crate::{
    compose::bin::Bin,
    foundation::error::{BinError, BinResult},
    plugin::{actor::Actor, morph::MorphMode},
    video::{
        depth::Depth,
        surface::{SharedSurface, VideoSurface},
    },
};

impl Bin {
    /// Start replacing the active actor with a new instance of the actor registered as `name`.
    ///
    /// The switch takes effect from the next [`Bin::run`]. A transition already in flight is
    /// superseded and its pending actor dropped without being drained.
    #[tracing::instrument(skip(self))]
    pub fn switch_actor(&mut self, name: &str) -> BinResult<()> {
        let actor = self.registry.create_actor(name)?;
        self.switch_to_actor(actor)
    }

    /// Like [`Bin::switch_actor`] with a caller-constructed actor.
    pub fn switch_to_actor(&mut self, mut actor: Actor) -> BinResult<()> {
        let main = self
            .main
            .clone()
            .ok_or_else(|| BinError::precondition("switching actors needs a destination surface"))?;
        if self.actor.is_none() {
            return Err(BinError::precondition("switching actors needs an active actor"));
        }
        tracing::info!(
            to = actor.name(),
            from = self.actor.as_ref().map(Actor::name),
            "switching actor"
        );

        if let Some(superseded) = self.pending.take() {
            tracing::debug!(actor = superseded.name(), "dropping superseded pending actor");
        }
        self.pending_surface = None;

        let mut surface = VideoSurface::new();
        surface.copy_attributes_from(&main.borrow());

        let supported = actor.supported_depths();
        if supported.supports(Depth::GpuSurface) {
            self.forced_pending = Depth::GpuSurface;
            self.forced_active = Depth::GpuSurface;
            surface.set_depth(Depth::GpuSurface);
            self.set_depth(Depth::GpuSurface);
            self.depth_changed = true;
        } else {
            let candidate = self.suitable_depth(supported);
            surface.set_depth(candidate);

            // Renegotiation left over from an earlier switch that never got synced.
            if self.forced_active != main.borrow().depth() {
                let forced = self.forced_active;
                if let Some(active) = self.actor.as_mut() {
                    active.negotiate(forced, true, true);
                }
            }

            let main_depth = main.borrow().depth();
            if main_depth > candidate
                && !main_depth.is_gpu()
                && self.use_morph
                && supported.supports(main_depth)
            {
                self.forced_pending = main_depth;
                self.forced_active = main_depth;
                self.set_depth(main_depth);
                surface.set_depth(main_depth);
            } else if !main_depth.is_gpu() {
                self.forced_pending = candidate;
                self.forced_active = self.depth;
                self.set_depth(candidate);
            } else {
                self.forced_pending = candidate;
                self.forced_active = candidate;
            }

            let pitch = surface.width() as usize * surface.depth().bytes_per_pixel();
            surface.set_pitch(pitch);
            surface.allocate();
        }
        tracing::debug!(
            forced_active = %self.forced_active,
            forced_pending = %self.forced_pending,
            "switch depths settled"
        );

        let surface = surface.shared();
        actor.bind_surface(Rc::clone(&surface));
        self.pending_surface = Some(surface);
        self.begin_transition(actor, &main)
    }

    fn begin_transition(&mut self, actor: Actor, main: &SharedSurface) -> BinResult<()> {
        let pending_on_gpu = actor.surface_depth().is_some_and(Depth::is_gpu);
        self.pending = Some(actor);
        self.private = None;

        let active_on_gpu = self
            .actor
            .as_ref()
            .and_then(Actor::surface_depth)
            .is_some_and(Depth::is_gpu);

        if self.use_morph && !active_on_gpu && !pending_on_gpu && !self.leaving_gpu {
            self.prepare_morph(main)?;

            let mut private = VideoSurface::new();
            private.copy_attributes_from(&main.borrow());
            private.allocate();
            // fresh storage is zeroed, so a destination without pixels leaves it black
            private.copy_pixels_from(&main.borrow());

            let private = private.shared();
            if let Some(active) = self.actor.as_mut() {
                active.bind_surface(Rc::clone(&private));
            }
            self.private = Some(private);
        } else {
            if !active_on_gpu {
                main.borrow_mut().fill(0);
            }
            if let Some(active) = self.actor.as_mut()
                && !active.bound_surface().is_some_and(|s| Rc::ptr_eq(s, main))
            {
                active.bind_surface(Rc::clone(main));
            }
        }

        tracing::info!(blending = self.private.is_some(), "transition started");
        Ok(())
    }

    /// Create the configured morph if none is active, and rewind it for a new transition.
    fn prepare_morph(&mut self, main: &SharedSurface) -> BinResult<()> {
        if self.morph.is_none() {
            let Some(name) = self.morph_name.as_deref() else {
                return Ok(());
            };
            let morph = self.registry.create_morph(name, Rc::clone(&self.clock))?;
            let depth = main.borrow().depth();
            if !morph.supported_depths().supports(depth) {
                tracing::warn!(morph = name, %depth, "morph cannot blend at this depth");
                return Ok(());
            }
            tracing::debug!(morph = name, "morph created");
            self.morph = Some(morph);
        }
        if let Some(morph) = self.morph.as_mut() {
            morph.set_progress(0.0);
            morph.set_surface(Rc::clone(main));
            morph.set_mode(MorphMode::Time);
            morph.set_duration(self.morph_duration);
        }
        Ok(())
    }

    /// Promote the pending actor to active, release transition resources and settle the depth.
    ///
    /// The previously active actor is dropped here.
    #[tracing::instrument(skip(self))]
    pub fn finalize_transition(&mut self) -> BinResult<()> {
        self.pending_surface = None;
        self.private = None;
        let promoted = self
            .pending
            .take()
            .ok_or_else(|| BinError::consistency("finalizing without a pending actor"))?;
        if let Some(previous) = self.actor.replace(promoted) {
            tracing::debug!(actor = previous.name(), "releasing previous actor");
        }
        self.morph = None;

        let supported = match self.actor.as_mut() {
            Some(actor) => {
                if let Some(main) = self.main.as_ref() {
                    actor.bind_surface(Rc::clone(main));
                }
                actor.supported_depths()
            }
            None => return Err(BinError::consistency("no active actor after promotion")),
        };

        let depth = self.suitable_depth(supported);
        self.set_depth(depth);
        self.forced_active = self.depth;

        if self.depth_changed {
            let forced = self.forced_active;
            if let Some(actor) = self.actor.as_mut() {
                actor.negotiate(forced, true, true);
            }
        }
        tracing::info!(
            actor = self.actor.as_ref().map(Actor::name),
            depth = %self.depth,
            "transition finalized"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/transition.rs"]
mod tests;
