//! visbin composes the live output of interchangeable audio-driven renderers ("actors") into a
//! destination surface, and swaps the active actor at runtime through a blended transition.
//!
//! Drawing is left to plugins. The crate decides which pixel depth everyone renders at, when
//! intermediate surfaces are allocated and released, and how a transition advances frame by
//! frame, across both software surfaces and hardware (`GpuSurface`) targets.
//!
//! # Frame protocol
//!
//! 1. **Configure**: build a [`Bin`] over a [`PluginRegistry`], bind the destination with
//!    [`Bin::set_surface`] and [`Bin::connect`] an actor and an input.
//! 2. **Sync**: call [`Bin::sync`] whenever the destination's attributes changed, including
//!    after [`Bin::depth_changed`] reports a move.
//! 3. **Run**: call [`Bin::run`] once per frame.
//! 4. **Switch** (any time): [`Bin::switch_actor`] starts a transition that later frames drive to
//!    completion.
//!
//! Everything is single-threaded; surfaces are shared through [`SharedSurface`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod audio;
mod compose;
mod foundation;
mod plugin;
mod video;

pub use audio::frame::{AudioFrame, DEFAULT_SAMPLE_RATE, FRAME_SAMPLES};
pub use compose::bin::{Bin, FrameOutcome};
pub use compose::opts::BinOpts;
pub use foundation::error::{BinError, BinResult};
pub use foundation::time::{Clock, ManualClock, MonotonicClock};
pub use plugin::builtin::actors::{Bars, Flat, GpuStandIn, Oscilloscope};
pub use plugin::builtin::inputs::{Silence, Sine};
pub use plugin::builtin::morphs::{AlphaBlend, Wipe};
pub use plugin::{
    Actor, ActorPlugin, Input, InputPlugin, Morph, MorphMode, MorphPlugin, PluginRegistry,
};
pub use video::blend::{WipeDir, crossfade_into, crossfade_u8, wipe_into};
pub use video::depth::{Depth, DepthMask, DepthPreference};
pub use video::negotiate::{choose, choose_excluding_gpu};
pub use video::palette::{PALETTE_LEN, Palette};
pub use video::surface::{SharedSurface, VideoSurface};
