//! Reference plugins shipped with the crate.

pub(crate) mod actors;
pub(crate) mod inputs;
pub(crate) mod morphs;

use crate::plugin::registry::PluginRegistry;

pub(crate) fn register_all(r: &mut PluginRegistry) {
    r.register_actor("oscilloscope", || Box::new(actors::Oscilloscope::default()));
    r.register_actor("bars", || Box::new(actors::Bars::default()));
    r.register_actor("flat", || Box::new(actors::Flat::default()));
    r.register_actor("gpu", || Box::new(actors::GpuStandIn::default()));

    r.register_morph("alphablend", || Box::new(morphs::AlphaBlend));
    r.register_morph("wipe", || Box::new(morphs::Wipe::default()));

    r.register_input("silence", || Box::new(inputs::Silence));
    r.register_input("sine", || Box::new(inputs::Sine::default()));
}
