use super::*;
use crate::{
    foundation::time::ManualClock,
    plugin::probe::{Probe, ProbeActor},
    video::depth::DepthMask,
};

#[test]
fn builtins_are_listed_sorted() {
    let r = PluginRegistry::with_builtins();
    assert_eq!(
        r.actor_names().collect::<Vec<_>>(),
        ["bars", "flat", "gpu", "oscilloscope"]
    );
    assert_eq!(r.morph_names().collect::<Vec<_>>(), ["alphablend", "wipe"]);
    assert_eq!(r.input_names().collect::<Vec<_>>(), ["silence", "sine"]);
}

#[test]
fn create_yields_fresh_named_instances() {
    let r = PluginRegistry::with_builtins();
    let a = r.create_actor("gpu").unwrap();
    assert_eq!(a.name(), "gpu");
    assert_eq!(a.supported_depths(), DepthMask::GPU_SURFACE);
    assert!(!a.is_realized());

    let m = r.create_morph("wipe", Rc::new(ManualClock::new())).unwrap();
    assert_eq!(m.name(), "wipe");
    assert_eq!(r.create_input("sine").unwrap().name(), "sine");
}

#[test]
fn unknown_names_are_plugin_errors() {
    let r = PluginRegistry::new();
    let err = r.create_actor("nope").unwrap_err();
    assert!(matches!(err, BinError::Plugin(_)));
    assert!(err.to_string().contains("unknown actor 'nope'"));
    assert!(r.create_morph("nope", Rc::new(ManualClock::new())).is_err());
    assert!(r.create_input("nope").is_err());
}

#[test]
fn registering_again_replaces_the_constructor() {
    let mut r = PluginRegistry::with_builtins();
    let probe = Probe::new();
    let p = probe.clone();
    r.register_actor("flat", move || {
        Box::new(ProbeActor::new(DepthMask::RGB16, [0, 0, 0], p.clone()))
    });
    let a = r.create_actor("flat").unwrap();
    assert_eq!(a.supported_depths(), DepthMask::RGB16);
    assert_eq!(r.actor_names().filter(|n| *n == "flat").count(), 1);
}
