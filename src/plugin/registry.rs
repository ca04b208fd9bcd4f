use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{
    foundation::{
        error::{BinError, BinResult},
        time::Clock,
    },
    plugin::{
        ActorPlugin, InputPlugin, MorphPlugin, actor::Actor, builtin, input::Input, morph::Morph,
    },
};

type ActorCtor = Box<dyn Fn() -> Box<dyn ActorPlugin>>;
type MorphCtor = Box<dyn Fn() -> Box<dyn MorphPlugin>>;
type InputCtor = Box<dyn Fn() -> Box<dyn InputPlugin>>;

/// Name-to-constructor tables for actors, morphs and inputs.
///
/// Names are unique per kind; registering a name again replaces the earlier constructor.
#[derive(Default)]
pub struct PluginRegistry {
    actors: BTreeMap<String, ActorCtor>,
    morphs: BTreeMap<String, MorphCtor>,
    inputs: BTreeMap<String, InputCtor>,
}

impl PluginRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in reference plugins.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        builtin::register_all(&mut r);
        r
    }

    /// Register an actor constructor.
    pub fn register_actor<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn() -> Box<dyn ActorPlugin> + 'static,
    {
        self.actors.insert(name.into(), Box::new(ctor));
    }

    /// Register a morph constructor.
    pub fn register_morph<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn() -> Box<dyn MorphPlugin> + 'static,
    {
        self.morphs.insert(name.into(), Box::new(ctor));
    }

    /// Register an input constructor.
    pub fn register_input<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn() -> Box<dyn InputPlugin> + 'static,
    {
        self.inputs.insert(name.into(), Box::new(ctor));
    }

    /// Instantiate the actor registered as `name`.
    pub fn create_actor(&self, name: &str) -> BinResult<Actor> {
        let ctor = self
            .actors
            .get(name)
            .ok_or_else(|| BinError::plugin(format!("unknown actor '{name}'")))?;
        Ok(Actor::new(name, ctor()))
    }

    /// Instantiate the morph registered as `name`, reading time from `clock`.
    pub fn create_morph(&self, name: &str, clock: Rc<dyn Clock>) -> BinResult<Morph> {
        let ctor = self
            .morphs
            .get(name)
            .ok_or_else(|| BinError::plugin(format!("unknown morph '{name}'")))?;
        Ok(Morph::new(name, ctor(), clock))
    }

    /// Instantiate the input registered as `name`.
    pub fn create_input(&self, name: &str) -> BinResult<Input> {
        let ctor = self
            .inputs
            .get(name)
            .ok_or_else(|| BinError::plugin(format!("unknown input '{name}'")))?;
        Ok(Input::new(name, ctor()))
    }

    /// Registered actor names, sorted.
    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.actors.keys().map(String::as_str)
    }

    /// Registered morph names, sorted.
    pub fn morph_names(&self) -> impl Iterator<Item = &str> {
        self.morphs.keys().map(String::as_str)
    }

    /// Registered input names, sorted.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("actors", &self.actors.keys().collect::<Vec<_>>())
            .field("morphs", &self.morphs.keys().collect::<Vec<_>>())
            .field("inputs", &self.inputs.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/registry.rs"]
mod tests;
