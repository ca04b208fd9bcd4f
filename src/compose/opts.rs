use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{BinError, BinResult},
    video::depth::{DepthMask, DepthPreference},
};

/// Configuration applied to a [`crate::Bin`] before the first `connect`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinOpts {
    /// Extreme to pick when an actor supports several software depths.
    pub preferred_depth: DepthPreference,
    /// Depths the destination can display.
    pub supported_depths: DepthMask,
    /// Blend transitions instead of hard-cutting.
    pub use_morph: bool,
    /// Morph plugin used for blended transitions.
    pub morph: Option<String>,
    /// Length of a blended transition.
    pub morph_duration_ms: u64,
}

impl Default for BinOpts {
    fn default() -> Self {
        Self {
            preferred_depth: DepthPreference::Highest,
            supported_depths: DepthMask::all(),
            use_morph: false,
            morph: None,
            morph_duration_ms: 4000,
        }
    }
}

impl BinOpts {
    /// Check option invariants.
    pub fn validate(&self) -> BinResult<()> {
        if self.supported_depths.is_empty() {
            return Err(BinError::validation("supported_depths must name at least one depth"));
        }
        if let Some(name) = &self.morph
            && name.trim().is_empty()
        {
            return Err(BinError::validation("morph name must be non-empty when set"));
        }
        Ok(())
    }

    /// Transition length as a [`Duration`].
    pub fn morph_duration(&self) -> Duration {
        Duration::from_millis(self.morph_duration_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/opts.rs"]
mod tests;
