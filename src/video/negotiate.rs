use crate::video::depth::{Depth, DepthMask, DepthPreference};

/// Pick the depth at the preferred extreme of `mask`.
///
/// The result is always a member of `mask`, or [`Depth::None`] when `mask` is empty. Callers
/// that must never see `GpuSurface` use [`choose_excluding_gpu`] instead.
pub fn choose(mask: DepthMask, preference: DepthPreference) -> Depth {
    let depth = match preference {
        DepthPreference::Lowest => mask.lowest(),
        DepthPreference::Highest => mask.highest(),
    };

    if depth != Depth::None && !mask.supports(depth) {
        // The extremes are read from the mask itself, so this cannot happen unless the mask
        // representation changes underneath us.
        tracing::error!(?mask, %depth, "internal consistency fault: negotiated depth outside its own mask");
        return choose_excluding_gpu(mask);
    }

    depth
}

/// Highest software depth in `mask`; used when falling back from `GpuSurface`.
pub fn choose_excluding_gpu(mask: DepthMask) -> Depth {
    mask.highest_software()
}

#[cfg(test)]
#[path = "../../tests/unit/video/negotiate.rs"]
mod tests;
