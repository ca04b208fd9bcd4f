use std::fmt;

/// Pixel-format class of a [`crate::VideoSurface`].
///
/// Variants are declared in bit order, so `Ord` matches the ordering of [`DepthMask`] bits:
/// a depth "exceeds" another exactly when its bit is higher.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// No depth negotiated yet. Never propagated to a surface.
    #[default]
    None,
    /// 8-bit palette indices.
    Indexed8,
    /// Packed 5-6-5 RGB.
    Rgb16,
    /// 8-bit R, G, B.
    Rgb24,
    /// 8-bit R, G, B plus a padding byte.
    Rgb32,
    /// Hardware surface. Has no software pixel storage and follows its own negotiation rules.
    GpuSurface,
}

impl Depth {
    /// Every software depth, lowest first.
    pub const SOFTWARE: [Self; 4] = [Self::Indexed8, Self::Rgb16, Self::Rgb24, Self::Rgb32];

    /// The mask bit for this depth; empty for [`Depth::None`].
    pub fn bit(self) -> DepthMask {
        match self {
            Self::None => DepthMask::empty(),
            Self::Indexed8 => DepthMask::INDEXED8,
            Self::Rgb16 => DepthMask::RGB16,
            Self::Rgb24 => DepthMask::RGB24,
            Self::Rgb32 => DepthMask::RGB32,
            Self::GpuSurface => DepthMask::GPU_SURFACE,
        }
    }

    /// Bytes one pixel occupies in software storage. Zero for `None` and `GpuSurface`.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::None | Self::GpuSurface => 0,
            Self::Indexed8 => 1,
            Self::Rgb16 => 2,
            Self::Rgb24 => 3,
            Self::Rgb32 => 4,
        }
    }

    /// Whether this is the hardware-surface depth.
    pub fn is_gpu(self) -> bool {
        self == Self::GpuSurface
    }

    /// Whether surfaces of this depth carry software pixel storage.
    pub fn is_software(self) -> bool {
        self.bytes_per_pixel() > 0
    }

    /// Parse the snake_case name used in configuration (`"rgb32"`, `"gpu_surface"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "indexed8" | "index8" => Some(Self::Indexed8),
            "rgb16" => Some(Self::Rgb16),
            "rgb24" => Some(Self::Rgb24),
            "rgb32" => Some(Self::Rgb32),
            "gpu_surface" | "gpu" | "gl" => Some(Self::GpuSurface),
            _ => None,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Indexed8 => "indexed8",
            Self::Rgb16 => "rgb16",
            Self::Rgb24 => "rgb24",
            Self::Rgb32 => "rgb32",
            Self::GpuSurface => "gpu_surface",
        };
        f.write_str(s)
    }
}

bitflags::bitflags! {
    /// Set of depths an actor, morph or bin can work in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct DepthMask: u32 {
        /// [`Depth::Indexed8`].
        const INDEXED8 = 1 << 0;
        /// [`Depth::Rgb16`].
        const RGB16 = 1 << 1;
        /// [`Depth::Rgb24`].
        const RGB24 = 1 << 2;
        /// [`Depth::Rgb32`].
        const RGB32 = 1 << 3;
        /// [`Depth::GpuSurface`].
        const GPU_SURFACE = 1 << 4;

        /// Every software depth.
        const SOFTWARE = Self::INDEXED8.bits()
            | Self::RGB16.bits()
            | Self::RGB24.bits()
            | Self::RGB32.bits();
    }
}

impl DepthMask {
    /// Whether `depth` is a member. [`Depth::None`] is never a member.
    pub fn supports(self, depth: Depth) -> bool {
        let bit = depth.bit();
        !bit.is_empty() && self.contains(bit)
    }

    /// Member depths, lowest first.
    pub fn depths(self) -> impl Iterator<Item = Depth> {
        Depth::SOFTWARE
            .into_iter()
            .chain(std::iter::once(Depth::GpuSurface))
            .filter(move |d| self.supports(*d))
    }

    /// Lowest member, or `Depth::None` for an empty mask.
    pub fn lowest(self) -> Depth {
        self.depths().next().unwrap_or(Depth::None)
    }

    /// Highest member, or `Depth::None` for an empty mask.
    pub fn highest(self) -> Depth {
        self.depths().last().unwrap_or(Depth::None)
    }

    /// Highest software member, ignoring `GPU_SURFACE`.
    pub fn highest_software(self) -> Depth {
        (self & Self::SOFTWARE).highest()
    }
}

impl From<Depth> for DepthMask {
    fn from(depth: Depth) -> Self {
        depth.bit()
    }
}

impl FromIterator<Depth> for DepthMask {
    fn from_iter<I: IntoIterator<Item = Depth>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |m, d| m | d.bit())
    }
}

/// Which end of a mask the bin picks when several software depths are available.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthPreference {
    /// Prefer the smallest pixel format.
    Lowest,
    /// Prefer the richest pixel format.
    #[default]
    Highest,
}

#[cfg(test)]
#[path = "../../tests/unit/video/depth.rs"]
mod tests;
