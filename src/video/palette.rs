/// Number of entries in an `indexed8` palette.
pub const PALETTE_LEN: usize = 256;

/// Colour table for `indexed8` surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// All-black palette with [`PALETTE_LEN`] entries.
    pub fn black() -> Self {
        Self {
            colors: vec![[0, 0, 0]; PALETTE_LEN],
        }
    }

    /// Palette from explicit entries. Missing entries are black; extra entries are dropped.
    pub fn from_colors(colors: &[[u8; 3]]) -> Self {
        let mut p = Self::black();
        for (dst, src) in p.colors.iter_mut().zip(colors) {
            *dst = *src;
        }
        p
    }

    /// Linear ramp from `from` (index 0) to `to` (index 255).
    pub fn gradient(from: [u8; 3], to: [u8; 3]) -> Self {
        let colors = (0..PALETTE_LEN)
            .map(|i| lerp_rgb(from, to, i as f32 / (PALETTE_LEN - 1) as f32))
            .collect();
        Self { colors }
    }

    /// Entry count.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for `index`.
    pub fn color(&self, index: u8) -> [u8; 3] {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or([0, 0, 0])
    }

    /// Overwrite one entry.
    pub fn set_color(&mut self, index: u8, rgb: [u8; 3]) {
        if let Some(c) = self.colors.get_mut(usize::from(index)) {
            *c = rgb;
        }
    }

    /// Entry-wise blend: `t = 0` is `a`, `t = 1` is `b`.
    pub fn blend(a: &Self, b: &Self, t: f32) -> Self {
        let colors = a
            .colors
            .iter()
            .zip(&b.colors)
            .map(|(ca, cb)| lerp_rgb(*ca, *cb, t))
            .collect();
        Self { colors }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::black()
    }
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/video/palette.rs"]
mod tests;
