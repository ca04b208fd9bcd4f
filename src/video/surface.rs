use std::{cell::RefCell, fmt, rc::Rc};

use crate::video::{depth::Depth, palette::Palette};

/// Surface handle shared between the caller, the bin, actors and morphs.
///
/// Lifetime is that of the longest holder. All access happens on one thread.
pub type SharedSurface = Rc<RefCell<VideoSurface>>;

/// Rectangular pixel buffer with a depth, dimensions and row pitch.
///
/// Attributes and storage are managed separately: changing depth or pitch never touches the
/// pixel bytes, and [`VideoSurface::allocate`] sizes storage from the current attributes.
/// `GpuSurface` and `None` surfaces never hold storage.
#[derive(Clone, Default)]
pub struct VideoSurface {
    depth: Depth,
    width: u32,
    height: u32,
    pitch: usize,
    pixels: Option<Vec<u8>>,
}

impl VideoSurface {
    /// Empty surface: no depth, no size, no storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with attributes set and a tight pitch, but no storage yet.
    pub fn with_dimensions(width: u32, height: u32, depth: Depth) -> Self {
        Self {
            depth,
            width,
            height,
            pitch: width as usize * depth.bytes_per_pixel(),
            pixels: None,
        }
    }

    /// Like [`VideoSurface::with_dimensions`], with zeroed storage allocated.
    pub fn allocated(width: u32, height: u32, depth: Depth) -> Self {
        let mut s = Self::with_dimensions(width, height, depth);
        s.allocate();
        s
    }

    /// Wrap into a [`SharedSurface`].
    pub fn shared(self) -> SharedSurface {
        Rc::new(RefCell::new(self))
    }

    /// Current depth.
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Change the depth attribute. Storage is left as is; reallocate if the layout changed.
    pub fn set_depth(&mut self, depth: Depth) {
        self.depth = depth;
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change width and height. Storage is left as is.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Change the row pitch. Storage is left as is.
    pub fn set_pitch(&mut self, pitch: usize) {
        self.pitch = pitch;
    }

    /// Bytes per pixel implied by the depth.
    pub fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }

    /// Storage size implied by the attributes: `pitch * height`.
    pub fn size_bytes(&self) -> usize {
        self.pitch.saturating_mul(self.height as usize)
    }

    /// Pixel bytes, if allocated.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    /// Mutable pixel bytes, if allocated.
    pub fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        self.pixels.as_deref_mut()
    }

    /// Whether storage is allocated.
    pub fn has_pixels(&self) -> bool {
        self.pixels.is_some()
    }

    /// Copy depth, dimensions and pitch from `other`. Storage is not copied.
    pub fn copy_attributes_from(&mut self, other: &Self) {
        self.depth = other.depth;
        self.width = other.width;
        self.height = other.height;
        self.pitch = other.pitch;
    }

    /// (Re)allocate zeroed storage of [`VideoSurface::size_bytes`].
    ///
    /// Surfaces without software storage (GPU, no depth, zero size) end up unallocated.
    pub fn allocate(&mut self) {
        let size = self.size_bytes();
        if !self.depth.is_software() || size == 0 {
            self.pixels = None;
            return;
        }
        self.pixels = Some(vec![0; size]);
    }

    /// Drop storage. Attributes are kept.
    pub fn free(&mut self) {
        self.pixels = None;
    }

    /// Set every allocated byte to `value`.
    pub fn fill(&mut self, value: u8) {
        if let Some(p) = self.pixels.as_mut() {
            p.fill(value);
        }
    }

    /// Copy as many pixel bytes from `other` as both buffers hold.
    ///
    /// Returns `false` when either side has no storage.
    pub fn copy_pixels_from(&mut self, other: &Self) -> bool {
        match (self.pixels.as_mut(), other.pixels.as_ref()) {
            (Some(dst), Some(src)) => {
                let n = dst.len().min(src.len());
                dst[..n].copy_from_slice(&src[..n]);
                true
            }
            _ => false,
        }
    }

    /// Byte offset of pixel `(x, y)`, if it lies inside allocated storage.
    pub(crate) fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let off = (y as usize)
            .checked_mul(self.pitch)?
            .checked_add((x as usize).checked_mul(bpp)?)?;
        let len = self.pixels.as_ref()?.len();
        (bpp > 0 && off + bpp <= len).then_some(off)
    }

    /// Write an RGB colour at `(x, y)` in the surface's depth. Out-of-range writes are dropped.
    ///
    /// `indexed8` stores the colour's luma as the palette index.
    pub fn put_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let depth = self.depth;
        let Some(off) = self.offset(x, y) else {
            return;
        };
        if let Some(p) = self.pixels.as_mut() {
            encode_rgb(depth, rgb, &mut p[off..off + depth.bytes_per_pixel()]);
        }
    }

    /// Read the colour at `(x, y)`. `indexed8` resolves through `palette`, or as grey without one.
    pub fn rgb_at(&self, x: u32, y: u32, palette: Option<&Palette>) -> Option<[u8; 3]> {
        let off = self.offset(x, y)?;
        let p = self.pixels.as_ref()?;
        Some(decode_rgb(
            self.depth,
            &p[off..off + self.bytes_per_pixel()],
            palette,
        ))
    }

    /// Paint every pixel with one colour.
    pub fn fill_rgb(&mut self, rgb: [u8; 3]) {
        let depth = self.depth;
        let bpp = depth.bytes_per_pixel();
        let row_bytes = self.width as usize * bpp;
        let pitch = self.pitch;
        let Some(p) = self.pixels.as_mut() else {
            return;
        };
        if bpp == 0 || pitch == 0 {
            return;
        }
        for row in p.chunks_mut(pitch) {
            let n = row_bytes.min(row.len());
            for px in row[..n].chunks_exact_mut(bpp) {
                encode_rgb(depth, rgb, px);
            }
        }
    }
}

impl fmt::Debug for VideoSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoSurface")
            .field("depth", &self.depth)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pitch", &self.pitch)
            .field("pixels", &self.pixels.as_ref().map(Vec::len))
            .finish()
    }
}

/// BT.601 luma, used as the palette index for `indexed8`.
pub(crate) fn luma(rgb: [u8; 3]) -> u8 {
    let y = 299 * u32::from(rgb[0]) + 587 * u32::from(rgb[1]) + 114 * u32::from(rgb[2]);
    ((y + 500) / 1000) as u8
}

/// Pack `rgb` into `out`, which must be exactly `depth.bytes_per_pixel()` long.
pub(crate) fn encode_rgb(depth: Depth, rgb: [u8; 3], out: &mut [u8]) {
    match depth {
        Depth::Indexed8 => out[0] = luma(rgb),
        Depth::Rgb16 => {
            let v = (u16::from(rgb[0] >> 3) << 11)
                | (u16::from(rgb[1] >> 2) << 5)
                | u16::from(rgb[2] >> 3);
            out.copy_from_slice(&v.to_le_bytes());
        }
        Depth::Rgb24 => out.copy_from_slice(&rgb),
        Depth::Rgb32 => out.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 0xff]),
        Depth::None | Depth::GpuSurface => {}
    }
}

/// Inverse of [`encode_rgb`]. 5-6-5 channels are widened by bit replication.
pub(crate) fn decode_rgb(depth: Depth, px: &[u8], palette: Option<&Palette>) -> [u8; 3] {
    match depth {
        Depth::Indexed8 => match palette {
            Some(pal) => pal.color(px[0]),
            None => [px[0]; 3],
        },
        Depth::Rgb16 => {
            let v = u16::from_le_bytes([px[0], px[1]]);
            let r = ((v >> 11) & 0x1f) as u8;
            let g = ((v >> 5) & 0x3f) as u8;
            let b = (v & 0x1f) as u8;
            [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
        }
        Depth::Rgb24 | Depth::Rgb32 => [px[0], px[1], px[2]],
        Depth::None | Depth::GpuSurface => [0, 0, 0],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/surface.rs"]
mod tests;
