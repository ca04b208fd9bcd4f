use crate::{
    foundation::error::BinResult,
    video::{
        depth::Depth,
        surface::{VideoSurface, decode_rgb, encode_rgb},
    },
};

/// Direction a wipe travels in, from the `a` side to the `b` side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WipeDir {
    /// `b` enters from the left edge.
    LeftToRight,
    /// `b` enters from the right edge.
    RightToLeft,
    /// `b` enters from the top edge.
    TopToBottom,
    /// `b` enters from the bottom edge.
    BottomToTop,
}

impl WipeDir {
    /// Parse a direction name; accepts the long form and the three-letter short form.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left_to_right" | "lefttoright" | "ltr" => Some(Self::LeftToRight),
            "right_to_left" | "righttoleft" | "rtl" => Some(Self::RightToLeft),
            "top_to_bottom" | "toptobottom" | "ttb" => Some(Self::TopToBottom),
            "bottom_to_top" | "bottomtotop" | "btt" => Some(Self::BottomToTop),
            _ => None,
        }
    }
}

/// Single-channel crossfade with 8-bit weights.
pub fn crossfade_u8(a: u8, b: u8, t: f32) -> u8 {
    let tt = ((t.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;
    mul_div255(u16::from(a), it).saturating_add(mul_div255(u16::from(b), tt))
}

/// Write `a` blended towards `b` by `t` into `dst`.
///
/// The blended area is the common extent of the three surfaces. Each source is read at its own
/// depth and the mix is packed at `dst`'s depth. `indexed8` indices cannot be mixed, so when all
/// three are `indexed8` the result switches from `a` to `b` at `t = 0.5` and the palette carries
/// the fade; an `indexed8` source mixed with another depth reads as grey. GPU surfaces are left
/// untouched.
pub fn crossfade_into(
    dst: &mut VideoSurface,
    a: &VideoSurface,
    b: &VideoSurface,
    t: f32,
) -> BinResult<()> {
    let t = t.clamp(0.0, 1.0);
    let (da, db, dd) = (a.depth(), b.depth(), dst.depth());
    let same = da == dd && db == dd;
    for_each_pixel(dst, a, b, |pa, pb, out| match dd {
        Depth::Indexed8 if same => out[0] = if t < 0.5 { pa[0] } else { pb[0] },
        Depth::Rgb24 | Depth::Rgb32 if same => {
            for ((o, x), y) in out.iter_mut().zip(pa).zip(pb) {
                *o = crossfade_u8(*x, *y, t);
            }
        }
        _ => {
            let ca = decode_rgb(da, pa, None);
            let cb = decode_rgb(db, pb, None);
            let mixed = [
                crossfade_u8(ca[0], cb[0], t),
                crossfade_u8(ca[1], cb[1], t),
                crossfade_u8(ca[2], cb[2], t),
            ];
            encode_rgb(dd, mixed, out);
        }
    });
    Ok(())
}

/// Hard-edged wipe from `a` to `b`: pixels the edge has passed come from `b`.
///
/// Sources at a depth other than `dst`'s are repacked pixel by pixel.
pub fn wipe_into(
    dst: &mut VideoSurface,
    a: &VideoSurface,
    b: &VideoSurface,
    t: f32,
    dir: WipeDir,
) -> BinResult<()> {
    let t = t.clamp(0.0, 1.0);
    let (w, h) = common_extent(dst, a, b);
    let depth = dst.depth();
    let bpp = dst.bytes_per_pixel();
    if bpp == 0 {
        return Ok(());
    }
    for y in 0..h {
        for x in 0..w {
            let pos = match dir {
                WipeDir::LeftToRight => (x as f32 + 0.5) / w as f32,
                WipeDir::RightToLeft => 1.0 - (x as f32 + 0.5) / w as f32,
                WipeDir::TopToBottom => (y as f32 + 0.5) / h as f32,
                WipeDir::BottomToTop => 1.0 - (y as f32 + 0.5) / h as f32,
            };
            let src = if pos < t { b } else { a };
            let (Some(so), Some(dofs)) = (src.offset(x, y), dst.offset(x, y)) else {
                continue;
            };
            let (Some(sp), Some(dp)) = (src.pixels(), dst.pixels_mut()) else {
                return Ok(());
            };
            let px = &sp[so..so + src.bytes_per_pixel()];
            let out = &mut dp[dofs..dofs + bpp];
            if src.depth() == depth {
                out.copy_from_slice(px);
            } else {
                encode_rgb(depth, decode_rgb(src.depth(), px, None), out);
            }
        }
    }
    Ok(())
}

fn common_extent(dst: &VideoSurface, a: &VideoSurface, b: &VideoSurface) -> (u32, u32) {
    (
        dst.width().min(a.width()).min(b.width()),
        dst.height().min(a.height()).min(b.height()),
    )
}

fn for_each_pixel(
    dst: &mut VideoSurface,
    a: &VideoSurface,
    b: &VideoSurface,
    mut f: impl FnMut(&[u8], &[u8], &mut [u8]),
) {
    let (w, h) = common_extent(dst, a, b);
    let (ba, bb, bd) = (
        a.bytes_per_pixel(),
        b.bytes_per_pixel(),
        dst.bytes_per_pixel(),
    );
    if ba == 0 || bb == 0 || bd == 0 {
        return;
    }
    for y in 0..h {
        for x in 0..w {
            let (Some(ao), Some(bo), Some(dofs)) = (a.offset(x, y), b.offset(x, y), dst.offset(x, y))
            else {
                continue;
            };
            let (Some(ap), Some(bp), Some(dp)) = (a.pixels(), b.pixels(), dst.pixels_mut()) else {
                return;
            };
            f(&ap[ao..ao + ba], &bp[bo..bo + bb], &mut dp[dofs..dofs + bd]);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/video/blend.rs"]
mod tests;
