use super::*;

fn solid(w: u32, h: u32, depth: Depth, rgb: [u8; 3]) -> VideoSurface {
    let mut s = VideoSurface::allocated(w, h, depth);
    s.fill_rgb(rgb);
    s
}

#[test]
fn crossfade_t_0_is_a_and_t_1_is_b() {
    for depth in [Depth::Rgb16, Depth::Rgb24, Depth::Rgb32] {
        let a = solid(4, 2, depth, [255, 0, 0]);
        let b = solid(4, 2, depth, [0, 0, 255]);
        let mut dst = VideoSurface::allocated(4, 2, depth);

        crossfade_into(&mut dst, &a, &b, 0.0).unwrap();
        assert_eq!(dst.rgb_at(3, 1, None), Some([255, 0, 0]), "{depth}");
        crossfade_into(&mut dst, &a, &b, 1.0).unwrap();
        assert_eq!(dst.rgb_at(3, 1, None), Some([0, 0, 255]), "{depth}");
    }
}

#[test]
fn crossfade_midpoint_mixes_channels() {
    let a = solid(1, 1, Depth::Rgb24, [0, 0, 0]);
    let b = solid(1, 1, Depth::Rgb24, [200, 100, 50]);
    let mut dst = VideoSurface::allocated(1, 1, Depth::Rgb24);
    crossfade_into(&mut dst, &a, &b, 0.5).unwrap();
    assert_eq!(dst.rgb_at(0, 0, None), Some([100, 50, 25]));
}

#[test]
fn indexed8_switches_at_half() {
    let mut a = VideoSurface::allocated(2, 1, Depth::Indexed8);
    a.fill(10);
    let mut b = VideoSurface::allocated(2, 1, Depth::Indexed8);
    b.fill(200);
    let mut dst = VideoSurface::allocated(2, 1, Depth::Indexed8);

    crossfade_into(&mut dst, &a, &b, 0.49).unwrap();
    assert_eq!(dst.pixels(), Some(&[10u8, 10][..]));
    crossfade_into(&mut dst, &a, &b, 0.5).unwrap();
    assert_eq!(dst.pixels(), Some(&[200u8, 200][..]));
}

#[test]
fn crossfade_repacks_sources_at_other_depths() {
    let a = solid(2, 2, Depth::Rgb16, [255, 0, 0]);
    let b = solid(2, 2, Depth::Rgb32, [0, 0, 255]);
    let mut dst = VideoSurface::allocated(2, 2, Depth::Rgb32);

    crossfade_into(&mut dst, &a, &b, 0.0).unwrap();
    assert_eq!(dst.rgb_at(1, 1, None), Some([255, 0, 0]));
    crossfade_into(&mut dst, &a, &b, 0.5).unwrap();
    assert_eq!(dst.rgb_at(0, 1, None), Some([127, 0, 128]));
    assert_eq!(dst.pixels().unwrap()[3], 0xff);
    crossfade_into(&mut dst, &a, &b, 1.0).unwrap();
    assert_eq!(dst.rgb_at(1, 0, None), Some([0, 0, 255]));
}

#[test]
fn crossfade_leaves_gpu_targets_alone() {
    let a = solid(1, 1, Depth::Rgb24, [1, 2, 3]);
    let b = solid(1, 1, Depth::Rgb24, [4, 5, 6]);
    let mut dst = VideoSurface::allocated(1, 1, Depth::GpuSurface);
    crossfade_into(&mut dst, &a, &b, 0.5).unwrap();
    assert!(!dst.has_pixels());
}

#[test]
fn wipe_ltr_endpoints_match_a_and_b() {
    let a = solid(4, 1, Depth::Rgb32, [255, 0, 0]);
    let b = solid(4, 1, Depth::Rgb32, [0, 0, 255]);
    let mut dst = VideoSurface::allocated(4, 1, Depth::Rgb32);

    wipe_into(&mut dst, &a, &b, 0.0, WipeDir::LeftToRight).unwrap();
    assert_eq!(dst.pixels(), a.pixels());
    wipe_into(&mut dst, &a, &b, 1.0, WipeDir::LeftToRight).unwrap();
    assert_eq!(dst.pixels(), b.pixels());
}

#[test]
fn wipe_halfway_splits_along_direction() {
    let a = solid(4, 4, Depth::Rgb24, [255, 0, 0]);
    let b = solid(4, 4, Depth::Rgb24, [0, 255, 0]);
    let mut dst = VideoSurface::allocated(4, 4, Depth::Rgb24);

    wipe_into(&mut dst, &a, &b, 0.5, WipeDir::LeftToRight).unwrap();
    assert_eq!(dst.rgb_at(0, 0, None), Some([0, 255, 0]));
    assert_eq!(dst.rgb_at(3, 0, None), Some([255, 0, 0]));

    wipe_into(&mut dst, &a, &b, 0.5, WipeDir::BottomToTop).unwrap();
    assert_eq!(dst.rgb_at(0, 3, None), Some([0, 255, 0]));
    assert_eq!(dst.rgb_at(0, 0, None), Some([255, 0, 0]));
}

#[test]
fn wipe_repacks_the_incoming_side() {
    let a = solid(2, 1, Depth::Rgb24, [255, 0, 0]);
    let b = solid(2, 1, Depth::Rgb16, [0, 255, 0]);
    let mut dst = VideoSurface::allocated(2, 1, Depth::Rgb24);

    wipe_into(&mut dst, &a, &b, 0.5, WipeDir::RightToLeft).unwrap();
    assert_eq!(dst.rgb_at(0, 0, None), Some([255, 0, 0]));
    assert_eq!(dst.rgb_at(1, 0, None), Some([0, 255, 0]));
}

#[test]
fn wipe_dir_parses_aliases() {
    assert_eq!(WipeDir::from_name("ttb"), Some(WipeDir::TopToBottom));
    assert_eq!(WipeDir::from_name(" Right_To_Left "), Some(WipeDir::RightToLeft));
    assert_eq!(WipeDir::from_name("diagonal"), None);
}
