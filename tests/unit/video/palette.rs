use super::*;

#[test]
fn gradient_endpoints() {
    let p = Palette::gradient([0, 0, 0], [255, 128, 10]);
    assert_eq!(p.len(), PALETTE_LEN);
    assert_eq!(p.color(0), [0, 0, 0]);
    assert_eq!(p.color(255), [255, 128, 10]);
}

#[test]
fn blend_t_0_is_a_and_t_1_is_b() {
    let a = Palette::gradient([10, 20, 30], [40, 50, 60]);
    let b = Palette::gradient([200, 210, 220], [230, 240, 250]);
    assert_eq!(Palette::blend(&a, &b, 0.0), a);
    assert_eq!(Palette::blend(&a, &b, 1.0), b);
    assert_eq!(Palette::blend(&a, &b, 7.0), b);
}

#[test]
fn blend_midpoint_rounds() {
    let a = Palette::from_colors(&[[0, 0, 0]]);
    let b = Palette::from_colors(&[[255, 101, 3]]);
    assert_eq!(Palette::blend(&a, &b, 0.5).color(0), [128, 51, 2]);
}

#[test]
fn from_colors_pads_with_black() {
    let mut p = Palette::from_colors(&[[1, 2, 3], [4, 5, 6]]);
    assert_eq!(p.color(1), [4, 5, 6]);
    assert_eq!(p.color(2), [0, 0, 0]);
    p.set_color(2, [9, 9, 9]);
    assert_eq!(p.color(2), [9, 9, 9]);
}
