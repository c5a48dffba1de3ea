use super::*;

#[test]
fn opacity_0_is_noop() {
    let mut dst = [10, 20, 30, 255];
    blend_over_opaque(&mut dst, [200, 200, 200, 255], 0.0);
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn transparent_source_is_noop() {
    let mut dst = [10, 20, 30, 255];
    blend_over_opaque(&mut dst, [255, 255, 255, 0], 1.0);
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn opaque_source_replaces_destination() {
    let mut dst = [0, 0, 0, 255];
    blend_over_opaque(&mut dst, [255, 0, 0, 255], 1.0);
    assert_eq!(dst, [255, 0, 0, 255]);
}

#[test]
fn half_opacity_mixes_with_background() {
    let mut dst = [0, 0, 0, 255];
    blend_over_opaque(&mut dst, [255, 255, 255, 255], 0.5);
    assert_eq!(dst, [128, 128, 128, 255]);
}

#[test]
fn bilinear_hits_pixel_centres_exactly() {
    // 2x1 image: black, white.
    let img = [0, 0, 0, 255, 255, 255, 255, 255];
    assert_eq!(sample_bilinear(&img, 2, 1, 0.5, 0.5), [0, 0, 0, 255]);
    assert_eq!(sample_bilinear(&img, 2, 1, 1.5, 0.5), [255, 255, 255, 255]);
    assert_eq!(sample_bilinear(&img, 2, 1, 1.0, 0.5), [128, 128, 128, 255]);
}

#[test]
fn bilinear_clamps_outside_coordinates() {
    let img = [9, 8, 7, 255];
    assert_eq!(sample_bilinear(&img, 1, 1, -5.0, 40.0), [9, 8, 7, 255]);
}
