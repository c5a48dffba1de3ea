use super::*;

fn hd() -> Canvas {
    Canvas::HD
}

#[test]
fn matching_aspect_fills_canvas() {
    let p = aspect_fit(3840, 2160, hd()).unwrap();
    assert_eq!(
        p,
        Placement {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080
        }
    );
}

#[test]
fn wide_image_is_letterboxed_top_and_bottom() {
    // 2:1 onto 16:9 -> 1920x960, 60px bands.
    let p = aspect_fit(2000, 1000, hd()).unwrap();
    assert_eq!(p.width, 1920);
    assert_eq!(p.height, 960);
    assert_eq!(p.x, 0);
    assert_eq!(p.y, 60);
}

#[test]
fn square_image_is_pillarboxed() {
    let p = aspect_fit(1024, 1024, hd()).unwrap();
    assert_eq!(p.width, 1080);
    assert_eq!(p.height, 1080);
    assert_eq!(p.x, 420);
    assert_eq!(p.y, 0);
}

#[test]
fn portrait_image_on_portrait_canvas() {
    let canvas = Canvas {
        width: 1080,
        height: 1920,
    };
    let p = aspect_fit(1080, 1350, canvas).unwrap();
    assert_eq!(p.width, 1080);
    assert_eq!(p.height, 1350);
    assert_eq!(p.y, 285);
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(aspect_fit(0, 10, hd()).is_err());
    assert!(aspect_fit(10, 0, hd()).is_err());
    assert!(
        aspect_fit(
            10,
            10,
            Canvas {
                width: 0,
                height: 10
            }
        )
        .is_err()
    );
}

#[test]
fn placement_never_leaves_canvas() {
    let canvases = [
        Canvas {
            width: 1920,
            height: 1080,
        },
        Canvas {
            width: 1080,
            height: 1920,
        },
        Canvas {
            width: 7,
            height: 3,
        },
        Canvas {
            width: 1,
            height: 1,
        },
        Canvas {
            width: 641,
            height: 479,
        },
    ];
    let dims = [1u32, 2, 3, 5, 17, 99, 640, 1001, 1920, 4097, 10_000];
    for canvas in canvases {
        for &w in &dims {
            for &h in &dims {
                let p = aspect_fit(w, h, canvas).unwrap();
                assert!(p.width >= 1 && p.height >= 1);
                assert!(p.fits(canvas), "{w}x{h} on {canvas:?} -> {p:?}");
            }
        }
    }
}

#[test]
fn placement_is_centred_within_a_pixel() {
    let p = aspect_fit(1000, 333, hd()).unwrap();
    let top = p.y;
    let bottom = 1080 - (p.y + p.height);
    assert!(top.abs_diff(bottom) <= 1);
}
