use canvas_raster::{Rasterizer, Renderer, Transform};

use image::{Rgba, RgbaImage};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const RED   : Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN : Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE  : Rgba<u8> = Rgba([0, 0, 255, 255]);
const WHITE : Rgba<u8> = Rgba([255, 255, 255, 255]);
const CLEAR : Rgba<u8> = Rgba([0, 0, 0, 0]);

fn source() -> RgbaImage {
    let mut src = RgbaImage::new(2, 2);
    src.put_pixel(0, 0, RED);
    src.put_pixel(1, 0, GREEN);
    src.put_pixel(0, 1, BLUE);
    src.put_pixel(1, 1, WHITE);
    src
}

#[test]
fn identity_draws_upright() {
    init();
    let src = source();
    let mut img = RgbaImage::new(2, 2);
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new());
    assert_eq!(img, src);
}

#[test]
fn lower_left_corner_at_origin() {
    init();
    let src = source();
    let mut img = RgbaImage::new(2, 4);
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new());
    assert_eq!(*img.get_pixel(0, 0), CLEAR);
    assert_eq!(*img.get_pixel(1, 1), CLEAR);
    assert_eq!(*img.get_pixel(0, 2), RED);
    assert_eq!(*img.get_pixel(1, 2), GREEN);
    assert_eq!(*img.get_pixel(0, 3), BLUE);
    assert_eq!(*img.get_pixel(1, 3), WHITE);
}

#[test]
fn translation_moves_up_and_right() {
    init();
    let src = source();
    let mut img = RgbaImage::new(4, 4);
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new_translate(1.0, 1.0));
    assert_eq!(*img.get_pixel(1, 1), RED);
    assert_eq!(*img.get_pixel(2, 1), GREEN);
    assert_eq!(*img.get_pixel(1, 2), BLUE);
    assert_eq!(*img.get_pixel(2, 2), WHITE);
    for &(x, y) in [(0, 0), (3, 0), (0, 3), (3, 3), (0, 1), (3, 2)].iter() {
        assert_eq!(*img.get_pixel(x, y), CLEAR, "pixel {} {}", x, y);
    }
}

#[test]
fn dpm_scales_image() {
    init();
    let mut src = RgbaImage::new(2, 2);
    src.put_pixel(0, 0, RED);
    src.put_pixel(1, 0, RED);
    src.put_pixel(0, 1, BLUE);
    src.put_pixel(1, 1, BLUE);
    let mut img = RgbaImage::new(4, 4);
    Rasterizer::new(&mut img, 2.0).render_image(&src, &Transform::new());
    for x in 0 .. 4 {
        assert_eq!(*img.get_pixel(x, 0), RED);
        assert_eq!(*img.get_pixel(x, 3), BLUE);
        // Interpolated between the rows
        let (p1, p2) = (img.get_pixel(x, 1), img.get_pixel(x, 2));
        assert!(p1[0] > p1[2], "{:?}", p1);
        assert!(p2[2] > p2[0], "{:?}", p2);
        assert_eq!(p1[3], 255);
        assert_eq!(p2[3], 255);
    }
}

#[test]
fn drawn_over_background() {
    init();
    let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
    let mut img = RgbaImage::from_pixel(2, 2, WHITE);
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new());
    assert!(img.pixels().all(|p| *p == WHITE));

    let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new());
    assert!(img.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
}

#[test]
fn singular_transform_draws_nothing() {
    init();
    let src = source();
    let mut img = RgbaImage::new(4, 4);
    Rasterizer::new(&mut img, 1.0).render_image(&src, &Transform::new_scale(0.0, 1.0));
    assert!(img.pixels().all(|p| *p == CLEAR));
}
