use canvas_raster::{Rasterizer, Renderer, Path, Style, Rgba8, Transform};
use canvas_raster::{LineCap, LineJoin, RasterizerScanline, ScanlineU8, RenderingBase};
use canvas_raster::render_scanlines_aa_solid;

use image::{Rgba, RgbaImage};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_square() -> Path {
    let mut p = Path::new();
    p.move_to(0.0, 0.0);
    p.line_to(1.0, 0.0);
    p.line_to(1.0, 1.0);
    p.line_to(0.0, 1.0);
    p.close_polygon();
    p
}

const WHITE : Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED   : Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE  : Rgba<u8> = Rgba([0, 0, 255, 255]);

#[test]
fn unit_square_fills_buffer() {
    init();
    let mut img = RgbaImage::from_pixel(10, 10, WHITE);
    let mut r = Rasterizer::new(&mut img, 10.0);
    let style = Style { fill_color: Rgba8::new(255, 0, 0, 255),
                        stroke_width: 0.0,
                        .. Style::default() };
    r.render_path(&unit_square(), &style, &Transform::new());
    assert!(img.pixels().all(|p| *p == RED));
}

#[test]
fn outside_keeps_background() {
    init();
    let mut img = RgbaImage::from_pixel(10, 10, WHITE);
    let mut r = Rasterizer::new(&mut img, 10.0);
    let style = Style::fill(Rgba8::new(255, 0, 0, 255));
    let half = Transform::new_scale(0.5, 0.5);
    r.render_path(&unit_square(), &style, &half);
    for (x, y, p) in img.enumerate_pixels() {
        // Lower left quarter of the buffer
        let inside = x < 5 && y >= 5;
        assert_eq!(*p, if inside { RED } else { WHITE }, "pixel {} {}", x, y);
    }
}

#[test]
fn transparent_style_leaves_buffer_unchanged() {
    init();
    let before = RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8 * 16, y as u8 * 16, 7, 200]));
    let mut img = before.clone();
    let mut r = Rasterizer::new(&mut img, 4.0);
    let style = Style { fill_color: Rgba8::new(255, 0, 0, 0),
                        stroke_color: Rgba8::new(0, 0, 255, 0),
                        stroke_width: 1.0,
                        dashes: vec![0.5, 0.5],
                        .. Style::default() };
    r.render_path(&Path::ellipse(2.0, 2.0, 1.5, 1.0), &style, &Transform::new());
    assert_eq!(img, before);
}

#[test]
fn non_positive_width_skips_stroke() {
    init();
    let mut img = RgbaImage::new(10, 10);
    let mut r = Rasterizer::new(&mut img, 10.0);
    let style = Style::stroke(Rgba8::new(0, 0, 255, 255), 0.0);
    r.render_path(&unit_square(), &style, &Transform::new());
    let style = Style::stroke(Rgba8::new(0, 0, 255, 255), -0.5);
    r.render_path(&unit_square(), &style, &Transform::new());
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn stroke_paints_over_fill() {
    init();
    let mut img = RgbaImage::from_pixel(10, 10, WHITE);
    let mut r = Rasterizer::new(&mut img, 10.0);
    let style = Style { fill_color: Rgba8::new(255, 0, 0, 255),
                        stroke_color: Rgba8::new(0, 0, 255, 255),
                        stroke_width: 0.2,
                        .. Style::default() };
    let square = Path::rectangle(0.2, 0.2, 0.6, 0.6);
    r.render_path(&square, &style, &Transform::new());
    // Both fill and stroke cover pixel column 2
    assert_eq!(*img.get_pixel(2, 5), BLUE);
    assert_eq!(*img.get_pixel(1, 5), BLUE);
    assert_eq!(*img.get_pixel(5, 5), RED);
    assert_eq!(*img.get_pixel(0, 5), WHITE);
    assert_eq!(*img.get_pixel(0, 0), WHITE);
}

#[test]
fn empty_dashes_match_plain_stroke() {
    init();
    let mut path = Path::new();
    path.move_to(0.1, 0.1);
    path.line_to(0.9, 0.3);
    path.quad_to(0.5, 0.9, 0.2, 0.7);
    let m = Transform::new_rotate(0.1);
    let style = Style { fill_color: Rgba8::transparent(),
                        stroke_color: Rgba8::new(10, 200, 30, 180),
                        stroke_width: 0.05,
                        stroke_capper: LineCap::Round,
                        stroke_joiner: LineJoin::Round,
                        .. Style::default() };

    let mut img = RgbaImage::from_pixel(40, 40, WHITE);
    Rasterizer::new(&mut img, 40.0).render_path(&path, &style, &m);

    let mut expected = RgbaImage::from_pixel(40, 40, WHITE);
    {
        let outline = path.transform(&m).stroke(0.05, LineCap::Round, LineJoin::Round);
        let mut ras = RasterizerScanline::new(40, 40);
        outline.to_rasterizer(&mut ras, 40.0);
        let mut sl = ScanlineU8::new();
        let mut base = RenderingBase::new(&mut expected);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut base, &style.stroke_color);
    }
    assert_eq!(img, expected);
    assert!(img.pixels().any(|p| *p != WHITE));
}

#[test]
fn dashed_stroke_has_gaps() {
    init();
    let mut line = Path::new();
    line.move_to(0.0, 0.5);
    line.line_to(1.0, 0.5);
    let style = Style { fill_color: Rgba8::transparent(),
                        stroke_color: Rgba8::new(0, 0, 255, 255),
                        stroke_width: 0.2,
                        dashes: vec![0.2, 0.2],
                        .. Style::default() };
    let mut img = RgbaImage::new(10, 10);
    Rasterizer::new(&mut img, 10.0).render_path(&line, &style, &Transform::new());
    // Line covers device rows 4 and 5; dashes on 0-2, 4-6 and 8-10
    for &x in [0, 4, 5, 9].iter() {
        assert!(img.get_pixel(x, 4)[3] > 250, "column {}", x);
        assert!(img.get_pixel(x, 5)[3] > 250, "column {}", x);
    }
    for &x in [3, 7].iter() {
        assert_eq!(img.get_pixel(x, 4)[3], 0, "column {}", x);
    }
    assert!(img.rows().nth(0).map(|mut r| r.all(|p| p[3] == 0)).unwrap_or(false));
}

#[test]
fn dash_offset_shifts_pattern() {
    init();
    let mut line = Path::new();
    line.move_to(0.0, 0.5);
    line.line_to(1.0, 0.5);
    let style = Style { fill_color: Rgba8::transparent(),
                        stroke_color: Rgba8::new(0, 0, 255, 255),
                        stroke_width: 0.2,
                        dashes: vec![0.2, 0.2],
                        dash_offset: 0.2,
                        .. Style::default() };
    let mut img = RgbaImage::new(10, 10);
    Rasterizer::new(&mut img, 10.0).render_path(&line, &style, &Transform::new());
    // Starts in a gap, dashes on 2-4 and 6-8
    assert_eq!(img.get_pixel(0, 4)[3], 0);
    assert!(img.get_pixel(3, 4)[3] > 250);
    assert_eq!(img.get_pixel(5, 4)[3], 0);
    assert!(img.get_pixel(7, 4)[3] > 250);
    assert_eq!(img.get_pixel(9, 4)[3], 0);
}

#[test]
fn partial_coverage_blends() {
    init();
    let mut img = RgbaImage::from_pixel(4, 4, WHITE);
    let mut r = Rasterizer::new(&mut img, 1.0);
    // Half a pixel wide
    let style = Style::fill(Rgba8::new(0, 0, 0, 255));
    r.render_path(&Path::rectangle(0.0, 0.0, 0.5, 4.0), &style, &Transform::new());
    let p = img.get_pixel(0, 2);
    assert!(p[0] > 120 && p[0] < 135, "{:?}", p);
    assert_eq!(p[3], 255);
    assert_eq!(*img.get_pixel(1, 2), WHITE);
}

#[test]
fn translucent_fill_on_clear_buffer() {
    init();
    let color = Rgba8::new(255, 0, 0, 128);
    let mut img = RgbaImage::new(10, 10);
    Rasterizer::new(&mut img, 10.0).render_path(&unit_square(), &Style::fill(color), &Transform::new());
    assert!(img.pixels().all(|p| *p == Rgba([255, 0, 0, 128])), "{:?}", img.get_pixel(0, 0));

    // Same color drawn as an image gives the same pixels
    let mut drawn = RgbaImage::new(10, 10);
    let src = RgbaImage::from_pixel(1, 1, Rgba::from(color));
    Rasterizer::new(&mut drawn, 10.0).render_image(&src, &Transform::new());
    assert_eq!(*drawn.get_pixel(5, 5), *img.get_pixel(5, 5));
}

#[test]
fn edge_on_clear_buffer_keeps_color() {
    init();
    let mut img = RgbaImage::new(4, 4);
    let mut r = Rasterizer::new(&mut img, 1.0);
    let style = Style::fill(Rgba8::white());
    r.render_path(&Path::rectangle(0.0, 0.0, 1.5, 4.0), &style, &Transform::new());
    assert_eq!(*img.get_pixel(0, 2), WHITE);
    let edge = img.get_pixel(1, 2);
    assert_eq!(&edge.0[..3], &[255, 255, 255], "{:?}", edge);
    assert!(edge[3] > 120 && edge[3] < 135, "{:?}", edge);
    assert_eq!(img.get_pixel(2, 2)[3], 0);
}
