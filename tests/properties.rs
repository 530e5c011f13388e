//! Invariants that hold for any drawing input.

use agg_canvas::span_gradient::spread;
use agg_canvas::{
    AffineTransform, BlendMode, Canvas, Gradient, LineJoin, Paint, Path, Rgb, SpreadMethod,
    StrokeData, WindRule, GRADIENT_SCALE, GRADIENT_SUBPIXEL_SHIFT,
};

fn star(cx: f64, cy: f64, r: f64) -> Path {
    let mut path = Path::new();
    for i in 0..5 {
        let a = std::f64::consts::PI * (0.5 + 0.8 * i as f64);
        let (x, y) = (cx + r * a.cos(), cy - r * a.sin());
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close();
    path
}

/// A mix of fills, strokes, gradients and blends at odd transforms.
fn busy_scene(canvas: &mut Canvas<'_>) {
    let mtx = AffineTransform::rotation(0.3);
    let gradient = Gradient::radial_focal(60.0, 40.0, 50.0, 70.0, 30.0)
        .with_spread(SpreadMethod::Repeat)
        .with_stop(0.0, Rgb::new(255, 200, 0, 90))
        .with_stop(1.0, Rgb::new(20, 0, 255, 230));
    canvas.clear(Rgb::new(30, 60, 90, 40));
    canvas
        .draw(
            &Path::ellipse(50.0, 30.0, 45.0, 25.0),
            &mtx,
            WindRule::EvenOdd,
            &Paint::gradient(gradient),
            &Paint::color(Rgb::new(250, 10, 100, 180)).with_opacity(0.7),
            &StrokeData::new(5.0)
                .with_join(LineJoin::Round)
                .with_dash(vec![7.0, 3.0, 1.0], 2.5),
        )
        .unwrap();
    canvas
        .draw(
            &star(50.0, 50.0, 40.0),
            &AffineTransform::identity(),
            WindRule::NonZero,
            &Paint::color(Rgb::new(0, 255, 128, 77)),
            &Paint::none(),
            &StrokeData::default(),
        )
        .unwrap();

    let mut other = Canvas::new(40, 40).unwrap();
    other.clear(Rgb::new(255, 255, 255, 200));
    canvas.blend(&other, BlendMode::SrcOver, 0.6, 70.3, -12.9);
    canvas.blend(&other, BlendMode::DstIn, 0.8, -5.0, 60.0);
}

#[test]
fn test_no_paint_is_noop() {
    let mut mem: Vec<u8> = (0..100 * 60 * 4).map(|i| (i * 7 % 251) as u8).collect();
    let before = mem.clone();
    {
        let mut canvas = Canvas::from_buffer(&mut mem, 100, 60, 400).unwrap();
        canvas
            .draw(
                &star(50.0, 30.0, 25.0),
                &AffineTransform::scaling(1.5, 0.5),
                WindRule::EvenOdd,
                &Paint::none(),
                &Paint::none(),
                &StrokeData::new(3.0),
            )
            .unwrap();
    }
    assert_eq!(mem, before);
}

#[test]
fn test_clear_is_idempotent() {
    let color = Rgb::new(12, 34, 56, 78);
    let mut once = Canvas::new(9, 7).unwrap();
    once.clear(color);
    let mut twice = Canvas::new(9, 7).unwrap();
    twice.clear(color);
    twice.clear(color);
    assert_eq!(once.data(), twice.data());
}

#[test]
fn test_premultiplied_invariant() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    busy_scene(&mut canvas);
    for px in canvas.data().chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3], "{px:?}");
    }
}

#[test]
fn test_rgba_round_trip() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    busy_scene(&mut canvas);
    let original = canvas.data().to_vec();
    canvas.convert_to_rgba();

    for (bgra, rgba) in original.chunks_exact(4).zip(canvas.data().chunks_exact(4)) {
        let a = rgba[3] as u32;
        assert_eq!(a, bgra[3] as u32);
        let back = |c: u8| ((c as u32 * a + 127) / 255) as i32;
        assert!((back(rgba[0]) - bgra[2] as i32).abs() <= 1, "{bgra:?} {rgba:?}");
        assert!((back(rgba[1]) - bgra[1] as i32).abs() <= 1, "{bgra:?} {rgba:?}");
        assert!((back(rgba[2]) - bgra[0] as i32).abs() <= 1, "{bgra:?} {rgba:?}");
    }
}

#[test]
fn test_clip_containment() {
    const GUARD: usize = 64;
    const SENTINEL: u8 = 0xA5;
    let (width, height, stride) = (30u32, 20u32, 30 * 4 + 12);
    let body = stride * height as usize;
    let mut mem = vec![SENTINEL; GUARD + body + GUARD];

    {
        let mut canvas =
            Canvas::from_buffer(&mut mem[GUARD..GUARD + body], width, height, stride).unwrap();
        let paint = Paint::color(Rgb::opaque(1, 2, 3));
        let stroke = StrokeData::new(40.0);
        let shapes = [
            Path::rect(-1.0e9, -1.0e9, 2.0e9, 2.0e9),
            Path::ellipse(15.0, 10.0, 1.0e6, 3.0),
            Path::ellipse(-500.0, -500.0, 100.0, 100.0),
            star(15.0, 10.0, 400.0),
        ];
        for path in &shapes {
            for mtx in [
                AffineTransform::identity(),
                AffineTransform::rotation(1.0),
                AffineTransform::scaling(1.0e3, 1.0e-3),
            ] {
                canvas
                    .draw(path, &mtx, WindRule::NonZero, &paint, &paint, &stroke)
                    .unwrap();
            }
        }
        let mut big = Canvas::new(100, 100).unwrap();
        big.clear(Rgb::WHITE);
        canvas.blend(&big, BlendMode::SrcOver, 1.0, -35.0, -40.0);
    }

    assert!(mem[..GUARD].iter().all(|&b| b == SENTINEL));
    assert!(mem[GUARD + body..].iter().all(|&b| b == SENTINEL));
    for y in 0..height as usize {
        let row = &mem[GUARD + y * stride..GUARD + (y + 1) * stride];
        assert!(
            row[width as usize * 4..].iter().all(|&b| b == SENTINEL),
            "row {y} padding overwritten"
        );
        assert!(row[..width as usize * 4].iter().any(|&b| b != SENTINEL));
    }
}

#[test]
fn test_reflect_spread_symmetry() {
    for d in [GRADIENT_SCALE, GRADIENT_SCALE << GRADIENT_SUBPIXEL_SHIFT] {
        for v in -4 * d..4 * d {
            assert_eq!(
                spread(v, d, SpreadMethod::Reflect),
                spread((2 * d - v).rem_euclid(2 * d), d, SpreadMethod::Reflect),
                "d={d} v={v}"
            );
        }
    }
}

#[test]
fn test_fill_rules_differ_only_in_overlap() {
    let path = star(100.0, 100.0, 80.0);
    let paint = Paint::color(Rgb::BLACK);
    let render = |rule: WindRule| {
        let mut canvas = Canvas::new(200, 200).unwrap();
        canvas
            .draw(
                &path,
                &AffineTransform::identity(),
                rule,
                &paint,
                &Paint::none(),
                &StrokeData::default(),
            )
            .unwrap();
        canvas
    };
    let non_zero = render(WindRule::NonZero);
    let even_odd = render(WindRule::EvenOdd);

    assert_eq!(non_zero.pixel(100, 100), Some([0, 0, 0, 255]));
    assert_eq!(even_odd.pixel(100, 100), Some([0, 0, 0, 0]));
    // Inside a tip the winding number is one under both rules.
    assert_eq!(non_zero.pixel(100, 35), Some([0, 0, 0, 255]));
    assert_eq!(even_odd.pixel(100, 35), Some([0, 0, 0, 255]));

    // The inner pentagon has circumradius 80 · 0.382 ≈ 30.6.
    for y in 0..200u32 {
        for x in 0..200u32 {
            let (a, b) = (non_zero.pixel(x, y), even_odd.pixel(x, y));
            if a != b {
                let (dx, dy) = (x as f64 + 0.5 - 100.0, y as f64 + 0.5 - 100.0);
                assert!((dx * dx + dy * dy).sqrt() < 32.0, "({x},{y})");
            }
        }
    }
}

#[test]
fn test_stroke_ignores_fill_rule() {
    let path = star(100.0, 100.0, 80.0);
    let stroke = Paint::color(Rgb::new(200, 0, 50, 255));
    let data = StrokeData::new(6.0).with_miter_limit(10.0);
    let render = |rule: WindRule| {
        let mut canvas = Canvas::new(200, 200).unwrap();
        canvas
            .draw(
                &path,
                &AffineTransform::identity(),
                rule,
                &Paint::none(),
                &stroke,
                &data,
            )
            .unwrap();
        canvas.data().to_vec()
    };
    assert_eq!(render(WindRule::NonZero), render(WindRule::EvenOdd));
}
