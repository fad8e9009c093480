use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vector_canvas::draw::circle::Circle;
use vector_canvas::draw::clip::clip;
use vector_canvas::draw::line::Line;
use vector_canvas::draw::polygon::scanline_spans;
use vector_canvas::draw::{Color, Point, RgbaCanvas};

fn star(points: usize, inner: f64, outer: f64) -> Vec<Point> {
    (0..points * 2)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::PI / points as f64;
            let radius = if i % 2 == 0 { outer } else { inner };
            Point::new(
                (500.0 + radius * angle.cos()).round() as i32,
                (500.0 + radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

fn bench_lines(c: &mut Criterion) {
    let mut canvas = RgbaCanvas::new(1000, 1000, Color::WHITE);
    let mut thick = Line::new(Point::new(10, 20), Point::new(990, 870));
    thick.set_thickness(7);
    let mut smooth = thick.clone();
    smooth.set_anti_aliased(true);

    c.bench_function("line_stamped_7px", |b| b.iter(|| thick.draw(black_box(&mut canvas))));
    c.bench_function("line_wu", |b| b.iter(|| smooth.draw(black_box(&mut canvas))));
}

fn bench_circles(c: &mut Criterion) {
    let mut canvas = RgbaCanvas::new(1000, 1000, Color::WHITE);
    let circle = Circle::new(Point::new(500, 500), 400);
    let mut smooth = circle.clone();
    smooth.set_anti_aliased(true);

    c.bench_function("circle_midpoint_r400", |b| b.iter(|| circle.draw(black_box(&mut canvas))));
    c.bench_function("circle_wu_r400", |b| b.iter(|| smooth.draw(black_box(&mut canvas))));
}

fn bench_fill_and_clip(c: &mut Criterion) {
    let outline = star(64, 200.0, 450.0);
    let window = vec![
        Point::new(250, 250),
        Point::new(750, 250),
        Point::new(750, 750),
        Point::new(250, 750),
    ];

    c.bench_function("scanline_star_128", |b| b.iter(|| scanline_spans(black_box(&outline))));
    c.bench_function("clip_star_by_square", |b| {
        b.iter(|| clip(black_box(&outline), black_box(&window)))
    });
}

criterion_group!(benches, bench_lines, bench_circles, bench_fill_and_clip);
criterion_main!(benches);
