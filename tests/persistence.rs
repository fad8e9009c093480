use std::fs;

use tempfile::tempdir;
use vector_canvas::draw::circle::Circle;
use vector_canvas::draw::line::Line;
use vector_canvas::draw::pacman::Pacman;
use vector_canvas::draw::persist::{load_drawing, save_drawing};
use vector_canvas::draw::polygon::Polygon;
use vector_canvas::draw::rectangle::Rectangle;
use vector_canvas::draw::{Color, Point, RenderSettings, Shape, ShapeCollection, ShapeKind};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

#[test]
fn saved_drawing_loads_back_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drawing.txt");

    let mut shapes = ShapeCollection::new();
    let mut line = Line::new(p(1, 2), p(30, 40));
    line.set_thickness(3);
    line.set_color(Color::rgb(10, 20, 30));
    shapes.insert(line);
    shapes.insert(Circle::new(p(50, 50), 12));
    shapes.insert(Rectangle::new(p(40, 5), p(5, 20)));
    shapes.insert(Polygon::from_vertices(vec![p(0, 0), p(9, 0), p(4, 8)], false));
    shapes.insert(Pacman::from_parts(p(70, 70), 15, 0.5, 5.8));

    save_drawing(&path, &shapes).unwrap();
    let loaded = load_drawing(&path).unwrap();

    assert_eq!(loaded.skipped, 0);
    let kinds: Vec<ShapeKind> = loaded.shapes.iter().map(|(_, shape)| shape.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ShapeKind::Line,
            ShapeKind::Circle,
            ShapeKind::Rectangle,
            ShapeKind::Polygon,
            ShapeKind::Pacman
        ]
    );
    let (_, first) = loaded.shapes.iter().next().unwrap();
    assert_eq!(first.thickness(), Some(3));
    assert_eq!(first.color(), Color::rgb(10, 20, 30));
}

#[test]
fn malformed_lines_are_counted_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drawing.txt");
    fs::write(
        &path,
        "CIRCLE 10 10 5 #000000\nTRIANGLE 1 2 3\n\nLINE 0 0 x 5 #000000 1\nCIRCLE 1 1 1 #ff0000\n",
    )
    .unwrap();

    let loaded = load_drawing(&path).unwrap();
    assert_eq!(loaded.shapes.len(), 2);
    assert_eq!(loaded.skipped, 2);
}

#[test]
fn missing_drawing_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_drawing(&dir.path().join("absent.txt")).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn image_filled_polygon_survives_round_trip() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("fill.png");
    let mut image = image::RgbaImage::new(2, 1);
    image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
    image.save(&image_path).unwrap();

    let mut polygon = Polygon::from_vertices(vec![p(10, 10), p(30, 10), p(30, 30), p(10, 30)], true);
    polygon.load_fill_image(&image_path).unwrap();
    polygon.set_image_filled(true);
    let mut shapes = ShapeCollection::new();
    shapes.insert(polygon);

    let drawing_path = dir.path().join("drawing.txt");
    save_drawing(&drawing_path, &shapes).unwrap();
    let loaded = load_drawing(&drawing_path).unwrap();

    let (_, shape) = loaded.shapes.iter().next().unwrap();
    let Shape::Polygon(polygon) = shape else {
        panic!("expected a polygon");
    };
    assert!(polygon.is_image_filled());
    assert!(polygon.fill_image().is_some());

    let canvas = loaded.shapes.render_to_canvas(40, 40, &RenderSettings::default());
    assert_eq!(canvas.pixel(12, 20), Some(Color::rgb(255, 0, 0)));
    assert_eq!(canvas.pixel(28, 20), Some(Color::rgb(0, 0, 255)));
}

#[test]
fn rendered_drawing_writes_png() {
    let dir = tempdir().unwrap();
    let mut shapes = ShapeCollection::new();
    shapes.insert(Line::new(p(0, 0), p(15, 15)));
    let canvas = shapes.render_to_canvas(16, 16, &RenderSettings::default());

    let out = dir.path().join("out.png");
    canvas.save_png(&out).unwrap();

    let decoded = image::open(&out).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert_eq!(decoded.get_pixel(7, 7).0, [0, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(15, 0).0, [255, 255, 255, 255]);
}
