use vector_canvas::draw::clip::{clip, signed_area2};
use vector_canvas::draw::polygon::Polygon;
use vector_canvas::draw::{Color, Point, Shape, ShapeCollection};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn bounds(vertices: &[Point]) -> (Point, Point) {
    let min = p(
        vertices.iter().map(|v| v.x).min().unwrap(),
        vertices.iter().map(|v| v.y).min().unwrap(),
    );
    let max = p(
        vertices.iter().map(|v| v.x).max().unwrap(),
        vertices.iter().map(|v| v.y).max().unwrap(),
    );
    (min, max)
}

#[test]
fn overlapping_squares_clip_to_their_intersection() {
    let subject = [p(0, 0), p(20, 0), p(20, 20), p(0, 20)];
    let window = [p(10, 10), p(30, 10), p(30, 30), p(10, 30)];

    let result = clip(&subject, &window);
    assert_eq!(bounds(&result), (p(10, 10), p(20, 20)));
    assert_eq!(signed_area2(&result).abs(), 2 * 100);
}

#[test]
fn clip_window_winding_does_not_matter() {
    let subject = [p(0, 0), p(20, 0), p(20, 20), p(0, 20)];
    let window = [p(10, 10), p(30, 10), p(30, 30), p(10, 30)];
    let reversed: Vec<Point> = window.iter().rev().copied().collect();

    assert_eq!(
        signed_area2(&clip(&subject, &window)).abs(),
        signed_area2(&clip(&subject, &reversed)).abs()
    );
}

#[test]
fn collection_clip_stores_a_styled_polygon() {
    let mut shapes = ShapeCollection::new();
    let mut subject = Polygon::from_vertices(vec![p(0, 0), p(40, 0), p(40, 40), p(0, 40)], true);
    subject.set_color(Color::rgb(200, 0, 0));
    subject.set_filled(true);
    subject.set_fill_color(Color::rgb(0, 0, 200));
    let subject = shapes.insert(subject);
    let window = shapes.insert(Polygon::from_vertices(
        vec![p(20, -10), p(60, -10), p(60, 20), p(20, 20)],
        true,
    ));

    let clipped = shapes.clip(subject, window).expect("intersection");
    assert_eq!(shapes.len(), 3);
    let Some(Shape::Polygon(polygon)) = shapes.get(clipped) else {
        panic!("clip result is not a polygon");
    };
    assert!(polygon.is_closed());
    assert_eq!(polygon.color(), Color::rgb(200, 0, 0));
    assert!(polygon.is_filled());
    assert_eq!(bounds(polygon.vertices()), (p(20, 0), p(40, 20)));
}

#[test]
fn disjoint_polygons_store_nothing() {
    let mut shapes = ShapeCollection::new();
    let subject = shapes.insert(Polygon::from_vertices(vec![p(0, 0), p(5, 0), p(5, 5)], true));
    let window = shapes.insert(Polygon::from_vertices(
        vec![p(50, 50), p(60, 50), p(60, 60), p(50, 60)],
        true,
    ));

    assert_eq!(shapes.clip(subject, window), None);
    assert_eq!(shapes.len(), 2);
}
