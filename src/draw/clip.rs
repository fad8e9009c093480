//! Sutherland–Hodgman polygon clipping over plain vertex lists.

use crate::draw::model::Point;

const PARALLEL_EPSILON: f64 = 1e-6;

/// Twice the signed shoelace area. Positive for clockwise winding on a
/// y-down screen (counterclockwise in y-up math coordinates).
pub fn signed_area2(vertices: &[Point]) -> i64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum()
}

fn cross(edge_start: Point, edge_end: Point, point: Point) -> i64 {
    let (dx1, dy1) = ((edge_end.x - edge_start.x) as i64, (edge_end.y - edge_start.y) as i64);
    let (dx2, dy2) = ((point.x - edge_start.x) as i64, (point.y - edge_start.y) as i64);
    dx1 * dy2 - dy1 * dx2
}

/// Intersection of line `s`-`p` with line `edge_start`-`edge_end`, rounded to
/// the pixel grid. Near-parallel lines yield `s`.
fn intersect(s: Point, p: Point, edge_start: Point, edge_end: Point) -> Point {
    let (x1, y1, x2, y2) = (s.x as f64, s.y as f64, p.x as f64, p.y as f64);
    let (x3, y3, x4, y4) = (
        edge_start.x as f64,
        edge_start.y as f64,
        edge_end.x as f64,
        edge_end.y as f64,
    );
    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < PARALLEL_EPSILON {
        return s;
    }
    let pre = x1 * y2 - y1 * x2;
    let post = x3 * y4 - y3 * x4;
    let x = (pre * (x3 - x4) - (x1 - x2) * post) / denom;
    let y = (pre * (y3 - y4) - (y1 - y2) * post) / denom;
    Point::new(x.round() as i32, y.round() as i32)
}

/// Clips `subject` against the convex polygon `clip`.
///
/// The clip polygon may wind either way; its signed area decides which side of
/// each directed edge is inside. Points on an edge count as inside. Returns an
/// empty list when the subject is empty, the clip polygon has fewer than three
/// vertices or no area, or fewer than three vertices survive.
pub fn clip(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    if subject.is_empty() || clip.len() < 3 {
        return Vec::new();
    }
    let orientation = signed_area2(clip).signum();
    if orientation == 0 {
        return Vec::new();
    }
    let inside = |point: Point, a: Point, b: Point| cross(a, b, point) * orientation >= 0;

    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        let (edge_start, edge_end) = (clip[i], clip[(i + 1) % clip.len()]);
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };

        let mut s = last;
        for &p in &input {
            match (inside(s, edge_start, edge_end), inside(p, edge_start, edge_end)) {
                (true, true) => output.push(p),
                (false, true) => {
                    output.push(intersect(s, p, edge_start, edge_end));
                    output.push(p);
                }
                (true, false) => output.push(intersect(s, p, edge_start, edge_end)),
                (false, false) => {}
            }
            s = p;
        }
    }

    if output.len() < 3 {
        output.clear();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn square(min: i32, max: i32) -> Vec<Point> {
        vec![p(min, min), p(max, min), p(max, max), p(min, max)]
    }

    fn sorted(mut points: Vec<Point>) -> Vec<(i32, i32)> {
        points.sort_by_key(|pt| (pt.x, pt.y));
        points.dedup();
        points.into_iter().map(|pt| (pt.x, pt.y)).collect()
    }

    #[test]
    fn clipping_against_itself_is_identity() {
        let s = square(0, 10);
        assert_eq!(clip(&s, &s), s);
    }

    #[test]
    fn fully_outside_is_empty() {
        assert!(clip(&square(20, 30), &square(0, 10)).is_empty());
    }

    #[test]
    fn superset_clip_returns_subject() {
        let subject = square(2, 8);
        assert_eq!(clip(&subject, &square(0, 10)), subject);
    }

    #[test]
    fn overlap_is_intersection_for_either_winding() {
        let subject = square(5, 15);
        let clockwise = square(0, 10);
        let mut counter: Vec<Point> = clockwise.clone();
        counter.reverse();
        assert!(signed_area2(&clockwise) > 0);
        assert!(signed_area2(&counter) < 0);

        let expected = vec![(5, 5), (5, 10), (10, 5), (10, 10)];
        assert_eq!(sorted(clip(&subject, &clockwise)), expected);
        assert_eq!(sorted(clip(&subject, &counter)), expected);
    }

    #[test]
    fn triangle_clip_cuts_corner() {
        let triangle = vec![p(0, 0), p(10, 0), p(0, 10)];
        let result = clip(&square(0, 10), &triangle);
        assert_eq!(sorted(result), vec![(0, 0), (0, 10), (10, 0)]);
    }

    #[test]
    fn degenerate_inputs_yield_empty() {
        assert!(clip(&[], &square(0, 10)).is_empty());
        assert!(clip(&square(0, 10), &[p(0, 0), p(5, 5)]).is_empty());
        assert!(clip(&square(0, 10), &[p(0, 0), p(5, 5), p(10, 10)]).is_empty());
    }

    #[test]
    fn parallel_intersection_falls_back_to_start() {
        assert_eq!(intersect(p(0, 0), p(10, 0), p(0, 5), p(10, 5)), p(0, 0));
        assert_eq!(intersect(p(0, 0), p(10, 10), p(0, 10), p(10, 0)), p(5, 5));
    }
}
