use crate::draw::brush::Brush;
use crate::draw::model::{Color, Point, ENDPOINT_MARKER};
use crate::draw::surface::{draw_marker, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    color: Color,
    thickness: u32,
    brush: Brush,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        tracing::debug!(?start, ?end, "line created");
        Self {
            start,
            end,
            color: Color::BLACK,
            thickness: 1,
            brush: Brush::new(1),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn set_start(&mut self, point: Point) {
        self.start = point;
    }

    pub fn set_end(&mut self, point: Point) {
        self.end = point;
    }

    pub fn set_endpoint(&mut self, which: Endpoint, point: Point) {
        match which {
            Endpoint::Start => self.start = point,
            Endpoint::End => self.end = point,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Replaces the brush; the anti-aliasing flag carries over.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.max(1);
        let anti_aliased = self.brush.is_anti_aliased();
        self.brush = Brush::new(self.thickness);
        self.brush.set_anti_aliased(anti_aliased);
    }

    pub fn is_anti_aliased(&self) -> bool {
        self.brush.is_anti_aliased()
    }

    pub fn set_anti_aliased(&mut self, enabled: bool) {
        self.brush.set_anti_aliased(enabled);
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.is_anti_aliased() {
            wu_segment(surface, self.start, self.end, self.color);
        } else {
            stamp_segment(surface, self.start, self.end, &self.brush, self.color);
        }
    }

    pub fn draw_handles(&self, surface: &mut dyn Surface) {
        draw_marker(surface, self.start, ENDPOINT_MARKER);
        draw_marker(surface, self.end, ENDPOINT_MARKER);
    }

    /// Distance to the infinite line through both endpoints, not the segment.
    pub fn contains(&self, point: Point) -> bool {
        distance_to_line(point, self.start, self.end)
            .is_some_and(|distance| distance <= self.thickness as f64)
    }

    pub fn near_endpoint(&self, point: Point) -> Option<Endpoint> {
        if point.is_near(self.start, ENDPOINT_MARKER) {
            Some(Endpoint::Start)
        } else if point.is_near(self.end, ENDPOINT_MARKER) {
            Some(Endpoint::End)
        } else {
            None
        }
    }

    pub fn translate(&mut self, offset: Point) {
        self.start += offset;
        self.end += offset;
    }
}

/// Perpendicular distance from `point` to the line through `a` and `b`.
/// `None` when `a == b`.
pub(crate) fn distance_to_line(point: Point, a: Point, b: Point) -> Option<f64> {
    let length = a.distance(b);
    if length == 0.0 {
        return None;
    }
    let (x, y) = (point.x as f64, point.y as f64);
    let (x1, y1) = (a.x as f64, a.y as f64);
    let (x2, y2) = (b.x as f64, b.y as f64);
    let numerator = ((y2 - y1) * x - (x2 - x1) * y + x2 * y1 - y2 * x1).abs();
    Some(numerator / length)
}

/// Stamps `brush` at every DDA step from `start` to `end`. Returns the number
/// of stamps; a zero-length segment draws nothing.
pub fn stamp_segment(
    surface: &mut dyn Surface,
    start: Point,
    end: Point,
    brush: &Brush,
    color: Color,
) -> u64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return 0;
    }

    let x_increment = dx as f32 / steps as f32;
    let y_increment = dy as f32 / steps as f32;
    let mut stamps: u64 = 0;
    for step in 0..=steps {
        let x = (start.x as f32 + x_increment * step as f32).round() as i32;
        let y = (start.y as f32 + y_increment * step as f32).round() as i32;
        stamp(surface, Point::new(x, y), brush, color);
        stamps = stamps.saturating_add(1);
    }
    stamps
}

pub fn stamp(surface: &mut dyn Surface, center: Point, brush: &Brush, color: Color) {
    for (dx, dy, coverage) in brush.stamp_offsets() {
        surface.plot(center.x + dx, center.y + dy, color, coverage);
    }
}

/// Xiaolin Wu segment at 1px width. Every step along the major axis plots two
/// pixels with complementary coverage; axis-aligned segments plot solid pixels.
pub fn wu_segment(surface: &mut dyn Surface, start: Point, end: Point, color: Color) {
    if start == end {
        return;
    }
    let (mut x1, mut y1, mut x2, mut y2) = (start.x, start.y, end.x, end.y);

    if x1 == x2 {
        for y in y1.min(y2)..=y1.max(y2) {
            surface.plot(x1, y, color, 1.0);
        }
        return;
    }
    if y1 == y2 {
        for x in x1.min(x2)..=x1.max(x2) {
            surface.plot(x, y1, color, 1.0);
        }
        return;
    }

    let steep = (y2 - y1).abs() > (x2 - x1).abs();
    if steep {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let gradient = (y2 - y1) as f32 / (x2 - x1) as f32;
    for x in x1..=x2 {
        let y = y1 as f32 + gradient * (x - x1) as f32;
        let y_floor = y.floor();
        let frac = y - y_floor;
        let y_floor = y_floor as i32;
        if steep {
            surface.plot(y_floor, x, color, 1.0 - frac);
            surface.plot(y_floor + 1, x, color, frac);
        } else {
            surface.plot(x, y_floor, color, 1.0 - frac);
            surface.plot(x, y_floor + 1, color, frac);
        }
    }
}
