use crate::draw::brush::Brush;
use crate::draw::line::distance_to_line;
use crate::draw::model::{Color, Point, VERTEX_MARKER};
use crate::draw::polygon::draw_outline;
use crate::draw::surface::{draw_marker, Surface};

/// Axis-aligned rectangle kept as two opposite corners.
///
/// The four vertices are always derived from the corners in the order
/// top-left, top-right, bottom-right, bottom-left, so dragging in any
/// direction yields the same outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    first_corner: Point,
    opposite_corner: Point,
    vertices: [Point; 4],
    color: Color,
    thickness: u32,
    brush: Brush,
}

impl Rectangle {
    pub fn new(first_corner: Point, opposite_corner: Point) -> Self {
        tracing::debug!(?first_corner, ?opposite_corner, "rectangle created");
        Self {
            first_corner,
            opposite_corner,
            vertices: corners_to_vertices(first_corner, opposite_corner),
            color: Color::BLACK,
            thickness: 1,
            brush: Brush::new(1),
        }
    }

    fn update_vertices(&mut self) {
        self.vertices = corners_to_vertices(self.first_corner, self.opposite_corner);
    }

    pub fn first_corner(&self) -> Point {
        self.first_corner
    }

    pub fn opposite_corner(&self) -> Point {
        self.opposite_corner
    }

    pub fn set_first_corner(&mut self, point: Point) {
        self.first_corner = point;
        self.update_vertices();
    }

    pub fn set_opposite_corner(&mut self, point: Point) {
        self.opposite_corner = point;
        self.update_vertices();
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
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

    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_outline(surface, &self.vertices, true, &self.brush, self.color);
    }

    pub fn draw_handles(&self, surface: &mut dyn Surface) {
        for vertex in &self.vertices {
            draw_marker(surface, *vertex, VERTEX_MARKER);
        }
    }

    /// Inclusive bounding-box membership.
    pub fn contains(&self, point: Point) -> bool {
        let [top_left, _, bottom_right, _] = self.vertices;
        point.x >= top_left.x
            && point.x <= bottom_right.x
            && point.y >= top_left.y
            && point.y <= bottom_right.y
    }

    pub fn near_vertex(&self, point: Point) -> Option<usize> {
        self.vertices
            .iter()
            .position(|vertex| point.is_near(*vertex, VERTEX_MARKER))
    }

    /// Edges are 0 top, 1 right, 2 bottom, 3 left. A hit must be within
    /// `thickness` of the edge's line and inside the edge's box grown by the
    /// vertex marker size.
    pub fn near_edge(&self, point: Point) -> Option<usize> {
        (0..4).find(|&i| {
            let (a, b) = (self.vertices[i], self.vertices[(i + 1) % 4]);
            let Some(distance) = distance_to_line(point, a, b) else {
                return false;
            };
            distance <= self.thickness as f64
                && point.x >= a.x.min(b.x) - VERTEX_MARKER
                && point.x <= a.x.max(b.x) + VERTEX_MARKER
                && point.y >= a.y.min(b.y) - VERTEX_MARKER
                && point.y <= a.y.max(b.y) + VERTEX_MARKER
        })
    }

    pub fn translate(&mut self, offset: Point) {
        self.first_corner += offset;
        self.opposite_corner += offset;
        self.update_vertices();
    }

    /// Drags vertex `index` to `position`, keeping the diagonal vertex fixed.
    pub fn move_vertex(&mut self, index: usize, position: Point) {
        if index >= 4 {
            return;
        }
        let fixed = self.vertices[(index + 2) % 4];
        self.first_corner = position;
        self.opposite_corner = fixed;
        self.update_vertices();
    }

    /// Slides edge `index` along its normal: horizontal edges (even) take
    /// only `offset.y`, vertical edges (odd) only `offset.x`.
    pub fn move_edge(&mut self, index: usize, offset: Point) {
        if index >= 4 {
            return;
        }
        let mut moved = self.vertices;
        for k in [index, (index + 1) % 4] {
            if index % 2 == 0 {
                moved[k].y += offset.y;
            } else {
                moved[k].x += offset.x;
            }
        }
        let (min, max) = moved.iter().skip(1).fold((moved[0], moved[0]), |(min, max), v| {
            (
                Point::new(min.x.min(v.x), min.y.min(v.y)),
                Point::new(max.x.max(v.x), max.y.max(v.y)),
            )
        });
        self.first_corner = min;
        self.opposite_corner = max;
        self.update_vertices();
    }
}

fn corners_to_vertices(a: Point, b: Point) -> [Point; 4] {
    let (left, right) = (a.x.min(b.x), a.x.max(b.x));
    let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}
