use crate::draw::brush::Brush;
use crate::draw::line::{distance_to_line, stamp_segment, wu_segment};
use crate::draw::model::{Color, Point, VERTEX_MARKER};
use crate::draw::surface::{draw_marker, Surface};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Filled run `[x_start, x_end]` on row `y`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    closed: bool,
    color: Color,
    thickness: u32,
    brush: Brush,
    filled: bool,
    fill_color: Color,
    image_filled: bool,
    fill_image_path: Option<PathBuf>,
    fill_image: Option<Arc<RgbaImage>>,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            closed: false,
            color: Color::BLACK,
            thickness: 1,
            brush: Brush::new(1),
            filled: false,
            fill_color: Color::BLACK,
            image_filled: false,
            fill_image_path: None,
            fill_image: None,
        }
    }

    /// Builds a polygon from `vertices`, closing it when asked and possible.
    pub fn from_vertices(vertices: Vec<Point>, closed: bool) -> Self {
        let mut polygon = Self {
            vertices,
            ..Self::new()
        };
        if closed {
            polygon.close();
        }
        polygon
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    pub fn add_vertex(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the outline; refused with fewer than three vertices.
    pub fn close(&mut self) -> bool {
        if self.vertices.len() >= 3 {
            self.closed = true;
        }
        self.closed
    }

    pub fn set_vertex(&mut self, index: usize, point: Point) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            *vertex = point;
        }
    }

    pub fn translate(&mut self, offset: Point) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    fn edge_count(&self) -> usize {
        edge_count(self.vertices.len(), self.closed)
    }

    pub fn edge_points(&self, index: usize) -> Option<(Point, Point)> {
        let n = self.vertices.len();
        if index >= n {
            return None;
        }
        Some((self.vertices[index], self.vertices[(index + 1) % n]))
    }

    /// Translates both ends of edge `index`. On an open outline the wrap
    /// edge `n - 1` only moves its first vertex.
    pub fn move_edge(&mut self, index: usize, offset: Point) {
        let n = self.vertices.len();
        if index >= n {
            return;
        }
        self.vertices[index] += offset;
        if self.closed || index + 1 < n {
            self.vertices[(index + 1) % n] += offset;
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

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn is_image_filled(&self) -> bool {
        self.image_filled
    }

    /// Image fill only takes effect once an image is attached.
    pub fn set_image_filled(&mut self, enabled: bool) {
        self.image_filled = enabled;
    }

    pub fn fill_image_path(&self) -> Option<&Path> {
        self.fill_image_path.as_deref()
    }

    pub fn fill_image(&self) -> Option<&RgbaImage> {
        self.fill_image.as_deref()
    }

    /// Decodes the image at `path` and uses it for image fill.
    pub fn load_fill_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("open fill image {}", path.display()))?
            .to_rgba8();
        tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "fill image loaded");
        self.fill_image = Some(Arc::new(image));
        self.fill_image_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn set_fill_image(&mut self, image: RgbaImage, path: Option<PathBuf>) {
        self.fill_image = Some(Arc::new(image));
        self.fill_image_path = path;
    }

    /// Keeps the path for persistence but drops the decoded pixels.
    pub(crate) fn set_fill_image_path(&mut self, path: Option<PathBuf>) {
        self.fill_image_path = path;
        self.fill_image = None;
    }

    /// Smallest and largest corner of the axis-aligned bounding box.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        bounding_box(&self.vertices)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.closed && self.vertices.len() >= 3 {
            match (&self.fill_image, self.image_filled) {
                (Some(image), true) => self.fill_with_image(surface, image),
                _ if self.filled => self.fill(surface),
                _ => {}
            }
        }
        draw_outline(surface, &self.vertices, self.closed, &self.brush, self.color);
    }

    pub fn draw_handles(&self, surface: &mut dyn Surface) {
        for vertex in &self.vertices {
            draw_marker(surface, *vertex, VERTEX_MARKER);
        }
    }

    /// Solid scanline fill with `fill_color`.
    pub fn fill(&self, surface: &mut dyn Surface) {
        for span in scanline_spans(&self.vertices) {
            surface.span(span.y, span.x_start, span.x_end, self.fill_color);
        }
    }

    /// Restricts the fill image, stretched over the bounding box, to the
    /// polygon's interior spans.
    fn fill_with_image(&self, surface: &mut dyn Surface, image: &RgbaImage) {
        let Some((min, max)) = self.bounding_box() else {
            return;
        };
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let box_width = (max.x - min.x + 1) as u64;
        let box_height = (max.y - min.y + 1) as u64;
        for span in scanline_spans(&self.vertices) {
            let v = ((span.y - min.y) as u64 * image.height() as u64 / box_height) as u32;
            let v = v.min(image.height() - 1);
            for x in span.x_start..=span.x_end {
                let u = ((x - min.x) as u64 * image.width() as u64 / box_width) as u32;
                let u = u.min(image.width() - 1);
                let [r, g, b, a] = image.get_pixel(u, v).0;
                surface.plot(x, span.y, Color::rgba(r, g, b, a), 1.0);
            }
        }
    }

    pub fn near_vertex(&self, point: Point) -> Option<usize> {
        self.vertices
            .iter()
            .position(|vertex| point.is_near(*vertex, VERTEX_MARKER))
    }

    /// First drawn edge whose supporting line passes within `thickness`.
    pub fn near_edge(&self, point: Point) -> Option<usize> {
        let n = self.vertices.len();
        (0..self.edge_count()).find(|&i| {
            distance_to_line(point, self.vertices[i], self.vertices[(i + 1) % n])
                .is_some_and(|distance| distance <= self.thickness as f64)
        })
    }

    /// Vertex, then edge, then ray-casting interior test. The interior only
    /// exists for closed outlines with at least three vertices.
    pub fn contains(&self, point: Point) -> bool {
        if self.near_vertex(point).is_some() || self.near_edge(point).is_some() {
            return true;
        }
        self.closed && self.vertices.len() >= 3 && point_in_polygon(&self.vertices, point)
    }

    /// All turns share a sign (collinear turns are ignored).
    pub fn is_convex(&self) -> bool {
        if !self.closed || self.vertices.len() < 3 {
            return false;
        }
        is_convex(&self.vertices)
    }
}

fn edge_count(vertices: usize, closed: bool) -> usize {
    match (vertices, closed) {
        (0 | 1, _) => 0,
        (n, true) => n,
        (n, false) => n - 1,
    }
}

/// Rasterizes consecutive vertex pairs, wrapping only when `closed`.
pub(crate) fn draw_outline(
    surface: &mut dyn Surface,
    vertices: &[Point],
    closed: bool,
    brush: &Brush,
    color: Color,
) {
    let n = vertices.len();
    for i in 0..edge_count(n, closed) {
        let (start, end) = (vertices[i], vertices[(i + 1) % n]);
        if brush.is_anti_aliased() {
            wu_segment(surface, start, end, color);
        } else {
            stamp_segment(surface, start, end, brush, color);
        }
    }
}

pub(crate) fn bounding_box(vertices: &[Point]) -> Option<(Point, Point)> {
    let first = *vertices.first()?;
    Some(vertices.iter().fold((first, first), |(min, max), v| {
        (
            Point::new(min.x.min(v.x), min.y.min(v.y)),
            Point::new(max.x.max(v.x), max.y.max(v.y)),
        )
    }))
}

/// Even-odd ray casting towards +x.
pub fn point_in_polygon(vertices: &[Point], point: Point) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let (px, py) = (point.x as f64, point.y as f64);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].x as f64, vertices[i].y as f64);
        let (xj, yj) = (vertices[j].x as f64, vertices[j].y as f64);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut positive = false;
    let mut negative = false;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b.x - a.x) as i64 * (c.y - b.y) as i64 - (b.y - a.y) as i64 * (c.x - b.x) as i64;
        positive |= cross > 0;
        negative |= cross < 0;
        if positive && negative {
            return false;
        }
    }
    true
}

#[derive(Debug, Clone)]
struct ActiveEdge {
    y_max: i32,
    x: f64,
    inverse_slope: f64,
}

/// Interior spans of the closed outline through `vertices`, row by row.
///
/// Edges are bucketed by their minimum y (horizontal ones skipped). At each
/// scanline newly starting edges join the active list, edges ending on this
/// row leave it, and the remaining ones are paired up in x order.
pub fn scanline_spans(vertices: &[Point]) -> Vec<Span> {
    let n = vertices.len();
    if n < 3 {
        return Vec::new();
    }

    let mut edge_table: BTreeMap<i32, Vec<ActiveEdge>> = BTreeMap::new();
    for i in 0..n {
        let (a, b) = (vertices[i], vertices[(i + 1) % n]);
        if a.y == b.y {
            continue;
        }
        let (low, high) = if a.y < b.y { (a, b) } else { (b, a) };
        edge_table.entry(low.y).or_default().push(ActiveEdge {
            y_max: high.y,
            x: low.x as f64,
            inverse_slope: (high.x - low.x) as f64 / (high.y - low.y) as f64,
        });
    }

    let Some((min_y, max_y)) = bounding_box(vertices).map(|(min, max)| (min.y, max.y)) else {
        return Vec::new();
    };

    let mut spans = Vec::new();
    let mut active: Vec<ActiveEdge> = Vec::new();
    for y in min_y..=max_y {
        if let Some(starting) = edge_table.remove(&y) {
            active.extend(starting);
        }
        active.retain(|edge| edge.y_max != y);
        active.sort_by(|a, b| a.x.total_cmp(&b.x));

        for pair in active.chunks_exact(2) {
            let x_start = pair[0].x.ceil() as i32;
            let x_end = pair[1].x.floor() as i32;
            if x_start <= x_end {
                spans.push(Span { y, x_start, x_end });
            }
        }
        for edge in &mut active {
            edge.x += edge.inverse_slope;
        }
    }
    spans
}
