use crate::draw::circle::Circle;
use crate::draw::collection::{RenderSettings, ShapeCollection, ShapeId};
use crate::draw::line::{Endpoint, Line};
use crate::draw::model::{Color, Point, VERTEX_MARKER};
use crate::draw::pacman::{Pacman, PacmanStage};
use crate::draw::polygon::Polygon;
use crate::draw::rectangle::Rectangle;
use crate::draw::shape::Shape;
use crate::draw::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Line,
    Circle,
    Rectangle,
    Polygon,
    Pacman,
    Thickness,
    Select,
}

impl Tool {
    fn creates_shapes(self) -> bool {
        !matches!(self, Tool::Thickness | Tool::Select)
    }
}

/// Style applied to newly created shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color,
    pub thickness: u32,
    pub anti_aliased: bool,
    /// New polygons are filled with this color when set.
    pub fill: Option<Color>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1,
            anti_aliased: false,
            fill: None,
        }
    }
}

impl ShapeStyle {
    fn apply(&self, shape: &mut Shape) {
        shape.set_color(self.color);
        shape.set_thickness(self.thickness);
        shape.set_anti_aliased(self.anti_aliased);
        if let (Shape::Polygon(polygon), Some(fill)) = (shape, self.fill) {
            polygon.set_filled(true);
            polygon.set_fill_color(fill);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Committed(ShapeId),
    Removed(ShapeId),
    Restyled(ShapeId),
}

/// Part of a stored shape grabbed by a select-tool drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    LineEndpoint(Endpoint),
    CircleCenter,
    CircleRadius,
    Vertex(usize),
    Edge(usize),
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    id: ShapeId,
    target: DragTarget,
    last: Point,
}

type Probe = fn(&Shape, Point) -> Option<DragTarget>;

/// Drag targets, highest priority first.
const PROBES: [Probe; 6] = [
    probe_endpoint,
    probe_center,
    probe_radius,
    probe_vertex,
    probe_edge,
    probe_body,
];

fn probe_endpoint(shape: &Shape, point: Point) -> Option<DragTarget> {
    match shape {
        Shape::Line(line) => line.near_endpoint(point).map(DragTarget::LineEndpoint),
        _ => None,
    }
}

fn probe_center(shape: &Shape, point: Point) -> Option<DragTarget> {
    match shape {
        Shape::Circle(circle) if circle.is_near_center(point) => Some(DragTarget::CircleCenter),
        _ => None,
    }
}

fn probe_radius(shape: &Shape, point: Point) -> Option<DragTarget> {
    match shape {
        Shape::Circle(circle) if circle.is_near_radius(point) => Some(DragTarget::CircleRadius),
        _ => None,
    }
}

fn probe_vertex(shape: &Shape, point: Point) -> Option<DragTarget> {
    match shape {
        Shape::Polygon(polygon) => polygon.near_vertex(point).map(DragTarget::Vertex),
        Shape::Rectangle(rect) => rect.near_vertex(point).map(DragTarget::Vertex),
        _ => None,
    }
}

fn probe_edge(shape: &Shape, point: Point) -> Option<DragTarget> {
    match shape {
        Shape::Polygon(polygon) => polygon.near_edge(point).map(DragTarget::Edge),
        Shape::Rectangle(rect) => rect.near_edge(point).map(DragTarget::Edge),
        _ => None,
    }
}

fn probe_body(shape: &Shape, point: Point) -> Option<DragTarget> {
    shape.contains(point).then_some(DragTarget::Body)
}

/// Pointer-driven editing over a [`ShapeCollection`].
///
/// Line, circle and rectangle are press-drag-release; polygon and pacman are
/// built click by click and stay pending until finished.
#[derive(Debug, Clone)]
pub struct DrawInputState {
    tool: Tool,
    style: ShapeStyle,
    shapes: ShapeCollection,
    preview: Option<Shape>,
    pending_polygon: Option<Polygon>,
    pending_pacman: Option<Pacman>,
    drag: Option<Drag>,
}

impl DrawInputState {
    pub fn new(tool: Tool, style: ShapeStyle) -> Self {
        Self::with_shapes(tool, style, ShapeCollection::new())
    }

    pub fn with_shapes(tool: Tool, style: ShapeStyle, shapes: ShapeCollection) -> Self {
        Self {
            tool,
            style,
            shapes,
            preview: None,
            pending_polygon: None,
            pending_pacman: None,
            drag: None,
        }
    }

    pub fn shapes(&self) -> &ShapeCollection {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut ShapeCollection {
        &mut self.shapes
    }

    pub fn into_shapes(self) -> ShapeCollection {
        self.shapes
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switching tools drops any shape still under construction.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.cancel();
            self.tool = tool;
        }
    }

    pub fn cancel(&mut self) {
        self.preview = None;
        self.pending_polygon = None;
        self.pending_pacman = None;
        self.drag = None;
    }

    pub fn style(&self) -> ShapeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        if style.anti_aliased != self.style.anti_aliased {
            self.set_anti_aliasing(style.anti_aliased);
        }
        self.style = style;
    }

    /// Global mode switch: new shapes and every stored shape follow it.
    pub fn set_anti_aliasing(&mut self, enabled: bool) {
        self.style.anti_aliased = enabled;
        self.shapes.set_anti_aliasing(enabled);
        if let Some(preview) = self.preview.as_mut() {
            preview.set_anti_aliased(enabled);
        }
        if let Some(polygon) = self.pending_polygon.as_mut() {
            polygon.set_anti_aliased(enabled);
        }
        if let Some(pacman) = self.pending_pacman.as_mut() {
            pacman.set_anti_aliased(enabled);
        }
    }

    pub fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref()
    }

    pub fn pending_polygon(&self) -> Option<&Polygon> {
        self.pending_polygon.as_ref()
    }

    pub fn pacman_stage(&self) -> Option<PacmanStage> {
        self.pending_pacman.as_ref().map(Pacman::stage)
    }

    /// Shape currently being dragged by the select tool.
    pub fn selected(&self) -> Option<ShapeId> {
        self.drag.map(|drag| drag.id)
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag.map(|drag| drag.target)
    }

    fn styled(&self, shape: impl Into<Shape>) -> Shape {
        let mut shape = shape.into();
        self.style.apply(&mut shape);
        shape
    }

    fn commit(&mut self, shape: Shape) -> InputCommand {
        let kind = shape.kind();
        let id = self.shapes.insert(shape);
        tracing::info!(?kind, "shape committed");
        InputCommand::Committed(id)
    }

    pub fn handle_left_down(&mut self, point: Point) -> Option<InputCommand> {
        match self.tool {
            Tool::Line => {
                self.preview = Some(self.styled(Line::new(point, point)));
                None
            }
            Tool::Circle => {
                self.preview = Some(self.styled(Circle::new(point, 0)));
                None
            }
            Tool::Rectangle => {
                self.preview = Some(self.styled(Rectangle::new(point, point)));
                None
            }
            Tool::Polygon => self.polygon_click(point),
            Tool::Pacman => self.pacman_click(point),
            Tool::Thickness => self.adjust_thickness(point, 1),
            Tool::Select => {
                self.drag = self.find_drag(point);
                if let Some(drag) = self.drag {
                    tracing::debug!(target = ?drag.target, "drag started");
                }
                None
            }
        }
    }

    pub fn handle_move(&mut self, point: Point) {
        match self.preview.as_mut() {
            Some(Shape::Line(line)) => line.set_end(point),
            Some(Shape::Circle(circle)) => circle.set_radius_point(point),
            Some(Shape::Rectangle(rect)) => rect.set_opposite_corner(point),
            Some(_) | None => {}
        }
        if let Some(drag) = self.drag.as_mut() {
            let delta = point - drag.last;
            drag.last = point;
            match self.shapes.get_mut(drag.id) {
                Some(shape) => apply_drag(shape, &mut drag.target, point, delta),
                None => self.drag = None,
            }
        }
    }

    pub fn handle_left_up(&mut self, point: Point) -> Option<InputCommand> {
        self.handle_move(point);
        self.drag = None;
        let shape = self.preview.take()?;
        Some(self.commit(shape))
    }

    /// Drawing tools remove the topmost shape under `point`; the thickness
    /// tool thins it.
    pub fn handle_right_down(&mut self, point: Point) -> Option<InputCommand> {
        if self.tool == Tool::Thickness {
            return self.adjust_thickness(point, -1);
        }
        if !self.tool.creates_shapes() {
            return None;
        }
        let id = self.shapes.pick(point)?;
        self.shapes.remove(id)?;
        if self.selected() == Some(id) {
            self.drag = None;
        }
        Some(InputCommand::Removed(id))
    }

    /// Commits the pending polygon as an open polyline.
    pub fn finish_polygon(&mut self) -> Option<InputCommand> {
        let polygon = self.pending_polygon.take()?;
        if polygon.vertex_count() < 2 {
            return None;
        }
        Some(self.commit(Shape::Polygon(polygon)))
    }

    fn polygon_click(&mut self, point: Point) -> Option<InputCommand> {
        let closes = self.pending_polygon.as_ref().is_some_and(|polygon| {
            polygon.vertex_count() >= 3
                && polygon
                    .vertex(0)
                    .is_some_and(|first| point.is_near(first, VERTEX_MARKER))
        });
        if closes {
            let mut polygon = self.pending_polygon.take()?;
            polygon.close();
            return Some(self.commit(Shape::Polygon(polygon)));
        }

        if self.pending_polygon.is_none() {
            let Shape::Polygon(polygon) = self.styled(Polygon::new()) else {
                return None;
            };
            self.pending_polygon = Some(polygon);
        }
        if let Some(polygon) = self.pending_polygon.as_mut() {
            polygon.add_vertex(point);
        }
        None
    }

    fn pacman_click(&mut self, point: Point) -> Option<InputCommand> {
        let mut pacman = match self.pending_pacman.take() {
            Some(pacman) => pacman,
            None => {
                let mut pacman = Pacman::new();
                pacman.set_color(self.style.color);
                pacman.set_anti_aliased(self.style.anti_aliased);
                pacman
            }
        };
        if pacman.advance(point) == PacmanStage::Complete {
            return Some(self.commit(Shape::Pacman(pacman)));
        }
        self.pending_pacman = Some(pacman);
        None
    }

    fn adjust_thickness(&mut self, point: Point, delta: i32) -> Option<InputCommand> {
        let id = self
            .shapes
            .find_topmost(|shape| shape.thickness().is_some() && shape.contains(point))?;
        let shape = self.shapes.get_mut(id)?;
        let current = shape.thickness()?;
        let next = current.saturating_add_signed(delta).max(1);
        shape.set_thickness(next);
        tracing::debug!(from = current, to = next, "thickness changed");
        Some(InputCommand::Restyled(id))
    }

    fn find_drag(&self, point: Point) -> Option<Drag> {
        PROBES.iter().find_map(|probe| {
            let mut target = None;
            let id = self.shapes.find_topmost(|shape| {
                target = probe(shape, point);
                target.is_some()
            })?;
            Some(Drag {
                id,
                target: target?,
                last: point,
            })
        })
    }

    /// Stored shapes, then whatever is under construction.
    pub fn render(&self, surface: &mut dyn Surface, settings: &RenderSettings) {
        self.shapes.render(surface, settings);
        if let Some(preview) = &self.preview {
            preview.draw(surface);
        }
        if let Some(polygon) = &self.pending_polygon {
            polygon.draw(surface);
            polygon.draw_handles(surface);
        }
    }
}

fn apply_drag(shape: &mut Shape, target: &mut DragTarget, point: Point, delta: Point) {
    match (shape, *target) {
        (Shape::Line(line), DragTarget::LineEndpoint(which)) => line.set_endpoint(which, point),
        (Shape::Circle(circle), DragTarget::CircleCenter) => circle.translate(delta),
        (Shape::Circle(circle), DragTarget::CircleRadius) => circle.set_radius_point(point),
        (Shape::Polygon(polygon), DragTarget::Vertex(index)) => polygon.set_vertex(index, point),
        (Shape::Rectangle(rect), DragTarget::Vertex(index)) => {
            rect.move_vertex(index, point);
            // Renormalizing may relabel the dragged corner.
            if let Some(moved) = rect.vertices().iter().position(|vertex| *vertex == point) {
                *target = DragTarget::Vertex(moved);
            }
        }
        (Shape::Polygon(polygon), DragTarget::Edge(index)) => polygon.move_edge(index, delta),
        (Shape::Rectangle(rect), DragTarget::Edge(index)) => rect.move_edge(index, delta),
        (shape, DragTarget::Body) => shape.translate(delta),
        _ => {}
    }
}
