use crate::draw::circle::Circle;
use crate::draw::line::Line;
use crate::draw::model::{Color, Point};
use crate::draw::pacman::Pacman;
use crate::draw::polygon::Polygon;
use crate::draw::rectangle::Rectangle;
use crate::draw::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Circle,
    Rectangle,
    Polygon,
    Pacman,
}

/// Every drawable primitive the canvas stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Pacman(Pacman),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Pacman(_) => ShapeKind::Pacman,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line(line) => line.draw(surface),
            Shape::Circle(circle) => circle.draw(surface),
            Shape::Rectangle(rect) => rect.draw(surface),
            Shape::Polygon(polygon) => polygon.draw(surface),
            Shape::Pacman(pacman) => pacman.draw(surface),
        }
    }

    /// Marker squares over the editable points. Pacman has none.
    pub fn draw_handles(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line(line) => line.draw_handles(surface),
            Shape::Circle(circle) => circle.draw_handles(surface),
            Shape::Rectangle(rect) => rect.draw_handles(surface),
            Shape::Polygon(polygon) => polygon.draw_handles(surface),
            Shape::Pacman(_) => {}
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Line(line) => line.contains(point),
            Shape::Circle(circle) => circle.contains(point),
            Shape::Rectangle(rect) => rect.contains(point),
            Shape::Polygon(polygon) => polygon.contains(point),
            Shape::Pacman(pacman) => pacman.contains(point),
        }
    }

    pub fn translate(&mut self, offset: Point) {
        match self {
            Shape::Line(line) => line.translate(offset),
            Shape::Circle(circle) => circle.translate(offset),
            Shape::Rectangle(rect) => rect.translate(offset),
            Shape::Polygon(polygon) => polygon.translate(offset),
            Shape::Pacman(pacman) => pacman.translate(offset),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Line(line) => line.color(),
            Shape::Circle(circle) => circle.color(),
            Shape::Rectangle(rect) => rect.color(),
            Shape::Polygon(polygon) => polygon.color(),
            Shape::Pacman(pacman) => pacman.color(),
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Line(line) => line.set_color(color),
            Shape::Circle(circle) => circle.set_color(color),
            Shape::Rectangle(rect) => rect.set_color(color),
            Shape::Polygon(polygon) => polygon.set_color(color),
            Shape::Pacman(pacman) => pacman.set_color(color),
        }
    }

    /// Stroke thickness, for shapes drawn with a brush.
    pub fn thickness(&self) -> Option<u32> {
        match self {
            Shape::Line(line) => Some(line.thickness()),
            Shape::Rectangle(rect) => Some(rect.thickness()),
            Shape::Polygon(polygon) => Some(polygon.thickness()),
            Shape::Circle(_) | Shape::Pacman(_) => None,
        }
    }

    /// Returns false for shapes without a brush.
    pub fn set_thickness(&mut self, thickness: u32) -> bool {
        match self {
            Shape::Line(line) => line.set_thickness(thickness),
            Shape::Rectangle(rect) => rect.set_thickness(thickness),
            Shape::Polygon(polygon) => polygon.set_thickness(thickness),
            Shape::Circle(_) | Shape::Pacman(_) => return false,
        }
        true
    }

    pub fn is_anti_aliased(&self) -> bool {
        match self {
            Shape::Line(line) => line.is_anti_aliased(),
            Shape::Circle(circle) => circle.is_anti_aliased(),
            Shape::Rectangle(rect) => rect.is_anti_aliased(),
            Shape::Polygon(polygon) => polygon.is_anti_aliased(),
            Shape::Pacman(pacman) => pacman.is_anti_aliased(),
        }
    }

    pub fn set_anti_aliased(&mut self, enabled: bool) {
        match self {
            Shape::Line(line) => line.set_anti_aliased(enabled),
            Shape::Circle(circle) => circle.set_anti_aliased(enabled),
            Shape::Rectangle(rect) => rect.set_anti_aliased(enabled),
            Shape::Polygon(polygon) => polygon.set_anti_aliased(enabled),
            Shape::Pacman(pacman) => pacman.set_anti_aliased(enabled),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }
}

impl From<Line> for Shape {
    fn from(value: Line) -> Self {
        Shape::Line(value)
    }
}

impl From<Circle> for Shape {
    fn from(value: Circle) -> Self {
        Shape::Circle(value)
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Shape::Rectangle(value)
    }
}

impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Shape::Polygon(value)
    }
}

impl From<Pacman> for Shape {
    fn from(value: Pacman) -> Self {
        Shape::Pacman(value)
    }
}
