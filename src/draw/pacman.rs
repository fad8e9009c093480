use crate::draw::brush::Brush;
use crate::draw::circle::{midpoint_circle, on_ring, wu_circle};
use crate::draw::line::{stamp_segment, wu_segment};
use crate::draw::model::{normalize_angle, Color, Point};
use crate::draw::surface::Surface;

/// Construction progress: center, then radius point, then mouth point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacmanStage {
    AwaitingCenter,
    AwaitingRadius,
    AwaitingMouth,
    Complete,
}

impl PacmanStage {
    pub fn next(self) -> Self {
        match self {
            Self::AwaitingCenter => Self::AwaitingRadius,
            Self::AwaitingRadius => Self::AwaitingMouth,
            Self::AwaitingMouth | Self::Complete => Self::Complete,
        }
    }
}

/// Circle with an angular wedge ("mouth") removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacman {
    stage: PacmanStage,
    center: Point,
    radius: i32,
    start_angle: f64,
    end_angle: f64,
    color: Color,
    anti_aliased: bool,
}

impl Default for Pacman {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacman {
    pub fn new() -> Self {
        Self {
            stage: PacmanStage::AwaitingCenter,
            center: Point::default(),
            radius: 0,
            start_angle: 0.0,
            end_angle: 0.0,
            color: Color::BLACK,
            anti_aliased: false,
        }
    }

    /// Restores a finished pacman, e.g. from a persisted record.
    pub fn from_parts(center: Point, radius: i32, start_angle: f64, end_angle: f64) -> Self {
        Self {
            stage: PacmanStage::Complete,
            center,
            radius: radius.max(0),
            start_angle: normalize_angle(start_angle),
            end_angle: normalize_angle(end_angle),
            ..Self::new()
        }
    }

    pub fn stage(&self) -> PacmanStage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage == PacmanStage::Complete
    }

    /// Feeds the next click to the state machine. Returns the stage reached;
    /// clicks after completion are ignored.
    pub fn advance(&mut self, point: Point) -> PacmanStage {
        match self.stage {
            PacmanStage::AwaitingCenter => {
                self.center = point;
                tracing::debug!(center = ?point, "pacman center placed");
            }
            PacmanStage::AwaitingRadius => self.set_radius_point(point),
            PacmanStage::AwaitingMouth => self.set_mouth_point(point),
            PacmanStage::Complete => return self.stage,
        }
        self.stage = self.stage.next();
        self.stage
    }

    fn set_radius_point(&mut self, point: Point) {
        self.radius = self.center.distance(point) as i32;
        self.start_angle = point.angle_from(self.center);
        tracing::debug!(radius = self.radius, start = self.start_angle, "pacman radius set");
    }

    fn set_mouth_point(&mut self, point: Point) {
        self.end_angle = point.angle_from(self.center);
        tracing::debug!(
            start = self.start_angle,
            end = self.end_angle,
            "pacman completed"
        );
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn is_anti_aliased(&self) -> bool {
        self.anti_aliased
    }

    pub fn set_anti_aliased(&mut self, enabled: bool) {
        self.anti_aliased = enabled;
    }

    /// Counterclockwise wedge from `start_angle` to `end_angle`. With
    /// `start < end` the mouth is the open interval between them, otherwise it
    /// wraps through zero and everything outside `[end, start]` is mouth.
    pub fn is_in_mouth(&self, dx: i32, dy: i32) -> bool {
        if !self.is_complete() {
            return false;
        }
        let angle = normalize_angle((dy as f64).atan2(dx as f64));
        if self.start_angle < self.end_angle {
            angle > self.start_angle && angle < self.end_angle
        } else {
            !(angle >= self.end_angle && angle <= self.start_angle)
        }
    }

    /// Rim point at `angle`, rounded to the nearest pixel so the radial lines
    /// meet the rasterized ring instead of stopping inside it.
    fn boundary_point(&self, angle: f64) -> Point {
        let r = self.radius as f64;
        self.center
            + Point::new(
                (r * angle.cos()).round() as i32,
                (r * angle.sin()).round() as i32,
            )
    }

    /// Draws nothing until complete or with a non-positive radius.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_complete() || self.radius <= 0 {
            return;
        }
        let keep = |dx: i32, dy: i32| !self.is_in_mouth(dx, dy);
        let start = self.boundary_point(self.start_angle);
        let end = self.boundary_point(self.end_angle);
        if self.anti_aliased {
            wu_circle(surface, self.center, self.radius, self.color, keep);
            wu_segment(surface, self.center, start, self.color);
            wu_segment(surface, self.center, end, self.color);
        } else {
            midpoint_circle(surface, self.center, self.radius, self.color, keep);
            let brush = Brush::new(1);
            stamp_segment(surface, self.center, start, &brush, self.color);
            stamp_segment(surface, self.center, end, &brush, self.color);
        }
    }

    /// Ring test outside the mouth; always false before completion.
    pub fn contains(&self, point: Point) -> bool {
        if !self.is_complete() || self.radius <= 0 {
            return false;
        }
        let offset = point - self.center;
        on_ring(self.center, self.radius, point) && !self.is_in_mouth(offset.x, offset.y)
    }

    pub fn translate(&mut self, offset: Point) {
        self.center += offset;
    }
}
