use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

/// Side of the square handle drawn at line endpoints; its square is the pick radius².
pub const ENDPOINT_MARKER: i32 = 8;
pub const CENTER_MARKER: i32 = 8;
pub const RADIUS_MARKER: i32 = 6;
pub const VERTEX_MARKER: i32 = 8;
/// Allowed |d² - r²| when picking a circle outline.
pub const RING_TOLERANCE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// Polar angle of `self` seen from `origin`, normalized to `[0, 2π)`.
    pub fn angle_from(self, origin: Point) -> f64 {
        normalize_angle(((self.y - origin.y) as f64).atan2((self.x - origin.x) as f64))
    }

    pub fn is_near(self, other: Point, marker: i32) -> bool {
        self.distance_sq(other) <= (marker as i64) * (marker as i64)
    }
}

pub fn normalize_angle(angle: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let wrapped = angle % tau;
    if wrapped < 0.0 {
        wrapped + tau
    } else {
        wrapped
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Scales the alpha channel by `coverage` (clamped to `[0, 1]`).
    pub fn with_coverage(self, coverage: f32) -> Self {
        let coverage = coverage.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * coverage).round() as u8,
            ..self
        }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{}", hex::encode([self.r, self.g, self.b]))
        } else {
            format!("#{}", hex::encode(self.to_rgba_array()))
        }
    }

    pub fn from_hex(text: &str) -> anyhow::Result<Self> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| anyhow::anyhow!("color '{text}' is missing the '#' marker"))?;
        let bytes = hex::decode(digits)
            .map_err(|err| anyhow::anyhow!("color '{text}' is not valid hex: {err}"))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
            _ => anyhow::bail!("color '{text}' must have 6 or 8 hex digits"),
        }
    }
}
