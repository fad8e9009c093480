use crate::draw::model::{Color, Point, CENTER_MARKER, RADIUS_MARKER, RING_TOLERANCE};
use crate::draw::surface::{draw_marker, Surface};

/// The eight octant reflections of offset `(x, y)`.
pub fn octants(x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (x, y),
        (y, x),
        (-y, x),
        (-x, y),
        (-x, -y),
        (-y, -x),
        (y, -x),
        (x, -y),
    ]
}

fn plot_octants<F>(
    surface: &mut dyn Surface,
    center: Point,
    x: i32,
    y: i32,
    color: Color,
    coverage: f32,
    keep: &F,
) where
    F: Fn(i32, i32) -> bool,
{
    for (dx, dy) in octants(x, y) {
        if keep(dx, dy) {
            surface.plot(center.x + dx, center.y + dy, color, coverage);
        }
    }
}

/// Integer midpoint circle. `keep` sees each candidate offset from `center`
/// and may suppress it.
pub fn midpoint_circle<F>(surface: &mut dyn Surface, center: Point, radius: i32, color: Color, keep: F)
where
    F: Fn(i32, i32) -> bool,
{
    if radius <= 0 {
        return;
    }
    let mut x = 0;
    let mut y = radius;
    let mut d = 1 - radius;
    let mut d_e = 3;
    let mut d_se = 5 - 2 * radius;

    while y >= x {
        plot_octants(surface, center, x, y, color, 1.0, &keep);
        if d < 0 {
            d += d_e;
            d_e += 2;
            d_se += 2;
        } else {
            d += d_se;
            d_e += 2;
            d_se += 4;
            y -= 1;
        }
        x += 1;
    }
}

/// Wu-style anti-aliased circle: for each row `y` the exact `x` is split over
/// the two neighbouring columns.
///
/// The outer column gets the fractional part `t` and the inner one `1 - t`, so
/// coverage grows as the exact edge approaches the outer pixel.
pub fn wu_circle<F>(surface: &mut dyn Surface, center: Point, radius: i32, color: Color, keep: F)
where
    F: Fn(i32, i32) -> bool,
{
    if radius <= 0 {
        return;
    }
    let r_sq = (radius as i64) * (radius as i64);
    let mut x = radius;
    let mut y = 0;
    plot_octants(surface, center, x, y, color, 1.0, &keep);

    while x > y {
        y += 1;
        let exact = ((r_sq - (y as i64) * (y as i64)).max(0) as f64).sqrt();
        x = exact.ceil() as i32;
        // Share of the outer column; the inner one gets the rest.
        let t = (exact - (x - 1) as f64) as f32;
        plot_octants(surface, center, x, y, color, t, &keep);
        plot_octants(surface, center, x - 1, y, color, 1.0 - t, &keep);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point,
    radius: i32,
    color: Color,
    anti_aliased: bool,
}

impl Circle {
    pub fn new(center: Point, radius: i32) -> Self {
        tracing::debug!(?center, radius, "circle created");
        Self {
            center,
            radius: radius.max(0),
            color: Color::BLACK,
            anti_aliased: false,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
    }

    /// Radius becomes the (truncated) distance from the center to `point`.
    pub fn set_radius_point(&mut self, point: Point) {
        self.set_radius(self.center.distance(point) as i32);
    }

    pub fn radius_point(&self) -> Point {
        self.center + Point::new(self.radius, 0)
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

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.anti_aliased {
            wu_circle(surface, self.center, self.radius, self.color, |_, _| true);
        } else {
            midpoint_circle(surface, self.center, self.radius, self.color, |_, _| true);
        }
    }

    pub fn draw_handles(&self, surface: &mut dyn Surface) {
        draw_marker(surface, self.center, CENTER_MARKER);
        draw_marker(surface, self.radius_point(), RADIUS_MARKER);
    }

    /// Ring test: the squared distance must be within a fixed band of r².
    pub fn contains(&self, point: Point) -> bool {
        on_ring(self.center, self.radius, point)
    }

    pub fn is_near_center(&self, point: Point) -> bool {
        point.is_near(self.center, CENTER_MARKER)
    }

    pub fn is_near_radius(&self, point: Point) -> bool {
        point.is_near(self.radius_point(), RADIUS_MARKER)
    }

    pub fn translate(&mut self, offset: Point) {
        self.center += offset;
    }
}

pub(crate) fn on_ring(center: Point, radius: i32, point: Point) -> bool {
    let r_sq = (radius as i64) * (radius as i64);
    (point.distance_sq(center) - r_sq).abs() <= RING_TOLERANCE
}
