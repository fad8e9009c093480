//! Plain-text drawing files: one whitespace-separated record per shape.
//!
//! ```text
//! LINE x1 y1 x2 y2 #color thickness
//! CIRCLE cx cy radius #color
//! RECTANGLE x1 y1 x2 y2 #color thickness
//! POLYGON x1 y1 ... xn yn #color thickness closed [filled #fill image_filled path]
//! PACMAN cx cy radius start_angle end_angle
//! ```
//!
//! Flags are `1`/`0`; a polygon without a fill image stores `-` as its path.

use crate::draw::circle::Circle;
use crate::draw::collection::ShapeCollection;
use crate::draw::line::Line;
use crate::draw::model::{Color, Point};
use crate::draw::pacman::Pacman;
use crate::draw::polygon::Polygon;
use crate::draw::rectangle::Rectangle;
use crate::draw::shape::Shape;
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const NO_IMAGE: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct LoadedDrawing {
    pub shapes: ShapeCollection,
    /// Lines that could not be decoded.
    pub skipped: usize,
}

fn parse_flag(token: &str, what: &str) -> Result<bool> {
    match token {
        "1" => Ok(true),
        "0" => Ok(false),
        other => bail!("invalid {what} flag `{other}`"),
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Text record for `shape`, or `None` when it cannot be stored yet
/// (an unfinished pacman).
pub fn encode_shape(shape: &Shape) -> Option<String> {
    let record = match shape {
        Shape::Line(line) => format!(
            "LINE {} {} {} {} {} {}",
            line.start().x,
            line.start().y,
            line.end().x,
            line.end().y,
            line.color().to_hex(),
            line.thickness()
        ),
        Shape::Circle(circle) => format!(
            "CIRCLE {} {} {} {}",
            circle.center().x,
            circle.center().y,
            circle.radius(),
            circle.color().to_hex()
        ),
        Shape::Rectangle(rect) => format!(
            "RECTANGLE {} {} {} {} {} {}",
            rect.first_corner().x,
            rect.first_corner().y,
            rect.opposite_corner().x,
            rect.opposite_corner().y,
            rect.color().to_hex(),
            rect.thickness()
        ),
        Shape::Polygon(polygon) => {
            let mut record = String::from("POLYGON");
            for vertex in polygon.vertices() {
                record.push_str(&format!(" {} {}", vertex.x, vertex.y));
            }
            let image_path = polygon
                .fill_image_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| NO_IMAGE.to_string());
            record.push_str(&format!(
                " {} {} {} {} {} {} {}",
                polygon.color().to_hex(),
                polygon.thickness(),
                flag(polygon.is_closed()),
                flag(polygon.is_filled()),
                polygon.fill_color().to_hex(),
                flag(polygon.is_image_filled()),
                image_path
            ));
            record
        }
        Shape::Pacman(pacman) => {
            if !pacman.is_complete() {
                return None;
            }
            format!(
                "PACMAN {} {} {} {} {}",
                pacman.center().x,
                pacman.center().y,
                pacman.radius(),
                pacman.start_angle(),
                pacman.end_angle()
            )
        }
    };
    Some(record)
}

struct Tokens<'a> {
    inner: std::slice::Iter<'a, &'a str>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, what: &str) -> Result<&'a str> {
        self.inner
            .next()
            .copied()
            .ok_or_else(|| anyhow!("missing {what}"))
    }

    fn int(&mut self, what: &str) -> Result<i32> {
        let token = self.next(what)?;
        token
            .parse()
            .with_context(|| format!("invalid {what} `{token}`"))
    }

    fn float(&mut self, what: &str) -> Result<f64> {
        let token = self.next(what)?;
        token
            .parse()
            .with_context(|| format!("invalid {what} `{token}`"))
    }

    fn point(&mut self, what: &str) -> Result<Point> {
        Ok(Point::new(self.int(what)?, self.int(what)?))
    }

    fn color(&mut self, what: &str) -> Result<Color> {
        Color::from_hex(self.next(what)?).with_context(|| format!("invalid {what}"))
    }

    fn thickness(&mut self) -> Result<u32> {
        let token = self.next("thickness")?;
        token
            .parse()
            .with_context(|| format!("invalid thickness `{token}`"))
    }

    fn flag(&mut self, what: &str) -> Result<bool> {
        parse_flag(self.next(what)?, what)
    }

    fn finish(mut self) -> Result<()> {
        match self.inner.next() {
            Some(extra) => bail!("unexpected trailing token `{extra}`"),
            None => Ok(()),
        }
    }
}

/// Parses one record. Fill images are not read here; see [`load_drawing`].
pub fn decode_record(record: &str) -> Result<Shape> {
    let all: Vec<&str> = record.split_whitespace().collect();
    let (keyword, rest) = all.split_first().context("empty record")?;
    let mut tokens = Tokens { inner: rest.iter() };

    let shape = match *keyword {
        "LINE" => {
            let mut line = Line::new(tokens.point("start")?, tokens.point("end")?);
            line.set_color(tokens.color("color")?);
            line.set_thickness(tokens.thickness()?);
            Shape::Line(line)
        }
        "CIRCLE" => {
            let center = tokens.point("center")?;
            let mut circle = Circle::new(center, tokens.int("radius")?);
            circle.set_color(tokens.color("color")?);
            Shape::Circle(circle)
        }
        "RECTANGLE" => {
            let mut rect = Rectangle::new(tokens.point("corner")?, tokens.point("corner")?);
            rect.set_color(tokens.color("color")?);
            rect.set_thickness(tokens.thickness()?);
            Shape::Rectangle(rect)
        }
        "POLYGON" => return decode_polygon(rest).map(Shape::Polygon),
        "PACMAN" => {
            let center = tokens.point("center")?;
            let radius = tokens.int("radius")?;
            let start = tokens.float("start angle")?;
            let end = tokens.float("end angle")?;
            Shape::Pacman(Pacman::from_parts(center, radius, start, end))
        }
        other => bail!("unknown record type `{other}`"),
    };
    tokens.finish()?;
    Ok(shape)
}

/// Coordinates run until the first `#` token, which is the outline color.
fn decode_polygon(tokens: &[&str]) -> Result<Polygon> {
    let color_at = tokens
        .iter()
        .position(|token| token.starts_with('#'))
        .context("polygon record has no color")?;
    let (coords, tail) = tokens.split_at(color_at);
    if coords.len() % 2 != 0 {
        bail!("polygon has an odd number of coordinates");
    }

    let mut coord_tokens = Tokens { inner: coords.iter() };
    let mut vertices = Vec::with_capacity(coords.len() / 2);
    for _ in 0..coords.len() / 2 {
        vertices.push(coord_tokens.point("vertex")?);
    }

    let mut tokens = Tokens { inner: tail.iter() };
    let color = tokens.color("color")?;
    let thickness = tokens.thickness()?;
    let closed = tokens.flag("closed")?;

    let mut polygon = Polygon::from_vertices(vertices, closed);
    polygon.set_color(color);
    polygon.set_thickness(thickness);

    if let Some(filled) = tokens.inner.next() {
        polygon.set_filled(parse_flag(filled, "filled")?);
        polygon.set_fill_color(tokens.color("fill color")?);
        polygon.set_image_filled(tokens.flag("image filled")?);
        let path: Vec<&str> = tokens.inner.copied().collect();
        match path.as_slice() {
            [] => bail!("missing image path"),
            [single] if *single == NO_IMAGE => polygon.set_fill_image_path(None),
            parts => polygon.set_fill_image_path(Some(PathBuf::from(parts.join(" ")))),
        }
    }
    Ok(polygon)
}

/// Loads the fill image of an image-filled polygon. A missing or unreadable
/// image disables image fill but keeps the path.
fn attach_fill_image(polygon: &mut Polygon) {
    if !polygon.is_image_filled() {
        return;
    }
    let Some(path) = polygon.fill_image_path().map(Path::to_path_buf) else {
        polygon.set_image_filled(false);
        return;
    };
    if let Err(err) = polygon.load_fill_image(&path) {
        tracing::warn!(path = %path.display(), error = %err, "fill image unavailable; image fill disabled");
        polygon.set_image_filled(false);
    }
}

/// Decodes every non-blank line of `text`. Bad lines are logged and counted,
/// never fatal.
pub fn parse_drawing(text: &str) -> LoadedDrawing {
    let mut loaded = LoadedDrawing::default();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_record(line) {
            Ok(mut shape) => {
                if let Shape::Polygon(polygon) = &mut shape {
                    attach_fill_image(polygon);
                }
                loaded.shapes.insert(shape);
            }
            Err(err) => {
                tracing::warn!(line = number + 1, error = %err, "skipping malformed record");
                loaded.skipped += 1;
            }
        }
    }
    loaded
}

pub fn load_drawing(path: &Path) -> Result<LoadedDrawing> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read drawing {}", path.display()))?;
    let loaded = parse_drawing(&text);
    tracing::info!(
        path = %path.display(),
        shapes = loaded.shapes.len(),
        skipped = loaded.skipped,
        "drawing loaded"
    );
    Ok(loaded)
}

/// Text form of the whole collection, bottom to top.
pub fn format_drawing(shapes: &ShapeCollection) -> String {
    let mut text = String::new();
    for (_, shape) in shapes.iter() {
        match encode_shape(shape) {
            Some(record) => {
                text.push_str(&record);
                text.push('\n');
            }
            None => tracing::debug!(kind = ?shape.kind(), "shape not persisted"),
        }
    }
    text
}

pub fn save_drawing(path: &Path, shapes: &ShapeCollection) -> Result<()> {
    let text = format_drawing(shapes);
    fs::write(path, text).with_context(|| format!("write drawing {}", path.display()))?;
    tracing::info!(path = %path.display(), shapes = shapes.len(), "drawing saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn encodes_each_record_type() {
        let mut line = Line::new(p(1, 2), p(30, 40));
        line.set_color(Color::rgb(255, 0, 16));
        line.set_thickness(3);
        assert_eq!(
            encode_shape(&line.into()).as_deref(),
            Some("LINE 1 2 30 40 #ff0010 3")
        );

        let circle = Circle::new(p(5, 6), 7);
        assert_eq!(
            encode_shape(&circle.into()).as_deref(),
            Some("CIRCLE 5 6 7 #000000")
        );

        let rect = Rectangle::new(p(10, 10), p(0, 0));
        assert_eq!(
            encode_shape(&rect.into()).as_deref(),
            Some("RECTANGLE 10 10 0 0 #000000 1")
        );

        let polygon = Polygon::from_vertices(vec![p(0, 0), p(4, 0), p(4, 4)], true);
        assert_eq!(
            encode_shape(&polygon.into()).as_deref(),
            Some("POLYGON 0 0 4 0 4 4 #000000 1 1 0 #000000 0 -")
        );

        let pacman = Pacman::from_parts(p(9, 9), 4, 0.0, PI);
        assert_eq!(
            encode_shape(&pacman.into()),
            Some(format!("PACMAN 9 9 4 0 {}", PI))
        );
    }

    #[test]
    fn incomplete_pacman_is_not_persisted() {
        let mut pacman = Pacman::new();
        pacman.advance(p(1, 1));
        assert_eq!(encode_shape(&pacman.into()), None);
    }

    #[test]
    fn decodes_short_polygon_form() {
        let shape = decode_record("POLYGON 0 0 10 0 10 10 #112233 2 0").expect("polygon");
        let Shape::Polygon(polygon) = shape else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.vertices(), &[p(0, 0), p(10, 0), p(10, 10)]);
        assert!(!polygon.is_closed());
        assert_eq!(polygon.thickness(), 2);
        assert_eq!(polygon.color(), Color::rgb(0x11, 0x22, 0x33));
        assert!(!polygon.is_filled());
    }

    #[test]
    fn decodes_polygon_fill_and_image_path_with_spaces() {
        let shape = decode_record("POLYGON 0 0 8 0 8 8 #000000 1 1 1 #00ff0080 1 my pics/a.png")
            .expect("polygon");
        let Shape::Polygon(polygon) = shape else {
            panic!("expected polygon");
        };
        assert!(polygon.is_closed());
        assert!(polygon.is_filled());
        assert_eq!(polygon.fill_color(), Color::rgba(0, 255, 0, 0x80));
        assert!(polygon.is_image_filled());
        assert_eq!(polygon.fill_image_path(), Some(Path::new("my pics/a.png")));
    }

    #[test]
    fn pacman_record_restores_complete_shape() {
        let Shape::Pacman(pacman) = decode_record("PACMAN 50 50 20 0 1.5707963267948966").expect("pacman")
        else {
            panic!("expected pacman");
        };
        assert!(pacman.is_complete());
        assert_eq!(pacman.radius(), 20);
        assert!(pacman.contains(p(30, 50)));
    }

    #[test]
    fn rejects_malformed_records() {
        for record in [
            "",
            "TRIANGLE 0 0 1 1",
            "LINE 0 0 5",
            "LINE 0 0 5 5 red 1",
            "LINE 0 0 5 5 #000000 1 extra",
            "CIRCLE a b 3 #000000",
            "POLYGON 0 0 5 #000000 1 1",
            "POLYGON 0 0 5 5 6 6 1 1",
            "POLYGON 0 0 5 5 6 6 #000000 1 yes",
            "POLYGON 0 0 5 5 6 6 #000000 1 1 1 #000000 1",
            "PACMAN 0 0 5 0.5",
        ] {
            assert!(decode_record(record).is_err(), "{record:?} should fail");
        }
    }

    #[test]
    fn parse_skips_bad_lines_and_blank_lines() {
        let text = "LINE 0 0 5 5 #000000 1\n\nnonsense\nCIRCLE 1 1 4 #ff0000\n";
        let loaded = parse_drawing(text);
        assert_eq!(loaded.shapes.len(), 2);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn missing_fill_image_disables_image_fill() {
        let text = "POLYGON 0 0 8 0 8 8 #000000 1 1 0 #000000 1 /no/such/image.png\n";
        let loaded = parse_drawing(text);
        let (_, shape) = loaded.shapes.iter().next().expect("polygon kept");
        let polygon = shape.as_polygon().expect("polygon");
        assert!(!polygon.is_image_filled());
        assert_eq!(polygon.fill_image_path(), Some(Path::new("/no/such/image.png")));
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn format_round_trips_through_parse() {
        let mut shapes = ShapeCollection::new();
        shapes.insert(Line::new(p(0, 0), p(9, 9)));
        shapes.insert(Pacman::from_parts(p(20, 20), 8, 1.0, 4.0));
        let mut unfinished = Pacman::new();
        unfinished.advance(p(0, 0));
        shapes.insert(unfinished);

        let text = format_drawing(&shapes);
        assert_eq!(text.lines().count(), 2);
        let loaded = parse_drawing(&text);
        assert_eq!(loaded.shapes.len(), 2);
        assert_eq!(format_drawing(&loaded.shapes), text);
    }
}
