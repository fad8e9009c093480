use crate::draw::clip::clip;
use crate::draw::model::{Color, Point};
use crate::draw::polygon::Polygon;
use crate::draw::shape::Shape;
use crate::draw::surface::{RgbaCanvas, Surface};
use slab::Slab;

/// Stable handle to a stored shape. A handle whose shape was removed stays
/// dead even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId {
    index: usize,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub background: Color,
    pub show_handles: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            show_handles: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    shape: Shape,
}

/// Owns every shape on the canvas; draw order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    slots: Slab<Entry>,
    order: Vec<usize>,
    next_generation: u64,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let shape = shape.into();
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        tracing::debug!(kind = ?shape.kind(), "shape added");
        let index = self.slots.insert(Entry { generation, shape });
        self.order.push(index);
        ShapeId { index, generation }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.slots
            .get(id.index)
            .filter(|entry| entry.generation == id.generation)
            .map(|entry| &entry.shape)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.slots
            .get_mut(id.index)
            .filter(|entry| entry.generation == id.generation)
            .map(|entry| &mut entry.shape)
    }

    pub fn contains_id(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.get(id)?;
        self.order.retain(|&index| index != id.index);
        let entry = self.slots.remove(id.index);
        tracing::debug!(kind = ?entry.shape.kind(), "shape removed");
        Some(entry.shape)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Shapes bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.order.iter().filter_map(move |&index| {
            self.slots.get(index).map(|entry| {
                (
                    ShapeId {
                        index,
                        generation: entry.generation,
                    },
                    &entry.shape,
                )
            })
        })
    }

    /// Topmost shape accepting `point`.
    pub fn pick(&self, point: Point) -> Option<ShapeId> {
        self.find_topmost(|shape| shape.contains(point))
    }

    pub(crate) fn find_topmost<F>(&self, mut predicate: F) -> Option<ShapeId>
    where
        F: FnMut(&Shape) -> bool,
    {
        self.order.iter().rev().find_map(|&index| {
            let entry = self.slots.get(index)?;
            predicate(&entry.shape).then_some(ShapeId {
                index,
                generation: entry.generation,
            })
        })
    }

    /// Applies one anti-aliasing mode to every stored shape.
    pub fn set_anti_aliasing(&mut self, enabled: bool) {
        for (_, entry) in self.slots.iter_mut() {
            entry.shape.set_anti_aliased(enabled);
        }
        tracing::debug!(enabled, shapes = self.len(), "anti-aliasing updated");
    }

    /// Clips polygon `subject` by polygon `clip_by` and stores the result as
    /// a new closed polygon styled like the subject. Nothing is stored when
    /// either id is not a polygon or the intersection is empty.
    pub fn clip(&mut self, subject: ShapeId, clip_by: ShapeId) -> Option<ShapeId> {
        let subject = self.get(subject)?.as_polygon()?;
        let clip_polygon = self.get(clip_by)?.as_polygon()?;
        let vertices = clip(subject.vertices(), clip_polygon.vertices());
        if vertices.is_empty() {
            tracing::debug!("clip produced no polygon");
            return None;
        }

        let mut result = Polygon::from_vertices(vertices, true);
        result.set_color(subject.color());
        result.set_thickness(subject.thickness());
        result.set_anti_aliased(subject.is_anti_aliased());
        result.set_filled(subject.is_filled());
        result.set_fill_color(subject.fill_color());
        tracing::info!(vertices = result.vertex_count(), "clip produced polygon");
        Some(self.insert(result))
    }

    pub fn render(&self, surface: &mut dyn Surface, settings: &RenderSettings) {
        for (_, shape) in self.iter() {
            shape.draw(surface);
        }
        if settings.show_handles {
            for (_, shape) in self.iter() {
                shape.draw_handles(surface);
            }
        }
    }

    pub fn render_to_canvas(&self, width: u32, height: u32, settings: &RenderSettings) -> RgbaCanvas {
        let mut canvas = RgbaCanvas::new(width, height, settings.background);
        self.render(&mut canvas, settings);
        canvas
    }
}
