pub mod brush;
pub mod circle;
pub mod clip;
pub mod collection;
pub mod input;
pub mod line;
pub mod model;
pub mod pacman;
pub mod persist;
pub mod polygon;
pub mod rectangle;
pub mod shape;
pub mod surface;

pub use collection::{RenderSettings, ShapeCollection, ShapeId};
pub use model::{Color, Point};
pub use shape::{Shape, ShapeKind};
pub use surface::{RgbaCanvas, Surface};
