/// Square stamp used to thicken 1px strokes.
///
/// The pattern is generated once from `size`; changing thickness means building
/// a new brush.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    size: usize,
    pattern: Vec<Vec<bool>>,
    anti_aliased: bool,
}

impl Brush {
    pub fn new(size: u32) -> Self {
        let size = size.max(1) as usize;
        Self {
            size,
            pattern: generate_pattern(size),
            anti_aliased: false,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pattern(&self) -> &[Vec<bool>] {
        &self.pattern
    }

    pub fn is_anti_aliased(&self) -> bool {
        self.anti_aliased
    }

    pub fn set_anti_aliased(&mut self, enabled: bool) {
        self.anti_aliased = enabled;
    }

    /// Radius of the discretized disk, `(size - 1) / 2`.
    pub fn radius(&self) -> f32 {
        (self.size as f32 - 1.0) / 2.0
    }

    fn distance_from_center(&self, x: usize, y: usize) -> f32 {
        let center = self.radius();
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_in_pattern(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return false;
        }
        self.pattern[y as usize][x as usize]
    }

    /// Coverage of cell `(x, y)`: 1/0 when hard-edged, otherwise a one unit
    /// falloff band at the disk boundary.
    pub fn intensity(&self, x: i32, y: i32) -> f32 {
        if !self.is_in_pattern(x, y) {
            return 0.0;
        }
        if !self.anti_aliased {
            return 1.0;
        }
        let distance = self.distance_from_center(x as usize, y as usize);
        1.0 - (distance - (self.radius() - 1.0)).clamp(0.0, 1.0)
    }

    /// Active cells as offsets from the stamp's anchor, with their intensity.
    pub fn stamp_offsets(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let half = (self.size / 2) as i32;
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| {
                let coverage = self.intensity(x as i32, y as i32);
                (coverage > 0.0).then_some((x as i32 - half, y as i32 - half, coverage))
            })
        })
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(1)
    }
}

fn generate_pattern(size: usize) -> Vec<Vec<bool>> {
    if size <= 2 {
        return vec![vec![true; size]; size];
    }
    let center = (size as f32 - 1.0) / 2.0;
    let radius = center;
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let dx = x as f32 - center;
                    let dy = y as f32 - center;
                    (dx * dx + dy * dy).sqrt() <= radius
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_cells(brush: &Brush) -> usize {
        brush
            .pattern()
            .iter()
            .map(|row| row.iter().filter(|cell| **cell).count())
            .sum()
    }

    #[test]
    fn pattern_is_square_for_every_size() {
        for size in 1..=12 {
            let brush = Brush::new(size);
            assert_eq!(brush.pattern().len(), size as usize);
            assert!(brush.pattern().iter().all(|row| row.len() == size as usize));
        }
    }

    #[test]
    fn small_sizes_are_solid() {
        assert_eq!(active_cells(&Brush::new(1)), 1);
        assert_eq!(active_cells(&Brush::new(2)), 4);
    }

    #[test]
    fn zero_size_is_promoted_to_one() {
        assert_eq!(Brush::new(0).size(), 1);
    }

    #[test]
    fn larger_sizes_are_discretized_disks() {
        for size in 3..=9u32 {
            let brush = Brush::new(size);
            let radius = (size as f32 - 1.0) / 2.0;
            for y in 0..size as i32 {
                for x in 0..size as i32 {
                    let dx = x as f32 - radius;
                    let dy = y as f32 - radius;
                    let inside = (dx * dx + dy * dy).sqrt() <= radius;
                    assert_eq!(brush.is_in_pattern(x, y), inside, "size {size} ({x},{y})");
                }
            }
        }
        // 3x3 disk drops the corners.
        assert_eq!(active_cells(&Brush::new(3)), 5);
    }

    #[test]
    fn out_of_bounds_queries_are_false() {
        let brush = Brush::new(3);
        assert!(!brush.is_in_pattern(-1, 0));
        assert!(!brush.is_in_pattern(0, 3));
        assert_eq!(brush.intensity(7, 7), 0.0);
    }

    #[test]
    fn hard_brush_intensity_is_binary() {
        let brush = Brush::new(5);
        assert_eq!(brush.intensity(2, 2), 1.0);
        assert_eq!(brush.intensity(0, 2), 1.0);
        assert_eq!(brush.intensity(0, 0), 0.0);
    }

    #[test]
    fn soft_brush_fades_at_the_rim() {
        let mut brush = Brush::new(5);
        brush.set_anti_aliased(true);
        // center: distance 0, radius 2 -> full
        assert_eq!(brush.intensity(2, 2), 1.0);
        // rim cell (0, 2): distance 2 -> 1 - clamp(2 - 1) = 0
        assert_eq!(brush.intensity(0, 2), 0.0);
        // (1, 1): distance sqrt(2) -> 1 - 0.414
        let expected = 1.0 - (2f32.sqrt() - 1.0);
        assert!((brush.intensity(1, 1) - expected).abs() < 1e-5);
    }

    #[test]
    fn stamp_offsets_center_on_anchor() {
        let offsets: Vec<_> = Brush::new(1).stamp_offsets().collect();
        assert_eq!(offsets, vec![(0, 0, 1.0)]);

        let offsets: Vec<_> = Brush::new(3).stamp_offsets().collect();
        assert_eq!(offsets.len(), 5);
        assert!(offsets.contains(&(0, 0, 1.0)));
        assert!(offsets.contains(&(-1, 0, 1.0)));
        assert!(!offsets.iter().any(|(x, y, _)| (*x, *y) == (-1, -1)));
    }
}
