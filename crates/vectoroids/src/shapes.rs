//! # Wireframe Shapes & Batching
//!
//! Model-space vertex tables for every drawable shape, and the per-frame
//! [`ShapeBatch`] that collects, transforms and submits line lists.
//!
//! Vertices are stored as flat `[x0, y0, x1, y1, ..]` runs. A shape with
//! `n` points draws `n - 1` connected segments, so closed outlines repeat
//! their first point at the end of the table.

use crate::render::LineRenderer;

/// Ship hull: a dart pointing along +X at angle zero.
const SHIP_POINTS: [f32; 10] = [6.0, 0.0, -3.0, -3.0, -1.0, 0.0, -3.0, 3.0, 6.0, 0.0];

/// Engine flame drawn behind the hull while thrusting.
const FLAME_POINTS: [f32; 10] = [-1.0, 0.0, -4.0, 1.0, -6.0, 0.0, -4.0, -1.0, -1.0, 0.0];

const ASTEROID_POINTS_0: [f32; 22] = [
    -4.0, -2.0, -2.0, -4.0, 0.0, -2.0, 2.0, -4.0, 4.0, -2.0, 3.0, 0.0, 4.0, 2.0, 1.0, 4.0, -2.0,
    4.0, -4.0, 2.0, -4.0, -2.0,
];

const ASTEROID_POINTS_1: [f32; 20] = [
    1.0, 4.0, 3.0, 3.0, 1.0, 1.0, 4.0, -1.0, 2.0, -4.0, -2.0, -4.0, -4.0, -1.0, -4.0, 2.0, -1.0,
    3.0, 1.0, 4.0,
];

const ASTEROID_POINTS_2: [f32; 24] = [
    -2.0, 0.0, -4.0, -1.0, -1.0, -4.0, 2.0, -4.0, 4.0, -1.0, 4.0, 1.0, 2.0, 4.0, 0.0, 4.0, 0.0,
    1.0, -2.0, 4.0, -4.0, 1.0, -2.0, 0.0,
];

const ASTEROID_POINTS_3: [f32; 26] = [
    -1.0, -2.0, -2.0, -4.0, 1.0, -4.0, 4.0, -2.0, 4.0, -1.0, 1.0, 0.0, 4.0, 2.0, 2.0, 4.0, 1.0,
    3.0, -2.0, 4.0, -4.0, 1.0, -4.0, -2.0, -1.0, -2.0,
];

const ASTEROID_POINTS_4: [f32; 18] = [
    -4.0, -2.0, -2.0, -4.0, 2.0, -4.0, 4.0, -2.0, 4.0, 2.0, 2.0, 4.0, -2.0, 4.0, -4.0, 2.0, -4.0,
    -2.0,
];

/// Selects a model-space vertex table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeKind {
    /// Draws nothing. Used for hidden entities such as the flame at rest.
    #[default]
    None,
    /// Player ship hull.
    Ship,
    /// Engine exhaust flame.
    Flame,
    /// Asteroid variant 0.
    Asteroid0,
    /// Asteroid variant 1.
    Asteroid1,
    /// Asteroid variant 2.
    Asteroid2,
    /// Asteroid variant 3.
    Asteroid3,
    /// Asteroid variant 4.
    Asteroid4,
}

/// The asteroid variants, for random selection at spawn time.
pub const ASTEROID_KINDS: [ShapeKind; 5] = [
    ShapeKind::Asteroid0,
    ShapeKind::Asteroid1,
    ShapeKind::Asteroid2,
    ShapeKind::Asteroid3,
    ShapeKind::Asteroid4,
];

impl ShapeKind {
    /// Model-space points as a flat `[x, y, x, y, ..]` slice.
    #[must_use]
    pub fn points(self) -> &'static [f32] {
        match self {
            Self::None => &[],
            Self::Ship => &SHIP_POINTS,
            Self::Flame => &FLAME_POINTS,
            Self::Asteroid0 => &ASTEROID_POINTS_0,
            Self::Asteroid1 => &ASTEROID_POINTS_1,
            Self::Asteroid2 => &ASTEROID_POINTS_2,
            Self::Asteroid3 => &ASTEROID_POINTS_3,
            Self::Asteroid4 => &ASTEROID_POINTS_4,
        }
    }
}

/// One drawable run in the batch: a transform plus a vertex range.
#[derive(Clone, Copy, Debug)]
pub struct DrawInfo {
    /// Uniform scale applied to the vertex run.
    pub scale: f32,
    /// Rotation in radians applied after scaling.
    pub angle: f32,
    /// World-space X offset applied last.
    pub x: f32,
    /// World-space Y offset applied last.
    pub y: f32,
    /// Line color, 0xRRGGBBAA.
    pub color: u32,
    /// Start index into the vertex buffer (inclusive).
    pub from: usize,
    /// End index into the vertex buffer (exclusive).
    pub to: usize,
}

/// Per-frame line batch. Systems append model-space shapes, a single
/// transform pass bakes them to world space, then the whole batch is
/// submitted to a renderer in one walk.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<f32>,
    draws: Vec<DrawInfo>,
}

impl ShapeBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the previous frame's contents. Capacity is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }

    /// Appends a shape in model space along with its transform. Returns
    /// the vertex range the shape occupies.
    pub fn push_shape(
        &mut self,
        kind: ShapeKind,
        scale: f32,
        angle: f32,
        x: f32,
        y: f32,
        color: u32,
    ) -> (usize, usize) {
        let from = self.vertices.len();
        self.vertices.extend_from_slice(kind.points());
        let to = self.vertices.len();
        self.draws.push(DrawInfo {
            scale,
            angle,
            x,
            y,
            color,
            from,
            to,
        });
        (from, to)
    }

    /// Appends a single world-space segment with an identity transform.
    /// Safe to call before or after [`transform`](Self::transform).
    pub fn push_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let from = self.vertices.len();
        self.vertices.extend_from_slice(&[x0, y0, x1, y1]);
        self.draws.push(DrawInfo {
            scale: 1.0,
            angle: 0.0,
            x: 0.0,
            y: 0.0,
            color,
            from,
            to: from + 4,
        });
    }

    /// Bakes every draw's transform into its vertices: scale, then
    /// rotate, then offset. Runs once per frame over the whole buffer.
    pub fn transform(&mut self) {
        for draw in &self.draws {
            let (sin, cos) = draw.angle.sin_cos();
            for pair in self.vertices[draw.from..draw.to].chunks_exact_mut(2) {
                let x = pair[0] * draw.scale;
                let y = pair[1] * draw.scale;
                pair[0] = x * cos - y * sin + draw.x;
                pair[1] = x * sin + y * cos + draw.y;
            }
        }
    }

    /// Walks the batch and emits each draw as a connected polyline.
    pub fn submit<R: LineRenderer>(&self, renderer: &mut R) {
        for draw in &self.draws {
            let mut i = draw.from;
            while i + 3 < draw.to {
                renderer.draw_line(
                    self.vertices[i],
                    self.vertices[i + 1],
                    self.vertices[i + 2],
                    self.vertices[i + 3],
                    draw.color,
                );
                i += 2;
            }
        }
    }

    /// Number of f32 values in the vertex buffer.
    #[must_use]
    pub fn vertex_len(&self) -> usize {
        self.vertices.len()
    }

    /// Number of draws queued this frame.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    #[test]
    fn test_shape_tables_have_even_length() {
        for kind in [ShapeKind::Ship, ShapeKind::Flame]
            .into_iter()
            .chain(ASTEROID_KINDS)
        {
            assert_eq!(kind.points().len() % 2, 0, "{kind:?}");
            assert!(kind.points().len() >= 4, "{kind:?}");
        }
    }

    #[test]
    fn test_none_shape_draws_nothing() {
        let mut batch = ShapeBatch::new();
        batch.push_shape(ShapeKind::None, 1.0, 0.0, 0.0, 0.0, 0xFF);
        batch.transform();

        let mut renderer = RecordingRenderer::new();
        batch.submit(&mut renderer);
        assert!(renderer.lines().is_empty());
    }

    #[test]
    fn test_transform_scales_rotates_offsets() {
        let mut batch = ShapeBatch::new();
        // A unit segment along +X, scaled by 2, rotated a quarter turn,
        // then moved to (10, 20). (1, 0) should land at (10, 22).
        batch.push_segment(0.0, 0.0, 1.0, 0.0, 0xFF);
        batch.draws[0].scale = 2.0;
        batch.draws[0].angle = std::f32::consts::FRAC_PI_2;
        batch.draws[0].x = 10.0;
        batch.draws[0].y = 20.0;
        batch.transform();

        let mut renderer = RecordingRenderer::new();
        batch.submit(&mut renderer);
        let line = renderer.lines()[0];
        assert!((line.x0 - 10.0).abs() < 1e-5);
        assert!((line.y0 - 20.0).abs() < 1e-5);
        assert!((line.x1 - 10.0).abs() < 1e-5);
        assert!((line.y1 - 22.0).abs() < 1e-5);
    }

    #[test]
    fn test_ship_polyline_segment_count() {
        let mut batch = ShapeBatch::new();
        batch.push_shape(ShapeKind::Ship, 1.0, 0.0, 0.0, 0.0, 0xFF);
        batch.transform();

        let mut renderer = RecordingRenderer::new();
        batch.submit(&mut renderer);
        // 5 points -> 4 connected segments.
        assert_eq!(renderer.lines().len(), 4);
    }

    #[test]
    fn test_segment_keeps_world_coordinates_through_transform() {
        let mut batch = ShapeBatch::new();
        batch.push_segment(3.0, 4.0, 5.0, 6.0, 0xFF);
        batch.transform();

        let mut renderer = RecordingRenderer::new();
        batch.submit(&mut renderer);
        let line = renderer.lines()[0];
        assert_eq!((line.x0, line.y0, line.x1, line.y1), (3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn test_clear_resets_counts() {
        let mut batch = ShapeBatch::new();
        batch.push_shape(ShapeKind::Asteroid2, 1.0, 0.0, 0.0, 0.0, 0xFF);
        assert!(batch.vertex_len() > 0);

        batch.clear();
        assert_eq!(batch.vertex_len(), 0);
        assert_eq!(batch.draw_count(), 0);
    }
}
