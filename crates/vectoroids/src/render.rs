//! # Render Boundary
//!
//! The game draws through [`LineRenderer`] and nothing else. A windowed
//! build implements the trait over its rasterizer; tests and the headless
//! demo use [`RecordingRenderer`].

/// Sink for the wireframe line lists produced each frame.
pub trait LineRenderer {
    /// Begins a new frame, discarding the previous one.
    fn clear(&mut self);

    /// Draws a single colored segment in pixel coordinates.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32);

    /// Finishes the frame and makes it visible.
    fn present(&mut self);
}

/// One recorded segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Segment start X.
    pub x0: f32,
    /// Segment start Y.
    pub y0: f32,
    /// Segment end X.
    pub x1: f32,
    /// Segment end Y.
    pub y1: f32,
    /// Line color, 0xRRGGBBAA.
    pub color: u32,
}

/// In-memory renderer that records everything drawn. Used by tests and
/// the headless demo to inspect frame output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    lines: Vec<Line>,
    frames_presented: u64,
    last_frame_lines: usize,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments drawn since the last `clear`.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Total number of `present` calls.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Segment count of the most recently presented frame.
    #[must_use]
    pub fn last_frame_lines(&self) -> usize {
        self.last_frame_lines
    }
}

impl LineRenderer for RecordingRenderer {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        self.lines.push(Line { x0, y0, x1, y1, color });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        self.last_frame_lines = self.lines.len();
    }
}
