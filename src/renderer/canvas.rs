//! Drawing surface abstraction
//!
//! The frame painter only speaks in these primitives. Coordinates are
//! logical canvas units (800x600, origin top-left, y down); angles are
//! radians measured clockwise from +x, the way a y-down canvas sweeps.

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// A 2D surface a frame can be painted onto
pub trait Canvas {
    /// Wipe the whole surface to `color`
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Circle outline of `width`, its stroke centered on the circle of `radius`
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color);

    /// Open arc from `start` to `end` (end > start)
    #[allow(clippy::too_many_arguments)]
    fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    );

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color);

    /// Text with its baseline-left corner at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// Hand the finished frame to the display
    fn present(&mut self) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    FillCircle { cx: f32, cy: f32, radius: f32, color: Color },
    StrokeCircle { cx: f32, cy: f32, radius: f32, width: f32, color: Color },
    StrokeArc { cx: f32, cy: f32, radius: f32, start: f32, end: f32, width: f32, color: Color },
    StrokeLine { x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color },
    Text { text: String, x: f32, y: f32, size: f32, color: Color },
}

/// Canvas that records calls instead of drawing them
#[derive(Debug, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
    /// Number of frames presented so far
    pub presented: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius, color });
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            cx,
            cy,
            radius,
            width,
            color,
        });
    }

    fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::StrokeArc {
            cx,
            cy,
            radius,
            start,
            end,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
