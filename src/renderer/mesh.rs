//! Canvas that tessellates every primitive into triangles for the GPU
//!
//! Text cannot be tessellated here; it is collected as `TextLabel`s and
//! shown by the platform layer on top of the canvas.

use glam::Vec2;
use std::f32::consts::TAU;

use super::canvas::{Canvas, Color};
use super::shapes;
use super::vertex::Vertex;
use crate::hex;

/// A piece of text to overlay on the frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Baseline-left corner, logical units
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
}

/// Triangle list plus overlay text for one frame
#[derive(Debug)]
pub struct MeshCanvas {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self {
            clear_color: hex(0x000000),
            vertices: Vec::with_capacity(8192),
            labels: Vec::new(),
        }
    }
}

impl MeshCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Canvas for MeshCanvas {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.vertices.extend(shapes::rect(x, y, w, h, color));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let segments = shapes::segments_for(radius, TAU);
        self.vertices
            .extend(shapes::circle(Vec2::new(cx, cy), radius, color, segments));
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        self.stroke_arc(cx, cy, radius, 0.0, TAU, width, color);
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
        let segments = shapes::segments_for(radius, end - start);
        self.vertices.extend(shapes::arc_band(
            Vec2::new(cx, cy),
            radius,
            width,
            start,
            end,
            color,
            segments,
        ));
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.vertices.extend(shapes::line(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            width,
            color,
        ));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}
