use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One corner of a colored triangle, in logical screen pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// A line of text queued for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSection {
    pub text: String,
    pub size: f32,
    /// Top-left of the text box in logical pixels.
    pub position: Vec2,
    pub color: [f32; 4],
}

/// Everything drawn in one frame, recorded before any GPU work happens.
///
/// Shapes are drawn first in submission order, text on top of them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    clear_color: [f32; 4],
    vertices: Vec<ShapeVertex>,
    texts: Vec<TextSection>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            ..Self::default()
        }
    }

    /// Set the color the frame is cleared to.
    pub fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    /// Queue an axis-aligned filled rectangle.
    pub fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: [f32; 4]) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let (x0, y0) = (top_left.x, top_left.y);
        let (x1, y1) = (top_left.x + size.x, top_left.y + size.y);
        let corner = |x: f32, y: f32| ShapeVertex {
            position: [x, y],
            color,
        };
        self.vertices.extend_from_slice(&[
            corner(x0, y0),
            corner(x1, y0),
            corner(x1, y1),
            corner(x0, y0),
            corner(x1, y1),
            corner(x0, y1),
        ]);
    }

    /// Queue the border of a rectangle, drawn inside its bounds.
    pub fn stroke_rect(&mut self, top_left: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
        let t = thickness.min(size.x * 0.5).min(size.y * 0.5);
        if t <= 0.0 {
            return;
        }
        let inner_height = size.y - 2.0 * t;
        self.fill_rect(top_left, Vec2::new(size.x, t), color);
        self.fill_rect(
            Vec2::new(top_left.x, top_left.y + size.y - t),
            Vec2::new(size.x, t),
            color,
        );
        self.fill_rect(
            Vec2::new(top_left.x, top_left.y + t),
            Vec2::new(t, inner_height),
            color,
        );
        self.fill_rect(
            Vec2::new(top_left.x + size.x - t, top_left.y + t),
            Vec2::new(t, inner_height),
            color,
        );
    }

    /// Queue a line of text.
    pub fn draw_text(&mut self, text: impl Into<String>, size: f32, position: Vec2, color: [f32; 4]) {
        self.texts.push(TextSection {
            text: text.into(),
            size,
            position,
            color,
        });
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextSection] {
        &self.texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_rect_is_two_triangles_spanning_its_bounds() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::new(40.0, 80.0), Vec2::new(40.0, 40.0), [1.0; 4]);

        let vertices = list.vertices();
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().copied().fold(f32::MAX, f32::min), 40.0);
        assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 80.0);
        assert_eq!(ys.iter().copied().fold(f32::MAX, f32::min), 80.0);
        assert_eq!(ys.iter().copied().fold(f32::MIN, f32::max), 120.0);
    }

    #[test]
    fn degenerate_rects_are_skipped() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, Vec2::new(0.0, 10.0), [1.0; 4]);
        list.stroke_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.0, [1.0; 4]);
        assert!(list.vertices().is_empty());
    }

    #[test]
    fn stroke_is_four_edges() {
        let mut list = DrawList::new();
        list.stroke_rect(Vec2::ZERO, Vec2::new(40.0, 40.0), 1.0, [0.5; 4]);
        assert_eq!(list.vertices().len(), 24);
        assert!(list.vertices().iter().all(|v| v.color == [0.5; 4]));
    }

    #[test]
    fn text_and_clear_color_are_recorded() {
        let mut list = DrawList::new();
        list.clear([0.2, 0.2, 0.2, 1.0]);
        list.draw_text("Wood: 3", 24.0, Vec2::new(10.0, 10.0), [0.0, 0.0, 0.0, 1.0]);

        assert_eq!(list.clear_color(), [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(list.texts().len(), 1);
        assert_eq!(list.texts()[0].text, "Wood: 3");
    }
}
