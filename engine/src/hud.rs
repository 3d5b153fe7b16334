use glam::Vec2;

use crate::render::DrawList;

/// Text element drawn in screen-space HUD coordinates (pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    pub text: String,
    pub size: f32,
    pub position: Vec2, // screen-space pixels (0,0 = top-left)
    pub color: [f32; 4],
}

/// Filled rectangle for panels, bars and tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct HudRect {
    pub position: Vec2, // top-left in screen-space pixels
    pub size: Vec2,
    pub color: [f32; 4],
}

/// Rectangle border, drawn inside its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct HudOutline {
    pub position: Vec2,
    pub size: Vec2,
    pub thickness: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub enum HudElement {
    Text(HudText),
    Rect(HudRect),
    Outline(HudOutline),
}

/// A layer of HUD elements rendered in screen space, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct HudLayer {
    elements: Vec<HudElement>,
}

impl HudLayer {
    /// Create an empty HUD layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all HUD elements.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn add_text(&mut self, text: HudText) {
        self.elements.push(HudElement::Text(text));
    }

    pub fn add_rect(&mut self, rect: HudRect) {
        self.elements.push(HudElement::Rect(rect));
    }

    pub fn add_outline(&mut self, outline: HudOutline) {
        self.elements.push(HudElement::Outline(outline));
    }

    pub fn elements(&self) -> &[HudElement] {
        &self.elements
    }

    /// Text lines in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &HudText> {
        self.elements.iter().filter_map(|element| match element {
            HudElement::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Record every element into a frame's draw list.
    pub fn draw(&self, list: &mut DrawList) {
        for element in &self.elements {
            match element {
                HudElement::Text(ht) => list.draw_text(ht.text.clone(), ht.size, ht.position, ht.color),
                HudElement::Rect(hr) => list.fill_rect(hr.position, hr.size, hr.color),
                HudElement::Outline(ho) => {
                    list.stroke_rect(ho.position, ho.size, ho.thickness, ho.color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_forwards_elements_to_the_draw_list() {
        let mut hud = HudLayer::new();
        hud.add_outline(HudOutline {
            position: Vec2::ZERO,
            size: Vec2::splat(40.0),
            thickness: 1.0,
            color: [0.5; 4],
        });
        hud.add_rect(HudRect {
            position: Vec2::ZERO,
            size: Vec2::splat(40.0),
            color: [1.0; 4],
        });
        hud.add_text(HudText {
            text: "Selected: None".into(),
            size: 24.0,
            position: Vec2::new(10.0, 130.0),
            color: [0.0, 0.0, 0.0, 1.0],
        });

        let mut list = DrawList::new();
        hud.draw(&mut list);
        assert_eq!(list.vertices().len(), 24 + 6);
        assert_eq!(list.texts().len(), 1);
        assert_eq!(list.texts()[0].text, "Selected: None");
    }

    #[test]
    fn clear_empties_the_layer() {
        let mut hud = HudLayer::new();
        hud.add_text(HudText {
            text: "x".into(),
            size: 12.0,
            position: Vec2::ZERO,
            color: [1.0; 4],
        });
        assert_eq!(hud.texts().count(), 1);
        hud.clear();
        assert!(hud.elements().is_empty());
    }
}
