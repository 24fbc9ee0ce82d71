use std::collections::HashMap;

use crate::constants::TEXT_LINES;
use crate::deck::SlideDeck;
use crate::timeline::{Part, Property};

/// Pivot for the image's scale and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformOrigin {
    #[default]
    TopLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPose {
    pub translate_y: f32, // In line heights
    pub opacity: f32,
}

impl TextPose {
    pub const NEUTRAL: TextPose = TextPose { translate_y: 0.0, opacity: 1.0 };
}

/// Render state of one slide. Written by the orchestrator, read by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub id: String,
    pub index: usize,
    pub active: bool,
    pub visible: bool,

    pub translate_y: f32, // Fraction of the viewport height
    pub image_scale: f32,
    pub image_rotation: f32, // Degrees
    pub origin: TransformOrigin,

    pub lines: [TextPose; TEXT_LINES],
}

impl SlideView {
    fn new(id: String, index: usize) -> Self {
        Self {
            id,
            index,
            active: false,
            visible: false,
            translate_y: 0.0,
            image_scale: 1.0,
            image_rotation: 0.0,
            origin: TransformOrigin::default(),
            lines: [TextPose::NEUTRAL; TEXT_LINES],
        }
    }

    pub fn reset_pose(&mut self) {
        self.translate_y = 0.0;
        self.image_scale = 1.0;
        self.image_rotation = 0.0;
        self.lines = [TextPose::NEUTRAL; TEXT_LINES];
    }

    pub fn apply(&mut self, part: Part, property: Property, value: f32) {
        match (part, property) {
            (Part::Container, Property::TranslateY) => self.translate_y = value,
            (Part::Image, Property::Scale) => self.image_scale = value,
            (Part::Image, Property::Rotation) => self.image_rotation = value,
            (Part::TextLine(line), Property::TranslateY) => {
                if let Some(pose) = self.lines.get_mut(line) {
                    pose.translate_y = value;
                }
            }
            (Part::TextLine(line), Property::Opacity) => {
                if let Some(pose) = self.lines.get_mut(line) {
                    pose.opacity = value;
                }
            }
            _ => {}
        }
    }
}

/// Slide id -> view, built once from the deck.
#[derive(Debug, Clone, Default)]
pub struct SlideRegistry {
    order: Vec<String>,
    views: HashMap<String, SlideView>,
}

impl SlideRegistry {
    pub fn new(deck: &SlideDeck) -> Self {
        let mut registry = Self::default();
        for (index, slide) in deck.iter().enumerate() {
            let previous = registry.views.insert(slide.id.clone(), SlideView::new(slide.id.clone(), index));
            debug_assert!(previous.is_none(), "slide id {} registered twice", slide.id);
            registry.order.push(slide.id.clone());
        }

        // The first slide starts on screen
        if let Some(first) = registry.order.first().and_then(|id| registry.views.get_mut(id)) {
            first.active = true;
            first.visible = true;
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn view_mut(&mut self, id: &str) -> Option<&mut SlideView> {
        self.views.get_mut(id)
    }

    pub fn view_at(&self, index: usize) -> Option<&SlideView> {
        self.id_at(index).and_then(|id| self.views.get(id))
    }

    /// Visible slides in paint order: the active slide first, arriving slides on top.
    pub fn draw_order(&self) -> Vec<&SlideView> {
        let mut visible: Vec<&SlideView> = self
            .order
            .iter()
            .filter_map(|id| self.views.get(id))
            .filter(|view| view.visible)
            .collect();
        visible.sort_by_key(|view| !view.active);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::Slide;

    #[test]
    fn first_slide_starts_active_and_visible() {
        let registry = SlideRegistry::new(&SlideDeck::default_deck());
        assert_eq!(registry.len(), 5);
        let first = registry.view_at(0).expect("first view");
        assert!(first.active && first.visible);
        assert!(!registry.view_at(1).expect("second view").visible);
        assert_eq!(registry.draw_order().len(), 1);
    }

    #[test]
    fn apply_routes_properties_to_parts() {
        let mut registry = SlideRegistry::new(&SlideDeck::default_deck());
        let view = registry.view_mut("default-2").expect("view");
        view.apply(Part::Container, Property::TranslateY, 0.5);
        view.apply(Part::Image, Property::Scale, 1.2);
        view.apply(Part::Image, Property::Rotation, -3.0);
        view.apply(Part::TextLine(1), Property::Opacity, 0.25);
        view.apply(Part::TextLine(7), Property::Opacity, 0.0);

        assert_eq!(view.translate_y, 0.5);
        assert_eq!(view.image_scale, 1.2);
        assert_eq!(view.image_rotation, -3.0);
        assert_eq!(view.lines[1].opacity, 0.25);
        assert_eq!(view.lines[0], TextPose::NEUTRAL);
    }

    #[test]
    fn every_index_maps_to_its_own_view() {
        let supplied = ["a", "a#2", "a", "a"]
            .iter()
            .map(|id| Slide::new(*id, *id, ""))
            .collect::<Vec<_>>();
        let registry = SlideRegistry::new(&SlideDeck::from_supplied(supplied.into()));
        for index in 0..4 {
            assert_eq!(registry.view_at(index).map(|view| view.index), Some(index));
        }
    }

    #[test]
    fn arriving_slide_paints_over_active_one() {
        let mut registry = SlideRegistry::new(&SlideDeck::default_deck());
        registry.view_mut("default-3").expect("view").visible = true;
        let order: Vec<_> = registry.draw_order().iter().map(|view| view.id.clone()).collect();
        assert_eq!(order, ["default-1", "default-3"]);
    }
}
