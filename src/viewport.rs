/// Page model around the hero: the hero fills the first screen and a content
/// section of `content_below` pixels follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scroll_y: f32,
    content_below: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, content_below: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            content_below: content_below.max(0.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// True while the hero occupies the whole screen.
    pub fn hero_fully_visible(&self) -> bool {
        self.scroll_y <= 0.0
    }

    /// True while any part of the hero is on screen.
    pub fn hero_in_view(&self) -> bool {
        self.scroll_y < self.height
    }

    pub fn scroll_by(&mut self, delta_y: f32) {
        self.scroll_y = (self.scroll_y + delta_y).clamp(0.0, self.content_below);
    }
}
