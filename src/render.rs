use std::collections::HashMap;

use hero_slides::HeroEngine;
use hero_slides::counter::CounterStrip;
use hero_slides::deck::SlideDeck;
use hero_slides::registry::{SlideView, TransformOrigin};
use raylib::prelude::*;
use tracing::{info, warn};

use crate::texture_loader::load_texture_with_exif_rotation;

// Slide backgrounds when no image could be loaded
const PALETTE: [Color; 5] = [
    Color::new(28, 44, 74, 255),
    Color::new(74, 38, 56, 255),
    Color::new(30, 66, 52, 255),
    Color::new(20, 52, 82, 255),
    Color::new(82, 62, 30, 255),
];

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// GPU side of the hero: one texture per slide id, loaded once.
pub struct HeroRenderer {
    textures: HashMap<String, Texture2D>,
    fallback: Option<Texture2D>,
}

impl HeroRenderer {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, deck: &SlideDeck) -> Self {
        let fallback = deck.fallback_image().and_then(|path| {
            load_texture_with_exif_rotation(rl, thread, path)
                .map_err(|e| warn!(error = %e, "fallback image unavailable"))
                .ok()
        });

        let mut textures = HashMap::new();
        for (index, slide) in deck.iter().enumerate() {
            // Slides showing the deck image share the fallback texture
            let Some(path) = deck.image_ref(index).filter(|path| Some(*path) != deck.fallback_image()) else {
                continue;
            };
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => {
                    textures.insert(slide.id.clone(), texture);
                }
                Err(e) => warn!(id = %slide.id, error = %e, "slide image unavailable, using fallback"),
            }
        }
        info!(loaded = textures.len(), slides = deck.len(), "slide textures ready");

        Self { textures, fallback }
    }

    fn texture_for(&self, id: &str) -> Option<&Texture2D> {
        self.textures.get(id).or(self.fallback.as_ref())
    }

    /// The "explore" button drawn in the text block of a slide whose top edge is at `top`.
    pub fn control_rect(top: f32, screen_width: f32, screen_height: f32) -> Rectangle {
        Rectangle::new(screen_width * 0.08, top + screen_height * 0.78, 180.0, 44.0)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, engine: &HeroEngine, pointer: Option<Vector2>) {
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        let page_top = -engine.viewport().scroll_y();

        d.clear_background(Color::BLACK);

        for view in engine.registry().draw_order() {
            let top = page_top + view.translate_y * sh;
            self.draw_background(d, view, top, sw, sh);
            draw_text_block(d, engine.deck(), view, top, sw, sh);
        }

        draw_counter(d, engine.counter(), page_top, sw, sh);
        draw_page_below(d, page_top + sh, sw, sh);

        if let Some(pointer) = pointer {
            draw_cursor_hint(d, pointer, sw, engine.state().busy);
        }
    }

    fn draw_background(&self, d: &mut RaylibDrawHandle, view: &SlideView, top: f32, sw: f32, sh: f32) {
        let width = sw * view.image_scale;
        let height = sh * view.image_scale;

        // Scale and rotation pivot on the transform origin
        let (anchor, origin) = match view.origin {
            TransformOrigin::TopLeft => (Vector2::new(0.0, top), Vector2::new(0.0, 0.0)),
            TransformOrigin::BottomRight => (Vector2::new(sw, top + sh), Vector2::new(width, height)),
        };
        let dest = Rectangle::new(anchor.x, anchor.y, width, height);

        match self.texture_for(&view.id) {
            Some(texture) => {
                // Cover-fit: crop the texture to the screen's aspect ratio
                let tex_width = texture.width() as f32;
                let tex_height = texture.height() as f32;
                let cover = (sw / tex_width).max(sh / tex_height);
                let src_width = sw / cover;
                let src_height = sh / cover;
                let source = Rectangle::new(
                    (tex_width - src_width) * 0.5,
                    (tex_height - src_height) * 0.5,
                    src_width,
                    src_height,
                );
                d.draw_texture_pro(texture, source, dest, origin, view.image_rotation, Color::WHITE);
            }
            None => {
                let color = PALETTE[view.index % PALETTE.len()];
                d.draw_rectangle_pro(dest, origin, view.image_rotation, color);
            }
        }

        // Darken the lower half so the text stays readable
        d.draw_rectangle_gradient_v(
            0,
            (top + sh * 0.5) as i32,
            sw as i32,
            (sh * 0.5) as i32,
            with_alpha(Color::BLACK, 0.0),
            with_alpha(Color::BLACK, 0.6),
        );
    }
}

fn draw_text_block(d: &mut RaylibDrawHandle, deck: &SlideDeck, view: &SlideView, top: f32, sw: f32, sh: f32) {
    let Some(slide) = deck.get(view.index) else {
        return;
    };

    let x = (sw * 0.08) as i32;
    let primary_size = (sh / 10.0).max(24.0);
    let secondary_size = (sh / 28.0).max(14.0);
    let sizes = [primary_size, secondary_size];
    let mut y = top + sh * 0.52;

    let text_alpha = view.lines.iter().map(|line| line.opacity).fold(0.0, f32::max);
    if let Some(category) = &slide.category {
        let label = category.to_uppercase();
        d.draw_text(&label, x, (y - secondary_size * 1.6) as i32, secondary_size as i32, with_alpha(Color::GOLD, text_alpha));
    }

    for ((text, pose), size) in slide.lines().iter().zip(view.lines.iter()).zip(sizes) {
        let line_y = y + pose.translate_y * size;
        d.draw_text(text, x, line_y as i32, size as i32, with_alpha(Color::RAYWHITE, pose.opacity));
        y += size * 1.25;
    }

    let control = HeroRenderer::control_rect(top, sw, sh);
    d.draw_rectangle_lines(
        control.x as i32,
        control.y as i32,
        control.width as i32,
        control.height as i32,
        with_alpha(Color::RAYWHITE, text_alpha),
    );
    d.draw_text(
        "EXPLORE",
        control.x as i32 + 44,
        control.y as i32 + 12,
        20,
        with_alpha(Color::RAYWHITE, text_alpha),
    );
}

fn draw_counter(d: &mut RaylibDrawHandle, counter: &CounterStrip, page_top: f32, sw: f32, sh: f32) {
    let row = counter.row_height();
    let x = (sw - 140.0) as i32;
    let window_top = page_top + sh * 0.5 - row * 0.5;
    let font_size = (row * 0.8) as i32;

    // Only the row inside the window is fully opaque; neighbours fade as they scroll out
    for (index, label) in counter.labels().iter().enumerate() {
        let y = window_top + index as f32 * row - counter.offset_y();
        let distance = ((y - window_top) / row).abs();
        if distance >= 1.0 {
            continue;
        }
        d.draw_text(label, x, y as i32, font_size, with_alpha(Color::RAYWHITE, 1.0 - distance));
    }

    let total = format!("/ {}", CounterStrip::label(counter.len().saturating_sub(1)));
    d.draw_text(&total, x + font_size + 16, window_top as i32 + font_size / 3, font_size / 2, with_alpha(Color::RAYWHITE, 0.6));
}

fn draw_page_below(d: &mut RaylibDrawHandle, top: f32, sw: f32, sh: f32) {
    if top >= sh {
        return;
    }
    d.draw_rectangle(0, top as i32, sw as i32, sh as i32, Color::RAYWHITE);
    d.draw_text("Stories", (sw * 0.08) as i32, (top + sh * 0.12) as i32, (sh / 14.0) as i32, Color::DARKGRAY);
    d.draw_text(
        "Scroll up to return to the hero.",
        (sw * 0.08) as i32,
        (top + sh * 0.25) as i32,
        (sh / 36.0) as i32,
        Color::GRAY,
    );
}

fn draw_cursor_hint(d: &mut RaylibDrawHandle, pointer: Vector2, sw: f32, busy: bool) {
    let label = if pointer.x < sw * 0.5 { "PREV" } else { "NEXT" };
    let alpha = if busy { 0.35 } else { 0.9 };
    d.draw_circle_lines(pointer.x as i32, pointer.y as i32, 34.0, with_alpha(Color::RAYWHITE, alpha));
    d.draw_text(label, pointer.x as i32 - 22, pointer.y as i32 - 8, 18, with_alpha(Color::RAYWHITE, alpha));
}
