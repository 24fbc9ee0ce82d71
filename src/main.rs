use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use hero_slides::config::{Args, Config};
use hero_slides::constants::WHEEL_PIXELS_PER_NOTCH;
use hero_slides::counter::CounterStrip;
use hero_slides::input::{InputEvent, InputOutcome, Key};
use hero_slides::{HeroEngine, NavigationState, scheduler};
use raylib::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod render;
mod texture_loader;

use crate::render::HeroRenderer;

const TITLE: &str = "Hero Slides";

fn key_pressed(rl: &RaylibHandle) -> Option<Key> {
    [
        (KeyboardKey::KEY_UP, Key::ArrowUp),
        (KeyboardKey::KEY_DOWN, Key::ArrowDown),
        (KeyboardKey::KEY_LEFT, Key::ArrowLeft),
        (KeyboardKey::KEY_RIGHT, Key::ArrowRight),
    ]
    .into_iter()
    .find(|(code, _)| rl.is_key_pressed(*code))
    .map(|(_, key)| key)
}

fn window_title(state: NavigationState, len: usize) -> String {
    format!(
        "{TITLE} {}/{}",
        CounterStrip::label(state.current_index),
        CounterStrip::label(len.saturating_sub(1))
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_args(Args::parse()).context("invalid command line")?;
    if !scheduler::install(config.scheduler) {
        warn!("scheduler already installed, keeping the existing one");
    }

    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title(TITLE)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let source = config.slide_source();
    info!(source = %source.describe(), "loading slides");
    let mut engine = HeroEngine::mount(source.as_ref(), config.engine);

    // Listeners run inside the engine; the window title is updated from the loop
    let latest: Rc<Cell<Option<NavigationState>>> = Rc::new(Cell::new(None));
    let sink = Rc::clone(&latest);
    engine.subscribe(move |state| sink.set(Some(state)));
    rl.set_window_title(&thread, &window_title(engine.state(), engine.deck().len()));

    let renderer = HeroRenderer::load(&mut rl, &thread, engine.deck());
    let mut screen = (rl.get_screen_width(), rl.get_screen_height());
    let mut cursor_hidden = false;

    while !rl.window_should_close() {
        let size = (rl.get_screen_width(), rl.get_screen_height());
        if size != screen {
            screen = size;
            engine.resize(size.0 as f32, size.1 as f32);
            debug!(width = size.0, height = size.1, "window resized");
        }
        let (sw, sh) = (screen.0 as f32, screen.1 as f32);

        // --- Input ---
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            engine.handle_input(InputEvent::Wheel { delta_y: -wheel * WHEEL_PIXELS_PER_NOTCH });
        }

        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            engine.handle_input(InputEvent::TouchStart { y: mouse.y });
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            // A press that did not travel far enough to swipe is a click
            if engine.handle_input(InputEvent::TouchEnd { y: mouse.y }) == InputOutcome::Ignored {
                let hero_top = -engine.viewport().scroll_y();
                let over_control = HeroRenderer::control_rect(hero_top, sw, sh).check_collision_point_rec(mouse);
                if mouse.y < hero_top + sh {
                    engine.handle_input(InputEvent::Click { x: mouse.x, over_control });
                }
            }
        }

        if let Some(key) = key_pressed(&rl) {
            engine.handle_input(InputEvent::Key(key));
        }

        // --- Update ---
        engine.update(rl.get_frame_time());

        if let Some(state) = latest.take() {
            rl.set_window_title(&thread, &window_title(state, engine.deck().len()));
        }

        let pointer_over_hero =
            engine.hero_in_view() && rl.is_cursor_on_screen() && mouse.y < sh - engine.viewport().scroll_y();
        if pointer_over_hero && !cursor_hidden {
            rl.hide_cursor();
            cursor_hidden = true;
        } else if !pointer_over_hero && cursor_hidden {
            rl.show_cursor();
            cursor_hidden = false;
        }

        // --- Draw ---
        let mut d = rl.begin_drawing(&thread);
        renderer.draw(&mut d, &engine, pointer_over_hero.then_some(mouse));
    }

    engine.unmount();
    info!(last = engine.state().current_index, "window closed");
    Ok(())
}
