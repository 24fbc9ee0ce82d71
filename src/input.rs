use tracing::debug;

use crate::state::Direction;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Positive `delta_y` scrolls the page down.
    Wheel { delta_y: f32 },
    TouchStart { y: f32 },
    TouchEnd { y: f32 },
    Key(Key),
    /// `over_control` is set when the pointer is over a link or button drawn in the hero.
    Click { x: f32, over_control: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not a navigation gesture.
    Ignored,
    /// Boundary wheel, or any gesture while the hero is off screen: the page handles it.
    PassThrough,
    /// Turned into a navigate call; `accepted` is false when the controller was busy.
    Consumed { accepted: bool },
}

impl InputOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, InputOutcome::Consumed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPolicy {
    #[default]
    NavigateEverywhere,
    SuppressOverControls,
}

/// The one thing input may drive.
pub trait Navigator {
    fn current_index(&self) -> usize;
    fn len(&self) -> usize;
    fn navigate(&mut self, direction: Direction) -> bool;
}

pub struct InputArbiter {
    swipe_threshold: f32,
    click_policy: ClickPolicy,
    touch_start_y: Option<f32>,
}

impl InputArbiter {
    pub fn new(swipe_threshold: f32, click_policy: ClickPolicy) -> Self {
        Self {
            swipe_threshold,
            click_policy,
            touch_start_y: None,
        }
    }

    pub fn handle(&mut self, event: InputEvent, viewport: &Viewport, navigator: &mut dyn Navigator) -> InputOutcome {
        let direction = match event {
            InputEvent::Wheel { delta_y } => match self.wheel_direction(delta_y, viewport, &*navigator) {
                Ok(direction) => direction,
                Err(outcome) => return outcome,
            },
            InputEvent::TouchStart { y } => {
                self.touch_start_y = Some(y);
                return InputOutcome::Ignored;
            }
            InputEvent::TouchEnd { y } => {
                let Some(start_y) = self.touch_start_y.take() else {
                    return InputOutcome::Ignored;
                };
                let delta = start_y - y;
                if delta.abs() < self.swipe_threshold {
                    debug!(delta, "swipe below threshold");
                    return InputOutcome::Ignored;
                }
                // Finger moved up: content follows, next slide
                if delta > 0.0 { Direction::Next } else { Direction::Previous }
            }
            InputEvent::Key(key) => match key {
                Key::ArrowDown | Key::ArrowRight => Direction::Next,
                Key::ArrowUp | Key::ArrowLeft => Direction::Previous,
                Key::Other => return InputOutcome::Ignored,
            },
            InputEvent::Click { x, over_control } => {
                if over_control && self.click_policy == ClickPolicy::SuppressOverControls {
                    return InputOutcome::Ignored;
                }
                if x < viewport.width() * 0.5 { Direction::Previous } else { Direction::Next }
            }
        };

        // Once the hero has scrolled off screen, gestures belong to the page
        if !viewport.hero_in_view() {
            debug!(?event, "hero out of view, gesture left to the page");
            return InputOutcome::PassThrough;
        }

        let accepted = navigator.navigate(direction);
        InputOutcome::Consumed { accepted }
    }

    fn wheel_direction(
        &self,
        delta_y: f32,
        viewport: &Viewport,
        navigator: &dyn Navigator,
    ) -> Result<Direction, InputOutcome> {
        if !viewport.hero_fully_visible() {
            return Err(InputOutcome::PassThrough);
        }
        let index = navigator.current_index();
        let last = navigator.len().saturating_sub(1);

        if delta_y > 0.0 {
            if index >= last {
                return Err(InputOutcome::PassThrough);
            }
            Ok(Direction::Next)
        } else if delta_y < 0.0 {
            if index == 0 {
                return Err(InputOutcome::PassThrough);
            }
            Ok(Direction::Previous)
        } else {
            Err(InputOutcome::Ignored)
        }
    }
}
