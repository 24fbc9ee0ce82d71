use tracing::{debug, info};

use crate::constants::*;
use crate::counter::CounterStrip;
use crate::deck::SlideDeck;
use crate::input::{ClickPolicy, InputArbiter, InputEvent, InputOutcome, Navigator};
use crate::navigation::NavigationController;
use crate::orchestrator::{TransitionOrchestrator, TransitionTiming};
use crate::registry::SlideRegistry;
use crate::scheduler::scheduler;
use crate::source::SlideSource;
use crate::state::{Direction, NavigationState};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub timing: TransitionTiming,
    pub swipe_threshold: f32,
    pub click_policy: ClickPolicy,
    pub width: f32,
    pub height: f32,
    pub content_below: f32, // Page height below the hero, in pixels
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timing: TransitionTiming::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            click_policy: ClickPolicy::default(),
            width: RENDER_WIDTH as f32,
            height: RENDER_HEIGHT as f32,
            content_below: RENDER_HEIGHT as f32,
        }
    }
}

// Controller and orchestrator together, so the arbiter can borrow them while the
// engine lends it the viewport.
struct Core {
    controller: NavigationController,
    orchestrator: TransitionOrchestrator,
}

impl Navigator for Core {
    fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    fn len(&self) -> usize {
        self.controller.len()
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        self.controller.navigate(direction, &mut self.orchestrator)
    }
}

/// The mounted hero: input in, poses out.
pub struct HeroEngine {
    deck: SlideDeck,
    core: Core,
    arbiter: InputArbiter,
    viewport: Viewport,
    mounted: bool,
}

impl HeroEngine {
    pub fn mount(source: &dyn SlideSource, options: EngineOptions) -> Self {
        Self::with_deck(SlideDeck::resolve(source), options)
    }

    pub fn with_deck(deck: SlideDeck, options: EngineOptions) -> Self {
        let core = Core {
            controller: NavigationController::new(deck.len()),
            orchestrator: TransitionOrchestrator::new(&deck, options.timing),
        };
        info!(slides = deck.len(), "hero mounted");

        Self {
            deck,
            core,
            arbiter: InputArbiter::new(options.swipe_threshold, options.click_policy),
            viewport: Viewport::new(options.width, options.height, options.content_below),
            mounted: true,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if !self.mounted {
            return InputOutcome::Ignored;
        }
        let outcome = self.arbiter.handle(event, &self.viewport, &mut self.core);
        if let (InputEvent::Wheel { delta_y }, InputOutcome::PassThrough) = (event, outcome) {
            self.viewport.scroll_by(delta_y);
        }
        outcome
    }

    /// Programmatic navigation, same path as any gesture.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.mounted && self.core.navigate(direction)
    }

    /// Advances by one frame, stepped through the process-wide scheduler.
    pub fn update(&mut self, frame_dt: f32) {
        let dt = scheduler().step(frame_dt);
        self.advance(dt);
    }

    /// Advances the transition clock by exactly `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.mounted {
            return;
        }
        if let Some(request) = self.core.orchestrator.advance(dt) {
            self.core.controller.commit(request);
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.core.orchestrator.cancel();
        self.core.controller.teardown();
        debug!("hero unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> NavigationState {
        self.core.controller.state()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(NavigationState) + 'static) {
        self.core.controller.subscribe(listener);
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn registry(&self) -> &SlideRegistry {
        self.core.orchestrator.registry()
    }

    pub fn counter(&self) -> &CounterStrip {
        self.core.orchestrator.counter()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
    }

    pub fn hero_in_view(&self) -> bool {
        self.viewport.hero_in_view()
    }

    pub fn is_transitioning(&self) -> bool {
        self.core.orchestrator.is_running()
    }
}

impl Drop for HeroEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}
