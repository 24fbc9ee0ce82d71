//! Runs the coordinated transition for one accepted navigation request.
//!
//! The whole transition is one [`Timeline`]:
//!
//! | step | target                      | start | duration | easing          |
//! |------|-----------------------------|-------|----------|-----------------|
//! | 1    | outgoing text, per line     | 0.0   | 0.7      | accelerate-in   |
//! | 2    | outgoing container + image  | 0.2   | 1.3      | decelerate-out  |
//! | 3    | incoming container + image  | 0.2   | 1.3      | decelerate-out  |
//! | 4    | counter strip               | 0.2   | 1.3      | decelerate-out  |
//! | 5    | incoming text, per line     | 0.9   | 1.0      | decelerate-out  |
//!
//! Steps 2, 3 and 4 share start, duration and easing so the counter and both
//! slides settle on the same frame.

use tracing::{debug, warn};

use crate::constants::*;
use crate::counter::CounterStrip;
use crate::deck::SlideDeck;
use crate::error::AnimationError;
use crate::navigation::TransitionRunner;
use crate::registry::{SlideRegistry, TransformOrigin};
use crate::state::{Direction, TransitionRequest};
use crate::timeline::{Easing, Part, Property, Role, Sample, Target, Timeline, Tween, TweenRunner};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub text_out_start: f32,
    pub text_out_duration: f32,
    pub slide_start: f32,
    pub slide_duration: f32,
    pub text_in_start: f32,
    pub text_in_duration: f32,
    pub stagger: f32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            text_out_start: TEXT_OUT_START,
            text_out_duration: TEXT_OUT_DURATION,
            slide_start: SLIDE_START,
            slide_duration: SLIDE_DURATION,
            text_in_start: TEXT_IN_START,
            text_in_duration: TEXT_IN_DURATION,
            stagger: TEXT_STAGGER,
        }
    }
}

impl TransitionTiming {
    /// Uniformly stretches every offset and duration.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            text_out_start: self.text_out_start * factor,
            text_out_duration: self.text_out_duration * factor,
            slide_start: self.slide_start * factor,
            slide_duration: self.slide_duration * factor,
            text_in_start: self.text_in_start * factor,
            text_in_duration: self.text_in_duration * factor,
            stagger: self.stagger * factor,
        }
    }

    /// When the slide bodies and the counter come to rest.
    pub fn slide_end(&self) -> f32 {
        self.slide_start + self.slide_duration
    }
}

/// Generated schedule plus the pivots, which are fixed for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub timeline: Timeline,
    pub outgoing_origin: TransformOrigin,
    pub incoming_origin: TransformOrigin,
}

impl TransitionPlan {
    pub fn build(request: TransitionRequest, timing: &TransitionTiming, row_height: f32) -> Self {
        let s = request.direction.sign();
        let mut timeline = Timeline::new();
        let mut add = |target, property, from, to, start, duration, easing| {
            timeline.push(Tween { target, property, from, to, start, duration, easing });
        };
        let outgoing = |part| Target::Slide(Role::Outgoing, part);
        let incoming = |part| Target::Slide(Role::Incoming, part);

        // 1. Outgoing text leaves
        for line in 0..TEXT_LINES {
            let start = timing.text_out_start + line as f32 * timing.stagger;
            let target = outgoing(Part::TextLine(line));
            add(target, Property::TranslateY, 0.0, -s, start, timing.text_out_duration, Easing::AccelerateIn);
            add(target, Property::Opacity, 1.0, 0.0, start, timing.text_out_duration, Easing::AccelerateIn);
        }

        // 2. Outgoing slide warps off-screen in the direction of travel
        let (start, duration, easing) = (timing.slide_start, timing.slide_duration, Easing::DecelerateOut);
        add(outgoing(Part::Container), Property::TranslateY, 0.0, -s, start, duration, easing);
        add(outgoing(Part::Image), Property::Scale, 1.0, WARP_SCALE, start, duration, easing);
        add(outgoing(Part::Image), Property::Rotation, 0.0, s * WARP_ROTATION, start, duration, easing);

        // 3. Incoming slide unwinds the inverse warp from the opposite side
        add(incoming(Part::Container), Property::TranslateY, s, 0.0, start, duration, easing);
        add(incoming(Part::Image), Property::Scale, WARP_SCALE, 1.0, start, duration, easing);
        add(incoming(Part::Image), Property::Rotation, -s * WARP_ROTATION, 0.0, start, duration, easing);

        // 4. Counter moves in lockstep with the slides
        add(
            Target::Counter,
            Property::TranslateY,
            row_height * request.from_index as f32,
            row_height * request.to_index as f32,
            start,
            duration,
            easing,
        );

        // 5. Incoming text arrives once the slide has settled
        for line in 0..TEXT_LINES {
            let start = timing.text_in_start + line as f32 * timing.stagger;
            let target = incoming(Part::TextLine(line));
            add(target, Property::TranslateY, s, 0.0, start, timing.text_in_duration, Easing::DecelerateOut);
            add(target, Property::Opacity, 0.0, 1.0, start, timing.text_in_duration, Easing::DecelerateOut);
        }

        let (outgoing_origin, incoming_origin) = match request.direction {
            Direction::Next => (TransformOrigin::TopLeft, TransformOrigin::BottomRight),
            Direction::Previous => (TransformOrigin::BottomRight, TransformOrigin::TopLeft),
        };

        Self { timeline, outgoing_origin, incoming_origin }
    }
}

struct ActiveTransition {
    request: TransitionRequest,
    outgoing_id: Option<String>,
    incoming_id: Option<String>,
    runner: TweenRunner,
    failure: Option<AnimationError>,
}

impl ActiveTransition {
    fn id_for(&self, role: Role) -> Option<&str> {
        match role {
            Role::Outgoing => self.outgoing_id.as_deref(),
            Role::Incoming => self.incoming_id.as_deref(),
        }
    }
}

pub struct TransitionOrchestrator {
    timing: TransitionTiming,
    registry: SlideRegistry,
    counter: CounterStrip,
    active: Option<ActiveTransition>,
}

impl TransitionOrchestrator {
    pub fn new(deck: &SlideDeck, timing: TransitionTiming) -> Self {
        Self {
            timing,
            registry: SlideRegistry::new(deck),
            counter: CounterStrip::new(deck.len(), COUNTER_ROW_HEIGHT),
            active: None,
        }
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn counter(&self) -> &CounterStrip {
        &self.counter
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Steps the shared clock. Returns the request once its timeline has completed,
    /// either normally or by being forced to its terminal pose after a failure.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionRequest> {
        let mut active = self.active.take()?;

        match self.step(&mut active, dt) {
            Ok(false) => {
                self.active = Some(active);
                None
            }
            Ok(true) => {
                self.complete(&active);
                Some(active.request)
            }
            Err(e) => {
                warn!(request = ?active.request, error = %e, "transition failed, forcing terminal state");
                self.force_terminal(&active);
                self.complete(&active);
                Some(active.request)
            }
        }
    }

    /// Revokes the transition in flight. Poses are left wherever they were.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(request = ?active.request, clock = active.runner.clock(), "transition cancelled");
        }
    }

    fn step(&mut self, active: &mut ActiveTransition, dt: f32) -> Result<bool, AnimationError> {
        if let Some(failure) = active.failure.take() {
            return Err(failure);
        }
        let finished = active.runner.advance(dt)?;
        let samples = active.runner.samples()?;
        self.apply(active, &samples)?;
        Ok(finished)
    }

    fn apply(&mut self, active: &ActiveTransition, samples: &[Sample]) -> Result<(), AnimationError> {
        for sample in samples {
            match sample.target {
                Target::Counter => self.counter.set_offset(sample.value),
                Target::Slide(role, part) => {
                    let id = active
                        .id_for(role)
                        .ok_or_else(|| AnimationError::MissingSlide(format!("{role:?} slide")))?;
                    let view = self
                        .registry
                        .view_mut(id)
                        .ok_or_else(|| AnimationError::MissingSlide(id.to_string()))?;
                    view.apply(part, sample.property, sample.value);
                }
            }
        }
        Ok(())
    }

    fn force_terminal(&mut self, active: &ActiveTransition) {
        for role in [Role::Outgoing, Role::Incoming] {
            if let Some(view) = active.id_for(role).and_then(|id| self.registry.view_mut(id)) {
                view.reset_pose();
            }
        }
        self.counter.set_offset(self.counter.offset_for(active.request.to_index));
    }

    fn complete(&mut self, active: &ActiveTransition) {
        if let Some(view) = active.id_for(Role::Outgoing).and_then(|id| self.registry.view_mut(id)) {
            view.visible = false;
            view.active = false;
            view.reset_pose();
        }
        if let Some(view) = active.id_for(Role::Incoming).and_then(|id| self.registry.view_mut(id)) {
            view.visible = true;
            view.active = true;
        }
        debug!(request = ?active.request, "transition complete");
    }
}

impl TransitionRunner for TransitionOrchestrator {
    fn run(&mut self, request: TransitionRequest) {
        if let Some(previous) = self.active.as_ref() {
            warn!(running = ?previous.request, ignored = ?request, "transition already running");
            return;
        }

        let plan = TransitionPlan::build(request, &self.timing, self.counter.row_height());
        let outgoing_id = self.registry.id_at(request.from_index).map(str::to_string);
        let incoming_id = self.registry.id_at(request.to_index).map(str::to_string);

        if let Some(view) = outgoing_id.as_deref().and_then(|id| self.registry.view_mut(id)) {
            view.origin = plan.outgoing_origin;
        }
        if let Some(view) = incoming_id.as_deref().and_then(|id| self.registry.view_mut(id)) {
            view.origin = plan.incoming_origin;
            view.visible = true;
        }

        let mut active = ActiveTransition {
            request,
            outgoing_id,
            incoming_id,
            runner: TweenRunner::new(plan.timeline),
            failure: None,
        };

        // Write the start pose now so the incoming slide never shows up in neutral
        match active.runner.samples() {
            Ok(samples) => {
                if let Err(e) = self.apply(&active, &samples) {
                    active.failure = Some(e);
                }
            }
            Err(e) => active.failure = Some(e),
        }

        debug!(?request, duration = active.runner.timeline().duration(), "transition started");
        self.active = Some(active);
    }
}
