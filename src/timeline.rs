//! Declarative animation schedule.
//!
//! A [`Timeline`] is a flat list of [`Tween`]s, each naming a target, a property,
//! a start offset, a duration and an easing. Every tween is sampled against the
//! same clock, so relative offsets stay exact no matter how the clock is stepped.

use raylib::ease;

use crate::error::AnimationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    AccelerateIn,
    DecelerateOut,
}

impl Easing {
    // Penner signature: elapsed, begin, change, duration
    fn ease(self, t: f32, b: f32, c: f32, d: f32) -> f32 {
        match self {
            Easing::Linear => ease::linear_none(t, b, c, d),
            Easing::AccelerateIn => ease::cubic_in(t, b, c, d),
            Easing::DecelerateOut => ease::cubic_out(t, b, c, d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Outgoing,
    Incoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Container,
    Image,
    TextLine(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Slide(Role, Part),
    Counter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    TranslateY,
    Scale,
    Rotation,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub start: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Value at clock `t`. Before its start a tween holds `from`, after its end `to`.
    pub fn value_at(&self, t: f32) -> f32 {
        if t <= self.start {
            return self.from;
        }
        if self.duration <= 0.0 || t >= self.end() {
            return self.to;
        }
        self.easing.ease(t - self.start, self.from, self.to - self.from, self.duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub target: Target,
    pub property: Property,
    pub value: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn find(&self, target: Target, property: Property) -> Option<&Tween> {
        self.tweens
            .iter()
            .find(|tween| tween.target == target && tween.property == property)
    }

    /// The timeline ends when its last tween does.
    pub fn duration(&self) -> f32 {
        self.tweens.iter().map(Tween::end).fold(0.0, f32::max)
    }

    pub fn sample(&self, t: f32) -> impl Iterator<Item = Sample> + '_ {
        self.tweens.iter().map(move |tween| Sample {
            target: tween.target,
            property: tween.property,
            value: tween.value_at(t),
        })
    }

    /// Every tween at its end value.
    pub fn terminal(&self) -> impl Iterator<Item = Sample> + '_ {
        self.tweens.iter().map(|tween| Sample {
            target: tween.target,
            property: tween.property,
            value: tween.to,
        })
    }
}

/// Steps a timeline's clock. Owns no targets: callers apply the samples.
#[derive(Debug, Clone)]
pub struct TweenRunner {
    timeline: Timeline,
    duration: f32,
    clock: f32,
}

impl TweenRunner {
    pub fn new(timeline: Timeline) -> Self {
        let duration = timeline.duration();
        Self { timeline, duration, clock: 0.0 }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_finished(&self) -> bool {
        self.clock >= self.duration
    }

    /// Advances the clock, returning whether the timeline has reached its end.
    pub fn advance(&mut self, dt: f32) -> Result<bool, AnimationError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(AnimationError::InvalidStep(dt));
        }
        self.clock = (self.clock + dt).min(self.duration);
        Ok(self.is_finished())
    }

    pub fn samples(&self) -> Result<Vec<Sample>, AnimationError> {
        self.timeline
            .sample(self.clock)
            .map(|sample| {
                if sample.value.is_finite() {
                    Ok(sample)
                } else {
                    Err(AnimationError::NonFinite { target: sample.target })
                }
            })
            .collect()
    }
}
