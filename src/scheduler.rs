use std::sync::OnceLock;

use crate::constants::MAX_FRAME_STEP;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Every frame advances by exactly this many seconds.
    Fixed(f32),
    /// Wall-clock frame time, clamped so a stalled frame cannot skip a transition.
    Realtime { max_step: f32 },
}

/// Clock policy shared by every timeline in the process. Stateless: it only maps
/// a frame's duration to a timeline step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduler {
    mode: ClockMode,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self { mode: ClockMode::Realtime { max_step: MAX_FRAME_STEP } }
    }
}

impl Scheduler {
    pub fn new(mode: ClockMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn step(&self, frame_dt: f32) -> f32 {
        match self.mode {
            ClockMode::Fixed(step) => step,
            ClockMode::Realtime { max_step } => frame_dt.clamp(0.0, max_step),
        }
    }
}

static SCHEDULER: OnceLock<Scheduler> = OnceLock::new();

/// Installs the process-wide scheduler. Only the first call wins.
pub fn install(scheduler: Scheduler) -> bool {
    SCHEDULER.set(scheduler).is_ok()
}

pub fn scheduler() -> &'static Scheduler {
    SCHEDULER.get_or_init(Scheduler::default)
}
