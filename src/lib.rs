//! Directional slide-transition engine for a full-screen hero.
//!
//! Input flows through [`input::InputArbiter`] into the single
//! [`navigation::NavigationController`], which hands accepted requests to the
//! [`orchestrator::TransitionOrchestrator`]. When the transition's timeline ends the
//! controller commits the new index. [`engine::HeroEngine`] wires the pieces together.

pub mod config;
pub mod constants;
pub mod counter;
pub mod deck;
pub mod engine;
pub mod error;
pub mod input;
pub mod navigation;
pub mod orchestrator;
pub mod registry;
pub mod scheduler;
pub mod slide;
pub mod source;
pub mod state;
pub mod timeline;
pub mod viewport;

pub use engine::{EngineOptions, HeroEngine};
pub use state::{Direction, NavigationState, TransitionRequest};
