use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;
use crate::engine::EngineOptions;
use crate::error::ConfigError;
use crate::input::ClickPolicy;
use crate::orchestrator::TransitionTiming;
use crate::scheduler::{ClockMode, Scheduler};
use crate::source::{BuiltInSource, DirectorySource, JsonDeckSource, SlideSource};

#[derive(Parser, Debug)]
#[command(name = "hero-slides")]
#[command(version)]
#[command(about = "Full-screen hero slideshow with directional warp transitions")]
pub struct Args {
    /// JSON deck: an array of slides or {"fallback_image": ..., "slides": [...]}
    #[arg(long, value_name = "FILE", conflicts_with = "images")]
    pub deck: Option<PathBuf>,

    /// Directory of images, one slide per image in file-name order
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Minimum vertical travel, in pixels, for a drag to count as a swipe
    #[arg(long, default_value_t = SWIPE_THRESHOLD)]
    pub swipe_threshold: f32,

    /// Stretch (>1) or compress (<1) every transition
    #[arg(long, default_value_t = 1.0)]
    pub time_scale: f32,

    /// Advance exactly one frame of animation per rendered frame
    #[arg(long)]
    pub fixed_step: bool,

    /// Ignore clicks that land on a control drawn inside the hero
    #[arg(long)]
    pub suppress_click_over_controls: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceChoice {
    BuiltIn,
    Deck(PathBuf),
    Images(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub source: SourceChoice,
    pub scheduler: Scheduler,
    pub engine: EngineOptions,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Config, ConfigError> {
        if args.width <= 0 || args.height <= 0 {
            return Err(ConfigError::WindowSize { width: args.width, height: args.height });
        }
        if args.fps == 0 {
            return Err(ConfigError::Fps);
        }
        if !args.swipe_threshold.is_finite() || args.swipe_threshold < 0.0 {
            return Err(ConfigError::SwipeThreshold(args.swipe_threshold));
        }
        if !args.time_scale.is_finite() || args.time_scale <= 0.0 {
            return Err(ConfigError::TimeScale(args.time_scale));
        }

        let source = match (args.deck, args.images) {
            (Some(deck), _) => SourceChoice::Deck(deck),
            (None, Some(dir)) => SourceChoice::Images(dir),
            (None, None) => SourceChoice::BuiltIn,
        };

        let mode = if args.fixed_step {
            ClockMode::Fixed(1.0 / args.fps as f32)
        } else {
            ClockMode::Realtime { max_step: MAX_FRAME_STEP }
        };

        let click_policy = if args.suppress_click_over_controls {
            ClickPolicy::SuppressOverControls
        } else {
            ClickPolicy::NavigateEverywhere
        };

        Ok(Config {
            width: args.width,
            height: args.height,
            fps: args.fps,
            source,
            scheduler: Scheduler::new(mode),
            engine: EngineOptions {
                timing: TransitionTiming::default().scaled(args.time_scale),
                swipe_threshold: args.swipe_threshold,
                click_policy,
                width: args.width as f32,
                height: args.height as f32,
                content_below: args.height as f32,
            },
        })
    }

    pub fn slide_source(&self) -> Box<dyn SlideSource> {
        match &self.source {
            SourceChoice::BuiltIn => Box::new(BuiltInSource),
            SourceChoice::Deck(path) => Box::new(JsonDeckSource::new(path)),
            SourceChoice::Images(dir) => Box::new(DirectorySource::new(dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("hero-slides").chain(args.iter().copied())).expect("parse args");
        Config::from_args(args)
    }

    #[test]
    fn defaults_use_the_built_in_deck() {
        let config = parse(&[]).expect("config");
        assert_eq!(config.source, SourceChoice::BuiltIn);
        assert_eq!((config.width, config.height, config.fps), (RENDER_WIDTH, RENDER_HEIGHT, FPS));
        assert_eq!(config.engine.swipe_threshold, SWIPE_THRESHOLD);
        assert_eq!(config.engine.click_policy, ClickPolicy::NavigateEverywhere);
        assert_eq!(config.scheduler.mode(), ClockMode::Realtime { max_step: MAX_FRAME_STEP });
        assert_eq!(config.engine.timing, TransitionTiming::default());
    }

    #[test]
    fn flags_reach_the_engine() {
        let config = parse(&[
            "--images",
            "photos",
            "--fps",
            "30",
            "--fixed-step",
            "--time-scale",
            "2",
            "--swipe-threshold",
            "12",
            "--suppress-click-over-controls",
        ])
        .expect("config");
        assert_eq!(config.source, SourceChoice::Images(PathBuf::from("photos")));
        assert_eq!(config.scheduler.mode(), ClockMode::Fixed(1.0 / 30.0));
        assert_eq!(config.engine.timing, TransitionTiming::default().scaled(2.0));
        assert_eq!(config.engine.swipe_threshold, 12.0);
        assert_eq!(config.engine.click_policy, ClickPolicy::SuppressOverControls);
    }

    #[test]
    fn deck_and_images_conflict() {
        let result = Args::try_parse_from(["hero-slides", "--deck", "d.json", "--images", "dir"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_nonsense_values() {
        assert_eq!(parse(&["--width", "0"]), Err(ConfigError::WindowSize { width: 0, height: RENDER_HEIGHT }));
        assert_eq!(parse(&["--fps", "0"]), Err(ConfigError::Fps));
        assert_eq!(parse(&["--time-scale", "0"]), Err(ConfigError::TimeScale(0.0)));
        assert_eq!(parse(&["--swipe-threshold=-1"]), Err(ConfigError::SwipeThreshold(-1.0)));
    }
}
