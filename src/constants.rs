pub const RENDER_WIDTH: i32 = 1280;           // Default window width
pub const RENDER_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const MAX_FRAME_STEP: f32 = 0.1;          // Largest realtime step fed to the timeline (seconds)

// Transition timeline (seconds, relative to the shared clock)
pub const TEXT_OUT_START: f32 = 0.0;
pub const TEXT_OUT_DURATION: f32 = 0.7;
pub const SLIDE_START: f32 = 0.2;
pub const SLIDE_DURATION: f32 = 1.3;
pub const TEXT_IN_START: f32 = 0.9;
pub const TEXT_IN_DURATION: f32 = 1.0;
pub const TEXT_STAGGER: f32 = 0.1;

pub const WARP_SCALE: f32 = 1.35;             // Image scale at the far end of the warp
pub const WARP_ROTATION: f32 = 6.0;           // Degrees

pub const TEXT_LINES: usize = 2;              // Primary + secondary
pub const COUNTER_ROW_HEIGHT: f32 = 40.0;     // Pixels per counter label
pub const SWIPE_THRESHOLD: f32 = 5.0;         // Pixels
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0;

pub const MIN_SUPPLIED_SLIDES: usize = 3;     // Fewer than this and the default deck is used
