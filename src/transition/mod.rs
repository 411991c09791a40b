mod enter_exit;
mod time_function;
mod visibility;
pub use enter_exit::*;
pub use time_function::*;
pub use visibility::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub dt_seconds: f32,
}

impl TransitionFrame {
    pub const IDLE: Self = Self { dt_seconds: 0.0 };

    pub const fn from_millis(ms: u32) -> Self {
        Self {
            dt_seconds: ms as f32 * 0.001,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    pub needs_layout: bool,
    pub needs_paint: bool,
    pub keep_running: bool,
}

impl RunResult {
    pub const fn none() -> Self {
        Self {
            needs_layout: false,
            needs_paint: false,
            keep_running: false,
        }
    }
}

/// Durations and curves for one enter/exit pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityMotion {
    pub enter_duration_ms: u32,
    pub exit_duration_ms: u32,
    pub enter_timing: TimeFunction,
    pub exit_timing: TimeFunction,
}

impl VisibilityMotion {
    pub const fn new(enter_duration_ms: u32, exit_duration_ms: u32) -> Self {
        Self {
            enter_duration_ms,
            exit_duration_ms,
            enter_timing: TimeFunction::DECELERATE,
            exit_timing: TimeFunction::ACCELERATE,
        }
    }

    pub const fn instant() -> Self {
        Self::new(0, 0)
    }
}

impl Default for VisibilityMotion {
    fn default() -> Self {
        Self::new(250, 167)
    }
}
