use super::{AnimationSample, EnterExitAnimation, RunResult, TransitionFrame, VisibilityMotion};
use crate::{LayoutDirection, Placement};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl VisibilityState {
    /// Overlay content stays in the tree while any animation runs.
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Drives Hidden → Entering → Visible → Exiting → Hidden from a boolean
/// target and frame ticks.
///
/// Progress runs on a linear timeline from 0 (hidden) to 1 (at rest) and is
/// eased only when sampled. Enter and exit curves may differ, so a reversal
/// re-bases progress onto the new curve at the value already shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTransition {
    state: VisibilityState,
    progress: f32,
    motion: VisibilityMotion,
    animation: EnterExitAnimation,
    fixed_animation: bool,
}

impl VisibilityTransition {
    /// Variant follows the placement resolved at entry.
    pub const fn new(motion: VisibilityMotion) -> Self {
        Self {
            state: VisibilityState::Hidden,
            progress: 0.0,
            motion,
            animation: EnterExitAnimation::fade(),
            fixed_animation: false,
        }
    }

    /// Same variant for every entry, regardless of placement.
    pub const fn with_animation(motion: VisibilityMotion, animation: EnterExitAnimation) -> Self {
        Self {
            state: VisibilityState::Hidden,
            progress: 0.0,
            motion,
            animation,
            fixed_animation: true,
        }
    }

    pub const fn state(&self) -> VisibilityState {
        self.state
    }

    pub const fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    pub const fn animation(&self) -> EnterExitAnimation {
        self.animation
    }

    pub const fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_motion(&mut self, motion: VisibilityMotion) {
        self.motion = motion;
    }

    /// Applies the external visible flag. Returns whether the state changed.
    pub fn set_target_visible(&mut self, visible: bool, placement: Placement) -> bool {
        let next = match (self.state, visible) {
            (VisibilityState::Hidden, true) => {
                self.progress = 0.0;
                if !self.fixed_animation {
                    self.animation = EnterExitAnimation::for_placement(placement);
                }
                VisibilityState::Entering
            }
            (VisibilityState::Exiting, true) => {
                let shown = self.eased();
                self.progress = self.motion.enter_timing.invert(shown);
                VisibilityState::Entering
            }
            (VisibilityState::Entering, false) => {
                let shown = self.eased();
                self.progress = 1.0 - self.motion.exit_timing.invert(1.0 - shown);
                VisibilityState::Exiting
            }
            (VisibilityState::Visible, false) => VisibilityState::Exiting,
            (state, _) => state,
        };
        self.change_state(next)
    }

    /// The effective placement is only known after the first layout pass;
    /// it may still pick the variant until the first frame has advanced.
    pub fn set_entry_placement(&mut self, placement: Placement) {
        if self.fixed_animation || self.state != VisibilityState::Entering || self.progress > 0.0 {
            return;
        }
        self.animation = EnterExitAnimation::for_placement(placement);
    }

    pub fn advance(&mut self, frame: TransitionFrame) -> RunResult {
        let dt = frame.dt_seconds.max(0.0);
        let next = match self.state {
            VisibilityState::Entering => {
                self.progress = step(self.progress, dt, self.motion.enter_duration_ms);
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    VisibilityState::Visible
                } else {
                    VisibilityState::Entering
                }
            }
            VisibilityState::Exiting => {
                self.progress = 1.0 - step(1.0 - self.progress, dt, self.motion.exit_duration_ms);
                if self.progress <= 0.0 {
                    self.progress = 0.0;
                    VisibilityState::Hidden
                } else {
                    VisibilityState::Exiting
                }
            }
            VisibilityState::Hidden | VisibilityState::Visible => return RunResult::none(),
        };
        let state_changed = self.change_state(next);
        RunResult {
            needs_layout: state_changed && !self.is_mounted(),
            needs_paint: true,
            keep_running: self.state.is_animating(),
        }
    }

    pub fn sample(&self, layout_direction: LayoutDirection) -> AnimationSample {
        match self.state {
            VisibilityState::Hidden => AnimationSample::HIDDEN,
            VisibilityState::Visible => AnimationSample::REST,
            VisibilityState::Entering | VisibilityState::Exiting => {
                self.animation.sample(self.eased(), layout_direction)
            }
        }
    }

    fn eased(&self) -> f32 {
        match self.state {
            VisibilityState::Hidden => 0.0,
            VisibilityState::Visible => 1.0,
            VisibilityState::Entering => self.motion.enter_timing.sample(self.progress),
            VisibilityState::Exiting => 1.0 - self.motion.exit_timing.sample(1.0 - self.progress),
        }
    }

    fn change_state(&mut self, next: VisibilityState) -> bool {
        if next == self.state {
            return false;
        }
        log::debug!("overlay visibility {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }
}

fn step(progress: f32, dt_seconds: f32, duration_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    (progress + dt_seconds / (duration_ms as f32 * 0.001)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::TimeFunction;

    fn transition() -> VisibilityTransition {
        VisibilityTransition::new(VisibilityMotion::new(100, 50))
    }

    #[test]
    fn full_cycle_follows_target_and_frames() {
        let mut visibility = transition();
        assert!(!visibility.is_mounted());

        assert!(visibility.set_target_visible(true, Placement::Bottom));
        assert_eq!(visibility.state(), VisibilityState::Entering);
        let result = visibility.advance(TransitionFrame::from_millis(50));
        assert!(result.keep_running);
        assert_eq!(visibility.state(), VisibilityState::Entering);
        visibility.advance(TransitionFrame::from_millis(60));
        assert_eq!(visibility.state(), VisibilityState::Visible);
        assert_eq!(visibility.sample(LayoutDirection::Ltr), AnimationSample::REST);

        assert!(visibility.set_target_visible(false, Placement::Bottom));
        assert_eq!(visibility.state(), VisibilityState::Exiting);
        assert!(visibility.is_mounted());
        let result = visibility.advance(TransitionFrame::from_millis(60));
        assert_eq!(visibility.state(), VisibilityState::Hidden);
        assert!(!result.keep_running);
        assert!(result.needs_layout);
    }

    #[test]
    fn repeated_target_is_ignored() {
        let mut visibility = transition();
        assert!(!visibility.set_target_visible(false, Placement::Top));
        assert!(visibility.set_target_visible(true, Placement::Top));
        assert!(!visibility.set_target_visible(true, Placement::Top));
    }

    fn alpha(visibility: &VisibilityTransition) -> f32 {
        visibility.sample(LayoutDirection::Ltr).alpha
    }

    #[test]
    fn reversal_continues_from_current_progress() {
        let mut visibility = transition();
        visibility.set_target_visible(true, Placement::Top);
        visibility.advance(TransitionFrame::from_millis(50));
        let before = visibility.progress();
        visibility.set_target_visible(false, Placement::Top);
        assert_eq!(visibility.state(), VisibilityState::Exiting);
        assert!((visibility.progress() - before).abs() < 1e-3);
        visibility.set_target_visible(true, Placement::Top);
        assert_eq!(visibility.state(), VisibilityState::Entering);
        assert!((visibility.progress() - before).abs() < 1e-3);
    }

    #[test]
    fn reversal_keeps_alpha_with_mismatched_curves() {
        let motion = VisibilityMotion {
            enter_duration_ms: 250,
            exit_duration_ms: 167,
            enter_timing: TimeFunction::DECELERATE,
            exit_timing: TimeFunction::STANDARD,
        };
        let mut visibility =
            VisibilityTransition::with_animation(motion, EnterExitAnimation::dialog());
        visibility.set_target_visible(true, Placement::Full);
        visibility.advance(TransitionFrame::from_millis(75));

        let entering = alpha(&visibility);
        visibility.set_target_visible(false, Placement::Full);
        let exiting = alpha(&visibility);
        assert!((entering - exiting).abs() < 1e-3, "{entering} -> {exiting}");

        visibility.advance(TransitionFrame::from_millis(20));
        let shown = alpha(&visibility);
        assert!(shown < exiting);
        visibility.set_target_visible(true, Placement::Full);
        assert!((alpha(&visibility) - shown).abs() < 1e-3);
    }

    #[test]
    fn variant_is_chosen_at_entry() {
        let mut visibility = transition();
        visibility.set_target_visible(true, Placement::Top);
        visibility.set_entry_placement(Placement::Bottom);
        assert_eq!(
            visibility.animation(),
            EnterExitAnimation::for_placement(Placement::Bottom)
        );
        visibility.advance(TransitionFrame::from_millis(10));
        visibility.set_entry_placement(Placement::End);
        assert_eq!(
            visibility.animation(),
            EnterExitAnimation::for_placement(Placement::Bottom)
        );
    }

    #[test]
    fn zero_duration_completes_on_next_frame() {
        let mut visibility = VisibilityTransition::new(VisibilityMotion::instant());
        visibility.set_target_visible(true, Placement::Full);
        visibility.advance(TransitionFrame { dt_seconds: 0.0 });
        assert_eq!(visibility.state(), VisibilityState::Visible);
        visibility.set_target_visible(false, Placement::Full);
        visibility.advance(TransitionFrame { dt_seconds: 0.0 });
        assert_eq!(visibility.state(), VisibilityState::Hidden);
    }

    #[test]
    fn fixed_animation_ignores_placement() {
        let mut visibility = VisibilityTransition::with_animation(
            VisibilityMotion::default(),
            EnterExitAnimation::dialog(),
        );
        visibility.set_target_visible(true, Placement::Bottom);
        visibility.set_entry_placement(Placement::Top);
        assert_eq!(visibility.animation(), EnterExitAnimation::dialog());
    }
}
