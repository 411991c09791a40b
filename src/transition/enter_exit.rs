use bitflags::bitflags;
use glam::Vec2;

use crate::{LayoutDirection, Placement, Side};

/// Distance a sided popup travels while sliding in.
pub const POPUP_SLIDE_DISTANCE: f32 = 12.0;
/// Scale a `Full` flyout grows from.
pub const POPUP_INITIAL_SCALE: f32 = 0.95;
/// Scale a dialog shrinks from.
pub const DIALOG_INITIAL_SCALE: f32 = 1.05;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AnimationEffects: u8 {
        const FADE = 1 << 0;
        const SCALE = 1 << 1;
        const SLIDE = 1 << 2;
    }
}

/// Enter/exit variant. Exit plays the same variant backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnterExitAnimation {
    pub effects: AnimationEffects,
    /// Anchor side the popup slides away from.
    pub slide_from: Option<Side>,
    pub slide_distance: f32,
    pub initial_scale: f32,
}

impl EnterExitAnimation {
    pub const fn fade() -> Self {
        Self {
            effects: AnimationEffects::FADE,
            slide_from: None,
            slide_distance: 0.0,
            initial_scale: 1.0,
        }
    }

    pub const fn dialog() -> Self {
        Self {
            effects: AnimationEffects::FADE.union(AnimationEffects::SCALE),
            slide_from: None,
            slide_distance: 0.0,
            initial_scale: DIALOG_INITIAL_SCALE,
        }
    }

    pub const fn for_placement(placement: Placement) -> Self {
        match placement {
            Placement::Full => Self {
                effects: AnimationEffects::FADE.union(AnimationEffects::SCALE),
                slide_from: None,
                slide_distance: 0.0,
                initial_scale: POPUP_INITIAL_SCALE,
            },
            _ => match placement.side() {
                Some(side) => Self {
                    effects: AnimationEffects::FADE.union(AnimationEffects::SLIDE),
                    slide_from: Some(side),
                    slide_distance: POPUP_SLIDE_DISTANCE,
                    initial_scale: 1.0,
                },
                None => Self::fade(),
            },
        }
    }

    /// `visibility` is the eased progress, 0 hidden and 1 at rest.
    pub fn sample(&self, visibility: f32, layout_direction: LayoutDirection) -> AnimationSample {
        let hidden = 1.0 - visibility;
        let alpha = if self.effects.contains(AnimationEffects::FADE) {
            visibility
        } else {
            1.0
        };
        let scale = if self.effects.contains(AnimationEffects::SCALE) {
            1.0 + (self.initial_scale - 1.0) * hidden
        } else {
            1.0
        };
        let translation = match self.slide_from {
            Some(side) if self.effects.contains(AnimationEffects::SLIDE) => {
                slide_vector(side, layout_direction) * self.slide_distance * hidden
            }
            _ => Vec2::ZERO,
        };
        AnimationSample {
            alpha,
            scale,
            translation,
        }
    }
}

/// Unit vector pointing from the popup back toward its anchor.
fn slide_vector(side: Side, layout_direction: LayoutDirection) -> Vec2 {
    let toward_left = match (side, layout_direction) {
        (Side::Top, _) => return Vec2::Y,
        (Side::Bottom, _) => return Vec2::NEG_Y,
        (Side::End, LayoutDirection::Ltr) | (Side::Start, LayoutDirection::Rtl) => true,
        _ => false,
    };
    if toward_left { Vec2::NEG_X } else { Vec2::X }
}

/// Visual state handed to the backend for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSample {
    pub alpha: f32,
    pub scale: f32,
    pub translation: Vec2,
}

impl AnimationSample {
    pub const HIDDEN: Self = Self {
        alpha: 0.0,
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    pub const REST: Self = Self {
        alpha: 1.0,
        scale: 1.0,
        translation: Vec2::ZERO,
    };
}
