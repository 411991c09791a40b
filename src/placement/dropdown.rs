use glam::IVec2;

use super::{
    DEFAULT_POPUP_GAP, LayoutDirection, Placement, PopupPositionProvider, ResolvedPosition,
    directional_offset, snap_axis,
};
use crate::{IntRect, IntSize};

/// Positions a dropdown menu centered under (or over) its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropdownPositionProvider {
    pub offset: IVec2,
    pub gap: i32,
}

impl Default for DropdownPositionProvider {
    fn default() -> Self {
        Self::new(IVec2::ZERO)
    }
}

impl DropdownPositionProvider {
    pub const fn new(offset: IVec2) -> Self {
        Self {
            offset,
            gap: DEFAULT_POPUP_GAP,
        }
    }

    pub const fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }
}

/// Bottom unless the menu does not fit below and does fit above.
pub fn resolve_dropdown_placement(
    anchor_bounds: IntRect,
    window_size: IntSize,
    popup_content_size: IntSize,
    gap: i32,
) -> Placement {
    let threshold = popup_content_size.height + gap;
    let space_below = window_size.height - anchor_bounds.bottom;
    let space_above = anchor_bounds.top;
    if space_below < threshold && space_above > threshold {
        Placement::Top
    } else {
        Placement::Bottom
    }
}

pub fn resolve_dropdown_position(
    provider: &DropdownPositionProvider,
    anchor_bounds: IntRect,
    window_size: IntSize,
    layout_direction: LayoutDirection,
    popup_content_size: IntSize,
) -> ResolvedPosition {
    let placement =
        resolve_dropdown_placement(anchor_bounds, window_size, popup_content_size, provider.gap);
    let y = match placement {
        Placement::Top => anchor_bounds.top - provider.gap - popup_content_size.height,
        _ => anchor_bounds.bottom + provider.gap,
    };
    let centered_x = anchor_bounds.center().x - popup_content_size.width / 2;
    let x = snap_axis(centered_x, popup_content_size.width, window_size.width);
    if placement == Placement::Top {
        log::debug!(
            "dropdown flipped above anchor (space below {}, needed {})",
            window_size.height - anchor_bounds.bottom,
            popup_content_size.height + provider.gap,
        );
    }

    ResolvedPosition {
        origin: IVec2::new(x, y) + directional_offset(provider.offset, layout_direction),
        placement,
    }
}

impl PopupPositionProvider for DropdownPositionProvider {
    fn resolve(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> ResolvedPosition {
        resolve_dropdown_position(
            self,
            anchor_bounds,
            window_size,
            layout_direction,
            popup_content_size,
        )
    }
}
