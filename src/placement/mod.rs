use glam::IVec2;

use crate::{IntRect, IntSize};

mod dropdown;
mod flyout;

pub use dropdown::*;
pub use flyout::*;

/// Gap between an anchor edge and the popup it opens.
pub const DEFAULT_POPUP_GAP: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Start,
    End,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Sides sharing the other axis, in a stable order.
    pub const fn perpendicular(self) -> [Self; 2] {
        if self.is_vertical() {
            [Self::End, Self::Start]
        } else {
            [Self::Top, Self::Bottom]
        }
    }

    /// Whether the side sits on the left edge of the anchor once mirrored.
    const fn is_left(self, direction: LayoutDirection) -> bool {
        match (self, direction) {
            (Self::Start, LayoutDirection::Ltr) | (Self::End, LayoutDirection::Rtl) => true,
            _ => false,
        }
    }
}

/// Cross-axis alignment of a sided placement.
///
/// On Top/Bottom, start/end follow the layout direction. On Start/End they
/// mean top/bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Center,
    AlignedStart,
    AlignedEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    #[default]
    Auto,
    Full,
    Top,
    TopAlignedStart,
    TopAlignedEnd,
    Bottom,
    BottomAlignedStart,
    BottomAlignedEnd,
    Start,
    StartAlignedTop,
    StartAlignedBottom,
    End,
    EndAlignedTop,
    EndAlignedBottom,
}

impl Placement {
    pub const fn from_parts(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::AlignedStart) => Self::TopAlignedStart,
            (Side::Top, Alignment::AlignedEnd) => Self::TopAlignedEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::AlignedStart) => Self::BottomAlignedStart,
            (Side::Bottom, Alignment::AlignedEnd) => Self::BottomAlignedEnd,
            (Side::Start, Alignment::Center) => Self::Start,
            (Side::Start, Alignment::AlignedStart) => Self::StartAlignedTop,
            (Side::Start, Alignment::AlignedEnd) => Self::StartAlignedBottom,
            (Side::End, Alignment::Center) => Self::End,
            (Side::End, Alignment::AlignedStart) => Self::EndAlignedTop,
            (Side::End, Alignment::AlignedEnd) => Self::EndAlignedBottom,
        }
    }

    /// `None` for `Auto` and `Full`, which are not tied to an anchor side.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Auto | Self::Full => None,
            Self::Top | Self::TopAlignedStart | Self::TopAlignedEnd => Some(Side::Top),
            Self::Bottom | Self::BottomAlignedStart | Self::BottomAlignedEnd => Some(Side::Bottom),
            Self::Start | Self::StartAlignedTop | Self::StartAlignedBottom => Some(Side::Start),
            Self::End | Self::EndAlignedTop | Self::EndAlignedBottom => Some(Side::End),
        }
    }

    pub const fn alignment(self) -> Alignment {
        match self {
            Self::TopAlignedStart
            | Self::BottomAlignedStart
            | Self::StartAlignedTop
            | Self::EndAlignedTop => Alignment::AlignedStart,
            Self::TopAlignedEnd
            | Self::BottomAlignedEnd
            | Self::StartAlignedBottom
            | Self::EndAlignedBottom => Alignment::AlignedEnd,
            _ => Alignment::Center,
        }
    }

    /// Same alignment moved to another side. Alignment start/end carries
    /// over to the new cross axis unchanged.
    pub const fn with_side(self, side: Side) -> Self {
        Self::from_parts(side, self.alignment())
    }
}

/// Final popup origin plus the placement actually used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPosition {
    pub origin: IVec2,
    pub placement: Placement,
}

impl ResolvedPosition {
    pub fn bounds(&self, content_size: IntSize) -> IntRect {
        IntRect::from_origin_size(self.origin, content_size)
    }
}

/// Callback invoked by the render backend once the popup content has been
/// measured. The returned position must depend only on the arguments.
pub trait PopupPositionProvider {
    fn resolve(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> ResolvedPosition;

    fn calculate_position(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> IVec2 {
        self.resolve(
            anchor_bounds,
            window_size,
            layout_direction,
            popup_content_size,
        )
        .origin
    }
}

/// Room between the anchor edge on `side` and the window edge.
pub fn available_space(
    side: Side,
    anchor_bounds: IntRect,
    window_size: IntSize,
    layout_direction: LayoutDirection,
) -> i32 {
    match side {
        Side::Top => anchor_bounds.top,
        Side::Bottom => window_size.height - anchor_bounds.bottom,
        _ if side.is_left(layout_direction) => anchor_bounds.left,
        _ => window_size.width - anchor_bounds.right,
    }
}

/// Space the popup needs on `side`, gap included.
pub const fn required_space(side: Side, popup_content_size: IntSize, gap: i32) -> i32 {
    if side.is_vertical() {
        popup_content_size.height + gap
    } else {
        popup_content_size.width + gap
    }
}

/// Offset x follows the reading direction.
pub(crate) fn directional_offset(offset: IVec2, layout_direction: LayoutDirection) -> IVec2 {
    match layout_direction {
        LayoutDirection::Ltr => offset,
        LayoutDirection::Rtl => IVec2::new(-offset.x, offset.y),
    }
}

/// Top-left origin of a popup placed on `placement` without any fitting.
pub fn placement_origin(
    placement: Placement,
    anchor_bounds: IntRect,
    window_size: IntSize,
    layout_direction: LayoutDirection,
    popup_content_size: IntSize,
    gap: i32,
) -> IVec2 {
    let Some(side) = placement.side() else {
        return IVec2::new(
            (window_size.width - popup_content_size.width) / 2,
            (window_size.height - popup_content_size.height) / 2,
        );
    };
    let alignment = placement.alignment();
    let anchor_center = anchor_bounds.center();

    if side.is_vertical() {
        let y = match side {
            Side::Top => anchor_bounds.top - gap - popup_content_size.height,
            _ => anchor_bounds.bottom + gap,
        };
        let align_left = match (alignment, layout_direction) {
            (Alignment::Center, _) => None,
            (Alignment::AlignedStart, LayoutDirection::Ltr)
            | (Alignment::AlignedEnd, LayoutDirection::Rtl) => Some(true),
            _ => Some(false),
        };
        let x = match align_left {
            None => anchor_center.x - popup_content_size.width / 2,
            Some(true) => anchor_bounds.left,
            Some(false) => anchor_bounds.right - popup_content_size.width,
        };
        IVec2::new(x, y)
    } else {
        let x = if side.is_left(layout_direction) {
            anchor_bounds.left - gap - popup_content_size.width
        } else {
            anchor_bounds.right + gap
        };
        let y = match alignment {
            Alignment::Center => anchor_center.y - popup_content_size.height / 2,
            Alignment::AlignedStart => anchor_bounds.top,
            Alignment::AlignedEnd => anchor_bounds.bottom - popup_content_size.height,
        };
        IVec2::new(x, y)
    }
}

/// Shift `origin` along one axis so the popup stays inside the window.
/// Oversized content keeps its leading edge at zero.
pub(crate) fn snap_axis(origin: i32, extent: i32, limit: i32) -> i32 {
    let mut snapped = origin;
    if snapped + extent > limit {
        snapped -= snapped + extent - limit;
    }
    snapped.max(0)
}
