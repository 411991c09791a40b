use std::fmt;
use std::rc::Rc;

use glam::IVec2;

use super::{
    Alignment, DEFAULT_POPUP_GAP, LayoutDirection, Placement, PopupPositionProvider,
    ResolvedPosition, Side, available_space, directional_offset, placement_origin, required_space,
    snap_axis,
};
use crate::{IntRect, IntSize};

/// Order `Placement::Auto` walks when looking for a side with room.
pub const AUTO_SIDE_ORDER: [Side; 4] = [Side::Top, Side::Bottom, Side::End, Side::Start];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlyoutPlacementRequest {
    pub placement: Placement,
    pub adaptive: bool,
    pub offset: IVec2,
    pub gap: i32,
}

impl FlyoutPlacementRequest {
    pub const fn new(placement: Placement) -> Self {
        Self {
            placement,
            adaptive: true,
            offset: IVec2::ZERO,
            gap: DEFAULT_POPUP_GAP,
        }
    }

    pub const fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub const fn offset(mut self, offset: IVec2) -> Self {
        self.offset = offset;
        self
    }

    pub const fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }
}

/// Picks the side a flyout should open on.
///
/// `Full` never moves. With `adaptive` off the requested side is kept even
/// when it overflows.
pub fn resolve_flyout_placement(
    request: &FlyoutPlacementRequest,
    anchor_bounds: IntRect,
    window_size: IntSize,
    layout_direction: LayoutDirection,
    popup_content_size: IntSize,
) -> Placement {
    let requested = request.placement;
    let space = |side| available_space(side, anchor_bounds, window_size, layout_direction);
    let fits = |side| space(side) >= required_space(side, popup_content_size, request.gap);

    let Some(requested_side) = requested.side() else {
        if requested == Placement::Full {
            return Placement::Full;
        }
        let side = AUTO_SIDE_ORDER
            .into_iter()
            .find(|side| fits(*side))
            .unwrap_or_else(|| roomiest_side(AUTO_SIDE_ORDER, space));
        return Placement::from_parts(side, Alignment::Center);
    };

    if !request.adaptive || fits(requested_side) {
        return requested;
    }

    let opposite = requested_side.opposite();
    if fits(opposite) {
        return requested.with_side(opposite);
    }

    let [first, second] = requested_side.perpendicular();
    let perpendicular = match (fits(first), fits(second)) {
        (true, true) if space(second) > space(first) => Some(second),
        (true, _) => Some(first),
        (false, true) => Some(second),
        (false, false) => None,
    };
    if let Some(side) = perpendicular {
        return requested.with_side(side);
    }

    let side = roomiest_side([requested_side, opposite, first, second], space);
    requested.with_side(side)
}

/// First side with the largest space; earlier candidates win ties.
fn roomiest_side(candidates: [Side; 4], space: impl Fn(Side) -> i32) -> Side {
    let mut best = candidates[0];
    let mut best_space = space(best);
    for side in candidates.into_iter().skip(1) {
        let room = space(side);
        if room > best_space {
            best = side;
            best_space = room;
        }
    }
    best
}

/// Resolves the flyout side, then snaps the cross axis and finally adds the
/// user offset.
pub fn resolve_flyout_position(
    request: &FlyoutPlacementRequest,
    anchor_bounds: IntRect,
    window_size: IntSize,
    layout_direction: LayoutDirection,
    popup_content_size: IntSize,
) -> ResolvedPosition {
    let placement = resolve_flyout_placement(
        request,
        anchor_bounds,
        window_size,
        layout_direction,
        popup_content_size,
    );
    if placement != request.placement && request.placement != Placement::Auto {
        log::debug!(
            "flyout placement flipped from {:?} to {:?} (content {}x{}, window {}x{})",
            request.placement,
            placement,
            popup_content_size.width,
            popup_content_size.height,
            window_size.width,
            window_size.height,
        );
    }

    let mut origin = placement_origin(
        placement,
        anchor_bounds,
        window_size,
        layout_direction,
        popup_content_size,
        request.gap,
    );

    let snaps = request.adaptive || request.placement == Placement::Auto;
    match placement.side() {
        Some(side) if snaps && side.is_vertical() => {
            origin.x = snap_axis(origin.x, popup_content_size.width, window_size.width);
        }
        Some(_) if snaps => {
            origin.y = snap_axis(origin.y, popup_content_size.height, window_size.height);
        }
        _ => {}
    }

    ResolvedPosition {
        origin: origin + directional_offset(request.offset, layout_direction),
        placement,
    }
}

/// Receives the effective placement each time the provider resolves.
#[derive(Clone)]
pub struct PlacementChangedHandler {
    handler: Rc<dyn Fn(Placement)>,
}

impl PlacementChangedHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Placement) + 'static,
    {
        Self {
            handler: Rc::new(handler),
        }
    }

    pub fn call(&self, placement: Placement) {
        (self.handler)(placement);
    }
}

impl fmt::Debug for PlacementChangedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementChangedHandler").finish()
    }
}

#[derive(Clone, Debug)]
pub struct FlyoutPositionProvider {
    request: FlyoutPlacementRequest,
    on_placement_changed: Option<PlacementChangedHandler>,
}

impl FlyoutPositionProvider {
    pub fn new(request: FlyoutPlacementRequest) -> Self {
        Self {
            request,
            on_placement_changed: None,
        }
    }

    pub fn on_placement_changed(mut self, handler: PlacementChangedHandler) -> Self {
        self.on_placement_changed = Some(handler);
        self
    }

    pub fn request(&self) -> &FlyoutPlacementRequest {
        &self.request
    }
}

impl PopupPositionProvider for FlyoutPositionProvider {
    fn resolve(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> ResolvedPosition {
        let resolved = resolve_flyout_position(
            &self.request,
            anchor_bounds,
            window_size,
            layout_direction,
            popup_content_size,
        );
        if let Some(handler) = &self.on_placement_changed {
            handler.call(resolved.placement);
        }
        resolved
    }
}
