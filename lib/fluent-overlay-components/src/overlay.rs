use fluent_overlay::ui::{
    GlobalState, PositionProviderProp, State, current_frame, global_state,
    request_animation_frame, use_state,
};
use fluent_overlay::{
    EnterExitAnimation, IntRect, IntSize, LayoutDirection, Placement, PopupPositionProvider,
    ResolvedPosition, VisibilityMotion, VisibilityState, VisibilityTransition,
};

pub fn use_layout_direction() -> GlobalState<LayoutDirection> {
    global_state(LayoutDirection::default)
}

pub fn set_layout_direction(layout_direction: LayoutDirection) {
    use_layout_direction().set(layout_direction);
}

/// Hook driving one overlay's visibility from its `visible` prop.
///
/// A transition that starts entering during this build is not advanced
/// yet: the first frame is laid out at progress 0, which lets the position
/// provider settle the entry variant before anything moves.
pub(crate) fn use_visibility(
    visible: bool,
    placement: Placement,
    motion: VisibilityMotion,
    animation: Option<EnterExitAnimation>,
) -> State<VisibilityTransition> {
    let transition = use_state(|| match animation {
        Some(animation) => VisibilityTransition::with_animation(motion, animation),
        None => VisibilityTransition::new(motion),
    });
    let frame = current_frame();
    let keep_running = transition.update_quiet(|transition| {
        transition.set_motion(motion);
        let was_hidden = transition.state() == VisibilityState::Hidden;
        let changed = transition.set_target_visible(visible, placement);
        if was_hidden && changed {
            return true;
        }
        transition.advance(frame).keep_running
    });
    if keep_running {
        request_animation_frame();
    }
    transition
}

/// Keeps one provider prop per overlay so its identity only changes with
/// `key`, and unchanged frames reconcile to nothing.
pub(crate) fn use_position_provider<K, F>(key: K, make: F) -> PositionProviderProp
where
    K: Clone + PartialEq + 'static,
    F: FnOnce(&K) -> PositionProviderProp,
{
    let slot = use_state(|| None::<(K, PositionProviderProp)>);
    slot.update_quiet(|slot| match slot {
        Some((current, provider)) if *current == key => provider.clone(),
        _ => {
            let provider = make(&key);
            *slot = Some((key, provider.clone()));
            provider
        }
    })
}

/// Wraps a provider and feeds the placement it resolves into a transition.
pub(crate) struct TrackedPlacement<P> {
    pub inner: P,
    pub transition: State<VisibilityTransition>,
}

impl<P: PopupPositionProvider> PopupPositionProvider for TrackedPlacement<P> {
    fn resolve(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> ResolvedPosition {
        let resolved = self.inner.resolve(
            anchor_bounds,
            window_size,
            layout_direction,
            popup_content_size,
        );
        self.transition
            .update_quiet(|transition| transition.set_entry_placement(resolved.placement));
        resolved
    }
}
