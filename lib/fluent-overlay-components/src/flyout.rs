use fluent_overlay::ui::host::{Popup, RsxTag, element};
use fluent_overlay::ui::{
    DismissHandlerProp, PositionProviderProp, RsxComponent, RsxNode, State, render, use_state,
};
use fluent_overlay::{
    FlyoutPlacementRequest, FlyoutPositionProvider, IVec2, Placement, PlacementChangedHandler,
};

use crate::overlay::{use_layout_direction, use_position_provider, use_visibility};
use crate::theme::use_theme;

/// Popup next to its enclosing element on the side `placement` asks for.
pub struct Flyout;

pub struct FlyoutProps {
    pub visible: bool,
    pub on_dismiss_request: Option<DismissHandlerProp>,
    pub placement: Placement,
    pub adaptive_placement: bool,
    pub offset: IVec2,
    pub children: Vec<RsxNode>,
}

impl FlyoutProps {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            on_dismiss_request: None,
            placement: Placement::Auto,
            adaptive_placement: true,
            offset: IVec2::ZERO,
            children: Vec::new(),
        }
    }

    pub fn on_dismiss_request(mut self, handler: impl Into<DismissHandlerProp>) -> Self {
        self.on_dismiss_request = Some(handler.into());
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn adaptive_placement(mut self, adaptive_placement: bool) -> Self {
        self.adaptive_placement = adaptive_placement;
        self
    }

    pub fn offset(mut self, offset: IVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RsxNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl RsxComponent for Flyout {
    type Props = FlyoutProps;

    fn render(props: FlyoutProps) -> RsxNode {
        let theme = use_theme().get();
        let layout_direction = use_layout_direction().get();
        let transition = use_visibility(props.visible, props.placement, theme.motion.popup, None);
        let request = FlyoutPlacementRequest::new(props.placement)
            .adaptive(props.adaptive_placement)
            .offset(props.offset)
            .gap(theme.popup.gap);
        let provider = use_position_provider(request, |request| {
            let transition = transition.clone();
            PositionProviderProp::new(FlyoutPositionProvider::new(*request).on_placement_changed(
                PlacementChangedHandler::new(move |placement| {
                    transition.update_quiet(|transition| transition.set_entry_placement(placement));
                }),
            ))
        });

        let snapshot = transition.get();
        if !snapshot.is_mounted() {
            return RsxNode::empty();
        }

        let mut popup = RsxNode::element(Popup::TAG)
            .with_prop("position_provider", provider)
            .with_prop("animation", snapshot.sample(layout_direction))
            .with_prop("focusable", true);
        if let Some(handler) = props.on_dismiss_request {
            popup = popup.with_prop("on_dismiss_request", handler);
        }
        popup.with_child(
            element()
                .with_prop("padding", theme.popup.flyout_padding)
                .with_prop("corner_radius", theme.popup.corner_radius)
                .with_prop("background", theme.color.flyout_background)
                .with_children(props.children),
        )
    }
}

/// Open state shared between a [`FlyoutContainer`]'s anchor content and its
/// flyout content.
#[derive(Clone, Debug)]
pub struct FlyoutContainerScope {
    visible: State<bool>,
}

impl FlyoutContainerScope {
    pub fn is_flyout_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_flyout_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

pub type FlyoutContentBuilder = Box<dyn FnOnce(&FlyoutContainerScope) -> Vec<RsxNode>>;

pub struct FlyoutContainer;

pub struct FlyoutContainerProps {
    pub flyout: FlyoutContentBuilder,
    pub placement: Placement,
    pub adaptive_placement: bool,
    pub content: FlyoutContentBuilder,
}

impl FlyoutContainerProps {
    pub fn new<F, C>(flyout: F, content: C) -> Self
    where
        F: FnOnce(&FlyoutContainerScope) -> Vec<RsxNode> + 'static,
        C: FnOnce(&FlyoutContainerScope) -> Vec<RsxNode> + 'static,
    {
        Self {
            flyout: Box::new(flyout),
            placement: Placement::Auto,
            adaptive_placement: true,
            content: Box::new(content),
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn adaptive_placement(mut self, adaptive_placement: bool) -> Self {
        self.adaptive_placement = adaptive_placement;
        self
    }
}

impl RsxComponent for FlyoutContainer {
    type Props = FlyoutContainerProps;

    fn render(props: FlyoutContainerProps) -> RsxNode {
        let visible = use_state(|| false);
        let dismiss = use_state(|| {
            let visible = visible.binding();
            DismissHandlerProp::new(move |event| {
                visible.set(false);
                event.meta.stop_propagation();
            })
        });
        let scope = FlyoutContainerScope {
            visible: visible.clone(),
        };

        let content = (props.content)(&scope);
        let flyout = FlyoutProps {
            visible: scope.is_flyout_visible(),
            on_dismiss_request: Some(dismiss.get()),
            placement: props.placement,
            adaptive_placement: props.adaptive_placement,
            offset: IVec2::ZERO,
            children: (props.flyout)(&scope),
        };
        element()
            .with_children(content)
            .with_child(render::<Flyout>(flyout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FRAME, animation, dismiss, popup, position_provider, runtime, settle, tree,
    };
    use fluent_overlay::ui::{DismissReason, PropValue};
    use fluent_overlay::ui::host::text;
    use fluent_overlay::{IntRect, IntSize, LayoutDirection, Vec2};
    use std::cell::RefCell;
    use std::rc::Rc;

    type ScopeSlot = Rc<RefCell<Option<FlyoutContainerScope>>>;

    fn container(slot: ScopeSlot) -> RsxNode {
        element().with_child(render::<FlyoutContainer>(
            FlyoutContainerProps::new(
                |scope| {
                    let label = if scope.is_flyout_visible() { "Close" } else { "Open" };
                    vec![text(label)]
                },
                move |scope| {
                    *slot.borrow_mut() = Some(scope.clone());
                    vec![text("Anchor")]
                },
            )
            .placement(Placement::Bottom),
        ))
    }

    #[test]
    fn container_scope_opens_and_dismiss_closes() {
        let slot = ScopeSlot::default();
        let build = || container(slot.clone());
        let mut runtime = runtime();
        runtime.tick(FRAME, build).expect("tick");
        assert!(popup(tree(&runtime)).is_none());

        let scope = slot.borrow().clone().expect("content saw the scope");
        scope.set_flyout_visible(true);
        runtime.tick(FRAME, build).expect("tick");
        let opened = popup(tree(&runtime)).expect("flyout mounted");
        assert_eq!(RsxNode::Element(opened.clone()).text_content(), "Close");

        dismiss(opened, DismissReason::OutsideClick);
        assert!(!scope.is_flyout_visible());
        settle(&mut runtime, build);
        assert!(popup(tree(&runtime)).is_none());
    }

    #[test]
    fn flyout_surface_uses_the_flyout_padding() {
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || {
                element().with_child(render::<Flyout>(
                    FlyoutProps::new(true).children([text("Details")]),
                ))
            })
            .expect("tick");
        let surface = popup(tree(&runtime)).expect("popup").children[0]
            .as_element()
            .expect("surface");
        assert_eq!(surface.prop("padding"), Some(&PropValue::F64(16.0)));
    }

    #[test]
    fn dismiss_handler_keeps_its_identity_across_renders() {
        let slot = ScopeSlot::default();
        let build = || container(slot.clone());
        let mut runtime = runtime();
        runtime.tick(FRAME, build).expect("tick");
        slot.borrow().clone().expect("scope").set_flyout_visible(true);
        settle(&mut runtime, build);

        let idle = runtime.render(build).expect("render");
        assert!(!idle.needs_paint);
    }

    #[test]
    fn auto_flyout_slides_from_the_side_it_resolved_to() {
        let flyout = || {
            element().with_child(render::<Flyout>(
                FlyoutProps::new(true).children([text("Details")]),
            ))
        };
        let mut runtime = runtime();
        runtime.tick(FRAME, flyout).expect("tick");

        let resolved = position_provider(tree(&runtime)).resolve(
            IntRect::new(100, 10, 140, 30),
            IntSize::new(800, 600),
            LayoutDirection::Ltr,
            IntSize::new(100, 80),
        );
        assert_eq!(resolved.placement, Placement::Bottom);
        assert_eq!(resolved.origin, IVec2::new(70, 34));

        runtime.tick(FRAME, flyout).expect("tick");
        let sample = popup(tree(&runtime)).map(animation).expect("popup");
        assert!(sample.translation.y < 0.0);
        assert_eq!(sample.translation.x, 0.0);
    }

    #[test]
    fn unresolved_auto_flyout_only_fades() {
        let flyout = || {
            element().with_child(render::<Flyout>(
                FlyoutProps::new(true).children([text("Details")]),
            ))
        };
        let mut runtime = runtime();
        runtime.tick(FRAME, flyout).expect("tick");
        runtime.tick(FRAME, flyout).expect("tick");
        let sample = popup(tree(&runtime)).map(animation).expect("popup");
        assert_eq!(sample.translation, Vec2::ZERO);
        assert!(sample.alpha > 0.0);
    }
}
