use fluent_overlay::ui::host::{Popup, RsxTag, element, text};
use fluent_overlay::ui::{
    ClickHandlerProp, DismissHandlerProp, PositionProviderProp, RsxComponent, RsxNode,
};
use fluent_overlay::{DropdownPositionProvider, IVec2, Placement};

use crate::overlay::{
    TrackedPlacement, use_layout_direction, use_position_provider, use_visibility,
};
use crate::theme::use_theme;

/// Menu popup centered under its enclosing element. Flips above the anchor
/// when there is no room below.
pub struct DropdownMenu;

pub struct DropdownMenuProps {
    pub expanded: bool,
    pub on_dismiss_request: Option<DismissHandlerProp>,
    pub offset: IVec2,
    pub children: Vec<RsxNode>,
}

impl DropdownMenuProps {
    pub fn new(expanded: bool) -> Self {
        Self {
            expanded,
            on_dismiss_request: None,
            offset: IVec2::ZERO,
            children: Vec::new(),
        }
    }

    pub fn on_dismiss_request(mut self, handler: impl Into<DismissHandlerProp>) -> Self {
        self.on_dismiss_request = Some(handler.into());
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

impl RsxComponent for DropdownMenu {
    type Props = DropdownMenuProps;

    fn render(props: DropdownMenuProps) -> RsxNode {
        let theme = use_theme().get();
        let layout_direction = use_layout_direction().get();
        let transition =
            use_visibility(props.expanded, Placement::Bottom, theme.motion.popup, None);
        let provider = use_position_provider((props.offset, theme.popup.gap), |&(offset, gap)| {
            PositionProviderProp::new(TrackedPlacement {
                inner: DropdownPositionProvider::new(offset).gap(gap),
                transition: transition.clone(),
            })
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
                .with_prop("direction", "column")
                .with_prop("min_width", theme.popup.menu_min_width)
                .with_prop("padding", theme.popup.padding)
                .with_prop("corner_radius", theme.popup.corner_radius)
                .with_prop("background", theme.color.flyout_background)
                .with_children(props.children),
        )
    }
}

pub struct DropdownMenuItem;

pub struct DropdownMenuItemProps {
    pub text: String,
    pub on_click: Option<ClickHandlerProp>,
    pub enabled: bool,
}

impl DropdownMenuItemProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_click: None,
            enabled: true,
        }
    }

    pub fn on_click(mut self, handler: impl Into<ClickHandlerProp>) -> Self {
        self.on_click = Some(handler.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl RsxComponent for DropdownMenuItem {
    type Props = DropdownMenuItemProps;

    fn render(props: DropdownMenuItemProps) -> RsxNode {
        let theme = use_theme().get();
        let foreground = if props.enabled {
            theme.color.text_primary
        } else {
            theme.color.text_disabled
        };

        let mut row = element()
            .with_prop("height", theme.popup.menu_item_height)
            .with_prop("padding", 12)
            .with_prop("corner_radius", 4)
            .with_prop("enabled", props.enabled);
        // Disabled rows keep their slot in the menu but never see clicks.
        if props.enabled
            && let Some(handler) = props.on_click
        {
            row = row.with_prop("on_click", handler);
        }
        row.with_child(
            text(props.text)
                .with_prop("font_size", theme.typography.body)
                .with_prop("foreground", foreground),
        )
    }
}
