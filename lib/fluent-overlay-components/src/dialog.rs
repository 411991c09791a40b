use std::fmt;
use std::rc::Rc;

use fluent_overlay::ui::host::{element, modal, text};
use fluent_overlay::ui::{
    ClickHandlerProp, DismissHandlerProp, DismissReason, RsxComponent, RsxNode, State, render,
    use_state,
};
use fluent_overlay::{EnterExitAnimation, Placement};

use crate::overlay::{use_layout_direction, use_visibility};
use crate::theme::{DialogTheme, use_theme};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DialogSize {
    Min,
    #[default]
    Standard,
    Max,
}

impl DialogSize {
    pub fn width(self, theme: &DialogTheme) -> f32 {
        match self {
            Self::Min => theme.min_width,
            Self::Standard => theme.standard_width,
            Self::Max => theme.max_width,
        }
    }
}

/// Modal surface over a scrim. Scales and fades in and out.
pub struct FluentDialog;

pub struct FluentDialogProps {
    pub visible: bool,
    pub size: DialogSize,
    pub on_dismiss_request: Option<DismissHandlerProp>,
    pub children: Vec<RsxNode>,
}

impl FluentDialogProps {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            size: DialogSize::default(),
            on_dismiss_request: None,
            children: Vec::new(),
        }
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    pub fn on_dismiss_request(mut self, handler: impl Into<DismissHandlerProp>) -> Self {
        self.on_dismiss_request = Some(handler.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RsxNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl RsxComponent for FluentDialog {
    type Props = FluentDialogProps;

    fn render(props: FluentDialogProps) -> RsxNode {
        let theme = use_theme().get();
        let layout_direction = use_layout_direction().get();
        let transition = use_visibility(
            props.visible,
            Placement::Full,
            theme.motion.dialog,
            Some(EnterExitAnimation::dialog()),
        );
        let snapshot = transition.get();
        if !snapshot.is_mounted() {
            return RsxNode::empty();
        }

        let sample = snapshot.sample(layout_direction);
        let mut layer = modal(theme.dialog.scrim_opacity * sample.alpha)
            .with_prop("scrim_color", theme.color.scrim)
            .with_prop("animation", sample);
        if let Some(handler) = props.on_dismiss_request {
            layer = layer.with_prop("on_dismiss_request", handler);
        }
        layer.with_child(
            element()
                .with_prop("direction", "column")
                .with_prop("width", props.size.width(&theme.dialog))
                .with_prop("corner_radius", theme.dialog.corner_radius)
                .with_prop("background", theme.color.dialog_background)
                .with_children(props.children),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentDialogButton {
    Primary,
    Secondary,
    Close,
}

#[derive(Clone)]
pub struct ButtonClickHandler {
    handler: Rc<dyn Fn(ContentDialogButton)>,
}

impl ButtonClickHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(ContentDialogButton) + 'static,
    {
        Self {
            handler: Rc::new(handler),
        }
    }

    pub fn call(&self, button: ContentDialogButton) {
        (self.handler)(button);
    }
}

impl fmt::Debug for ButtonClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonClickHandler").finish()
    }
}

/// Dialog with a title, free content and up to three buttons. Only buttons
/// with text are shown.
pub struct ContentDialog;

pub struct ContentDialogProps {
    pub title: String,
    pub visible: bool,
    pub size: DialogSize,
    pub primary_button_text: Option<String>,
    pub secondary_button_text: Option<String>,
    pub close_button_text: Option<String>,
    pub on_button_click: ButtonClickHandler,
    pub content: Vec<RsxNode>,
}

impl ContentDialogProps {
    pub fn new(
        title: impl Into<String>,
        visible: bool,
        on_button_click: impl Fn(ContentDialogButton) + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            visible,
            size: DialogSize::default(),
            primary_button_text: None,
            secondary_button_text: None,
            close_button_text: None,
            on_button_click: ButtonClickHandler::new(on_button_click),
            content: Vec::new(),
        }
    }

    pub fn primary_button_text(mut self, text: impl Into<String>) -> Self {
        self.primary_button_text = Some(text.into());
        self
    }

    pub fn secondary_button_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_button_text = Some(text.into());
        self
    }

    pub fn close_button_text(mut self, text: impl Into<String>) -> Self {
        self.close_button_text = Some(text.into());
        self
    }

    pub fn content(mut self, content: impl IntoIterator<Item = RsxNode>) -> Self {
        self.content.extend(content);
        self
    }
}

const BUTTONS: [ContentDialogButton; 3] = [
    ContentDialogButton::Primary,
    ContentDialogButton::Secondary,
    ContentDialogButton::Close,
];

/// Handlers are created once per dialog instance and call whatever
/// `on_button_click` the latest render supplied.
#[derive(Clone)]
struct StableHandlers {
    buttons: [ClickHandlerProp; 3],
    dismiss: DismissHandlerProp,
}

fn stable_handlers(latest: &State<Option<(ButtonClickHandler, bool)>>) -> StableHandlers {
    let buttons = BUTTONS.map(|button| {
        let latest = latest.clone();
        ClickHandlerProp::new(move |event| {
            if let Some((handler, _)) = latest.get() {
                handler.call(button);
            }
            event.meta.stop_propagation();
        })
    });
    let latest = latest.clone();
    let dismiss = DismissHandlerProp::new(move |event| {
        // Only Escape closes a content dialog, and only through its close button.
        if event.reason != DismissReason::EscapeKey {
            return;
        }
        if let Some((handler, true)) = latest.get() {
            handler.call(ContentDialogButton::Close);
            event.meta.stop_propagation();
        }
    });
    StableHandlers { buttons, dismiss }
}

impl RsxComponent for ContentDialog {
    type Props = ContentDialogProps;

    fn render(props: ContentDialogProps) -> RsxNode {
        let theme = use_theme().get();
        let latest = use_state(|| None::<(ButtonClickHandler, bool)>);
        let has_close = props.close_button_text.is_some();
        latest.update_quiet(|slot| *slot = Some((props.on_button_click.clone(), has_close)));
        let handlers = use_state(|| stable_handlers(&latest)).get();

        let labels = [
            props.primary_button_text,
            props.secondary_button_text,
            props.close_button_text,
        ];
        let buttons: Vec<RsxNode> = BUTTONS
            .iter()
            .zip(labels)
            .zip(handlers.buttons)
            .filter_map(|((button, label), on_click)| {
                let label = label?;
                let accent = *button == ContentDialogButton::Primary;
                let (background, foreground) = if accent {
                    (theme.color.accent.clone(), theme.color.on_accent.clone())
                } else {
                    (theme.color.subtle_hover.clone(), theme.color.text_primary.clone())
                };
                Some(
                    element()
                        .with_prop("key", format!("{button:?}"))
                        .with_prop("min_width", 96)
                        .with_prop("height", 32)
                        .with_prop("corner_radius", 4)
                        .with_prop("background", background)
                        .with_prop("on_click", on_click)
                        .with_child(
                            text(label)
                                .with_prop("font_size", theme.typography.body)
                                .with_prop("foreground", foreground),
                        ),
                )
            })
            .collect();

        let body = element()
            .with_prop("direction", "column")
            .with_prop("padding", theme.dialog.padding)
            .with_prop("gap", 12)
            .with_child(
                text(props.title)
                    .with_prop("font_size", theme.typography.subtitle)
                    .with_prop("font_weight", theme.typography.semibold_weight as i64)
                    .with_prop("foreground", theme.color.text_primary.clone()),
            )
            .with_children(props.content);
        let footer = element()
            .with_prop("direction", "row")
            .with_prop("padding", theme.dialog.padding)
            .with_prop("gap", theme.dialog.button_gap)
            .with_prop("background", theme.color.dialog_footer_background.clone())
            .with_children(buttons);

        render::<FluentDialog>(FluentDialogProps {
            visible: props.visible,
            size: props.size,
            on_dismiss_request: Some(handlers.dismiss),
            children: vec![body, footer],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FRAME, click, click_handlers, runtime, settle, tree};
    use fluent_overlay::ui::{PropValue, RsxElementNode};
    use std::cell::RefCell;

    fn modal_node(node: &RsxNode) -> &RsxElementNode {
        node.find_tag("Modal").expect("dialog mounted")
    }

    #[test]
    fn dialog_width_follows_its_size() {
        for (size, width) in [
            (DialogSize::Min, 320.0),
            (DialogSize::Standard, 448.0),
            (DialogSize::Max, 548.0),
        ] {
            let build = || {
                element().with_child(render::<FluentDialog>(
                    FluentDialogProps::new(true).size(size).children([text("Body")]),
                ))
            };
            let mut runtime = runtime();
            runtime.tick(FRAME, build).expect("tick");
            let surface = modal_node(tree(&runtime)).children[0]
                .as_element()
                .expect("surface");
            assert_eq!(surface.prop("width"), Some(&PropValue::F64(width)));
        }
    }

    #[test]
    fn scrim_takes_the_theme_color() {
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || {
                element().with_child(render::<FluentDialog>(FluentDialogProps::new(true)))
            })
            .expect("tick");
        assert_eq!(
            modal_node(tree(&runtime)).prop("scrim_color"),
            Some(&PropValue::String(crate::theme::FluentTheme::light().color.scrim))
        );
    }

    #[test]
    fn hidden_dialog_renders_nothing() {
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || {
                element().with_child(render::<FluentDialog>(FluentDialogProps::new(false)))
            })
            .expect("tick");
        assert!(tree(&runtime).find_tag("Modal").is_none());
    }

    type Clicks = Rc<RefCell<Vec<ContentDialogButton>>>;

    fn content_dialog(clicks: &Clicks, with_close: bool) -> RsxNode {
        let clicks = clicks.clone();
        let mut props = ContentDialogProps::new("Save changes?", true, move |button| {
            clicks.borrow_mut().push(button)
        })
        .primary_button_text("Save")
        .content([text("Unsaved work will be lost.")]);
        if with_close {
            props = props.close_button_text("Cancel");
        }
        element().with_child(render::<ContentDialog>(props))
    }

    #[test]
    fn only_buttons_with_text_are_shown() {
        let clicks = Clicks::default();
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || content_dialog(&clicks, true))
            .expect("tick");

        let labels: Vec<String> = click_handlers(tree(&runtime))
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["Save".to_string(), "Cancel".to_string()]);

        click(tree(&runtime), "Save");
        click(tree(&runtime), "Cancel");
        assert_eq!(
            *clicks.borrow(),
            vec![ContentDialogButton::Primary, ContentDialogButton::Close]
        );
    }

    #[test]
    fn escape_goes_through_the_close_button() {
        let clicks = Clicks::default();
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || content_dialog(&clicks, true))
            .expect("tick");
        let layer = modal_node(tree(&runtime));
        crate::test_support::dismiss(layer, DismissReason::OutsideClick);
        assert!(clicks.borrow().is_empty());
        crate::test_support::dismiss(layer, DismissReason::EscapeKey);
        assert_eq!(*clicks.borrow(), vec![ContentDialogButton::Close]);
    }

    #[test]
    fn escape_is_ignored_without_a_close_button() {
        let clicks = Clicks::default();
        let mut runtime = runtime();
        runtime
            .tick(FRAME, || content_dialog(&clicks, false))
            .expect("tick");
        crate::test_support::dismiss(modal_node(tree(&runtime)), DismissReason::EscapeKey);
        assert!(clicks.borrow().is_empty());
    }

    #[test]
    fn settled_dialog_rebuilds_to_the_same_tree() {
        let clicks = Clicks::default();
        let mut runtime = runtime();
        settle(&mut runtime, || content_dialog(&clicks, true));
        let frames = runtime.backend().frames;

        let idle = runtime
            .render(|| content_dialog(&clicks, true))
            .expect("render");
        assert!(!idle.needs_paint);
        assert_eq!(runtime.backend().frames, frames);
    }
}
