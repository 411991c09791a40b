use crate::OverlayError;
use crate::ui::{
    ClickHandlerProp, DismissHandlerProp, PositionProviderProp, RsxElementNode, RsxNode, RsxProps,
};
use crate::{AnimationSample, PopupPositionProvider};

/// Intrinsic node understood by every render backend.
pub trait RsxTag {
    const TAG: &'static str;
    const PROPS: &'static [&'static str];
}

/// Plain box. `background` and `foreground` are theme token names.
pub struct Element;

pub struct Text;

/// Transient overlay anchored to its enclosing element. The backend measures
/// its children, calls the position provider with the anchor bounds and
/// draws the result above the rest of the window.
pub struct Popup;

/// Full-window layer with a scrim, used by modal dialogs.
pub struct Modal;

impl RsxTag for Element {
    const TAG: &'static str = "Element";
    const PROPS: &'static [&'static str] = &[
        "key",
        "width",
        "min_width",
        "max_width",
        "height",
        "padding",
        "gap",
        "direction",
        "background",
        "foreground",
        "corner_radius",
        "enabled",
        "on_click",
    ];
}

impl RsxTag for Text {
    const TAG: &'static str = "Text";
    const PROPS: &'static [&'static str] = &["key", "font_size", "font_weight", "foreground"];
}

impl RsxTag for Popup {
    const TAG: &'static str = "Popup";
    const PROPS: &'static [&'static str] = &[
        "key",
        "position_provider",
        "animation",
        "focusable",
        "on_dismiss_request",
    ];
}

impl RsxTag for Modal {
    const TAG: &'static str = "Modal";
    const PROPS: &'static [&'static str] = &[
        "key",
        "animation",
        "scrim_color",
        "scrim_opacity",
        "on_dismiss_request",
    ];
}

pub fn element() -> RsxNode {
    RsxNode::element(Element::TAG)
}

pub fn text(content: impl Into<String>) -> RsxNode {
    RsxNode::element(Text::TAG).with_child(RsxNode::text(content))
}

pub fn popup(provider: impl PopupPositionProvider + 'static) -> RsxNode {
    RsxNode::element(Popup::TAG).with_prop("position_provider", PositionProviderProp::new(provider))
}

pub fn modal(scrim_opacity: f32) -> RsxNode {
    RsxNode::element(Modal::TAG).with_prop("scrim_opacity", scrim_opacity)
}

fn check_tag<T: RsxTag>(node: &RsxElementNode) -> Result<(), OverlayError> {
    let mut props = RsxProps::from_entries(node.props.clone());
    for key in T::PROPS {
        let _ = props.remove_raw(key);
    }
    props.reject_remaining(T::TAG)
}

fn check_typed_props(node: &RsxElementNode) -> Result<(), OverlayError> {
    let mut props = RsxProps::from_entries(node.props.clone());
    props.remove_t::<PositionProviderProp>("position_provider")?;
    props.remove_t::<AnimationSample>("animation")?;
    props.remove_t::<ClickHandlerProp>("on_click")?;
    props.remove_t::<DismissHandlerProp>("on_dismiss_request")?;
    props.remove_t::<bool>("focusable")?;
    props.remove_t::<bool>("enabled")?;
    props.remove_t::<String>("scrim_color")?;
    props.remove_t::<f64>("scrim_opacity")?;
    Ok(())
}

/// Checks every intrinsic node of a tree before it reaches the backend.
/// Tags that are not intrinsic are left to the backend.
pub fn validate_tree(node: &RsxNode) -> Result<(), OverlayError> {
    match node {
        RsxNode::Text(_) => Ok(()),
        RsxNode::Fragment(children) => children.iter().try_for_each(validate_tree),
        RsxNode::Element(element_node) => {
            match element_node.tag.as_str() {
                Element::TAG => check_tag::<Element>(element_node)?,
                Text::TAG => check_tag::<Text>(element_node)?,
                Popup::TAG => {
                    check_tag::<Popup>(element_node)?;
                    if element_node.prop("position_provider").is_none() {
                        return Err(OverlayError::prop_type(
                            "position_provider",
                            "required position provider",
                        ));
                    }
                }
                Modal::TAG => check_tag::<Modal>(element_node)?,
                _ => {}
            }
            check_typed_props(element_node)?;
            element_node.children.iter().try_for_each(validate_tree)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DropdownPositionProvider;

    #[test]
    fn popup_requires_a_position_provider() {
        let bare = RsxNode::element(Popup::TAG);
        assert!(matches!(
            validate_tree(&bare),
            Err(OverlayError::PropType { .. })
        ));
        let valid = popup(DropdownPositionProvider::default()).with_child(text("item"));
        assert_eq!(validate_tree(&valid), Ok(()));
    }

    #[test]
    fn unknown_props_on_intrinsic_tags_are_rejected() {
        let tree = element().with_child(modal(0.3).with_prop("blur", 2.0));
        assert_eq!(
            validate_tree(&tree),
            Err(OverlayError::UnknownProp {
                key: "blur".to_string(),
                owner: "Modal".to_string(),
            })
        );
    }

    #[test]
    fn mistyped_handler_is_rejected() {
        let tree = element().with_prop("on_click", true);
        assert_eq!(
            validate_tree(&tree),
            Err(OverlayError::prop_type("on_click", "click handler"))
        );
    }
}
