use crate::OverlayError;
use crate::transition::AnimationSample;
use crate::ui::{ClickHandlerProp, DismissHandlerProp};
use crate::{IntRect, IntSize, LayoutDirection, Placement, PopupPositionProvider, ResolvedPosition};
use glam::IVec2;
use smol_str::SmolStr;
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Debug, PartialEq)]
pub enum RsxNode {
    Element(RsxElementNode),
    Text(String),
    Fragment(Vec<RsxNode>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RsxElementNode {
    pub tag: SmolStr,
    pub props: Vec<(SmolStr, PropValue)>,
    pub children: Vec<RsxNode>,
}

impl RsxElementNode {
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, value)| value)
    }
}

fn next_shared_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone)]
pub struct SharedPropValue {
    id: u64,
    value: Rc<dyn Any>,
}

impl SharedPropValue {
    pub fn new(value: Rc<dyn Any>) -> Self {
        Self {
            id: next_shared_id(),
            value,
        }
    }

    pub fn value(&self) -> Rc<dyn Any> {
        self.value.clone()
    }
}

impl fmt::Debug for SharedPropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPropValue")
            .field("id", &self.id)
            .finish()
    }
}

impl PartialEq for SharedPropValue {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Position-provider callback attached to a `Popup` node.
#[derive(Clone)]
pub struct PositionProviderProp {
    id: u64,
    provider: Rc<dyn PopupPositionProvider>,
}

impl PositionProviderProp {
    pub fn new(provider: impl PopupPositionProvider + 'static) -> Self {
        Self {
            id: next_shared_id(),
            provider: Rc::new(provider),
        }
    }

    pub fn resolve(
        &self,
        anchor_bounds: IntRect,
        window_size: IntSize,
        layout_direction: LayoutDirection,
        popup_content_size: IntSize,
    ) -> ResolvedPosition {
        self.provider.resolve(
            anchor_bounds,
            window_size,
            layout_direction,
            popup_content_size,
        )
    }
}

impl fmt::Debug for PositionProviderProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionProviderProp")
            .field("id", &self.id)
            .finish()
    }
}

impl PartialEq for PositionProviderProp {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RsxProps {
    entries: Vec<(SmolStr, PropValue)>,
}

impl RsxProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<(SmolStr, PropValue)>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, key: impl Into<SmolStr>, value: impl IntoPropValue) {
        self.entries.push((key.into(), value.into_prop_value()));
    }

    pub fn remove_raw(&mut self, key: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(k, _)| k.as_str() == key)?;
        let (_, value) = self.entries.swap_remove(index);
        Some(value)
    }

    pub fn remove_t<T: FromPropValue>(&mut self, key: &str) -> Result<Option<T>, OverlayError> {
        match self.remove_raw(key) {
            Some(value) => T::from_prop_value(value)
                .map(Some)
                .map_err(|expected| OverlayError::prop_type(key, expected)),
            None => Ok(None),
        }
    }

    pub fn reject_remaining(&self, owner: &str) -> Result<(), OverlayError> {
        if let Some((key, _)) = self.entries.first() {
            return Err(OverlayError::UnknownProp {
                key: key.to_string(),
                owner: owner.to_string(),
            });
        }
        Ok(())
    }
}

impl RsxNode {
    pub fn element(tag: impl Into<SmolStr>) -> Self {
        Self::Element(RsxElementNode {
            tag: tag.into(),
            props: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn fragment(children: Vec<RsxNode>) -> Self {
        Self::Fragment(children)
    }

    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    pub fn with_prop(mut self, key: impl Into<SmolStr>, value: impl IntoPropValue) -> Self {
        if let Self::Element(node) = &mut self {
            node.props.push((key.into(), value.into_prop_value()));
        }
        self
    }

    pub fn with_child(mut self, child: impl IntoRsxNode) -> Self {
        if let Self::Element(node) = &mut self {
            node.children.push(child.into_rsx_node());
        }
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RsxNode>) -> Self {
        if let Self::Element(node) = &mut self {
            node.children.extend(children);
        }
        self
    }

    pub fn as_element(&self) -> Option<&RsxElementNode> {
        match self {
            Self::Element(node) => Some(node),
            _ => None,
        }
    }

    /// Depth-first search through elements and fragments.
    pub fn find_tag(&self, tag: &str) -> Option<&RsxElementNode> {
        match self {
            Self::Element(node) if node.tag.as_str() == tag => Some(node),
            Self::Element(node) => node.children.iter().find_map(|child| child.find_tag(tag)),
            Self::Fragment(children) => children.iter().find_map(|child| child.find_tag(tag)),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text content, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(node) => node.children.iter().for_each(|child| child.collect_text(out)),
            Self::Fragment(children) => children.iter().for_each(|child| child.collect_text(out)),
        }
    }
}

pub trait IntoRsxNode {
    fn into_rsx_node(self) -> RsxNode;
}

impl IntoRsxNode for RsxNode {
    fn into_rsx_node(self) -> RsxNode {
        self
    }
}

impl IntoRsxNode for &str {
    fn into_rsx_node(self) -> RsxNode {
        RsxNode::text(self)
    }
}

impl IntoRsxNode for String {
    fn into_rsx_node(self) -> RsxNode {
        RsxNode::text(self)
    }
}

impl IntoRsxNode for Vec<RsxNode> {
    fn into_rsx_node(self) -> RsxNode {
        RsxNode::fragment(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Offset(IVec2),
    Placement(Placement),
    Animation(AnimationSample),
    PositionProvider(PositionProviderProp),
    OnClick(ClickHandlerProp),
    OnDismissRequest(DismissHandlerProp),
    Shared(SharedPropValue),
}

pub trait IntoPropValue {
    fn into_prop_value(self) -> PropValue;
}

/// The error names the kind of value the prop expected.
pub trait FromPropValue: Sized {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str>;
}

macro_rules! impl_prop_conversions {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl IntoPropValue for $ty {
            fn into_prop_value(self) -> PropValue {
                PropValue::$variant(self)
            }
        }

        impl FromPropValue for $ty {
            fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
                match value {
                    PropValue::$variant(v) => Ok(v),
                    _ => Err($expected),
                }
            }
        }
    };
}

impl_prop_conversions!(bool, Bool, "bool");
impl_prop_conversions!(String, String, "string");
impl_prop_conversions!(IVec2, Offset, "offset");
impl_prop_conversions!(Placement, Placement, "placement");
impl_prop_conversions!(AnimationSample, Animation, "animation sample");
impl_prop_conversions!(PositionProviderProp, PositionProvider, "position provider");
impl_prop_conversions!(ClickHandlerProp, OnClick, "click handler");
impl_prop_conversions!(DismissHandlerProp, OnDismissRequest, "dismiss handler");

impl IntoPropValue for PropValue {
    fn into_prop_value(self) -> PropValue {
        self
    }
}

impl FromPropValue for PropValue {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
        Ok(value)
    }
}

impl IntoPropValue for &str {
    fn into_prop_value(self) -> PropValue {
        PropValue::String(self.to_string())
    }
}

impl IntoPropValue for i32 {
    fn into_prop_value(self) -> PropValue {
        PropValue::I64(self as i64)
    }
}

impl IntoPropValue for i64 {
    fn into_prop_value(self) -> PropValue {
        PropValue::I64(self)
    }
}

impl IntoPropValue for f32 {
    fn into_prop_value(self) -> PropValue {
        PropValue::F64(self as f64)
    }
}

impl IntoPropValue for f64 {
    fn into_prop_value(self) -> PropValue {
        PropValue::F64(self)
    }
}

impl FromPropValue for f64 {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
        match value {
            PropValue::I64(v) => Ok(v as f64),
            PropValue::F64(v) => Ok(v),
            _ => Err("numeric"),
        }
    }
}

impl FromPropValue for f32 {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
        Ok(f64::from_prop_value(value)? as f32)
    }
}

impl FromPropValue for i64 {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
        Ok(f64::from_prop_value(value)? as i64)
    }
}

impl<T: Clone + 'static> IntoPropValue for Vec<T> {
    fn into_prop_value(self) -> PropValue {
        let erased: Rc<dyn Any> = Rc::new(self);
        PropValue::Shared(SharedPropValue::new(erased))
    }
}

impl<T: Clone + 'static> FromPropValue for Vec<T> {
    fn from_prop_value(value: PropValue) -> Result<Self, &'static str> {
        match value {
            PropValue::Shared(shared) => {
                let vec = Rc::downcast::<Vec<T>>(shared.value()).map_err(|_| "matching Vec")?;
                Ok((*vec).clone())
            }
            _ => Err("Vec"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_t_reports_the_expected_kind() {
        let mut props = RsxProps::new();
        props.push("placement", Placement::Top);
        props.push("visible", "yes");
        assert_eq!(
            props.remove_t::<Placement>("placement"),
            Ok(Some(Placement::Top))
        );
        assert_eq!(
            props.remove_t::<bool>("visible"),
            Err(OverlayError::prop_type("visible", "bool"))
        );
        assert_eq!(props.remove_t::<bool>("missing"), Ok(None));
        assert!(props.reject_remaining("Flyout").is_ok());
    }

    #[test]
    fn reject_remaining_names_the_owner() {
        let mut props = RsxProps::new();
        props.push("colour", "red");
        assert_eq!(
            props.reject_remaining("Popup"),
            Err(OverlayError::UnknownProp {
                key: "colour".to_string(),
                owner: "Popup".to_string(),
            })
        );
    }

    #[test]
    fn find_tag_walks_fragments() {
        let tree = RsxNode::element("Element").with_child(RsxNode::fragment(vec![
            RsxNode::text("a"),
            RsxNode::element("Popup").with_child("b"),
        ]));
        let popup = tree.find_tag("Popup").expect("popup should be found");
        assert_eq!(popup.children, vec![RsxNode::text("b")]);
        assert_eq!(tree.text_content(), "ab");
    }
}
