use fluent_overlay::ui::{
    ClickEvent, ClickHandlerProp, DismissHandlerProp, DismissReason, DismissRequestEvent,
    PositionProviderProp, PropValue, RenderBackend, RsxElementNode, RsxNode, UiRuntime,
};
use fluent_overlay::{AnimationSample, OverlayError, TransitionFrame, Vec2};
use smol_str::SmolStr;

/// Backend that only counts what the runtime sends it; tests read the tree
/// back from [`UiRuntime::current`].
#[derive(Default)]
pub struct RecordingBackend {
    pub frames: usize,
}

impl RenderBackend for RecordingBackend {
    type NodeId = ();

    fn create_root(&mut self, _node: &RsxNode) -> Result<(), OverlayError> {
        Ok(())
    }

    fn replace_root(&mut self, _root: (), _node: &RsxNode) -> Result<(), OverlayError> {
        Ok(())
    }

    fn update_root_props(
        &mut self,
        _root: (),
        _props: &[(SmolStr, PropValue)],
    ) -> Result<(), OverlayError> {
        Ok(())
    }

    fn replace_root_children(
        &mut self,
        _root: (),
        _children: &[RsxNode],
    ) -> Result<(), OverlayError> {
        Ok(())
    }

    fn draw_frame(&mut self) -> Result<(), OverlayError> {
        self.frames += 1;
        Ok(())
    }
}

pub const FRAME: TransitionFrame = TransitionFrame::from_millis(16);

pub fn runtime() -> UiRuntime<RecordingBackend> {
    UiRuntime::new(RecordingBackend::default())
}

/// Ticks until no component asks for another frame.
pub fn settle(runtime: &mut UiRuntime<RecordingBackend>, build: impl Fn() -> RsxNode) {
    for _ in 0..120 {
        let result = runtime.tick(FRAME, &build).expect("tick");
        if !result.keep_running {
            return;
        }
    }
    panic!("animations never settled");
}

pub fn tree(runtime: &UiRuntime<RecordingBackend>) -> &RsxNode {
    runtime.current().expect("mounted tree")
}

pub fn popup(node: &RsxNode) -> Option<&RsxElementNode> {
    node.find_tag("Popup")
}

pub fn position_provider(node: &RsxNode) -> PositionProviderProp {
    match popup(node).and_then(|popup| popup.prop("position_provider")) {
        Some(PropValue::PositionProvider(provider)) => provider.clone(),
        other => panic!("no position provider: {other:?}"),
    }
}

pub fn animation(node: &RsxElementNode) -> AnimationSample {
    match node.prop("animation") {
        Some(PropValue::Animation(sample)) => *sample,
        other => panic!("no animation sample: {other:?}"),
    }
}

pub fn click_handlers(node: &RsxNode) -> Vec<(String, ClickHandlerProp)> {
    let mut out = Vec::new();
    collect_click_handlers(node, &mut out);
    out
}

fn collect_click_handlers(node: &RsxNode, out: &mut Vec<(String, ClickHandlerProp)>) {
    match node {
        RsxNode::Text(_) => {}
        RsxNode::Fragment(children) => children
            .iter()
            .for_each(|child| collect_click_handlers(child, out)),
        RsxNode::Element(element) => {
            if let Some(PropValue::OnClick(handler)) = element.prop("on_click") {
                out.push((node.text_content(), handler.clone()));
            }
            element
                .children
                .iter()
                .for_each(|child| collect_click_handlers(child, out));
        }
    }
}

pub fn click(node: &RsxNode, label: &str) {
    let (_, handler) = click_handlers(node)
        .into_iter()
        .find(|(text, _)| text == label)
        .unwrap_or_else(|| panic!("nothing clickable labelled {label:?}"));
    handler.call(&mut ClickEvent::at(Vec2::ZERO));
}

pub fn dismiss(node: &RsxElementNode, reason: DismissReason) {
    match node.prop("on_dismiss_request") {
        Some(PropValue::OnDismissRequest(handler)) => {
            let handler: &DismissHandlerProp = handler;
            handler.call(&mut DismissRequestEvent::new(reason));
        }
        other => panic!("no dismiss handler: {other:?}"),
    }
}
