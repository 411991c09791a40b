use std::cell::Cell;

use crate::OverlayError;
use crate::transition::{RunResult, TransitionFrame};
use crate::ui::host::validate_tree;
use crate::ui::reconciler::{Patch, reconcile};
use crate::ui::{RenderBackend, RsxNode, build_scope, take_state_dirty};

thread_local! {
    static CURRENT_FRAME: Cell<TransitionFrame> = const { Cell::new(TransitionFrame::IDLE) };
    static ANIMATION_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Frame being built. Outside [`UiRuntime::tick`] this is
/// [`TransitionFrame::IDLE`], so rebuilds caused by state changes do not
/// move animations forward.
pub fn current_frame() -> TransitionFrame {
    CURRENT_FRAME.with(Cell::get)
}

/// Asks the runtime for another tick after the current build.
pub fn request_animation_frame() {
    ANIMATION_REQUESTED.with(|requested| requested.set(true));
}

fn take_animation_request() -> bool {
    ANIMATION_REQUESTED.with(|requested| requested.replace(false))
}

struct FrameScope;

impl FrameScope {
    fn enter(frame: TransitionFrame) -> Self {
        CURRENT_FRAME.with(|current| current.set(frame));
        Self
    }
}

impl Drop for FrameScope {
    fn drop(&mut self) {
        CURRENT_FRAME.with(|current| current.set(TransitionFrame::IDLE));
    }
}

pub struct UiRuntime<B: RenderBackend> {
    backend: B,
    current: Option<RsxNode>,
    root_id: Option<B::NodeId>,
}

impl<B: RenderBackend> UiRuntime<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            root_id: None,
        }
    }

    pub fn mount(&mut self, root: RsxNode) -> Result<(), OverlayError> {
        validate_tree(&root)?;
        let root_id = self.backend.create_root(&root)?;
        self.current = Some(root);
        self.root_id = Some(root_id);
        self.backend.draw_frame()
    }

    pub fn update(&mut self, next: RsxNode) -> Result<(), OverlayError> {
        let Some(root_id) = self.root_id else {
            return self.mount(next);
        };
        validate_tree(&next)?;

        let patches = reconcile(self.current.as_ref(), &next);
        log::trace!(target: "fluent_overlay::runtime", "applying {} patches", patches.len());
        self.apply_patches(root_id, &patches)?;
        self.current = Some(next);
        self.backend.draw_frame()
    }

    /// Rebuilds the tree without advancing animations.
    pub fn render(&mut self, build: impl FnOnce() -> RsxNode) -> Result<RunResult, OverlayError> {
        self.tick(TransitionFrame::IDLE, build)
    }

    /// Builds the tree for one animation frame and pushes it to the backend.
    /// `keep_running` is set while any component still animates.
    pub fn tick(
        &mut self,
        frame: TransitionFrame,
        build: impl FnOnce() -> RsxNode,
    ) -> Result<RunResult, OverlayError> {
        let _ = take_animation_request();
        let next = {
            let _scope = FrameScope::enter(frame);
            build_scope(build)
        };
        let keep_running = take_animation_request();
        let _ = take_state_dirty();

        let changed = self.current.as_ref() != Some(&next);
        if changed || self.root_id.is_none() {
            self.update(next)?;
        }
        Ok(RunResult {
            needs_layout: changed,
            needs_paint: changed,
            keep_running,
        })
    }

    fn apply_patches(&mut self, root_id: B::NodeId, patches: &[Patch]) -> Result<(), OverlayError> {
        for patch in patches {
            match patch {
                Patch::ReplaceRoot(node) => self.backend.replace_root(root_id, node)?,
                Patch::UpdateProps(props) => self.backend.update_root_props(root_id, props)?,
                Patch::ReplaceChildren(children) => {
                    self.backend.replace_root_children(root_id, children)?
                }
            }
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&RsxNode> {
        self.current.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::host::{element, text};
    use crate::ui::{PropValue, render_component, use_state};
    use smol_str::SmolStr;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<&'static str>,
        fail_draw: bool,
    }

    impl RenderBackend for RecordingBackend {
        type NodeId = u32;

        fn create_root(&mut self, _node: &RsxNode) -> Result<u32, OverlayError> {
            self.calls.push("create_root");
            Ok(1)
        }

        fn replace_root(&mut self, _root: u32, _node: &RsxNode) -> Result<(), OverlayError> {
            self.calls.push("replace_root");
            Ok(())
        }

        fn update_root_props(
            &mut self,
            _root: u32,
            _props: &[(SmolStr, PropValue)],
        ) -> Result<(), OverlayError> {
            self.calls.push("update_root_props");
            Ok(())
        }

        fn replace_root_children(
            &mut self,
            _root: u32,
            _children: &[RsxNode],
        ) -> Result<(), OverlayError> {
            self.calls.push("replace_root_children");
            Ok(())
        }

        fn draw_frame(&mut self) -> Result<(), OverlayError> {
            self.calls.push("draw_frame");
            if self.fail_draw {
                return Err(OverlayError::Backend("surface lost".to_string()));
            }
            Ok(())
        }
    }

    struct Ticker;

    fn ticker() -> RsxNode {
        render_component::<Ticker, _>(|| {
            let elapsed = use_state(|| 0.0_f32);
            let frame = current_frame();
            let value = elapsed.update_quiet(|elapsed| {
                *elapsed += frame.dt_seconds;
                *elapsed
            });
            if value < 0.05 {
                request_animation_frame();
            }
            element().with_child(text(format!("{value:.3}")))
        })
    }

    #[test]
    fn tick_reports_running_animations() {
        let mut runtime = UiRuntime::new(RecordingBackend::default());
        let first = runtime
            .tick(TransitionFrame::from_millis(16), ticker)
            .expect("first tick");
        assert!(first.keep_running);
        assert_eq!(runtime.backend().calls, vec!["create_root", "draw_frame"]);

        let mut result = first;
        for _ in 0..4 {
            result = runtime
                .tick(TransitionFrame::from_millis(16), ticker)
                .expect("tick");
        }
        assert!(!result.keep_running);
        assert_eq!(current_frame(), TransitionFrame::IDLE);
    }

    #[test]
    fn idle_render_does_not_advance_or_redraw() {
        let mut runtime = UiRuntime::new(RecordingBackend::default());
        runtime
            .tick(TransitionFrame::from_millis(10), ticker)
            .expect("tick");
        let result = runtime.render(ticker).expect("render");
        assert!(!result.needs_paint);
        assert_eq!(runtime.backend().calls.len(), 2);
        assert_eq!(
            runtime.current().map(RsxNode::text_content),
            Some("0.010".to_string())
        );
    }

    #[test]
    fn changed_children_are_patched() {
        let mut runtime = UiRuntime::new(RecordingBackend::default());
        runtime.mount(element()).expect("mount");
        runtime
            .update(element().with_child(text("open")))
            .expect("update");
        assert_eq!(
            runtime.into_backend().calls,
            vec![
                "create_root",
                "draw_frame",
                "replace_root_children",
                "draw_frame"
            ]
        );
    }

    #[test]
    fn invalid_trees_never_reach_the_backend() {
        let mut runtime = UiRuntime::new(RecordingBackend::default());
        let err = runtime
            .mount(element().with_prop("shadow", true))
            .expect_err("unknown prop");
        assert!(matches!(err, OverlayError::UnknownProp { .. }));
        assert!(runtime.backend().calls.is_empty());
    }

    #[test]
    fn backend_errors_propagate() {
        let mut runtime = UiRuntime::new(RecordingBackend {
            fail_draw: true,
            ..RecordingBackend::default()
        });
        assert_eq!(
            runtime.mount(element()),
            Err(OverlayError::Backend("surface lost".to_string()))
        );
    }
}
