use smol_str::SmolStr;

use crate::OverlayError;
use crate::ui::{PropValue, RsxNode};

/// The composition engine. It owns measurement, popup positioning through
/// each `Popup` node's provider, drawing and input dispatch.
pub trait RenderBackend {
    type NodeId: Copy;

    fn create_root(&mut self, node: &RsxNode) -> Result<Self::NodeId, OverlayError>;
    fn replace_root(&mut self, root: Self::NodeId, node: &RsxNode) -> Result<(), OverlayError>;
    fn update_root_props(
        &mut self,
        root: Self::NodeId,
        props: &[(SmolStr, PropValue)],
    ) -> Result<(), OverlayError>;
    fn replace_root_children(
        &mut self,
        root: Self::NodeId,
        children: &[RsxNode],
    ) -> Result<(), OverlayError>;
    fn draw_frame(&mut self) -> Result<(), OverlayError>;
}
