use crate::ui::{RsxNode, render_component};

pub trait RsxComponent: Sized + 'static {
    type Props;

    fn render(props: Self::Props) -> RsxNode;
}

/// Renders `C` inside its own hook frame.
pub fn render<C: RsxComponent>(props: C::Props) -> RsxNode {
    render_component::<C, _>(|| C::render(props))
}
