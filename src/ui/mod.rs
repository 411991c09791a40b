mod component;
mod event;
pub mod host;
mod reconciler;
mod render_backend;
mod rsx_tree;
mod runtime;
mod state;

pub use component::*;
pub use event::*;
pub use reconciler::*;
pub use render_backend::*;
pub use rsx_tree::*;
pub use runtime::*;
pub use state::*;
