mod dialog;
mod dialog_host;
mod dropdown_menu;
mod flyout;
mod overlay;
mod theme;

#[cfg(test)]
mod test_support;

pub use dialog::*;
pub use dialog_host::*;
pub use dropdown_menu::*;
pub use flyout::*;
pub use overlay::{set_layout_direction, use_layout_direction};
pub use theme::*;
