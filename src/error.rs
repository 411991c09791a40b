use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// A dialog API was used without a `ContentDialogHost` state in scope.
    #[error("dialog host state is not provided; wrap the content in a ContentDialogHost first")]
    MissingDialogHost,
    #[error("prop `{key}` expects {expected} value")]
    PropType { key: String, expected: &'static str },
    #[error("unknown prop `{key}` on <{owner}>")]
    UnknownProp { key: String, owner: String },
    #[error("render backend failed: {0}")]
    Backend(String),
}

impl OverlayError {
    pub fn prop_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::PropType {
            key: key.into(),
            expected,
        }
    }
}
