//! Loading indicator shown while a page fetch is outstanding
//!
//! The page handlers await their fetch before rendering, so pages they
//! serve never show it. It applies to callers that render a
//! [`PageState`](crate::view_state::PageState) mid-load.

/// Loading indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loading {
    /// Whether the indicator is shown
    pub visible: bool,
    /// Text under the spinner
    pub message: &'static str,
}

impl Loading {
    /// Indicator that is shown when `loading` is set
    #[must_use]
    pub const fn when(loading: bool) -> Self {
        Self {
            visible: loading,
            message: "Loading...",
        }
    }
}

impl Default for Loading {
    fn default() -> Self {
        Self::when(false)
    }
}
