//! 404 Not Found page

use crate::navigation::NavShell;
use askama::Template;

/// 404 Not Found page
#[derive(Debug, Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    /// Layout shell; no link is active
    pub nav: NavShell,
}

impl NotFoundTemplate {
    /// Not-found page for the requested path
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            nav: NavShell::for_path(path, false),
        }
    }
}
