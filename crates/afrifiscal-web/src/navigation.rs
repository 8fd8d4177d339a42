//! Navigation shell: static route table and active-route derivation

/// One navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// URL path
    pub path: &'static str,
    /// Display name
    pub name: &'static str,
}

/// Pages shown in the navigation, in display order
pub const ROUTES: [Route; 8] = [
    Route { path: "/", name: "Dashboard" },
    Route { path: "/country", name: "Country Analysis" },
    Route { path: "/compare", name: "Compare Countries" },
    Route { path: "/clusters", name: "Cluster Analysis" },
    Route { path: "/warnings", name: "Early Warning" },
    Route { path: "/recommendations", name: "Policy Recommendations" },
    Route { path: "/fiscal-space", name: "Fiscal Space" },
    Route { path: "/debt-sustainability", name: "Debt Sustainability" },
];

/// Title shown in the header
pub const APP_TITLE: &str = "African Fiscal Analyzer";

/// Tagline shown under the title
pub const APP_TAGLINE: &str = "Economic Intelligence Platform";

/// Look up a route by its exact path
#[must_use]
pub fn route_for_path(path: &str) -> Option<&'static Route> {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|route| route.path == normalized)
}

/// Navigation link as rendered in the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Target path
    pub path: &'static str,
    /// Display name
    pub name: &'static str,
    /// Whether this link is the current page
    pub active: bool,
}

/// Layout shell state for one rendered page
///
/// The active route is derived from the request path and never stored
/// across requests. Links do not carry the `menu` parameter, so following
/// one closes the panel. The toggle keeps the page's own query so the
/// selection survives opening or closing the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavShell {
    /// Application title
    pub title: &'static str,
    /// Tagline under the title
    pub tagline: &'static str,
    /// Request path the shell was built for
    pub current_path: String,
    /// Name of the active route, if the path is a known page
    pub active_name: Option<&'static str>,
    /// All navigation links
    pub links: Vec<NavLink>,
    /// Whether the collapsible navigation panel is open
    pub panel_open: bool,
    /// Raw `key=value` pairs of the request query, without `menu`
    pub page_query: Vec<String>,
}

impl NavShell {
    /// Build the shell for a request path
    #[must_use]
    pub fn for_path(path: &str, panel_open: bool) -> Self {
        let active = route_for_path(path);
        let links = ROUTES
            .iter()
            .map(|route| NavLink {
                path: route.path,
                name: route.name,
                active: active.is_some_and(|a| a.path == route.path),
            })
            .collect();

        Self {
            title: APP_TITLE,
            tagline: APP_TAGLINE,
            current_path: path.to_string(),
            active_name: active.map(|a| a.name),
            links,
            panel_open,
            page_query: Vec::new(),
        }
    }

    /// Build the shell for a request path and raw query string
    ///
    /// The `menu` parameter sets the panel state; every other pair is kept
    /// verbatim for the toggle link.
    #[must_use]
    pub fn for_request(path: &str, query: Option<&str>) -> Self {
        let mut panel_open = false;
        let mut page_query = Vec::new();
        for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some(("menu", value)) => panel_open = Self::panel_from_query(Some(value)),
                None if pair == "menu" => {}
                _ => page_query.push(pair.to_string()),
            }
        }

        Self {
            page_query,
            ..Self::for_path(path, panel_open)
        }
    }

    /// Interpret the `menu` query value; only `open` opens the panel
    #[must_use]
    pub fn panel_from_query(menu: Option<&str>) -> bool {
        menu.is_some_and(|m| m.eq_ignore_ascii_case("open"))
    }

    /// Link that toggles the panel on the current page
    #[must_use]
    pub fn toggle_href(&self) -> String {
        let mut params = self.page_query.clone();
        if !self.panel_open {
            params.push("menu=open".to_string());
        }
        if params.is_empty() {
            self.current_path.clone()
        } else {
            format!("{}?{}", self.current_path, params.join("&"))
        }
    }
}
