//! Sidebar navigation: the static tool registry and the active-view selector.

pub mod window;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every view the shell knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolId {
    #[default]
    Dashboard,
    HtmlFetcher,
    /// Reserved; nothing is registered under it yet.
    Settings,
}

impl ToolId {
    pub fn slug(self) -> &'static str {
        match self {
            ToolId::Dashboard => "dashboard",
            ToolId::HtmlFetcher => "html-fetcher",
            ToolId::Settings => "settings",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolId {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(ToolId::Dashboard),
            "html-fetcher" => Ok(ToolId::HtmlFetcher),
            "settings" => Ok(ToolId::Settings),
            other => Err(UnknownTool(other.to_string())),
        }
    }
}

/// A registered tool. The id doubles as the key of the view that renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub name: &'static str,
    pub description: &'static str,
    pub summary: &'static str,
    pub icon: &'static str,
}

/// Registered tools, in sidebar order.
pub const TOOLS: &[ToolDescriptor] = &[ToolDescriptor {
    id: ToolId::HtmlFetcher,
    name: "HTML Fetcher",
    description: "Get static HTML",
    summary: "Fetch raw static HTML from any URL. View source and stats.",
    icon: "</>",
}];

/// Dashboard cards for tools that are not built yet.
pub const COMING_SOON: &[(&str, &str)] = &[(
    "JSON Formatter",
    "Coming soon. Validate and beautify JSON data.",
)];

pub fn find_tool(id: ToolId) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.id == id)
}

/// What the main area should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Tool(&'static ToolDescriptor),
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    active: ToolId,
    unknown: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ToolId {
        self.active
    }

    pub fn is_active(&self, id: ToolId) -> bool {
        self.unknown.is_none() && self.active == id
    }

    pub fn navigate(&mut self, id: ToolId) {
        log::debug!("navigate: {}", id);
        self.active = id;
        self.unknown = None;
    }

    /// Navigate by slug. An unknown slug lands on the not-found placeholder.
    pub fn navigate_slug(&mut self, slug: &str) {
        match slug.parse::<ToolId>() {
            Ok(id) => self.navigate(id),
            Err(e) => {
                log::debug!("{}", e);
                self.unknown = Some(e.0);
            }
        }
    }

    pub fn view(&self) -> View {
        if self.unknown.is_some() {
            return View::NotFound;
        }
        match self.active {
            ToolId::Dashboard => View::Dashboard,
            id => find_tool(id).map_or(View::NotFound, View::Tool),
        }
    }

    /// Header label for the current view.
    pub fn breadcrumb(&self) -> &'static str {
        match self.view() {
            View::Dashboard => "Dashboard",
            View::Tool(tool) => tool.name,
            View::NotFound => "Not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_dashboard() {
        let nav = Navigator::new();
        assert_eq!(nav.view(), View::Dashboard);
        assert!(nav.is_active(ToolId::Dashboard));
        assert_eq!(nav.breadcrumb(), "Dashboard");
    }

    #[test]
    fn navigates_to_registered_tool() {
        let mut nav = Navigator::new();
        nav.navigate(ToolId::HtmlFetcher);
        assert_eq!(nav.view(), View::Tool(&TOOLS[0]));
        assert_eq!(nav.breadcrumb(), "HTML Fetcher");
        assert!(!nav.is_active(ToolId::Dashboard));
    }

    #[test]
    fn placeholder_and_unknown_ids_are_not_found() {
        let mut nav = Navigator::new();
        nav.navigate(ToolId::Settings);
        assert_eq!(nav.view(), View::NotFound);

        nav.navigate_slug("no-such-tool");
        assert_eq!(nav.view(), View::NotFound);
        assert!(!nav.is_active(ToolId::Settings));

        nav.navigate_slug("dashboard");
        assert_eq!(nav.view(), View::Dashboard);
    }

    #[test]
    fn slugs_round_trip() {
        for id in [ToolId::Dashboard, ToolId::HtmlFetcher, ToolId::Settings] {
            assert_eq!(id.slug().parse::<ToolId>(), Ok(id));
        }
        assert_eq!(
            "nope".parse::<ToolId>(),
            Err(UnknownTool("nope".to_string()))
        );
    }
}
