//! Sidebar navigation items.
//!
//! The navigation tree is configuration, read from
//! [`Settings::nav_items`](crate::settings::Settings::nav_items).

use serde::{Deserialize, Serialize};

/// One entry in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Text shown in the sidebar.
    pub label: String,
    /// Route path (e.g. "/finance/expenses").
    pub path: String,
    /// Optional icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Nested items.
    #[serde(default)]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Creates a leaf item.
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            icon: None,
            children: Vec::new(),
        }
    }

    /// Sets the icon.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Appends a child item.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    fn matches(&self, route: &str) -> bool {
        route == self.path
            || (route.starts_with(&self.path)
                && (self.path.ends_with('/') || route[self.path.len()..].starts_with('/')))
    }
}

/// Returns the labels from the root to the deepest item matching `route`.
///
/// An item matches when its path equals the route or is a path-segment
/// prefix of it. The first matching sibling wins. Returns an empty list
/// when nothing matches.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::nav::{active_trail, NavItem};
///
/// let items = vec![NavItem::new("Finance", "/finance")
///     .child(NavItem::new("Expenses", "/finance/expenses"))];
/// assert_eq!(active_trail(&items, "/finance/expenses/42"), ["Finance", "Expenses"]);
/// ```
pub fn active_trail<'a>(items: &'a [NavItem], route: &str) -> Vec<&'a str> {
    let mut trail = Vec::new();
    let mut level = items;
    while let Some(item) = level.iter().find(|item| item.matches(route)) {
        trail.push(item.label.as_str());
        level = &item.children;
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<NavItem> {
        vec![
            NavItem::new("Dashboard", "/dashboard"),
            NavItem::new("Employees", "/employees").icon("users"),
            NavItem::new("Sales", "/sales").child(NavItem::new("Leads", "/sales/leads")),
            NavItem::new("Finance", "/finance")
                .child(NavItem::new("Expenses", "/finance/expenses"))
                .child(NavItem::new("Salaries", "/finance/salaries")),
        ]
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(active_trail(&tree(), "/employees"), ["Employees"]);
    }

    #[test]
    fn test_nested_match() {
        assert_eq!(
            active_trail(&tree(), "/finance/salaries"),
            ["Finance", "Salaries"]
        );
    }

    #[test]
    fn test_detail_route_matches_parent_item() {
        assert_eq!(active_trail(&tree(), "/sales/leads/17"), ["Sales", "Leads"]);
    }

    #[test]
    fn test_prefix_must_end_on_segment() {
        assert!(active_trail(&tree(), "/salesforce").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(active_trail(&tree(), "/settings").is_empty());
    }
}
