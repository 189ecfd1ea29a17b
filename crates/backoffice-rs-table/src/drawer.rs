//! Tabbed detail drawers.
//!
//! A [`DetailDrawer`] shows one row as labelled fields grouped in tabs,
//! using the same [`ColumnDescriptor`]s (and so the same cell renderers) as
//! the table. On narrow viewports it opens as a bottom sheet. Editing goes
//! through a [`FormEngine`] pre-filled from the row.

use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use serde::Serialize;

use backoffice_rs_core::html::escape_html;
use backoffice_rs_core::{BackofficeError, BackofficeResult, Settings};
use backoffice_rs_forms::{FieldDescriptor, FormConfig, FormEngine, FormValues};

use crate::column::{Cell, ColumnDescriptor};
use crate::table::check_column_keys;

/// Where the drawer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerPlacement {
    /// A panel sliding in from the right edge.
    Right,
    /// A sheet sliding up from the bottom edge.
    Bottom,
}

/// One tab of a drawer.
pub struct DrawerTab<R> {
    key: String,
    label: String,
    fields: Vec<ColumnDescriptor<R>>,
}

impl<R> DrawerTab<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, fields: Vec<ColumnDescriptor<R>>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            fields,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fields(&self) -> &[ColumnDescriptor<R>] {
        &self.fields
    }
}

/// A rendered label/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub key: String,
    pub label: String,
    pub cell: Cell,
}

/// A tabbed detail view over one row.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use backoffice_rs_core::{Settings, Value};
/// use backoffice_rs_table::{ColumnDescriptor, DetailDrawer, DrawerPlacement, DrawerTab};
///
/// struct Expense { title: String }
///
/// let mut drawer = DetailDrawer::new(
///     "Expense details",
///     vec![DrawerTab::new("overview", "Overview", vec![
///         ColumnDescriptor::new("title", |e: &Expense| Value::from(e.title.as_str())),
///     ])],
///     Arc::new(Settings::default()),
/// )
/// .unwrap();
///
/// drawer.open(Expense { title: "Hotel".into() });
/// assert_eq!(drawer.details()[0].cell.text(), "Hotel");
/// assert_eq!(drawer.placement(375), DrawerPlacement::Bottom);
/// ```
pub struct DetailDrawer<R> {
    title: String,
    tabs: Vec<DrawerTab<R>>,
    active_tab: usize,
    row: Option<R>,
    settings: Arc<Settings>,
}

impl<R> DetailDrawer<R> {
    /// Creates a closed drawer showing the first tab.
    ///
    /// Fails when there are no tabs, a tab key is empty or repeated, or a
    /// tab repeats a field key.
    pub fn new(title: impl Into<String>, tabs: Vec<DrawerTab<R>>, settings: Arc<Settings>) -> BackofficeResult<Self> {
        if tabs.is_empty() {
            return Err(BackofficeError::ImproperlyConfigured(
                "a detail drawer needs at least one tab".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for tab in &tabs {
            if tab.key.is_empty() {
                return Err(BackofficeError::EmptyKey("drawer tabs".to_string()));
            }
            if !seen.insert(tab.key.as_str()) {
                return Err(BackofficeError::ImproperlyConfigured(format!(
                    "duplicate drawer tab '{}'",
                    tab.key
                )));
            }
            check_column_keys(&tab.fields, "drawer fields")?;
        }
        Ok(Self {
            title: title.into(),
            tabs,
            active_tab: 0,
            row: None,
            settings,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &[DrawerTab<R>] {
        &self.tabs
    }

    /// Opens the drawer on `row`, starting from the first tab.
    pub fn open(&mut self, row: R) {
        self.row = Some(row);
        self.active_tab = 0;
    }

    /// Closes the drawer and returns the row it was showing.
    pub fn close(&mut self) -> Option<R> {
        self.row.take()
    }

    pub const fn is_open(&self) -> bool {
        self.row.is_some()
    }

    pub const fn row(&self) -> Option<&R> {
        self.row.as_ref()
    }

    /// Returns the key of the active tab.
    pub fn active_tab(&self) -> &str {
        &self.tabs[self.active_tab].key
    }

    /// Switches to the tab keyed `key`. Unknown keys are ignored.
    ///
    /// Returns `true` if the tab exists.
    pub fn set_active_tab(&mut self, key: &str) -> bool {
        match self.tabs.iter().position(|tab| tab.key == key) {
            Some(index) => {
                self.active_tab = index;
                true
            }
            None => {
                tracing::debug!(tab = key, "ignoring unknown drawer tab");
                false
            }
        }
    }

    /// Returns the placement for a viewport `width` px wide.
    pub fn placement(&self, viewport_width: u32) -> DrawerPlacement {
        if viewport_width < self.settings.drawer_breakpoint {
            DrawerPlacement::Bottom
        } else {
            DrawerPlacement::Right
        }
    }

    /// Renders the active tab's fields; empty while closed.
    pub fn details(&self) -> Vec<DetailField> {
        let Some(row) = &self.row else {
            return Vec::new();
        };
        self.tabs[self.active_tab]
            .fields
            .iter()
            .map(|column| DetailField {
                key: column.key().to_string(),
                label: column.display_label(),
                cell: column.render(row, &self.settings),
            })
            .collect()
    }

    /// Builds an edit form over `fields`, pre-filled from the open row.
    ///
    /// A form field takes the raw value of the drawer field with the same
    /// key, from any tab. Fails if the drawer is closed or the fields are
    /// invalid.
    pub fn edit_form(&self, fields: Vec<FieldDescriptor>, config: FormConfig) -> BackofficeResult<FormEngine> {
        let row = self.row.as_ref().ok_or_else(|| {
            BackofficeError::ImproperlyConfigured("cannot edit from a closed drawer".to_string())
        })?;
        let initial: FormValues = fields
            .iter()
            .filter_map(|field| {
                self.tabs
                    .iter()
                    .flat_map(|tab| &tab.fields)
                    .find(|column| column.key() == field.name)
                    .map(|column| (field.name.clone(), column.value(row)))
            })
            .collect();
        let mut form = FormEngine::new(fields, config)?;
        form.set_initial_values(initial);
        Ok(form)
    }

    /// Renders the drawer, or an empty string while closed.
    pub fn render_html(&self, viewport_width: u32) -> String {
        if !self.is_open() {
            return String::new();
        }
        let placement = match self.placement(viewport_width) {
            DrawerPlacement::Right => "right",
            DrawerPlacement::Bottom => "bottom",
        };
        let title = escape_html(&self.title);
        let mut html = format!(
            r#"<aside class="drawer drawer-{placement}" role="dialog" aria-label="{title}"><header><h2>{title}</h2><button type="button" class="drawer-close" aria-label="Close">×</button></header>"#
        );

        html.push_str(r#"<nav class="drawer-tabs" role="tablist">"#);
        for (index, tab) in self.tabs.iter().enumerate() {
            let selected = index == self.active_tab;
            let _ = write!(
                html,
                r#"<button type="button" role="tab" data-tab="{}" aria-selected="{selected}">{}</button>"#,
                escape_html(&tab.key),
                escape_html(&tab.label)
            );
        }
        html.push_str("</nav><dl>");
        for field in self.details() {
            let _ = write!(
                html,
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(&field.label),
                field.cell.to_html()
            );
        }
        html.push_str("</dl></aside>");
        html
    }
}

impl<R> fmt::Debug for DetailDrawer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tabs: Vec<&str> = self.tabs.iter().map(|tab| tab.key.as_str()).collect();
        f.debug_struct("DetailDrawer")
            .field("title", &self.title)
            .field("tabs", &tabs)
            .field("active_tab", &self.active_tab())
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use backoffice_rs_core::Value;
    use backoffice_rs_forms::FieldType;

    use super::*;
    use crate::badge::BadgeConfig;

    #[derive(Debug, Clone, PartialEq)]
    struct Expense {
        id: u32,
        title: String,
        amount: f64,
        status: String,
        notes: String,
    }

    fn expense() -> Expense {
        Expense {
            id: 12,
            title: "Conference hotel".into(),
            amount: 620.0,
            status: "approved".into(),
            notes: "Two nights".into(),
        }
    }

    fn drawer() -> DetailDrawer<Expense> {
        let overview = DrawerTab::new(
            "overview",
            "Overview",
            vec![
                ColumnDescriptor::new("title", |e: &Expense| Value::from(e.title.as_str())),
                ColumnDescriptor::new("amount", |e: &Expense| Value::Float(e.amount)).currency(),
                ColumnDescriptor::new("status", |e: &Expense| Value::from(e.status.as_str()))
                    .badge(BadgeConfig::new().entry("approved", "success", "Approved")),
            ],
        );
        let notes = DrawerTab::new(
            "notes",
            "Notes",
            vec![ColumnDescriptor::new("notes", |e: &Expense| Value::from(e.notes.as_str()))],
        );
        DetailDrawer::new("Expense details", vec![overview, notes], Arc::new(Settings::default())).unwrap()
    }

    #[test]
    fn test_contract_errors() {
        let none: Vec<DrawerTab<Expense>> = Vec::new();
        assert!(DetailDrawer::new("x", none, Arc::new(Settings::default()))
            .unwrap_err()
            .is_contract_error());

        let twice = vec![
            DrawerTab::<Expense>::new("a", "A", Vec::new()),
            DrawerTab::new("a", "Again", Vec::new()),
        ];
        assert!(DetailDrawer::new("x", twice, Arc::new(Settings::default())).is_err());
    }

    #[test]
    fn test_open_close_and_details() {
        let mut drawer = drawer();
        assert!(!drawer.is_open());
        assert!(drawer.details().is_empty());
        assert_eq!(drawer.render_html(1024), "");

        drawer.open(expense());
        let details = drawer.details();
        assert_eq!(details.len(), 3);
        assert_eq!(details[1].label, "Amount");
        assert_eq!(details[1].cell.text(), "$620.00");
        assert_eq!(details[2].cell.text(), "Approved");

        assert_eq!(drawer.close(), Some(expense()));
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_tab_switching() {
        let mut drawer = drawer();
        drawer.open(expense());
        assert!(drawer.set_active_tab("notes"));
        assert_eq!(drawer.details()[0].cell.text(), "Two nights");

        assert!(!drawer.set_active_tab("history"));
        assert_eq!(drawer.active_tab(), "notes");

        drawer.open(expense());
        assert_eq!(drawer.active_tab(), "overview");
    }

    #[test]
    fn test_placement_breakpoint() {
        let drawer = drawer();
        assert_eq!(drawer.placement(767), DrawerPlacement::Bottom);
        assert_eq!(drawer.placement(768), DrawerPlacement::Right);
    }

    #[test]
    fn test_edit_form_prefilled_from_row() {
        let mut drawer = drawer();
        let fields = || {
            vec![
                FieldDescriptor::new("title", FieldType::Text).required(true),
                FieldDescriptor::new("notes", FieldType::Textarea),
                FieldDescriptor::new("reason", FieldType::Text).default_value("n/a"),
            ]
        };
        assert!(drawer.edit_form(fields(), FormConfig::default()).is_err());

        drawer.open(expense());
        let form = drawer.edit_form(fields(), FormConfig::default()).unwrap();
        assert_eq!(form.value("title"), Some(&Value::from("Conference hotel")));
        assert_eq!(form.value("notes"), Some(&Value::from("Two nights")));
        assert_eq!(form.value("reason"), Some(&Value::from("n/a")));
        assert!(!form.is_dirty());
    }

    #[test]
    fn test_render_html() {
        let mut drawer = drawer();
        drawer.open(expense());
        let html = drawer.render_html(400);
        assert!(html.starts_with(r#"<aside class="drawer drawer-bottom" role="dialog" aria-label="Expense details">"#));
        assert!(html.contains(r#"data-tab="overview" aria-selected="true">Overview</button>"#));
        assert!(html.contains(r#"<dt>Status</dt><dd><span class="badge badge-success">Approved</span></dd>"#));
    }
}
