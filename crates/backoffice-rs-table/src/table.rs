//! The dynamic table.
//!
//! [`DynamicTable`] renders typed rows through a list of
//! [`ColumnDescriptor`]s. It is a controlled component: the selection, the
//! current page, and the rows themselves belong to the owning page. Row
//! clicks, page changes, and selection toggles are reported through
//! [`TableEvents`] and never applied by the table itself.

use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use serde::Serialize;

use backoffice_rs_core::html::escape_html;
use backoffice_rs_core::{BackofficeError, BackofficeResult, Settings};
use backoffice_rs_pagination::PaginationControl;

use crate::column::{Align, Cell, ColumnDescriptor};

type RowId<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Callbacks from a [`DynamicTable`]. Every method defaults to a no-op.
pub trait TableEvents<R>: Send + Sync {
    /// A page change was requested.
    fn on_page_change(&self, _page: usize) {}

    /// A row was clicked.
    fn on_row_click(&self, _row: &R) {}

    /// The selection should become `selected`.
    fn on_bulk_select(&self, _selected: &[String]) {}
}

/// One rendered row of the table view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// The row id, when the table has a row id accessor.
    pub id: Option<String>,
    pub selected: bool,
    pub cells: Vec<Cell>,
}

/// A column-configured table over rows of type `R`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use backoffice_rs_core::{Settings, Value};
/// use backoffice_rs_table::{ColumnDescriptor, DynamicTable};
///
/// struct Lead { id: u32, name: String }
///
/// let table = DynamicTable::new(
///     vec![ColumnDescriptor::new("name", |l: &Lead| Value::from(l.name.as_str()))],
///     Arc::new(Settings::default()),
/// )
/// .unwrap()
/// .data(vec![Lead { id: 7, name: "Acme".into() }])
/// .row_id(|l| l.id.to_string());
///
/// assert_eq!(table.cell_text(0, "name").as_deref(), Some("Acme"));
/// assert_eq!(table.rows()[0].id.as_deref(), Some("7"));
/// ```
pub struct DynamicTable<R> {
    columns: Vec<ColumnDescriptor<R>>,
    settings: Arc<Settings>,
    data: Vec<R>,
    row_id: Option<RowId<R>>,
    selected: Vec<String>,
    loading: bool,
    empty_message: String,
    loading_message: String,
    pagination: Option<PaginationControl>,
    events: Option<Arc<dyn TableEvents<R>>>,
}

impl<R> DynamicTable<R> {
    /// Creates an empty table.
    ///
    /// Fails on an empty or duplicate column key.
    pub fn new(columns: Vec<ColumnDescriptor<R>>, settings: Arc<Settings>) -> BackofficeResult<Self> {
        check_column_keys(&columns, "table columns")?;
        Ok(Self {
            columns,
            settings,
            data: Vec::new(),
            row_id: None,
            selected: Vec::new(),
            loading: false,
            empty_message: "No data available".to_string(),
            loading_message: "Loading...".to_string(),
            pagination: None,
            events: None,
        })
    }

    /// Replaces the rows.
    #[must_use]
    pub fn data(mut self, rows: Vec<R>) -> Self {
        self.data = rows;
        self
    }

    /// Sets the row id accessor. Selection requires row ids.
    #[must_use]
    pub fn row_id<F>(mut self, row_id: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(row_id));
        self
    }

    /// Sets the selection owned by the parent.
    #[must_use]
    pub fn selected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    #[must_use]
    pub fn pagination(mut self, control: PaginationControl) -> Self {
        self.pagination = Some(control);
        self
    }

    #[must_use]
    pub fn events(mut self, events: Arc<dyn TableEvents<R>>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    pub fn data_rows(&self) -> &[R] {
        &self.data
    }

    pub fn selection(&self) -> &[String] {
        &self.selected
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn pagination_control(&self) -> Option<&PaginationControl> {
        self.pagination.as_ref()
    }

    /// Returns `true` when the empty-state message should be shown.
    pub fn is_empty_state(&self) -> bool {
        !self.loading && self.data.is_empty()
    }

    fn id_of(&self, row: &R) -> Option<String> {
        self.row_id.as_ref().map(|id| id(row))
    }

    fn page_ids(&self) -> Vec<String> {
        self.data.iter().filter_map(|row| self.id_of(row)).collect()
    }

    /// Renders the cell in row `index`, column `key`.
    pub fn cell(&self, index: usize, key: &str) -> Option<Cell> {
        let row = self.data.get(index)?;
        let column = self.columns.iter().find(|c| c.key() == key)?;
        Some(column.render(row, &self.settings))
    }

    /// Returns the plain text of a cell.
    pub fn cell_text(&self, index: usize, key: &str) -> Option<String> {
        self.cell(index, key).map(|cell| cell.text().to_string())
    }

    /// Returns the rendered view model of every row.
    pub fn rows(&self) -> Vec<RowView> {
        self.data
            .iter()
            .map(|row| {
                let id = self.id_of(row);
                RowView {
                    selected: id.as_ref().is_some_and(|id| self.selected.contains(id)),
                    id,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.render(row, &self.settings))
                        .collect(),
                }
            })
            .collect()
    }

    /// Returns `true` if every row on the page is selected.
    pub fn is_all_selected(&self) -> bool {
        let ids = self.page_ids();
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Reports the selection with `id` toggled. Returns the reported selection.
    pub fn toggle_row(&self, id: &str) -> Vec<String> {
        let mut next = self.selected.clone();
        if let Some(position) = next.iter().position(|s| s == id) {
            next.remove(position);
        } else {
            next.push(id.to_string());
        }
        self.report_selection(next)
    }

    /// Reports the selection with every row on the page selected, or with
    /// them all deselected if they already were.
    pub fn toggle_all(&self) -> Vec<String> {
        let page_ids = self.page_ids();
        let next = if self.is_all_selected() {
            let page: HashSet<&String> = page_ids.iter().collect();
            self.selected
                .iter()
                .filter(|id| !page.contains(id))
                .cloned()
                .collect()
        } else {
            let mut next = self.selected.clone();
            for id in page_ids {
                if !next.contains(&id) {
                    next.push(id);
                }
            }
            next
        };
        self.report_selection(next)
    }

    fn report_selection(&self, next: Vec<String>) -> Vec<String> {
        if let Some(events) = &self.events {
            events.on_bulk_select(&next);
        }
        next
    }

    /// Reports a click on row `index`. Returns `false` for an unknown row.
    pub fn click_row(&self, index: usize) -> bool {
        let Some(row) = self.data.get(index) else {
            tracing::debug!(index, rows = self.data.len(), "ignoring click on unknown row");
            return false;
        };
        if let Some(events) = &self.events {
            events.on_row_click(row);
        }
        true
    }

    /// Requests a page change through the pagination control.
    ///
    /// Returns `None` when there is no control or the control rejects the page.
    pub fn change_page(&self, page: usize) -> Option<usize> {
        let control = self.pagination.as_ref()?;
        control.go_to(page, |target| {
            if let Some(events) = &self.events {
                events.on_page_change(target);
            }
        })
    }

    fn selectable(&self) -> bool {
        self.row_id.is_some()
    }

    /// Renders the table, followed by the pagination control if any.
    pub fn render_html(&self) -> String {
        let colspan = self.columns.len() + usize::from(self.selectable());
        let mut html = String::from(r#"<table class="data-table"><thead><tr>"#);

        if self.selectable() {
            let checked = if self.is_all_selected() { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<th class="select"><input type="checkbox" aria-label="Select all"{checked} /></th>"#
            );
        }
        for column in &self.columns {
            let _ = write!(html, "<th{}>{}</th>", column_attrs(column), escape_html(&column.display_label()));
        }
        html.push_str("</tr></thead><tbody>");

        if self.loading {
            let _ = write!(
                html,
                r#"<tr><td colspan="{colspan}" class="loading">{}</td></tr>"#,
                escape_html(&self.loading_message)
            );
        } else if self.data.is_empty() {
            let _ = write!(
                html,
                r#"<tr><td colspan="{colspan}" class="empty">{}</td></tr>"#,
                escape_html(&self.empty_message)
            );
        } else {
            for row in self.rows() {
                match &row.id {
                    Some(id) if row.selected => {
                        let _ = write!(html, r#"<tr data-id="{}" class="selected">"#, escape_html(id));
                    }
                    Some(id) => {
                        let _ = write!(html, r#"<tr data-id="{}">"#, escape_html(id));
                    }
                    None => html.push_str("<tr>"),
                }
                if self.selectable() {
                    let checked = if row.selected { " checked" } else { "" };
                    let _ = write!(
                        html,
                        r#"<td class="select"><input type="checkbox"{checked} /></td>"#
                    );
                }
                for (column, cell) in self.columns.iter().zip(&row.cells) {
                    let _ = write!(html, "<td{}>{}</td>", column_attrs(column), cell.to_html());
                }
                html.push_str("</tr>");
            }
        }
        html.push_str("</tbody></table>");

        if let Some(control) = &self.pagination {
            html.push_str(&control.render_html());
        }
        html
    }
}

fn column_attrs<R>(column: &ColumnDescriptor<R>) -> String {
    let mut attrs = String::new();
    match column.alignment() {
        Align::Left => {}
        Align::Center => attrs.push_str(r#" class="align-center""#),
        Align::Right => attrs.push_str(r#" class="align-right""#),
    }
    if let Some(width) = column.width_hint() {
        let _ = write!(attrs, r#" style="width: {}""#, escape_html(width));
    }
    attrs
}

/// Fails on an empty or duplicate column key.
pub(crate) fn check_column_keys<R>(columns: &[ColumnDescriptor<R>], context: &str) -> BackofficeResult<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if column.key().is_empty() {
            return Err(BackofficeError::EmptyKey(context.to_string()));
        }
        if !seen.insert(column.key()) {
            return Err(BackofficeError::DuplicateColumn(column.key().to_string()));
        }
    }
    Ok(())
}

impl<R> fmt::Debug for DynamicTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicTable")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("selected", &self.selected)
            .field("loading", &self.loading)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
