//! The pagination control.
//!
//! [`PaginationControl`] is a pure view over pagination state owned by the
//! page: it never changes the current page itself. Navigation methods
//! validate the request and hand the target page to a callback, which is
//! where the owner updates its state and refetches.

use std::fmt::Write as _;

use serde::{Serialize, Serializer};

use backoffice_rs_core::Settings;

/// An entry in the rendered page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A page button.
    Page(usize),
    /// A gap marker between the boundary pages and the sibling window.
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(n) => serializer.serialize_u64(*n as u64),
            Self::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Computes the page buttons to render.
///
/// The sibling window is `current ± siblings`, clamped to `[1, total]`.
/// Up to `boundaries` pages are always shown at each end, and an ellipsis
/// marks any gap between them and the window. Overlapping ranges are emitted
/// once, without an ellipsis.
///
/// # Examples
///
/// ```
/// use backoffice_rs_pagination::{page_range, PageItem::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_range(5, 10, 1, 1),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn page_range(current: usize, total: usize, siblings: usize, boundaries: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(siblings).max(1);
    let end = current.saturating_add(siblings).min(total);
    let mut items = Vec::new();

    let head_end = boundaries.saturating_add(1);
    for page in 1..start.min(head_end) {
        items.push(PageItem::Page(page));
    }
    if start > head_end {
        items.push(PageItem::Ellipsis);
    }

    for page in start..=end {
        items.push(PageItem::Page(page));
    }

    if end.saturating_add(boundaries) < total {
        items.push(PageItem::Ellipsis);
    }
    let tail_start = end
        .saturating_add(1)
        .max(total.saturating_add(1).saturating_sub(boundaries));
    for page in tail_start..=total {
        items.push(PageItem::Page(page));
    }

    items
}

/// The "showing X-Y of Z" summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemsInfo {
    /// 1-based index of the first item on the page.
    pub start_item: usize,
    /// 1-based index of the last item on the page.
    pub end_item: usize,
    /// Total number of items.
    pub total_items: usize,
}

/// Props of the pagination control.
///
/// # Examples
///
/// ```
/// use backoffice_rs_pagination::PaginationControl;
///
/// let control = PaginationControl::new(3).total_items(95).items_per_page(10);
/// assert_eq!(control.get_total_pages(), 10);
///
/// let mut requested = None;
/// assert_eq!(control.next(|page| requested = Some(page)), Some(4));
/// assert_eq!(requested, Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControl {
    current_page: usize,
    total_pages: Option<usize>,
    total_items: Option<usize>,
    items_per_page: Option<usize>,
    sibling_count: usize,
    boundary_count: usize,
    disabled: bool,
    hide_on_single_page: bool,
    hide_on_empty: bool,
    show_first_last: bool,
    show_prev_next: bool,
}

impl PaginationControl {
    /// Creates a control showing `current_page` with default options.
    pub const fn new(current_page: usize) -> Self {
        Self {
            current_page,
            total_pages: None,
            total_items: None,
            items_per_page: None,
            sibling_count: 1,
            boundary_count: 1,
            disabled: false,
            hide_on_single_page: true,
            hide_on_empty: true,
            show_first_last: true,
            show_prev_next: true,
        }
    }

    /// Creates a control using the sibling/boundary counts and page size from settings.
    pub fn from_settings(current_page: usize, settings: &Settings) -> Self {
        Self::new(current_page)
            .sibling_count(settings.sibling_count)
            .boundary_count(settings.boundary_count)
            .items_per_page(settings.items_per_page)
    }

    /// Sets the total page count explicitly. Takes precedence over item counts.
    #[must_use]
    pub const fn total_pages(mut self, total: usize) -> Self {
        self.total_pages = Some(total);
        self
    }

    /// Sets the total item count.
    #[must_use]
    pub const fn total_items(mut self, total: usize) -> Self {
        self.total_items = Some(total);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn items_per_page(mut self, size: usize) -> Self {
        self.items_per_page = Some(size);
        self
    }

    /// Sets how many pages are shown on each side of the current page.
    #[must_use]
    pub const fn sibling_count(mut self, count: usize) -> Self {
        self.sibling_count = count;
        self
    }

    /// Sets how many pages are always shown at each end.
    #[must_use]
    pub const fn boundary_count(mut self, count: usize) -> Self {
        self.boundary_count = count;
        self
    }

    /// Disables all navigation.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Hides the control when there is at most one page.
    #[must_use]
    pub const fn hide_on_single_page(mut self, hide: bool) -> Self {
        self.hide_on_single_page = hide;
        self
    }

    /// Hides the control when there are no pages.
    #[must_use]
    pub const fn hide_on_empty(mut self, hide: bool) -> Self {
        self.hide_on_empty = hide;
        self
    }

    /// Shows the first/last buttons.
    #[must_use]
    pub const fn show_first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }

    /// Shows the previous/next buttons.
    #[must_use]
    pub const fn show_prev_next(mut self, show: bool) -> Self {
        self.show_prev_next = show;
        self
    }

    /// Returns the current page as given by the owner.
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the page count: explicit, else derived from item counts, else 0.
    pub fn get_total_pages(&self) -> usize {
        match (self.total_pages, self.total_items, self.items_per_page) {
            (Some(total), _, _) => total,
            (None, Some(items), Some(per_page)) if per_page > 0 => items.div_ceil(per_page),
            _ => 0,
        }
    }

    /// Returns the page buttons to render.
    pub fn page_items(&self) -> Vec<PageItem> {
        page_range(
            self.current_page,
            self.get_total_pages(),
            self.sibling_count,
            self.boundary_count,
        )
    }

    /// Returns `false` when the control should render nothing.
    pub fn is_visible(&self) -> bool {
        let total = self.get_total_pages();
        !((self.hide_on_single_page && total <= 1) || (self.hide_on_empty && total == 0))
    }

    /// Returns the item range summary, when both item count and page size are known.
    pub fn items_info(&self) -> Option<ItemsInfo> {
        match (self.total_items, self.items_per_page) {
            (Some(total_items), Some(per_page)) if per_page > 0 => Some(ItemsInfo {
                start_item: self
                    .current_page
                    .saturating_sub(1)
                    .saturating_mul(per_page)
                    .saturating_add(1),
                end_item: self.current_page.saturating_mul(per_page).min(total_items),
                total_items,
            }),
            _ => None,
        }
    }

    /// Returns `true` if a previous page exists and navigation is enabled.
    pub fn can_go_prev(&self) -> bool {
        !self.disabled && self.current_page > 1
    }

    /// Returns `true` if a next page exists and navigation is enabled.
    pub fn can_go_next(&self) -> bool {
        !self.disabled && self.current_page < self.get_total_pages()
    }

    /// Requests navigation to `page`.
    ///
    /// Returns the target page after invoking `on_change`, or `None` without
    /// invoking it when the control is disabled, the target is the current
    /// page, or the target lies outside `[1, total_pages]`.
    pub fn go_to(&self, page: usize, on_change: impl FnOnce(usize)) -> Option<usize> {
        let total = self.get_total_pages();
        if self.disabled || page == self.current_page || page < 1 || page > total {
            tracing::debug!(page, current = self.current_page, total, "ignoring page request");
            return None;
        }
        tracing::debug!(page, "page change");
        on_change(page);
        Some(page)
    }

    /// Requests the first page.
    pub fn first(&self, on_change: impl FnOnce(usize)) -> Option<usize> {
        self.go_to(1, on_change)
    }

    /// Requests the last page.
    pub fn last(&self, on_change: impl FnOnce(usize)) -> Option<usize> {
        self.go_to(self.get_total_pages(), on_change)
    }

    /// Requests the previous page.
    pub fn prev(&self, on_change: impl FnOnce(usize)) -> Option<usize> {
        self.go_to(self.current_page.saturating_sub(1), on_change)
    }

    /// Requests the next page.
    pub fn next(&self, on_change: impl FnOnce(usize)) -> Option<usize> {
        self.go_to(self.current_page.saturating_add(1), on_change)
    }

    /// Renders the control as an HTML `<nav>`, or an empty string when hidden.
    pub fn render_html(&self) -> String {
        if !self.is_visible() {
            return String::new();
        }
        let total = self.get_total_pages();
        let mut html = String::from(r#"<nav class="pagination" aria-label="Pagination">"#);

        if let Some(info) = self.items_info() {
            let _ = write!(
                html,
                r#"<span class="pagination-info">Showing {}-{} of {}</span>"#,
                info.start_item, info.end_item, info.total_items
            );
        }

        let button = |html: &mut String, label: &str, page: usize, enabled: bool| {
            let disabled = if enabled { "" } else { " disabled" };
            let _ = write!(
                html,
                r#"<button type="button" data-page="{page}"{disabled}>{label}</button>"#
            );
        };

        if self.show_first_last {
            button(&mut html, "«", 1, self.can_go_prev());
        }
        if self.show_prev_next {
            button(&mut html, "‹", self.current_page.saturating_sub(1).max(1), self.can_go_prev());
        }
        for item in self.page_items() {
            match item {
                PageItem::Page(page) if page == self.current_page => {
                    let _ = write!(
                        html,
                        r#"<button type="button" data-page="{page}" aria-current="page" class="active">{page}</button>"#
                    );
                }
                PageItem::Page(page) => button(&mut html, &page.to_string(), page, !self.disabled),
                PageItem::Ellipsis => html.push_str(r#"<span class="ellipsis">…</span>"#),
            }
        }
        if self.show_prev_next {
            button(&mut html, "›", (self.current_page + 1).min(total), self.can_go_next());
        }
        if self.show_first_last {
            button(&mut html, "»", total, self.can_go_next());
        }

        html.push_str("</nav>");
        html
    }
}
