//! Client-side filtering of rows that are already loaded.
//!
//! Small lists (a team's salary slips, the leads of one campaign) are often
//! fetched in full and filtered in memory. A [`RowMatcher`] maps filter keys
//! to row accessors, so the same [`FilterState`] that drives the API query
//! can narrow a local `Vec` of typed rows.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use backoffice_rs_core::Value;

use crate::state::FilterState;

type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
type Predicate<R> = Arc<dyn Fn(&R, &Value) -> bool + Send + Sync>;

enum Rule<R> {
    Equals(Accessor<R>),
    Search(Vec<Accessor<R>>),
    Custom(Predicate<R>),
}

/// Matches typed rows against a filter state.
///
/// Filter keys without a rule are ignored (they are typically applied
/// server-side), as are blank filter values.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::Value;
/// use backoffice_rs_filters::{FilterStateManager, RowMatcher};
///
/// struct Lead { name: String, stage: String }
///
/// let matcher = RowMatcher::new()
///     .field("stage", |l: &Lead| Value::from(l.stage.as_str()))
///     .search("search", |l: &Lead| Value::from(l.name.as_str()));
///
/// let leads = vec![
///     Lead { name: "Acme".into(), stage: "won".into() },
///     Lead { name: "Globex".into(), stage: "new".into() },
/// ];
/// let mut filters = FilterStateManager::new([("search", ""), ("stage", "")]);
/// filters.update_filter("stage", "won");
/// assert_eq!(matcher.apply(&leads, filters.filters()).len(), 1);
/// ```
pub struct RowMatcher<R> {
    rules: HashMap<String, Rule<R>>,
}

impl<R> Default for RowMatcher<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowMatcher<R> {
    /// Creates a matcher with no rules.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Matches `key` by equality against the accessor's value.
    ///
    /// A list filter matches when the cell equals any of its items; a list
    /// cell matches when it contains the filter value. Comparison uses the
    /// display form, so `Value::Int(3)` matches the string `"3"`.
    #[must_use]
    pub fn field<F>(mut self, key: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.rules.insert(key.into(), Rule::Equals(Arc::new(accessor)));
        self
    }

    /// Adds an accessor to the case-insensitive substring search bound to `key`.
    ///
    /// Call repeatedly with the same key to search several columns; a row
    /// matches when any of them contains the query.
    #[must_use]
    pub fn search<F>(mut self, key: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        let accessor: Accessor<R> = Arc::new(accessor);
        match self.rules.entry(key.into()) {
            Entry::Occupied(mut slot) => {
                if let Rule::Search(accessors) = slot.get_mut() {
                    accessors.push(accessor);
                } else {
                    slot.insert(Rule::Search(vec![accessor]));
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Rule::Search(vec![accessor]));
            }
        }
        self
    }

    /// Matches `key` with an arbitrary predicate, e.g. a date lower bound.
    #[must_use]
    pub fn custom<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R, &Value) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(key.into(), Rule::Custom(Arc::new(predicate)));
        self
    }

    /// Returns `true` if `row` satisfies every non-blank filter that has a rule.
    pub fn matches(&self, row: &R, filters: &FilterState) -> bool {
        filters
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .all(|(key, value)| match self.rules.get(key) {
                Some(Rule::Equals(accessor)) => equals(&accessor(row), value),
                Some(Rule::Search(accessors)) => {
                    let needle = value.to_string().to_lowercase();
                    accessors
                        .iter()
                        .any(|accessor| accessor(row).to_string().to_lowercase().contains(&needle))
                }
                Some(Rule::Custom(predicate)) => predicate(row, value),
                None => true,
            })
    }

    /// Returns the rows that match `filters`, in their original order.
    pub fn apply<'a>(&self, rows: &'a [R], filters: &FilterState) -> Vec<&'a R> {
        rows.iter().filter(|row| self.matches(row, filters)).collect()
    }
}

fn equals(cell: &Value, filter: &Value) -> bool {
    match (cell, filter) {
        (_, Value::List(wanted)) => {
            let cell_items = cell
                .as_list()
                .map_or_else(|| vec![cell.to_string()], <[String]>::to_vec);
            cell_items.iter().any(|item| wanted.contains(item))
        }
        (Value::List(items), wanted) => items.contains(&wanted.to_string()),
        (cell, wanted) => cell.to_string() == wanted.to_string(),
    }
}

impl<R> fmt::Debug for RowMatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.rules.keys().collect();
        keys.sort();
        f.debug_struct("RowMatcher").field("keys", &keys).finish()
    }
}
