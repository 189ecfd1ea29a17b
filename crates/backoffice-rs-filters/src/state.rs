//! The generic filter state manager.
//!
//! The key set is fixed by the initial values passed to
//! [`FilterStateManager::new`]; updates to any other key are ignored.
//! Every accepted update is propagated synchronously to the change callback.
//! There is no debouncing here: callers that hit the server on every change
//! and want to rate-limit must wrap the callback themselves.

use std::collections::BTreeMap;
use std::fmt;

use backoffice_rs_core::Value;

/// The current filter values, keyed by filter name.
pub type FilterState = BTreeMap<String, Value>;

type OnChange = Box<dyn FnMut(&FilterState) + Send>;

/// Returns `true` if `value` counts as an active filter relative to `initial`.
///
/// Lists are active whenever they are non-empty, whatever the initial value
/// was. Every other value is active when it is not blank (null or empty
/// string) and differs from its initial value, so a non-empty default such
/// as a preset sort field never counts as active.
pub fn is_active_value(value: &Value, initial: &Value) -> bool {
    match value {
        Value::List(items) => !items.is_empty(),
        other => !other.is_blank() && other != initial,
    }
}

/// Holds the filter values for one list view.
///
/// # Examples
///
/// ```
/// use backoffice_rs_filters::FilterStateManager;
///
/// let mut filters = FilterStateManager::new([("search", ""), ("status", "")]);
/// filters.update_filter("status", "pending");
/// assert_eq!(filters.active_count(), 1);
/// filters.reset_filters();
/// assert!(!filters.has_active_filters());
/// ```
pub struct FilterStateManager {
    initial: FilterState,
    current: FilterState,
    on_change: Option<OnChange>,
}

impl FilterStateManager {
    /// Creates a manager whose key set and defaults are `initial`.
    pub fn new<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let initial: FilterState = initial
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            current: initial.clone(),
            initial,
            on_change: None,
        }
    }

    /// Registers the callback invoked with the complete state after each change.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&FilterState) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Returns the current filter values.
    pub const fn filters(&self) -> &FilterState {
        &self.current
    }

    /// Returns the values the manager was created with.
    pub const fn initial_values(&self) -> &FilterState {
        &self.initial
    }

    /// Returns the current value of one filter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key)
    }

    /// Replaces one filter value and notifies the change callback.
    ///
    /// Unknown keys are ignored.
    pub fn update_filter(&mut self, key: &str, value: impl Into<Value>) {
        if self.apply(key, value.into()) {
            tracing::debug!(key, "filter updated");
            self.notify();
        }
    }

    /// Merges several filter values and notifies the change callback once.
    ///
    /// Unknown keys are ignored; if no key is known the callback is not invoked.
    pub fn update_filters<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut applied = 0usize;
        for (key, value) in partial {
            if self.apply(key.as_ref(), value.into()) {
                applied += 1;
            }
        }
        if applied > 0 {
            tracing::debug!(count = applied, "filters updated");
            self.notify();
        }
    }

    /// Restores every filter to its initial value and notifies once.
    pub fn reset_filters(&mut self) {
        self.current.clone_from(&self.initial);
        tracing::debug!("filters reset");
        self.notify();
    }

    /// Restores one filter to its initial value.
    pub fn clear_filter(&mut self, key: &str) {
        if let Some(initial) = self.initial.get(key).cloned() {
            self.update_filter(key, initial);
        } else {
            tracing::warn!(key, "ignoring clear of unknown filter key");
        }
    }

    /// Returns `true` if the given filter is active.
    pub fn is_active(&self, key: &str) -> bool {
        match (self.current.get(key), self.initial.get(key)) {
            (Some(value), Some(initial)) => is_active_value(value, initial),
            _ => false,
        }
    }

    /// Returns `true` if any filter is active.
    pub fn has_active_filters(&self) -> bool {
        self.current.keys().any(|key| self.is_active(key))
    }

    /// Returns the number of active filters.
    pub fn active_count(&self) -> usize {
        self.current.keys().filter(|key| self.is_active(key)).count()
    }

    /// Returns the non-blank filters, ready to be sent as query parameters.
    ///
    /// Unlike [`active_count`](Self::active_count) this ignores initial
    /// values: a non-empty default is included.
    pub fn active_filters(&self) -> FilterState {
        self.current
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn apply(&mut self, key: &str, value: Value) -> bool {
        match self.current.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                tracing::warn!(key, "ignoring update of unknown filter key");
                false
            }
        }
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.current);
        }
    }
}

impl fmt::Debug for FilterStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStateManager")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}
