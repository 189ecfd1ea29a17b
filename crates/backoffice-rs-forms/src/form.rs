//! The form engine.
//!
//! [`FormEngine`] holds the runtime state of one form: `values`, `errors`,
//! and `touched`. Errors and touched flags only ever exist for declared
//! fields. Values start from the caller's initial values, with each field's
//! default filling any key the caller left out.
//!
//! Submission goes through an async [`SubmitHandler`]. Handler failures
//! never escape as panics; they come back as [`FormError::Submit`] after
//! being logged, and the submitting flag is cleared either way.
//!
//! # Examples
//!
//! ```
//! use backoffice_rs_forms::{FieldDescriptor, FieldType, FormConfig, FormEngine, InputEvent};
//!
//! let fields = vec![
//!     FieldDescriptor::new("title", FieldType::Text).required(true),
//!     FieldDescriptor::new("billable", FieldType::Checkbox).default_value(true),
//! ];
//! let mut form = FormEngine::new(fields, FormConfig::default()).unwrap();
//! assert_eq!(form.value("billable").and_then(|v| v.as_bool()), Some(true));
//!
//! form.handle_field_change("billable", &InputEvent::checked(false));
//! assert!(form.is_dirty());
//! assert!(form.validate().is_err());
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use async_trait::async_trait;
use thiserror::Error;

use backoffice_rs_core::html::escape_html;
use backoffice_rs_core::{BackofficeError, BackofficeResult, FieldErrors, ValidationError, Value};

use crate::fields::{FieldDescriptor, FieldType, FormValues};
use crate::validation::validate_field;
use crate::widgets::{render_widget, widget_id};

/// Error messages keyed by field name.
pub type FormErrors = FieldErrors;

/// The error a [`SubmitHandler`] reports, typically from the API client.
pub type SubmitError = BackofficeError;

/// How fields are arranged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormLayout {
    /// One field per row, label above the widget.
    #[default]
    Vertical,
    /// One field per row, label beside the widget.
    Horizontal,
    /// A CSS grid.
    Grid {
        /// Number of columns.
        columns: usize,
        /// CSS gap between cells, e.g. `"1rem"`.
        gap: String,
    },
}

/// Form behavior options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub layout: FormLayout,
    /// Validate a field whenever its value changes.
    pub validate_on_change: bool,
    /// Validate a field when it loses focus.
    pub validate_on_blur: bool,
    /// Validate every field before calling the submit handler.
    pub validate_on_submit: bool,
    /// Restore the initial values after a successful submit.
    pub reset_on_submit: bool,
    /// Empty every field after a successful submit.
    pub clear_on_submit: bool,
    pub submit_label: String,
    pub submitting_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            layout: FormLayout::Vertical,
            validate_on_change: true,
            validate_on_blur: true,
            validate_on_submit: true,
            reset_on_submit: false,
            clear_on_submit: false,
            submit_label: "Submit".to_string(),
            submitting_label: "Submitting...".to_string(),
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn layout(mut self, layout: FormLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    #[must_use]
    pub const fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    #[must_use]
    pub const fn validate_on_submit(mut self, enabled: bool) -> Self {
        self.validate_on_submit = enabled;
        self
    }

    #[must_use]
    pub const fn reset_on_submit(mut self, enabled: bool) -> Self {
        self.reset_on_submit = enabled;
        self
    }

    #[must_use]
    pub const fn clear_on_submit(mut self, enabled: bool) -> Self {
        self.clear_on_submit = enabled;
        self
    }

    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

/// The payload of a change event from a widget.
///
/// Text-like widgets report `value`, checkboxes report `checked`, and file
/// inputs report the selected file names in `files`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputEvent {
    pub value: Value,
    pub checked: bool,
    pub files: Vec<String>,
}

impl InputEvent {
    /// An event from a text-like widget, select, or radio group.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// An event from a checkbox.
    pub fn checked(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    /// An event from a file input.
    pub fn files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Receives the values of a valid form.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Called with the form values once validation passes.
    async fn on_submit(&self, values: &FormValues) -> Result<(), SubmitError>;

    /// Called with the complete error map when submit-time validation fails.
    fn on_validation_error(&self, _errors: &FormErrors) {}
}

/// Why a submission did not succeed.
#[derive(Error, Debug)]
pub enum FormError {
    /// Submit-time validation failed; the handler was not called.
    #[error("{0}")]
    Validation(ValidationError),

    /// A submission is already in flight.
    #[error("Form is already submitting")]
    AlreadySubmitting,

    /// The handler returned an error. Values and errors are left as they were.
    #[error("Submit failed: {0}")]
    Submit(String),
}

/// Runtime state of one form.
#[derive(Debug)]
pub struct FormEngine {
    fields: Vec<FieldDescriptor>,
    config: FormConfig,
    caller_initial: FormValues,
    initial_values: FormValues,
    values: FormValues,
    errors: FormErrors,
    touched: BTreeMap<String, bool>,
    is_submitting: bool,
}

impl FormEngine {
    /// Creates a form over `fields`.
    ///
    /// Fails with [`BackofficeError::EmptyKey`] for a field without a name
    /// and [`BackofficeError::DuplicateField`] when two fields share a name.
    pub fn new(fields: Vec<FieldDescriptor>, config: FormConfig) -> BackofficeResult<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(BackofficeError::EmptyKey("form field list".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(BackofficeError::DuplicateField(field.name.clone()));
            }
        }

        let mut form = Self {
            fields,
            config,
            caller_initial: FormValues::new(),
            initial_values: FormValues::new(),
            values: FormValues::new(),
            errors: FormErrors::new(),
            touched: BTreeMap::new(),
            is_submitting: false,
        };
        form.reinitialize();
        Ok(form)
    }

    /// Sets caller-supplied initial values; see [`set_initial_values`](Self::set_initial_values).
    #[must_use]
    pub fn with_initial_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.set_initial_values(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Replaces the caller-supplied initial values and re-initializes state.
    ///
    /// Caller values win over field defaults. Errors and touched flags are
    /// cleared.
    pub fn set_initial_values(&mut self, values: FormValues) {
        self.caller_initial = values;
        self.reinitialize();
    }

    fn reinitialize(&mut self) {
        let mut initial = self.caller_initial.clone();
        for field in &self.fields {
            if let Some(default) = &field.default_value {
                initial
                    .entry(field.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
        self.values = initial.clone();
        self.initial_values = initial;
        self.errors.clear();
        self.touched.clear();
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the descriptor named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the merged initial values (caller values plus field defaults).
    pub const fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub const fn touched(&self) -> &BTreeMap<String, bool> {
        &self.touched
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// Returns the error to show next to `name`: only once the field is touched.
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    pub const fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Returns `true` if any value differs from the initial values.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    /// Returns `true` if every field currently passes validation.
    ///
    /// Does not touch the stored errors.
    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|field| validate_field(field, self.field_value(field), &self.values).is_none())
    }

    fn field_value(&self, field: &FieldDescriptor) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(&field.name).unwrap_or(&NULL)
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Sets a field value programmatically, validating it when
    /// `validate_on_change` is set. Unknown names are ignored.
    ///
    /// Returns `false` if no field is named `name`.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        if self.field(name).is_none() {
            tracing::warn!(field = name, "ignoring value for unknown form field");
            return false;
        }
        self.values.insert(name.to_string(), value.into());
        if self.config.validate_on_change {
            self.validate_one(name);
        }
        true
    }

    /// Handles a change event: extracts the value by field type, marks the
    /// field touched, and validates it when `validate_on_change` is set.
    pub fn handle_field_change(&mut self, name: &str, event: &InputEvent) {
        let Some(field) = self.field(name) else {
            tracing::warn!(field = name, "change event for unknown form field");
            return;
        };
        let value = match field.field_type {
            FieldType::Checkbox => Value::Bool(event.checked),
            FieldType::File => Value::List(event.files.clone()),
            _ => event.value.clone(),
        };
        self.values.insert(name.to_string(), value);
        self.touched.insert(name.to_string(), true);
        if self.config.validate_on_change {
            self.validate_one(name);
        }
    }

    /// Handles a blur event: marks the field touched and validates it when
    /// `validate_on_blur` is set.
    pub fn handle_field_blur(&mut self, name: &str) {
        if self.field(name).is_none() {
            tracing::warn!(field = name, "blur event for unknown form field");
            return;
        }
        self.touched.insert(name.to_string(), true);
        if self.config.validate_on_blur {
            self.validate_one(name);
        }
    }

    fn validate_one(&mut self, name: &str) {
        let Some(field) = self.field(name) else {
            return;
        };
        let result = validate_field(field, self.field_value(field), &self.values);
        match result {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Validates every field regardless of touched state, marks all fields
    /// touched, and stores the resulting errors.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let errors: FormErrors = self
            .fields
            .iter()
            .filter_map(|field| {
                validate_field(field, self.field_value(field), &self.values)
                    .map(|message| (field.name.clone(), message))
            })
            .collect();
        self.touched = self.fields.iter().map(|f| (f.name.clone(), true)).collect();
        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// Restores the initial values and clears errors and touched flags.
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.errors.clear();
        self.touched.clear();
    }

    /// Empties every field and clears errors and touched flags.
    pub fn clear(&mut self) {
        self.values = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.empty_value()))
            .collect();
        self.errors.clear();
        self.touched.clear();
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Starts a submission: sets the submitting flag, runs submit-time
    /// validation if configured, and returns the values to hand to the
    /// backend.
    ///
    /// On validation failure the flag is cleared again. Pair a successful
    /// call with [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<FormValues, FormError> {
        if self.is_submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.is_submitting = true;
        if self.config.validate_on_submit {
            if let Err(errors) = self.validate() {
                self.is_submitting = false;
                tracing::debug!(%errors, "form submission blocked by validation");
                return Err(FormError::Validation(errors));
            }
        }
        Ok(self.values.clone())
    }

    /// Completes a submission started with [`begin_submit`](Self::begin_submit).
    ///
    /// Always clears the submitting flag. On success, resets or clears the
    /// form as configured; on failure, logs the error and leaves values and
    /// errors as they are.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) -> Result<(), FormError> {
        self.is_submitting = false;
        match outcome {
            Ok(()) => {
                if self.config.reset_on_submit {
                    self.reset();
                } else if self.config.clear_on_submit {
                    self.clear();
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "form submission failed");
                Err(FormError::Submit(err.user_message()))
            }
        }
    }

    /// Runs the whole submission lifecycle against `handler`.
    ///
    /// Validation failures are reported to
    /// [`SubmitHandler::on_validation_error`] with the complete error map and
    /// the handler's `on_submit` is not called.
    pub async fn submit<H>(&mut self, handler: &H) -> Result<(), FormError>
    where
        H: SubmitHandler + ?Sized,
    {
        let values = match self.begin_submit() {
            Ok(values) => values,
            Err(FormError::Validation(errors)) => {
                handler.on_validation_error(&errors.field_errors);
                return Err(FormError::Validation(errors));
            }
            Err(other) => return Err(other),
        };
        let outcome = handler.on_submit(&values).await;
        self.finish_submit(outcome)
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Renders the form as HTML.
    ///
    /// Errors are shown only for touched fields. The submit button is
    /// disabled while a submission is in flight.
    pub fn render_html(&self) -> String {
        let mut html = match &self.config.layout {
            FormLayout::Vertical => r#"<form class="form form-vertical" novalidate>"#.to_string(),
            FormLayout::Horizontal => {
                r#"<form class="form form-horizontal" novalidate>"#.to_string()
            }
            FormLayout::Grid { columns, gap } => format!(
                r#"<form class="form form-grid" style="display: grid; grid-template-columns: repeat({columns}, minmax(0, 1fr)); gap: {}" novalidate>"#,
                escape_html(gap)
            ),
        };

        for field in &self.fields {
            let value = self.field_value(field);
            let error = self.visible_error(&field.name);
            let widget = render_widget(field, value, error.is_some());

            if field.field_type == FieldType::Hidden {
                html.push_str(&widget);
                continue;
            }

            let class = if error.is_some() { "form-field has-error" } else { "form-field" };
            let _ = write!(html, r#"<div class="{class}">"#);
            let label = escape_html(&field.display_label());
            let marker = if field.required { r#"<span class="required">*</span>"# } else { "" };
            if field.field_type == FieldType::Checkbox {
                let _ = write!(html, "<label>{widget} {label}{marker}</label>");
            } else {
                let _ = write!(
                    html,
                    r#"<label for="{}">{label}{marker}</label>{widget}"#,
                    widget_id(&field.name)
                );
            }
            if let Some(help) = &field.help_text {
                let _ = write!(html, r#"<p class="help-text">{}</p>"#, escape_html(help));
            }
            if let Some(message) = error {
                let _ = write!(html, r#"<p class="field-error" role="alert">{}</p>"#, escape_html(message));
            }
            html.push_str("</div>");
        }

        let (label, disabled) = if self.is_submitting {
            (&self.config.submitting_label, " disabled")
        } else {
            (&self.config.submit_label, "")
        };
        let _ = write!(
            html,
            r#"<button type="submit"{disabled}>{}</button></form>"#,
            escape_html(label)
        );
        html
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn expense_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("title", FieldType::Text).required(true),
            FieldDescriptor::new("amount", FieldType::Number).required(true),
            FieldDescriptor::new("email", FieldType::Email),
            FieldDescriptor::new("category", FieldType::Select)
                .options([("travel", "Travel"), ("meals", "Meals")])
                .default_value("travel"),
            FieldDescriptor::new("billable", FieldType::Checkbox).default_value(false),
            FieldDescriptor::new("receipt", FieldType::File),
        ]
    }

    fn form() -> FormEngine {
        FormEngine::new(expense_fields(), FormConfig::default()).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        submitted: Mutex<Vec<FormValues>>,
        rejected: Mutex<Vec<FormErrors>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl SubmitHandler for Recorder {
        async fn on_submit(&self, values: &FormValues) -> Result<(), SubmitError> {
            self.submitted.lock().unwrap().push(values.clone());
            match &self.fail_with {
                Some(message) => Err(BackofficeError::api(message.clone())),
                None => Ok(()),
            }
        }

        fn on_validation_error(&self, errors: &FormErrors) {
            self.rejected.lock().unwrap().push(errors.clone());
        }
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn test_duplicate_field_names_rejected() {
        let fields = vec![
            FieldDescriptor::new("amount", FieldType::Number),
            FieldDescriptor::new("amount", FieldType::Text),
        ];
        let err = FormEngine::new(fields, FormConfig::default()).unwrap_err();
        assert!(matches!(err, BackofficeError::DuplicateField(name) if name == "amount"));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = FormEngine::new(
            vec![FieldDescriptor::new("", FieldType::Text)],
            FormConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_contract_error());
    }

    #[test]
    fn test_initial_values_win_over_defaults() {
        let form = form().with_initial_values([("category", "meals"), ("title", "Taxi")]);
        assert_eq!(form.value("category"), Some(&Value::from("meals")));
        assert_eq!(form.value("title"), Some(&Value::from("Taxi")));
        assert_eq!(form.value("billable"), Some(&Value::Bool(false)));
        assert_eq!(form.value("amount"), None);
        assert!(!form.is_dirty());
    }

    // ── Change and blur ─────────────────────────────────────────────

    #[test]
    fn test_change_extracts_by_field_type() {
        let mut form = form();
        form.handle_field_change("billable", &InputEvent {
            value: Value::from("on"),
            checked: true,
            files: Vec::new(),
        });
        form.handle_field_change("receipt", &InputEvent::files(["taxi.pdf"]));
        form.handle_field_change("title", &InputEvent::value("Taxi"));

        assert_eq!(form.value("billable"), Some(&Value::Bool(true)));
        assert_eq!(form.value("receipt"), Some(&Value::from(vec!["taxi.pdf"])));
        assert_eq!(form.value("title"), Some(&Value::from("Taxi")));
        assert!(form.is_touched("title"));
        assert!(form.is_dirty());
    }

    #[test]
    fn test_change_validates_and_clears_errors() {
        let mut form = form();
        form.handle_field_change("email", &InputEvent::value("nope"));
        assert_eq!(form.visible_error("email"), Some("Please enter a valid email address"));

        form.handle_field_change("email", &InputEvent::value("a@example.com"));
        assert_eq!(form.error("email"), None);
    }

    #[test]
    fn test_validation_timing_flags() {
        let config = FormConfig::default()
            .validate_on_change(false)
            .validate_on_blur(true);
        let mut form = FormEngine::new(expense_fields(), config).unwrap();

        form.handle_field_change("title", &InputEvent::value(""));
        assert!(form.errors().is_empty());

        form.handle_field_blur("title");
        assert_eq!(form.visible_error("title"), Some("Title is required"));
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = form();
        form.set_value("amount", "abc");
        assert_eq!(form.error("amount"), Some("Please enter a valid number"));
        assert_eq!(form.visible_error("amount"), None);
        form.handle_field_blur("amount");
        assert_eq!(form.visible_error("amount"), Some("Please enter a valid number"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut form = form();
        assert!(!form.set_value("nope", "x"));
        form.handle_field_change("nope", &InputEvent::value("x"));
        form.handle_field_blur("nope");
        assert!(form.value("nope").is_none());
        assert!(form.touched().is_empty());
    }

    // ── Validate, reset, clear ──────────────────────────────────────

    #[test]
    fn test_validate_touches_everything() {
        let mut form = form();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors.len(), 2);
        assert_eq!(errors.field_errors["title"], "Title is required");
        assert_eq!(errors.field_errors["amount"], "Amount is required");
        assert_eq!(form.touched().len(), expense_fields().len());
        assert!(!form.is_valid());
        assert!(form.errors().keys().all(|k| form.field(k).is_some()));
    }

    #[test]
    fn test_reset_and_clear() {
        let mut form = form().with_initial_values([("title", "Taxi")]);
        form.handle_field_change("title", &InputEvent::value(""));
        form.reset();
        assert_eq!(form.value("title"), Some(&Value::from("Taxi")));
        assert!(form.errors().is_empty() && form.touched().is_empty());

        form.clear();
        assert_eq!(form.value("title"), Some(&Value::from("")));
        assert_eq!(form.value("billable"), Some(&Value::Bool(false)));
        assert_eq!(form.value("receipt"), Some(&Value::List(Vec::new())));
    }

    // ── Submission ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_submit_blocked_by_validation() {
        let mut form = form();
        let handler = Recorder::default();
        let result = form.submit(&handler).await;

        assert!(matches!(result, Err(FormError::Validation(_))));
        assert!(handler.submitted.lock().unwrap().is_empty());
        assert_eq!(handler.rejected.lock().unwrap().len(), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_success_resets() {
        let config = FormConfig::default().reset_on_submit(true);
        let mut form = FormEngine::new(expense_fields(), config).unwrap();
        form.handle_field_change("title", &InputEvent::value("Hotel"));
        form.handle_field_change("amount", &InputEvent::value("620"));

        let handler = Recorder::default();
        form.submit(&handler).await.unwrap();

        let submitted = handler.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0]["title"], Value::from("Hotel"));
        assert_eq!(form.value("title"), None);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_state() {
        let mut form = form();
        form.handle_field_change("title", &InputEvent::value("Hotel"));
        form.handle_field_change("amount", &InputEvent::value("620"));

        let handler = Recorder {
            fail_with: Some("Failed to create expense".to_string()),
            ..Recorder::default()
        };
        let err = form.submit(&handler).await.unwrap_err();

        assert!(matches!(&err, FormError::Submit(message) if message == "Failed to create expense"));
        assert!(!form.is_submitting());
        assert_eq!(form.value("title"), Some(&Value::from("Hotel")));
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let mut form = FormEngine::new(
            vec![FieldDescriptor::new("note", FieldType::Text)],
            FormConfig::default(),
        )
        .unwrap();
        assert!(form.begin_submit().is_ok());
        assert!(form.is_submitting());
        assert!(matches!(form.begin_submit(), Err(FormError::AlreadySubmitting)));
        assert!(form.render_html().contains(r#"<button type="submit" disabled>Submitting...</button>"#));

        form.finish_submit(Ok(())).unwrap();
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_skip_submit_validation() {
        let config = FormConfig::default().validate_on_submit(false);
        let mut form = FormEngine::new(expense_fields(), config).unwrap();
        assert!(form.begin_submit().is_ok());
    }

    // ── Rendering ───────────────────────────────────────────────────

    #[test]
    fn test_render_grid_with_errors() {
        let config = FormConfig::default().layout(FormLayout::Grid {
            columns: 2,
            gap: "1rem".to_string(),
        });
        let mut form = FormEngine::new(expense_fields(), config).unwrap();
        form.handle_field_blur("title");

        let html = form.render_html();
        assert!(html.contains("grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1rem"));
        assert!(html.contains(r#"<div class="form-field has-error"><label for="id_title">Title<span class="required">*</span></label>"#));
        assert!(html.contains(r#"<p class="field-error" role="alert">Title is required</p>"#));
        assert!(!html.contains("Amount is required"));
        assert!(html.ends_with(r#"<button type="submit">Submit</button></form>"#));
    }
}
