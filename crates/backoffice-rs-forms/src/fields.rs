//! Form field types and descriptors.
//!
//! A [`FieldDescriptor`] is static configuration supplied by the caller: the
//! engine reads it but never mutates it. Descriptors are built with a
//! chained builder starting from [`FieldDescriptor::new`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use backoffice_rs_core::locale::humanize_name;
use backoffice_rs_core::Value;

/// Current form values keyed by field name.
pub type FormValues = BTreeMap<String, Value>;

/// A custom validation function.
///
/// Receives the candidate value and the full current form values, so it can
/// compare fields against each other. Returns an error message or `None`.
pub type FieldValidator = Arc<dyn Fn(&Value, &FormValues) -> Option<String> + Send + Sync>;

/// The closed set of field types the engine knows how to render and validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Date,
    DateTime,
    Time,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
    Hidden,
}

impl FieldType {
    /// Returns the HTML `type` attribute for `<input>`-based fields.
    ///
    /// Textarea, select, and radio fields do not render as a single input
    /// and return `None`.
    pub const fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Password => Some("password"),
            Self::Number => Some("number"),
            Self::Tel => Some("tel"),
            Self::Url => Some("url"),
            Self::Date => Some("date"),
            Self::DateTime => Some("datetime-local"),
            Self::Time => Some("time"),
            Self::Checkbox => Some("checkbox"),
            Self::File => Some("file"),
            Self::Hidden => Some("hidden"),
            Self::Textarea | Self::Select | Self::Radio => None,
        }
    }
}

/// One choice of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The submitted value.
    pub value: String,
    /// The label shown to the user.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Describes one form field.
///
/// # Examples
///
/// ```
/// use backoffice_rs_forms::{FieldDescriptor, FieldType};
///
/// let field = FieldDescriptor::new("from_date", FieldType::Date).required(true);
/// assert_eq!(field.display_label(), "From date");
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
    /// The field name, unique within a form.
    pub name: String,
    /// The field type.
    pub field_type: FieldType,
    /// Explicit label; derived from the name when `None`.
    pub label: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Value used when the caller supplies no initial value for this field.
    pub default_value: Option<Value>,
    /// Choices for select and radio fields.
    pub options: Vec<SelectOption>,
    /// Custom validation, run after the built-in checks.
    pub validate: Option<FieldValidator>,
    /// Help text rendered under the widget.
    pub help_text: Option<String>,
    /// Rendered but not editable.
    pub disabled: bool,
    /// Visible rows of a textarea.
    pub rows: Option<u32>,
    /// Allows several selections (select) or files (file).
    pub multiple: bool,
    /// Accepted file types, e.g. `".pdf,image/*"`.
    pub accept: Option<String>,
    /// Lower bound for number fields.
    pub min: Option<f64>,
    /// Upper bound for number fields.
    pub max: Option<f64>,
    /// Step for number fields.
    pub step: Option<f64>,
}

impl FieldDescriptor {
    /// Creates an optional field with no label, default, or options.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            placeholder: None,
            required: false,
            default_value: None,
            options: Vec::new(),
            validate: None,
            help_text: None,
            disabled: false,
            rows: None,
            multiple: false,
            accept: None,
            min: None,
            max: None,
            step: None,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Appends one choice.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    /// Replaces the choices with `(value, label)` pairs.
    #[must_use]
    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        self
    }

    /// Sets the custom validation function.
    #[must_use]
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value, &FormValues) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validator));
        self
    }

    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub const fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub const fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub const fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Returns the label, or a humanized form of the name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| humanize_name(&self.name))
    }

    /// Returns the value this field holds after the form is cleared.
    pub fn empty_value(&self) -> Value {
        match self.field_type {
            FieldType::Checkbox => Value::Bool(false),
            FieldType::File => Value::List(Vec::new()),
            FieldType::Select if self.multiple => Value::List(Vec::new()),
            _ => Value::String(String::new()),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("options", &self.options)
            .field("validate", &self.validate.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}
