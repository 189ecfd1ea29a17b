//! Column descriptors and cell rendering.
//!
//! Each [`ColumnDescriptor`] reads its cell value from a typed row through
//! an accessor closure and renders it according to its [`ColumnType`].
//! Detail drawers reuse the same descriptors for their label/value pairs.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use backoffice_rs_core::html::escape_html;
use backoffice_rs_core::locale::{format_currency, format_date, humanize_name};
use backoffice_rs_core::{Settings, Value};

use crate::badge::BadgeConfig;

type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
type CustomRender<R> = Arc<dyn Fn(&Value, &R) -> String + Send + Sync>;

/// How a column renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Currency,
    Badge,
    Date,
    Custom,
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell {
    /// Plain text, escaped when rendered.
    Text { text: String },
    /// A styled badge.
    Badge { style: String, label: String },
    /// Markup produced by a custom renderer, inserted as-is.
    Html { html: String },
}

impl Cell {
    /// Returns the cell as plain text (the badge label for badges).
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } => text,
            Self::Badge { label, .. } => label,
            Self::Html { html } => html,
        }
    }

    /// Renders the cell content as HTML.
    pub fn to_html(&self) -> String {
        match self {
            Self::Text { text } => escape_html(text),
            Self::Badge { style, label } => format!(
                r#"<span class="badge badge-{}">{}</span>"#,
                escape_html(style),
                escape_html(label)
            ),
            Self::Html { html } => html.clone(),
        }
    }
}

/// Describes one table column.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::{Settings, Value};
/// use backoffice_rs_table::ColumnDescriptor;
///
/// struct Expense { amount: f64 }
///
/// let column = ColumnDescriptor::new("amount", |e: &Expense| Value::Float(e.amount)).currency();
/// let cell = column.render(&Expense { amount: 1234.5 }, &Settings::default());
/// assert_eq!(cell.text(), "$1,234.50");
/// ```
pub struct ColumnDescriptor<R> {
    key: String,
    label: Option<String>,
    column_type: ColumnType,
    accessor: Accessor<R>,
    badge: Option<BadgeConfig>,
    custom: Option<CustomRender<R>>,
    width: Option<String>,
    align: Align,
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            column_type: self.column_type,
            accessor: Arc::clone(&self.accessor),
            badge: self.badge.clone(),
            custom: self.custom.clone(),
            width: self.width.clone(),
            align: self.align,
        }
    }
}

impl<R> ColumnDescriptor<R> {
    /// Creates a text column reading its value with `accessor`.
    pub fn new<F>(key: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: None,
            column_type: ColumnType::Text,
            accessor: Arc::new(accessor),
            badge: None,
            custom: None,
            width: None,
            align: Align::Left,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Renders as a locale-formatted amount, right-aligned.
    #[must_use]
    pub fn currency(mut self) -> Self {
        self.column_type = ColumnType::Currency;
        self.align = Align::Right;
        self
    }

    /// Renders as a locale date string.
    #[must_use]
    pub fn date(mut self) -> Self {
        self.column_type = ColumnType::Date;
        self
    }

    /// Renders through a badge lookup table.
    #[must_use]
    pub fn badge(mut self, config: BadgeConfig) -> Self {
        self.column_type = ColumnType::Badge;
        self.badge = Some(config);
        self
    }

    /// Renders with `render(cell_value, row)`; the output is inserted as HTML.
    #[must_use]
    pub fn custom<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &R) -> String + Send + Sync + 'static,
    {
        self.column_type = ColumnType::Custom;
        self.custom = Some(Arc::new(render));
        self
    }

    /// Sets a CSS width hint such as `"120px"` or `"20%"`.
    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header label, or a humanized form of the key.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| humanize_name(&self.key))
    }

    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn width_hint(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub const fn alignment(&self) -> Align {
        self.align
    }

    /// Returns the raw cell value for `row`.
    pub fn value(&self, row: &R) -> Value {
        (self.accessor)(row)
    }

    /// Renders the cell for `row`.
    pub fn render(&self, row: &R, settings: &Settings) -> Cell {
        let value = self.value(row);
        match self.column_type {
            ColumnType::Text => Cell::Text {
                text: value.to_string(),
            },
            ColumnType::Currency => Cell::Text {
                text: value
                    .as_f64()
                    .map_or_else(|| value.to_string(), |amount| format_currency(amount, settings)),
            },
            ColumnType::Date => Cell::Text {
                text: format_date(&value, settings),
            },
            ColumnType::Badge => {
                let style = self
                    .badge
                    .as_ref()
                    .map_or_else(|| BadgeConfig::new().resolve(&value), |b| b.resolve(&value));
                Cell::Badge {
                    style: style.style,
                    label: style.label,
                }
            }
            ColumnType::Custom => match &self.custom {
                Some(render) => Cell::Html {
                    html: render(&value, row),
                },
                None => Cell::Text {
                    text: value.to_string(),
                },
            },
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("column_type", &self.column_type)
            .field("badge", &self.badge)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}
