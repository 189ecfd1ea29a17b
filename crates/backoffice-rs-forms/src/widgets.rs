//! HTML rendering of form field widgets.
//!
//! Every field type funnels through [`render_widget`], which picks the
//! element shape for the type. Values and attributes are escaped.

use std::fmt::Write as _;

use backoffice_rs_core::html::{escape_html, render_attrs};
use backoffice_rs_core::Value;

use crate::fields::{FieldDescriptor, FieldType};

/// Returns the `id` attribute used for a field's widget and label.
pub fn widget_id(name: &str) -> String {
    format!("id_{name}")
}

/// Renders the widget for `field` showing `value`.
///
/// `invalid` adds `aria-invalid="true"`.
///
/// # Examples
///
/// ```
/// use backoffice_rs_core::Value;
/// use backoffice_rs_forms::widgets::render_widget;
/// use backoffice_rs_forms::{FieldDescriptor, FieldType};
///
/// let field = FieldDescriptor::new("email", FieldType::Email).required(true);
/// assert_eq!(
///     render_widget(&field, &Value::from("a@b.co"), false),
///     r#"<input type="email" name="email" id="id_email" value="a@b.co" required />"#
/// );
/// ```
pub fn render_widget(field: &FieldDescriptor, value: &Value, invalid: bool) -> String {
    match field.field_type {
        FieldType::Textarea => render_textarea(field, value, invalid),
        FieldType::Select => render_select(field, value, invalid),
        FieldType::Radio => render_radio(field, value),
        FieldType::Checkbox => render_checkbox(field, value, invalid),
        FieldType::File => render_file(field, invalid),
        FieldType::Hidden => format!(
            "<input{} />",
            render_attrs(&[
                ("type", "hidden".to_string()),
                ("name", field.name.clone()),
                ("value", value.to_string()),
            ])
        ),
        other => render_input(field, other.input_type().unwrap_or("text"), value, invalid),
    }
}

fn common_attrs(field: &FieldDescriptor, invalid: bool) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if let Some(placeholder) = &field.placeholder {
        attrs.push(("placeholder", placeholder.clone()));
    }
    if field.required {
        attrs.push(("required", String::new()));
    }
    if field.disabled {
        attrs.push(("disabled", String::new()));
    }
    if invalid {
        attrs.push(("aria-invalid", "true".to_string()));
    }
    attrs
}

fn render_input(field: &FieldDescriptor, input_type: &str, value: &Value, invalid: bool) -> String {
    let mut attrs = vec![
        ("type", input_type.to_string()),
        ("name", field.name.clone()),
        ("id", widget_id(&field.name)),
        ("value", value.to_string()),
    ];
    if field.field_type == FieldType::Number {
        let bounds = [("min", field.min), ("max", field.max), ("step", field.step)];
        attrs.extend(
            bounds
                .into_iter()
                .filter_map(|(key, bound)| bound.map(|b| (key, b.to_string()))),
        );
    }
    attrs.extend(common_attrs(field, invalid));
    format!("<input{} />", render_attrs(&attrs))
}

fn render_textarea(field: &FieldDescriptor, value: &Value, invalid: bool) -> String {
    let mut attrs = vec![("name", field.name.clone()), ("id", widget_id(&field.name))];
    if let Some(rows) = field.rows {
        attrs.push(("rows", rows.to_string()));
    }
    attrs.extend(common_attrs(field, invalid));
    format!(
        "<textarea{}>{}</textarea>",
        render_attrs(&attrs),
        escape_html(&value.to_string())
    )
}

fn render_select(field: &FieldDescriptor, value: &Value, invalid: bool) -> String {
    let selected: Vec<String> = value
        .as_list()
        .map_or_else(|| vec![value.to_string()], <[String]>::to_vec);

    let mut attrs = vec![("name", field.name.clone()), ("id", widget_id(&field.name))];
    if field.multiple {
        attrs.push(("multiple", String::new()));
    }
    attrs.extend(
        common_attrs(field, invalid)
            .into_iter()
            .filter(|(key, _)| *key != "placeholder"),
    );

    let mut html = format!("<select{}>", render_attrs(&attrs));
    if !field.multiple {
        let prompt = field.placeholder.as_deref().unwrap_or("Select...");
        let _ = write!(html, r#"<option value="">{}</option>"#, escape_html(prompt));
    }
    for option in &field.options {
        let mark = if selected.contains(&option.value) { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{mark}>{}</option>"#,
            escape_html(&option.value),
            escape_html(&option.label)
        );
    }
    html.push_str("</select>");
    html
}

fn render_radio(field: &FieldDescriptor, value: &Value) -> String {
    let current = value.to_string();
    let mut html = format!(r#"<div class="radio-group" id="{}">"#, widget_id(&field.name));
    for (index, option) in field.options.iter().enumerate() {
        let mut attrs = vec![
            ("type", "radio".to_string()),
            ("name", field.name.clone()),
            ("id", format!("{}_{index}", widget_id(&field.name))),
            ("value", option.value.clone()),
        ];
        if option.value == current {
            attrs.push(("checked", String::new()));
        }
        if field.disabled {
            attrs.push(("disabled", String::new()));
        }
        let _ = write!(
            html,
            "<label><input{} /> {}</label>",
            render_attrs(&attrs),
            escape_html(&option.label)
        );
    }
    html.push_str("</div>");
    html
}

fn render_checkbox(field: &FieldDescriptor, value: &Value, invalid: bool) -> String {
    let mut attrs = vec![
        ("type", "checkbox".to_string()),
        ("name", field.name.clone()),
        ("id", widget_id(&field.name)),
    ];
    if value.as_bool() == Some(true) {
        attrs.push(("checked", String::new()));
    }
    attrs.extend(common_attrs(field, invalid));
    format!("<input{} />", render_attrs(&attrs))
}

fn render_file(field: &FieldDescriptor, invalid: bool) -> String {
    let mut attrs = vec![
        ("type", "file".to_string()),
        ("name", field.name.clone()),
        ("id", widget_id(&field.name)),
    ];
    if let Some(accept) = &field.accept {
        attrs.push(("accept", accept.clone()));
    }
    if field.multiple {
        attrs.push(("multiple", String::new()));
    }
    attrs.extend(common_attrs(field, invalid));
    format!("<input{} />", render_attrs(&attrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_escapes_value() {
        let field = FieldDescriptor::new("title", FieldType::Text).placeholder("Title");
        let html = render_widget(&field, &Value::from(r#"<a href="x">"#), false);
        assert_eq!(
            html,
            r#"<input type="text" name="title" id="id_title" value="&lt;a href=&quot;x&quot;&gt;" placeholder="Title" />"#
        );
    }

    #[test]
    fn test_empty_value_keeps_attribute() {
        let field = FieldDescriptor::new("title", FieldType::Text);
        assert_eq!(
            render_widget(&field, &Value::Null, true),
            r#"<input type="text" name="title" id="id_title" value="" aria-invalid="true" />"#
        );
    }

    #[test]
    fn test_number_bounds() {
        let field = FieldDescriptor::new("amount", FieldType::Number).min(0.0).step(0.01);
        let html = render_widget(&field, &Value::from("12.5"), false);
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"min="0""#));
        assert!(html.contains(r#"step="0.01""#));
        assert!(!html.contains("max="));
    }

    #[test]
    fn test_select_marks_selected_and_prompt() {
        let field = FieldDescriptor::new("status", FieldType::Select)
            .options([("pending", "Pending"), ("approved", "Approved")]);
        let html = render_widget(&field, &Value::from("approved"), false);
        assert!(html.starts_with(r#"<select name="status" id="id_status">"#));
        assert!(html.contains(r#"<option value="">Select...</option>"#));
        assert!(html.contains(r#"<option value="approved" selected>Approved</option>"#));
        assert!(html.contains(r#"<option value="pending">Pending</option>"#));
    }

    #[test]
    fn test_multi_select() {
        let field = FieldDescriptor::new("tags", FieldType::Select)
            .multiple(true)
            .options([("a", "A"), ("b", "B"), ("c", "C")]);
        let html = render_widget(&field, &Value::from(vec!["a", "c"]), false);
        assert!(html.contains(" multiple"));
        assert_eq!(html.matches(" selected").count(), 2);
        assert!(!html.contains("Select..."));
    }

    #[test]
    fn test_radio_group() {
        let field = FieldDescriptor::new("mode", FieldType::Radio)
            .options([("cash", "Cash"), ("card", "Card")]);
        let html = render_widget(&field, &Value::from("card"), false);
        assert_eq!(html.matches(r#"type="radio""#).count(), 2);
        assert!(html.contains(r#"id="id_mode_1" value="card" checked"#));
    }

    #[test]
    fn test_checkbox_and_textarea() {
        let checkbox = FieldDescriptor::new("billable", FieldType::Checkbox);
        assert!(render_widget(&checkbox, &Value::Bool(true), false).contains(" checked"));
        assert!(!render_widget(&checkbox, &Value::Bool(false), false).contains(" checked"));

        let notes = FieldDescriptor::new("notes", FieldType::Textarea).rows(4);
        assert_eq!(
            render_widget(&notes, &Value::from("a < b"), false),
            r#"<textarea name="notes" id="id_notes" rows="4">a &lt; b</textarea>"#
        );
    }

    #[test]
    fn test_file_and_hidden() {
        let file = FieldDescriptor::new("receipt", FieldType::File)
            .accept(".pdf,image/*")
            .multiple(true);
        let html = render_widget(&file, &Value::Null, false);
        assert!(html.contains(r#"accept=".pdf,image/*""#));
        assert!(html.contains(" multiple"));
        assert!(!html.contains("value="));

        let hidden = FieldDescriptor::new("expense_id", FieldType::Hidden);
        assert_eq!(
            render_widget(&hidden, &Value::Int(42), false),
            r#"<input type="hidden" name="expense_id" value="42" />"#
        );
    }
}
