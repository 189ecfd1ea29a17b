//! HTML helpers shared by the form and table renderers.

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const BOOLEAN_ATTRS: &[&str] = &["checked", "disabled", "multiple", "readonly", "required", "selected"];

/// Formats attributes as ` key="value"` pairs, in the given order.
///
/// Values are escaped. Boolean attributes such as `disabled` render bare
/// (` disabled`) and their value is ignored.
pub fn render_attrs<K, V>(attrs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    attrs
        .iter()
        .map(|(key, value)| {
            let key = key.as_ref();
            if BOOLEAN_ATTRS.contains(&key) {
                format!(" {key}")
            } else {
                format!(r#" {key}="{}""#, escape_html(value.as_ref()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""x" 'y'"#), "&quot;x&quot; &#x27;y&#x27;");
    }

    #[test]
    fn test_render_attrs() {
        let attrs = [("name", "q"), ("disabled", "yes"), ("value", "\"1\""), ("title", "")];
        assert_eq!(
            render_attrs(&attrs),
            r#" name="q" disabled value="&quot;1&quot;" title="""#
        );
        assert_eq!(render_attrs::<&str, &str>(&[]), "");
    }
}
