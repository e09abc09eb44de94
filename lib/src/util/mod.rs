mod macros;

pub use macros::*;

/// Escapes `&`, `<`, `>`, `"` and `'` so `string` can be placed in element
/// text or a quoted attribute value.
///
/// ```rust
/// use quire::util::escape_html;
///
/// assert_eq!(escape_html("<script>"), "&lt;script&gt;");
/// assert_eq!(escape_html(r#"Tom & "Jerry's""#), "Tom &amp; &quot;Jerry&#39;s&quot;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(string: &str) -> std::borrow::Cow<'_, str> {
    let needs_escape = |b: &u8| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'');
    let Some(first) = string.bytes().position(|b| needs_escape(&b)) else {
        return string.into();
    };

    let mut output = String::with_capacity(string.len() + 16);
    output.push_str(&string[..first]);
    for ch in string[first..].chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }

    output.into()
}
