use std::borrow::Cow;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
