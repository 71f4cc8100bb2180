/// Quotes a text value for display inside a rendered list.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote. Backslashes, the chosen quote character and control
/// characters are escaped.
///
/// # Examples
///
/// ```
/// use crate::utils::strings::quote_text;
///
/// assert_eq!(quote_text("cat"), "'cat'");
/// assert_eq!(quote_text("o'possum"), "\"o'possum\"");
/// ```
pub fn quote_text(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(quote);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == quote => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push(quote);
    quoted
}

/// Renders a list of optional text values as a bracketed, comma-separated list.
///
/// Absent values are written as `None`.
///
/// # Examples
///
/// ```
/// use crate::utils::strings::render_list;
///
/// assert_eq!(render_list(&[Some("cat".to_string()), None]), "['cat', None]");
/// assert_eq!(render_list(&[]), "[]");
/// ```
pub fn render_list(items: &[Option<String>]) -> String {
    let rendered = items
        .iter()
        .map(|item| match item {
            Some(text) => quote_text(text),
            None => "None".to_string(),
        })
        .collect::<Vec<String>>();
    format!("[{}]", rendered.join(", "))
}
