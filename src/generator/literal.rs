//! Scalar and text literals for the generated Python.

/// Escape text for a double-quoted Python string literal.
///
/// Backslash goes first so the backslashes introduced by later substitutions
/// are not escaped again.
pub fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// `"` + [`escape_literal`] + `"`.
pub fn quote_literal(s: &str) -> String {
    format!("\"{}\"", escape_literal(s))
}

/// A numeric field as a Python number literal.
///
/// The trimmed text is kept when it parses as a finite float (so `1e-3` stays
/// `1e-3`); anything else gives `fallback`.
pub fn number_literal<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    let t = text.trim();
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => t,
        _ => fallback,
    }
}

/// An integer field, or `fallback` when it is not a plain integer.
pub fn integer_literal(text: &str, fallback: i64) -> i64 {
    text.trim().parse::<i64>().unwrap_or(fallback)
}

/// Python spelling of a checkbox/boolean field.
pub fn bool_literal(text: &str) -> &'static str {
    if text.trim().eq_ignore_ascii_case("true") {
        "True"
    } else {
        "False"
    }
}
